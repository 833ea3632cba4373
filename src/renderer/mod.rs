mod markdown;
mod panel;
mod syntax;

pub use markdown::MarkdownRenderer;
pub use panel::{render_history, render_result, EMPTY_HISTORY};
pub use syntax::SyntaxCache;
