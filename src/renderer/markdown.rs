use crate::renderer::SyntaxCache;
use pulldown_cmark::{CodeBlockKind, Event, Parser, Tag};
use syntect::easy::HighlightLines;
use syntect::util::{as_24_bit_terminal_escaped, LinesWithEndings};
use textwrap::{wrap, Options};

const BOLD: &str = "\x1B[1m";
const BOLD_OFF: &str = "\x1B[22m";
const ITALIC: &str = "\x1B[3m";
const ITALIC_OFF: &str = "\x1B[23m";
const RESET: &str = "\x1B[0m";

/// Renders model output (markdown) as wrapped terminal text.
pub struct MarkdownRenderer {
    width: usize,
    highlight_code: bool,
}

impl MarkdownRenderer {
    pub fn new(width: usize) -> Self {
        Self {
            width: width.max(20),
            highlight_code: true,
        }
    }

    /// Renderer without escape codes in code blocks, for tests and dumb terminals.
    pub fn plain(width: usize) -> Self {
        Self {
            highlight_code: false,
            ..Self::new(width)
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn render(&self, text: &str) -> String {
        let mut output = String::new();
        let mut paragraph = String::new();
        // one counter per open list; `None` for bullet lists
        let mut lists: Vec<Option<u64>> = Vec::new();
        let mut code_language: Option<String> = None;
        let mut quote_depth = 0usize;

        for event in Parser::new(text) {
            match event {
                Event::Start(Tag::Heading(..)) => {
                    self.flush(&mut output, &mut paragraph, lists.len(), quote_depth);
                    paragraph.push_str(BOLD);
                }
                Event::End(Tag::Heading(..)) => {
                    paragraph.push_str(BOLD_OFF);
                    self.flush(&mut output, &mut paragraph, 0, quote_depth);
                    output.push('\n');
                }
                Event::Start(Tag::Paragraph) => {
                    self.flush(&mut output, &mut paragraph, lists.len(), quote_depth);
                }
                Event::End(Tag::Paragraph) => {
                    self.flush(&mut output, &mut paragraph, lists.len(), quote_depth);
                    if lists.is_empty() {
                        output.push('\n');
                    }
                }
                Event::Start(Tag::BlockQuote) => {
                    self.flush(&mut output, &mut paragraph, lists.len(), quote_depth);
                    quote_depth += 1;
                }
                Event::End(Tag::BlockQuote) => {
                    quote_depth = quote_depth.saturating_sub(1);
                }
                Event::Start(Tag::List(start)) => {
                    self.flush(&mut output, &mut paragraph, lists.len(), quote_depth);
                    lists.push(start);
                }
                Event::End(Tag::List(_)) => {
                    lists.pop();
                    if lists.is_empty() {
                        output.push('\n');
                    }
                }
                Event::Start(Tag::Item) => {
                    self.flush(&mut output, &mut paragraph, lists.len(), quote_depth);
                    let marker = match lists.last_mut() {
                        Some(Some(n)) => {
                            let marker = format!("{}. ", n);
                            *n += 1;
                            marker
                        }
                        _ => "• ".to_string(),
                    };
                    paragraph.push_str(&marker);
                }
                Event::End(Tag::Item) => {
                    self.flush(&mut output, &mut paragraph, lists.len(), quote_depth);
                }
                Event::Start(Tag::CodeBlock(kind)) => {
                    self.flush(&mut output, &mut paragraph, lists.len(), quote_depth);
                    code_language = Some(match kind {
                        CodeBlockKind::Fenced(lang) => lang.split_whitespace().next().unwrap_or("").to_string(),
                        CodeBlockKind::Indented => String::new(),
                    });
                }
                Event::End(Tag::CodeBlock(_)) => {
                    code_language = None;
                    output.push('\n');
                }
                Event::Start(Tag::Emphasis) => paragraph.push_str(ITALIC),
                Event::End(Tag::Emphasis) => paragraph.push_str(ITALIC_OFF),
                Event::Start(Tag::Strong) => paragraph.push_str(BOLD),
                Event::End(Tag::Strong) => paragraph.push_str(BOLD_OFF),
                Event::Code(code) => {
                    paragraph.push('`');
                    paragraph.push_str(&code);
                    paragraph.push('`');
                }
                Event::Text(text) => match &code_language {
                    Some(language) => self.push_code(&mut output, &text, language),
                    None => paragraph.push_str(&text),
                },
                Event::SoftBreak => paragraph.push(' '),
                Event::HardBreak => {
                    self.flush(&mut output, &mut paragraph, lists.len(), quote_depth);
                }
                Event::Rule => {
                    self.flush(&mut output, &mut paragraph, lists.len(), quote_depth);
                    output.push_str(&format!("  {}\n\n", "─".repeat(self.width.saturating_sub(4))));
                }
                _ => {}
            }
        }

        self.flush(&mut output, &mut paragraph, lists.len(), quote_depth);
        output.trim_end().to_string()
    }

    fn flush(&self, output: &mut String, current: &mut String, list_depth: usize, quote_depth: usize) {
        if current.trim().is_empty() {
            current.clear();
            return;
        }

        let quote = "│ ".repeat(quote_depth);
        let nesting = "  ".repeat(list_depth.saturating_sub(1));
        let initial = format!("  {}{}", quote, nesting);
        // wrapped list lines line up with the text after the marker
        let subsequent = if list_depth > 0 {
            format!("{}  ", initial)
        } else {
            initial.clone()
        };

        let options = Options::new(self.width)
            .initial_indent(&initial)
            .subsequent_indent(&subsequent);
        for line in wrap(current, &options) {
            output.push_str(&line);
            output.push('\n');
        }
        current.clear();
    }

    fn push_code(&self, output: &mut String, code: &str, language: &str) {
        let cache = self.highlight_code.then(SyntaxCache::global);
        let (cache, theme) = match cache.and_then(|c| c.theme().map(|t| (c, t))) {
            Some(pair) => pair,
            None => {
                for line in code.lines() {
                    output.push_str("    ");
                    output.push_str(line);
                    output.push('\n');
                }
                return;
            }
        };

        let mut highlighter = HighlightLines::new(cache.syntax_for(language), theme);
        for line in LinesWithEndings::from(code) {
            output.push_str("    ");
            match highlighter.highlight_line(line, &cache.syntax_set) {
                Ok(ranges) => {
                    output.push_str(&as_24_bit_terminal_escaped(&ranges[..], false));
                    output.push_str(RESET);
                }
                Err(_) => output.push_str(line),
            }
        }
        if !output.ends_with('\n') {
            output.push('\n');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip_escapes(text: &str) -> String {
        let mut out = String::new();
        let mut chars = text.chars();
        while let Some(c) = chars.next() {
            if c == '\x1B' {
                for c in chars.by_ref() {
                    if c.is_ascii_alphabetic() {
                        break;
                    }
                }
            } else {
                out.push(c);
            }
        }
        out
    }

    #[test]
    fn renders_sections_and_bullets() {
        let renderer = MarkdownRenderer::plain(80);
        let text = "### Refined Prompt\n\nYou are a coach.\n\n### Assumptions Made\n\n- short\n- simple";
        let rendered = strip_escapes(&renderer.render(text));

        assert!(rendered.contains("  Refined Prompt\n"));
        assert!(rendered.contains("  You are a coach."));
        assert!(rendered.contains("  • short\n"));
        assert!(rendered.contains("  • simple"));
    }

    #[test]
    fn numbers_ordered_lists() {
        let renderer = MarkdownRenderer::plain(80);
        let rendered = strip_escapes(&renderer.render("1. first\n2. second\n3. third"));
        assert!(rendered.contains("1. first"));
        assert!(rendered.contains("2. second"));
        assert!(rendered.contains("3. third"));
    }

    #[test]
    fn wraps_long_paragraphs() {
        let renderer = MarkdownRenderer::plain(30);
        let rendered = renderer.render(&"word ".repeat(40));
        assert!(rendered.lines().count() > 1);
        assert!(rendered.lines().all(|line| line.chars().count() <= 30));
    }

    #[test]
    fn plain_code_blocks_are_indented_verbatim() {
        let renderer = MarkdownRenderer::plain(80);
        let rendered = renderer.render("```rust\nfn main() {}\n```");
        assert_eq!(rendered, "    fn main() {}");
    }
}
