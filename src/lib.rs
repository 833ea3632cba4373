pub mod client;
pub mod config;
pub mod history;
pub mod mock;
pub mod models;
pub mod prompt;
pub mod renderer;
pub mod session;
pub mod ui;

pub use client::{CompletionBackend, CompletionError, CompletionResult, OpenAiClient};
pub use config::{Config, Credential, CredentialSource};
pub use history::{HistoryEntry, HistoryStore, HISTORY_DISPLAY_LIMIT};
pub use models::{ChatMessage, Error, Result, Speaker};
pub use prompt::{PromptRequest, SYSTEM_INSTRUCTION};
pub use session::{ResponseMode, Session, SubmissionOutcome, SubmissionState, ValidationError};
