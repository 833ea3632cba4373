//! One interactive session: validation, dispatch to the live backend or the
//! mock responder, and the history of successful submissions.

use crate::client::{CompletionBackend, CompletionError};
use crate::config::{Config, Credential, CredentialSource};
use crate::history::{HistoryEntry, HistoryStore};
use crate::mock::mock;
use crate::prompt::{self, PromptRequest, SYSTEM_INSTRUCTION};
use std::fmt;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("API key required.")]
    MissingCredential,
    #[error("Role and Task are required.")]
    MissingFields,
}

/// Where a successful result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseMode {
    Live,
    Mock,
}

impl fmt::Display for ResponseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseMode::Live => f.write_str("live"),
            ResponseMode::Mock => f.write_str("mock"),
        }
    }
}

/// Stages a submission passes through. Each submission starts at `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Validating,
    Rejected,
    Dispatching,
    Succeeded,
    Failed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Succeeded { text: String, mode: ResponseMode },
    Rejected(ValidationError),
    Failed(CompletionError),
    /// The in-flight call was abandoned; nothing was recorded.
    Cancelled,
}

impl SubmissionOutcome {
    /// Terminal state reached by this outcome.
    pub fn state(&self) -> SubmissionState {
        match self {
            SubmissionOutcome::Succeeded { .. } => SubmissionState::Succeeded,
            SubmissionOutcome::Rejected(_) => SubmissionState::Rejected,
            SubmissionOutcome::Failed(_) => SubmissionState::Failed,
            SubmissionOutcome::Cancelled => SubmissionState::Cancelled,
        }
    }
}

pub struct Session<B> {
    backend: B,
    source: CredentialSource,
    credential: Option<Credential>,
    model: String,
    temperature: f32,
    system_prompt: String,
    history: HistoryStore,
    state: SubmissionState,
}

impl<B: CompletionBackend> Session<B> {
    pub fn new(config: Config, backend: B) -> Self {
        Self {
            backend,
            source: config.credential_source,
            credential: config.credential,
            model: config.model,
            temperature: config.temperature,
            system_prompt: config
                .system_prompt
                .unwrap_or_else(|| SYSTEM_INSTRUCTION.to_string()),
            history: HistoryStore::new(),
            state: SubmissionState::Idle,
        }
    }

    pub fn credential_source(&self) -> CredentialSource {
        self.source
    }

    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    /// Replaces the key, e.g. after the user typed a new one. `None` clears it.
    /// Ignored when the session is configured to never use a key.
    pub fn set_credential(&mut self, credential: Option<Credential>) {
        if self.source == CredentialSource::None {
            return;
        }
        self.credential = credential;
    }

    /// Mode the next valid submission would run in.
    pub fn mode(&self) -> ResponseMode {
        if self.credential.is_some() {
            ResponseMode::Live
        } else {
            ResponseMode::Mock
        }
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Runs one submission to completion and returns to `Idle`.
    pub async fn submit(&mut self, request: PromptRequest) -> SubmissionOutcome {
        let outcome = self.run(request).await;
        self.state = SubmissionState::Idle;
        outcome
    }

    /// Abandons a submission whose `submit` future was dropped before it
    /// finished. History is only written on success, so it is untouched.
    pub fn cancel(&mut self) -> SubmissionOutcome {
        if self.state != SubmissionState::Idle {
            info!(from = ?self.state, "submission cancelled");
        }
        self.state = SubmissionState::Idle;
        SubmissionOutcome::Cancelled
    }

    async fn run(&mut self, request: PromptRequest) -> SubmissionOutcome {
        self.state = SubmissionState::Validating;
        if let Err(err) = self.validate(&request) {
            warn!(reason = %err, "submission rejected");
            self.state = SubmissionState::Rejected;
            return SubmissionOutcome::Rejected(err);
        }

        self.state = SubmissionState::Dispatching;
        let mode = self.mode();
        info!(%mode, model = %self.model, "dispatching submission");

        let result = match &self.credential {
            Some(credential) => {
                let (system, user) = prompt::build_with_instruction(&request, &self.system_prompt);
                self.backend
                    .complete(&[system, user], credential, &self.model, self.temperature)
                    .await
            }
            None => Ok(mock(&request)),
        };

        match result {
            Ok(text) => {
                info!(%mode, chars = text.len(), "completion succeeded");
                self.history.append(HistoryEntry {
                    role: request.role,
                    task: request.task,
                    output: text.clone(),
                });
                self.state = SubmissionState::Succeeded;
                SubmissionOutcome::Succeeded { text, mode }
            }
            Err(err) => {
                warn!(error = %err, "completion failed");
                self.state = SubmissionState::Failed;
                SubmissionOutcome::Failed(err)
            }
        }
    }

    fn validate(&self, request: &PromptRequest) -> Result<(), ValidationError> {
        if self.source.requires_credential() && self.credential.is_none() {
            return Err(ValidationError::MissingCredential);
        }
        if !request.has_required_fields() {
            return Err(ValidationError::MissingFields);
        }
        Ok(())
    }
}
