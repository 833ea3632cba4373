use super::commands::{Command, COMMAND_BOX};
use super::form::{read_form, read_line, read_secret, FormInput, LineInput};
use crate::client::CompletionBackend;
use crate::config::{Credential, CredentialSource};
use crate::models::Result;
use crate::renderer::{render_history, render_result, MarkdownRenderer};
use crate::session::{ResponseMode, Session, SubmissionOutcome, ValidationError};
use colored::*;
use rustyline::{config::Configurer, DefaultEditor};
use std::io::{self, Write};
use terminal_size::{terminal_size, Width};
use tracing::info;

const WELCOME_MESSAGE: &str = "# AI Prompt Refiner\n\n\
Refine your instructions for a chat model based on **role**, **context** and **task**.";

pub struct TerminalUI<B> {
    session: Session<B>,
    renderer: MarkdownRenderer,
    editor: DefaultEditor,
    width: usize,
}

impl<B: CompletionBackend> TerminalUI<B> {
    pub fn new(session: Session<B>) -> Result<Self> {
        let width = match terminal_size() {
            Some((Width(w), _)) => (w as usize).saturating_sub(2),
            None => 80,
        };

        let mut editor = DefaultEditor::new()?;
        editor.set_max_history_size(100)?;

        Ok(Self {
            session,
            renderer: MarkdownRenderer::new(width),
            editor,
            width,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        self.show_welcome_message()?;

        if self.session.credential_source() == CredentialSource::Interactive {
            self.prompt_for_key()?;
        }
        self.show_mode();

        loop {
            let prompt = format!("{}", "> ".blue().bold());
            let line = match read_line(&mut self.editor, &prompt)? {
                LineInput::Line(line) => line,
                LineInput::Interrupted => {
                    println!("Use 'exit' to quit");
                    continue;
                }
                LineInput::Eof => break,
            };

            if !line.trim().is_empty() {
                self.editor.add_history_entry(line.trim())?;
            }

            let command = line.parse::<Command>().unwrap_or(Command::Refine);
            match command {
                Command::Exit => break,
                Command::Refine => {
                    if !self.handle_form().await? {
                        break;
                    }
                }
                Command::History => {
                    println!();
                    println!("{}", render_history(&self.renderer, self.session.history()));
                    println!();
                }
                Command::Key => {
                    if self.session.credential_source() == CredentialSource::None {
                        println!("{}", "API keys are disabled; running in mock mode.".yellow());
                    } else {
                        self.prompt_for_key()?;
                        self.show_mode();
                    }
                }
                Command::Clear => {
                    clearscreen::clear()?;
                    self.show_command_box();
                }
                Command::Help => self.show_command_box(),
                Command::Unknown(input) => {
                    println!("{}", format!("Unknown command '{}'. Type `help` for a list.", input).yellow());
                }
            }
        }

        info!(submissions = self.session.history().len(), "session ended");
        Ok(())
    }

    fn show_welcome_message(&self) -> Result<()> {
        clearscreen::clear()?;
        println!("{}", self.renderer.render(WELCOME_MESSAGE).cyan());
        println!();
        self.show_command_box();
        Ok(())
    }

    fn show_command_box(&self) {
        println!("{}", COMMAND_BOX.green());
        println!();
    }

    fn show_mode(&self) {
        let line = match self.session.mode() {
            ResponseMode::Live => format!("Using model {}.", self.session.model()).green(),
            ResponseMode::Mock => "No API key configured: responses are generated locally (mock mode).".yellow(),
        };
        println!("{}", line);
        println!();
    }

    fn prompt_for_key(&mut self) -> Result<()> {
        let prompt = format!("{}", "API key (hidden, Enter to skip): ".bold());
        match read_secret(&prompt)? {
            LineInput::Line(value) => {
                // blank input keeps whatever key is already set
                if let Some(credential) = Credential::new(value) {
                    self.session.set_credential(Some(credential));
                }
            }
            LineInput::Interrupted | LineInput::Eof => {}
        }
        if !self.session.has_credential() && self.session.credential_source().requires_credential() {
            println!("{}", "⚠️ Please enter your API key to use the app.".yellow());
        }
        Ok(())
    }

    /// Returns `false` when input reached end-of-file.
    async fn handle_form(&mut self) -> Result<bool> {
        let request = match read_form(&mut self.editor)? {
            FormInput::Submitted(request) => request,
            FormInput::Cancelled => {
                println!("{}", "Form cancelled.".dimmed());
                return Ok(true);
            }
            FormInput::Eof => return Ok(false),
        };

        print!("{}", "Thinking... (Ctrl-C to cancel)".yellow());
        io::stdout().flush()?;

        let finished = tokio::select! {
            outcome = self.session.submit(request) => Some(outcome),
            _ = tokio::signal::ctrl_c() => None,
        };
        let outcome = match finished {
            Some(outcome) => outcome,
            None => self.session.cancel(),
        };

        print!("\r{}\r", " ".repeat(self.width));
        io::stdout().flush()?;

        match outcome {
            SubmissionOutcome::Succeeded { text, mode } => {
                let title = match mode {
                    ResponseMode::Live => "Refined Output",
                    ResponseMode::Mock => "Refined Output (mock)",
                };
                println!();
                println!("{}", render_result(&self.renderer, &text, title).cyan());
                println!();
            }
            SubmissionOutcome::Rejected(err) => {
                let message = match err {
                    ValidationError::MissingCredential => {
                        format!("{} Use the `key` command to enter it.", err).red()
                    }
                    ValidationError::MissingFields => err.to_string().yellow(),
                };
                println!("{}", message);
                println!();
            }
            SubmissionOutcome::Failed(err) => {
                println!("{}", format!("⚠️ Error: {}", err).red());
                println!();
            }
            SubmissionOutcome::Cancelled => {
                println!("{}", "Request cancelled.".yellow());
                println!();
            }
        }

        Ok(true)
    }
}
