use crate::models::Result;
use crate::prompt::PromptRequest;
use colored::*;
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::history::DefaultHistory;
use rustyline::{Completer, DefaultEditor, Editor, Helper, Hinter, Validator};
use std::borrow::Cow;

/// Result of reading one line from the terminal.
pub enum LineInput {
    Line(String),
    Interrupted,
    Eof,
}

pub enum FormInput {
    Submitted(PromptRequest),
    Cancelled,
    Eof,
}

pub fn read_line(editor: &mut DefaultEditor, prompt: &str) -> Result<LineInput> {
    match editor.readline(prompt) {
        Ok(line) => Ok(LineInput::Line(line)),
        Err(ReadlineError::Interrupted) => Ok(LineInput::Interrupted),
        Err(ReadlineError::Eof) => Ok(LineInput::Eof),
        Err(err) => Err(err.into()),
    }
}

/// Reads lines until an empty one. `Interrupted` and `Eof` are passed through.
fn read_multiline(editor: &mut DefaultEditor, label: &str) -> Result<LineInput> {
    println!("{}", label.bold());
    let mut lines = Vec::new();
    loop {
        match read_line(editor, &format!("{}", "… ".dimmed()))? {
            LineInput::Line(line) if line.trim().is_empty() => break,
            LineInput::Line(line) => lines.push(line),
            other => return Ok(other),
        }
    }
    Ok(LineInput::Line(lines.join("\n")))
}

/// Prompts for Role, Context and Task. Ctrl-C at any point cancels the form.
pub fn read_form(editor: &mut DefaultEditor) -> Result<FormInput> {
    println!("{}", "(Ctrl-C cancels the form)".dimmed());

    let role = match read_line(editor, &format!("{}", "Role: ".bold()))? {
        LineInput::Line(line) => line.trim().to_string(),
        LineInput::Interrupted => return Ok(FormInput::Cancelled),
        LineInput::Eof => return Ok(FormInput::Eof),
    };

    let context = match read_multiline(editor, "Context (optional, finish with an empty line):")? {
        LineInput::Line(text) => text,
        LineInput::Interrupted => return Ok(FormInput::Cancelled),
        LineInput::Eof => return Ok(FormInput::Eof),
    };

    let task = match read_multiline(editor, "Task (finish with an empty line):")? {
        LineInput::Line(text) => text,
        LineInput::Interrupted => return Ok(FormInput::Cancelled),
        LineInput::Eof => return Ok(FormInput::Eof),
    };

    Ok(FormInput::Submitted(PromptRequest::new(role, context, task)))
}

/// Echoes `*` for every typed character.
#[derive(Completer, Helper, Hinter, Validator)]
struct MaskingHighlighter;

impl Highlighter for MaskingHighlighter {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Owned("*".repeat(line.chars().count()))
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

/// Reads a secret without echoing it. The input is never added to history.
pub fn read_secret(prompt: &str) -> Result<LineInput> {
    let mut editor: Editor<MaskingHighlighter, DefaultHistory> = Editor::new()?;
    editor.set_helper(Some(MaskingHighlighter));
    match editor.readline(prompt) {
        Ok(line) => Ok(LineInput::Line(line)),
        Err(ReadlineError::Interrupted) => Ok(LineInput::Interrupted),
        Err(ReadlineError::Eof) => Ok(LineInput::Eof),
        Err(err) => Err(err.into()),
    }
}
