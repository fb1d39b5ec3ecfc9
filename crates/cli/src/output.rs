// Result rendering: plain text for terminals, one JSON object per line otherwise.

use scriptcast_core::ScriptError;
use serde::Serialize;
use std::io::{self, IsTerminal, Write};

use crate::commands::options::UsageError;

const ANSI_RED: &str = "\x1b[31m";
const ANSI_RESET: &str = "\x1b[0m";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

impl OutputFormat {
    /// `--json` wins; otherwise text only when stdout is a terminal.
    pub fn detect(json_flag: bool) -> Self {
        if json_flag {
            Self::Json
        } else {
            Self::detect_from_terminal(io::stdout().is_terminal())
        }
    }

    pub fn detect_from_terminal(is_tty: bool) -> Self {
        match is_tty {
            true => Self::Human,
            false => Self::Json,
        }
    }
}

pub fn print_output<T, F>(format: OutputFormat, value: &T, render_text: F) -> io::Result<()>
where
    T: Serialize + ?Sized,
    F: FnOnce(&T) -> String,
{
    write_output(&mut io::stdout().lock(), format, value, render_text)
}

/// Render `value` into `writer`; `render_text` runs only for [`OutputFormat::Human`].
pub fn write_output<W, T, F>(
    writer: &mut W,
    format: OutputFormat,
    value: &T,
    render_text: F,
) -> io::Result<()>
where
    W: Write,
    T: Serialize + ?Sized,
    F: FnOnce(&T) -> String,
{
    if format == OutputFormat::Human {
        return writeln!(writer, "{}", render_text(value));
    }
    serde_json::to_writer(&mut *writer, value).map_err(io::Error::other)?;
    writeln!(writer)
}

/// Write an error to stderr in the selected format.
pub fn print_error(format: OutputFormat, code: &str, message: &str) {
    let mut err = io::stderr().lock();
    match format {
        OutputFormat::Human => {
            let line =
                render_human_stderr_line("error", message, io::stderr().is_terminal(), ANSI_RED);
            let _ = writeln!(err, "{line}");
        }
        OutputFormat::Json => {
            let obj = serde_json::json!({
                "error": {
                    "code": code,
                    "message": message,
                }
            });
            let _ = serde_json::to_writer(&mut err, &obj);
            let _ = writeln!(err);
        }
    }
}

/// Print a mapped error for a command failure.
pub fn print_anyhow_error(format: OutputFormat, error: &anyhow::Error) {
    let (code, message) = error_code(error);
    print_error(format, code, &message);
}

fn error_code(error: &anyhow::Error) -> (&'static str, String) {
    let message = format!("{error:#}");
    for cause in error.chain() {
        if cause.downcast_ref::<UsageError>().is_some() {
            return ("USAGE", message);
        }
        if let Some(script_err) = cause.downcast_ref::<ScriptError>() {
            let code = match script_err {
                ScriptError::InvalidDirectory(_) => "INVALID_DIRECTORY",
                ScriptError::Write { .. } => "WRITE_FAILED",
                ScriptError::MissingName => "INTERNAL",
            };
            return (code, message);
        }
    }
    ("ERROR", message)
}

fn render_human_stderr_line(label: &str, message: &str, is_tty: bool, color: &str) -> String {
    if is_tty {
        format!("{color}{label}:{ANSI_RESET} {message}")
    } else {
        format!("{label}: {message}")
    }
}
