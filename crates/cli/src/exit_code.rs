// Consistent exit codes for the scriptcast CLI.
//
//   0 = success
//   1 = general error
//   2 = usage/argument/config error
//   3 = output directory does not exist

use std::process;

use scriptcast_core::ScriptError;

use crate::commands::options::UsageError;

/// Named exit codes for the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,
    Error = 1,
    Usage = 2,
    InvalidDirectory = 3,
}

impl ExitCode {
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Map an anyhow error to an exit code by inspecting the error chain.
    pub fn from_error(err: &anyhow::Error) -> Self {
        for cause in err.chain() {
            if cause.downcast_ref::<UsageError>().is_some() {
                return Self::Usage;
            }
            if let Some(script_err) = cause.downcast_ref::<ScriptError>() {
                return match script_err {
                    ScriptError::InvalidDirectory(_) => Self::InvalidDirectory,
                    ScriptError::Write { .. } | ScriptError::MissingName => Self::Error,
                };
            }
        }
        Self::Error
    }
}

impl From<ExitCode> for process::ExitCode {
    fn from(code: ExitCode) -> Self {
        process::ExitCode::from(code.code() as u8)
    }
}
