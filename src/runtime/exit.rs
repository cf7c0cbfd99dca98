use std::process::ExitCode;

use anyhow::Error;

/// Bundles a runtime error message with an exit code.
#[derive(Debug)]
pub struct RuntimeExit {
    message: String,
    exit_code: ExitCode,
}

impl RuntimeExit {
    /// Any failure exits with code 1; the full cause chain goes to stderr.
    pub fn from_error(err: impl Into<Error>) -> Self {
        let err = err.into();
        Self {
            message: format!("{err:?}"),
            exit_code: ExitCode::FAILURE,
        }
    }

    pub fn report(self) -> ExitCode {
        eprintln!("error: {}", self.message);
        self.exit_code
    }

    pub fn exit_code(&self) -> ExitCode {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
