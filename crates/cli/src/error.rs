//! CLI error types

use simpleflags_compiler::{CompilerError, RemoteError, UsageError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Compiler(#[from] CompilerError),

    #[error("{0}")]
    Remote(#[from] RemoteError),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Failed to read input: {0}")]
    Prompt(String),

    #[error("{0}")]
    Message(String),
}

impl From<UsageError> for CliError {
    fn from(e: UsageError) -> Self {
        CliError::Compiler(CompilerError::Usage(e))
    }
}

impl From<dialoguer::Error> for CliError {
    fn from(e: dialoguer::Error) -> Self {
        CliError::Prompt(e.to_string())
    }
}

pub type CliResult<T> = Result<T, CliError>;
