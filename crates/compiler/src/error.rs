/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */
use thiserror::Error;

/// Top-level error type for the instruction compiler
#[derive(Error, Debug)]
pub enum CompilerError {
    #[error("{0}")]
    Usage(#[from] UsageError),

    #[error("no environments defined for account '{account}'")]
    NoEnvironmentsDefined { account: String },

    #[error("{0}")]
    Remote(#[from] RemoteError),
}

pub type CompilerResult<T> = Result<T, CompilerError>;

/// Errors in the way a command was invoked.
///
/// These are always detected before a mutating call reaches the remote
/// service and are never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    #[error("environment -e or --env flag is required")]
    MissingEnvironment,

    #[error("cannot set on and off flags in same command")]
    ConflictingOnOff,

    #[error("{field} is required, provide it with {hint}")]
    MissingField {
        field: &'static str,
        hint: &'static str,
    },

    #[error("passwords mismatch")]
    PasswordMismatch,

    #[error("invalid argument '{raw}': {reason}")]
    MalformedArgument { raw: String, reason: String },
}

/// Coarse classification of a remote failure, derived from the HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCategory {
    NotFound,
    Conflict,
    Unauthorized,
    Forbidden,
    Validation,
    Server,
    Timeout,
    Transport,
    Other,
}

/// Errors reported by the remote API boundary.
///
/// `NotFound` is kept apart from every other variant because it drives
/// create-vs-patch routing; transport, auth and timeout failures must abort
/// the command instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("validation failed ({status}): {message}")]
    Validation { status: u16, message: String },

    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("network error: {0}")]
    Transport(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Refused before sending: the request could not be addressed safely.
    #[error("invalid request path: {0}")]
    InvalidPath(String),
}

impl RemoteError {
    /// Map an HTTP status code and response message onto a remote error.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            404 => RemoteError::NotFound(message),
            409 => RemoteError::Conflict(message),
            401 => RemoteError::Unauthorized(message),
            403 => RemoteError::Forbidden(message),
            400 | 422 => RemoteError::Validation { status, message },
            500..=599 => RemoteError::Server { status, message },
            _ => RemoteError::Api { status, message },
        }
    }

    pub fn category(&self) -> StatusCategory {
        match self {
            RemoteError::NotFound(_) => StatusCategory::NotFound,
            RemoteError::Conflict(_) => StatusCategory::Conflict,
            RemoteError::Unauthorized(_) => StatusCategory::Unauthorized,
            RemoteError::Forbidden(_) => StatusCategory::Forbidden,
            RemoteError::Validation { .. } => StatusCategory::Validation,
            RemoteError::Server { .. } => StatusCategory::Server,
            RemoteError::Timeout(_) => StatusCategory::Timeout,
            RemoteError::Transport(_) => StatusCategory::Transport,
            RemoteError::Api { .. }
            | RemoteError::InvalidResponse(_)
            | RemoteError::InvalidPath(_) => StatusCategory::Other,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, RemoteError::NotFound(_))
    }
}

pub type RemoteResult<T> = Result<T, RemoteError>;
