// src/infra/errors.rs — Error types for parlor

use thiserror::Error;

/// Everything that can go wrong inside the chat core.
///
/// None of these escape the orchestrator boundary: every failure is captured
/// into the store's single error slot as an [`ErrorRecord`] and surfaced to
/// the presentation layer from there.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChatError {
    // Validation errors
    #[error("Message cannot be empty")]
    EmptyMessage,

    #[error("Message is too long (max {max} characters, got {len})")]
    MessageTooLong { len: usize, max: usize },

    #[error("File size must be less than 50MB")]
    FileTooLarge { size: u64 },

    #[error("File type '{mime}' is not supported")]
    UnsupportedFileType { mime: String },

    #[error("File and image messages require an attachment")]
    AttachmentRequired,

    // Simulated backend
    #[error("AI service temporarily unavailable")]
    ServiceUnavailable,

    // Orchestrator guards
    #[error("A send is already in progress")]
    SendInFlight,

    #[error("No session with id '{id}'")]
    SessionNotFound { id: String },

    #[error("{0}")]
    General(String),

    #[error("An unknown error occurred")]
    Unknown,
}

/// Machine-readable error codes, mirrored into the error banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Validation,
    AiError,
    GeneralError,
    UnknownError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::Validation => write!(f, "VALIDATION"),
            ErrorCode::AiError => write!(f, "AI_ERROR"),
            ErrorCode::GeneralError => write!(f, "GENERAL_ERROR"),
            ErrorCode::UnknownError => write!(f, "UNKNOWN_ERROR"),
        }
    }
}

impl ChatError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ChatError::EmptyMessage
            | ChatError::MessageTooLong { .. }
            | ChatError::FileTooLarge { .. }
            | ChatError::UnsupportedFileType { .. }
            | ChatError::AttachmentRequired => ErrorCode::Validation,
            ChatError::ServiceUnavailable => ErrorCode::AiError,
            ChatError::SendInFlight | ChatError::SessionNotFound { .. } | ChatError::General(_) => {
                ErrorCode::GeneralError
            }
            ChatError::Unknown => ErrorCode::UnknownError,
        }
    }

    pub fn is_validation(&self) -> bool {
        self.code() == ErrorCode::Validation
    }
}

/// What the store actually holds: code + human message + optional detail.
/// At most one is active at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorRecord {
    pub code: ErrorCode,
    pub message: String,
    pub details: Option<String>,
}

impl From<ChatError> for ErrorRecord {
    fn from(err: ChatError) -> Self {
        Self {
            code: err.code(),
            message: err.to_string(),
            details: None,
        }
    }
}

impl ErrorRecord {
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}
