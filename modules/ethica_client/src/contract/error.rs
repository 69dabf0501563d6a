use thiserror::Error;

/// Errors surfaced to callers of the client contract
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// The request never produced a response.
    #[error("Request failed: {message}")]
    Transport { message: String },

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Unexpected response: {message}")]
    InvalidPayload { message: String },

    #[error("{message}")]
    Validation { message: String },

    #[error("Internal error")]
    Internal,
}

impl ClientError {
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn invalid_payload(message: impl Into<String>) -> Self {
        Self::InvalidPayload {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn internal() -> Self {
        Self::Internal
    }
}

impl From<crate::domain::error::DomainError> for ClientError {
    fn from(domain_error: crate::domain::error::DomainError) -> Self {
        use crate::domain::error::DomainError::*;
        match domain_error {
            e @ (ImageTooLarge { .. }
            | NotAnImage { .. }
            | DuplicateSkill { .. }
            | InvalidEducationYear { .. }
            | NotEditing
            | ProfileMissing) => Self::validation(e.to_string()),
            Session { .. } => Self::internal(),
        }
    }
}

impl From<modkit::PageError> for ClientError {
    fn from(page_error: modkit::PageError) -> Self {
        use modkit::PageError::*;
        match page_error {
            InvalidCursor => Self::validation("Invalid cursor"),
            InvalidLimit(n) => Self::validation(format!("Invalid limit: {n}")),
        }
    }
}
