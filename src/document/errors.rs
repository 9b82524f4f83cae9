use thiserror::Error;

use crate::backend::BackendError;

/// Typed failures of gateway operations
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DocumentError {
    #[error("User {user_id} does not have access to document {room_id}")]
    AccessDenied { room_id: String, user_id: String },

    #[error("Cannot remove {email}: they own document {room_id}")]
    OwnerProtection { room_id: String, email: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Collaboration service error: {0}")]
    Remote(#[from] BackendError),
}

impl DocumentError {
    /// True when the failure originated in the remote service
    pub fn is_remote(&self) -> bool {
        matches!(self, DocumentError::Remote(_))
    }
}
