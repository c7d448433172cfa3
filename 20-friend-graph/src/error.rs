use thiserror::Error;

use crate::model::UserId;

/// Failures raised by [`UserService`](crate::service::UserService).
///
/// Operations either succeed completely or return one of these with the store
/// left as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// A required input was absent.
    #[error("Argument '{name}' cannot be null")]
    NullArgument { name: &'static str },

    /// A friend list references a user that does not exist.
    #[error("No user with the ID '{id}' exists")]
    Validation { id: UserId },

    /// The targeted user does not exist.
    #[error("No user with the ID '{id}' exists")]
    NotFound { id: UserId },

    /// Both users exist but no chain of friendships leads from one to the other.
    #[error("Users '{from}' and '{to}' are not connected")]
    NotConnected { from: UserId, to: UserId },

    /// The largest representable id is already taken.
    #[error("No user ids left to allocate")]
    IdsExhausted,
}

impl ServiceError {
    /// Stable name reported as `error_type` in JSON error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::NullArgument { .. } => "NullArgument",
            ServiceError::Validation { .. } => "ValidationError",
            ServiceError::NotFound { .. } => "NotFound",
            ServiceError::NotConnected { .. } => "NotConnected",
            ServiceError::IdsExhausted => "IdsExhausted",
        }
    }
}
