//! Domain error type for store transitions.
//!
//! Every variant is an expected outcome shown to the end user; none of them
//! is fatal and none leaves the state partially updated.

use crate::gate::GateCheck;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecognitionError {
    /// Bad input shape: recipients, message, chain parent
    #[error("{}", .0.reason_or_default())]
    InvalidInput(GateCheck),

    /// Anti-gaming rule rejected the recognition
    #[error("{}", .0.reason_or_default())]
    Rejected(GateCheck),

    #[error("User not found")]
    UserNotFound(String),

    #[error("Recognition not found")]
    RecognitionNotFound(String),

    #[error("Notification not found")]
    NotificationNotFound(String),
}

impl RecognitionError {
    /// The gate result behind a validation or anti-gaming rejection.
    pub fn check(&self) -> Option<&GateCheck> {
        match self {
            RecognitionError::InvalidInput(check) | RecognitionError::Rejected(check) => {
                Some(check)
            }
            _ => None,
        }
    }
}
