use thiserror::Error;

/// Invariant violations detected at construction or after a transition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("the amount must be greater than 0")]
    NonPositiveAmount,
    #[error("the source and destination account cannot be the same")]
    SameAccountTransfer,
    #[error("invalid key kind: {0}")]
    InvalidKeyKind(String),
    #[error("invalid status: {0}")]
    InvalidStatus(String),
    #[error("invalid key status: {0}")]
    InvalidKeyStatus(String),
    #[error("{0} is required")]
    RequiredField(&'static str),
}
