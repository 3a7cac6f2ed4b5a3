use {
    crate::{models::error::ModelError, persistence::error::RepositoryError},
    thiserror::Error,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    #[error("Validation error: {0}")]
    Validation(#[from] ModelError),
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}
