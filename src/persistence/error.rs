use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("Record is already registered")]
    AlreadyRegistered,
    #[error("Account not found")]
    AccountNotFound,
    #[error("Pix key not found")]
    PixKeyNotFound,
    #[error("Transaction not found")]
    TransactionNotFound,
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<rusqlite::Error> for RepositoryError {
    fn from(e: rusqlite::Error) -> Self {
        RepositoryError::Storage(e.to_string())
    }
}
