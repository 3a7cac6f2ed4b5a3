use {
    crate::{models::Transaction, transfer::error::TransferError},
    uuid::Uuid,
};

pub trait TransferInterface {
    /// Resolves the destination key and source account, builds a pending
    /// transaction and persists it.
    fn register(
        &self,
        account_from_id: Uuid,
        amount: f64,
        pix_key: &str,
        kind: &str,
        description: Option<String>,
    ) -> Result<Transaction, TransferError>;

    /// Marks a stored transaction as completed and saves the new state.
    fn complete(&self, transaction_id: Uuid) -> Result<Transaction, TransferError>;

    /// Marks a stored transaction as confirmed and saves the new state.
    fn confirm(&self, transaction_id: Uuid) -> Result<Transaction, TransferError>;

    /// Moves a stored transaction to the error state, recording the reason.
    fn cancel(&self, transaction_id: Uuid, reason: &str) -> Result<Transaction, TransferError>;
}
