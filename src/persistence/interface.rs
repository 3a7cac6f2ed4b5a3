use {
    crate::{
        models::{Account, Bank, PixKey, PixKeyKind, Transaction},
        persistence::error::RepositoryError,
    },
    uuid::Uuid,
};

/// Durable store contract for transfer transactions. The engine depends
/// only on this trait and never embeds persistence logic.
pub trait TransactionRepositoryInterface {
    /// First-time write of a new transaction. Fails if the id is already
    /// registered or the store is unreachable.
    fn register(&self, transaction: &Transaction) -> Result<(), RepositoryError>;

    /// Writes the updated state of an existing transaction, typically
    /// after a status transition. Fails if the record does not exist.
    fn save(&self, transaction: &Transaction) -> Result<(), RepositoryError>;

    /// Retrieves a transaction by id with its account and pix key
    /// references resolved.
    fn find(&self, id: Uuid) -> Result<Transaction, RepositoryError>;
}

/// Registry of banks, accounts and pix keys the engine resolves transfer
/// endpoints against.
pub trait PixKeyRepositoryInterface {
    fn add_bank(&self, bank: &Bank) -> Result<(), RepositoryError>;

    fn add_account(&self, account: &Account) -> Result<(), RepositoryError>;

    fn find_account(&self, id: Uuid) -> Result<Account, RepositoryError>;

    fn register_key(&self, pix_key: &PixKey) -> Result<(), RepositoryError>;

    /// Looks a key up by its alias value and kind, the way a transfer
    /// request addresses its destination.
    fn find_key_by_kind(&self, key: &str, kind: PixKeyKind) -> Result<PixKey, RepositoryError>;
}
