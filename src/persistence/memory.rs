//! In-memory repositories backed by DashMap, for tests and embedders that
//! bring their own durability.

use {
    crate::{
        models::{Account, Bank, PixKey, PixKeyKind, Transaction},
        persistence::{
            error::RepositoryError,
            interface::{PixKeyRepositoryInterface, TransactionRepositoryInterface},
        },
    },
    dashmap::DashMap,
    uuid::Uuid,
};

#[derive(Default)]
pub struct MemoryTransactionRepository {
    transactions: DashMap<Uuid, Transaction>,
}

impl MemoryTransactionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TransactionRepositoryInterface for MemoryTransactionRepository {
    fn register(&self, transaction: &Transaction) -> Result<(), RepositoryError> {
        if self.transactions.contains_key(&transaction.base.id) {
            return Err(RepositoryError::AlreadyRegistered);
        }
        self.transactions
            .insert(transaction.base.id, transaction.clone());
        Ok(())
    }

    fn save(&self, transaction: &Transaction) -> Result<(), RepositoryError> {
        if !self.transactions.contains_key(&transaction.base.id) {
            return Err(RepositoryError::TransactionNotFound);
        }
        self.transactions
            .insert(transaction.base.id, transaction.clone());
        Ok(())
    }

    fn find(&self, id: Uuid) -> Result<Transaction, RepositoryError> {
        match self.transactions.get(&id) {
            Some(entry) => Ok(entry.value().clone()),
            None => Err(RepositoryError::TransactionNotFound),
        }
    }
}

#[derive(Default)]
pub struct MemoryPixKeyRepository {
    banks: DashMap<Uuid, Bank>,
    accounts: DashMap<Uuid, Account>,
    pix_keys: DashMap<Uuid, PixKey>,
}

impl MemoryPixKeyRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PixKeyRepositoryInterface for MemoryPixKeyRepository {
    fn add_bank(&self, bank: &Bank) -> Result<(), RepositoryError> {
        if self.banks.contains_key(&bank.base.id) {
            return Err(RepositoryError::AlreadyRegistered);
        }
        self.banks.insert(bank.base.id, bank.clone());
        Ok(())
    }

    fn add_account(&self, account: &Account) -> Result<(), RepositoryError> {
        if self.accounts.contains_key(&account.base.id) {
            return Err(RepositoryError::AlreadyRegistered);
        }
        self.accounts.insert(account.base.id, account.clone());
        Ok(())
    }

    fn find_account(&self, id: Uuid) -> Result<Account, RepositoryError> {
        match self.accounts.get(&id) {
            Some(entry) => Ok(entry.value().clone()),
            None => Err(RepositoryError::AccountNotFound),
        }
    }

    fn register_key(&self, pix_key: &PixKey) -> Result<(), RepositoryError> {
        if self.pix_keys.contains_key(&pix_key.base.id) {
            return Err(RepositoryError::AlreadyRegistered);
        }
        self.pix_keys.insert(pix_key.base.id, pix_key.clone());
        Ok(())
    }

    fn find_key_by_kind(&self, key: &str, kind: PixKeyKind) -> Result<PixKey, RepositoryError> {
        self.pix_keys
            .iter()
            .find(|entry| entry.key == key && entry.kind == kind)
            .map(|entry| entry.value().clone())
            .ok_or(RepositoryError::PixKeyNotFound)
    }
}
