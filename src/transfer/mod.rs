//! Transfer use-case: orchestrates entity construction, status transitions
//! and persistence through the repository contracts.

pub mod error;
pub mod interface;

use {
    crate::{
        measure,
        metrics::{
            TRANSFER_REGISTER_TIME_SECONDS, TRANSFER_TRANSITION_TIME_SECONDS,
            TRANSFERS_CANCELLED_TOTAL, TRANSFERS_COMPLETED_TOTAL, TRANSFERS_CONFIRMED_TOTAL,
            TRANSFERS_FAILED_TOTAL, TRANSFERS_REGISTERED_TOTAL,
        },
        models::{ModelError, PixKeyKind, Transaction},
        persistence::interface::{PixKeyRepositoryInterface, TransactionRepositoryInterface},
        transfer::{error::TransferError, interface::TransferInterface},
    },
    std::sync::Arc,
    tracing::{info, warn},
    uuid::Uuid,
};

pub struct TransferUseCase {
    transactions: Arc<dyn TransactionRepositoryInterface + Send + Sync>,
    pix_keys: Arc<dyn PixKeyRepositoryInterface + Send + Sync>,
}

impl TransferUseCase {
    pub fn new(
        transactions: Arc<dyn TransactionRepositoryInterface + Send + Sync>,
        pix_keys: Arc<dyn PixKeyRepositoryInterface + Send + Sync>,
    ) -> Self {
        TransferUseCase {
            transactions,
            pix_keys,
        }
    }

    /// Shared tail for the three transition operations: a transaction that
    /// failed re-validation is never saved.
    fn transition(
        &self,
        transaction_id: Uuid,
        apply: impl FnOnce(&mut Transaction) -> Result<(), ModelError>,
    ) -> Result<Transaction, TransferError> {
        let mut transaction = self.transactions.find(transaction_id)?;
        if let Err(e) = apply(&mut transaction) {
            TRANSFERS_FAILED_TOTAL.inc();
            warn!(transaction_id = %transaction_id, "transition rejected: {e}");
            return Err(e.into());
        }
        self.transactions.save(&transaction)?;
        Ok(transaction)
    }
}

impl TransferInterface for TransferUseCase {
    fn register(
        &self,
        account_from_id: Uuid,
        amount: f64,
        pix_key: &str,
        kind: &str,
        description: Option<String>,
    ) -> Result<Transaction, TransferError> {
        measure!(TRANSFER_REGISTER_TIME_SECONDS, {
            let kind = kind.parse::<PixKeyKind>()?;
            let pix_key_to = self.pix_keys.find_key_by_kind(pix_key, kind)?;
            let account_from = self.pix_keys.find_account(account_from_id)?;

            let transaction = match Transaction::new(account_from, amount, pix_key_to, description)
            {
                Ok(transaction) => transaction,
                Err(e) => {
                    TRANSFERS_FAILED_TOTAL.inc();
                    warn!(account_from_id = %account_from_id, "rejected transfer: {e}");
                    return Err(e.into());
                }
            };

            self.transactions.register(&transaction)?;
            TRANSFERS_REGISTERED_TOTAL.inc();
            info!(
                transaction_id = %transaction.base.id,
                amount,
                "registered pending transfer"
            );
            Ok(transaction)
        })
    }

    fn complete(&self, transaction_id: Uuid) -> Result<Transaction, TransferError> {
        measure!(TRANSFER_TRANSITION_TIME_SECONDS, {
            let transaction = self.transition(transaction_id, Transaction::complete)?;
            TRANSFERS_COMPLETED_TOTAL.inc();
            info!(transaction_id = %transaction_id, "transfer completed");
            Ok(transaction)
        })
    }

    fn confirm(&self, transaction_id: Uuid) -> Result<Transaction, TransferError> {
        measure!(TRANSFER_TRANSITION_TIME_SECONDS, {
            let transaction = self.transition(transaction_id, Transaction::confirm)?;
            TRANSFERS_CONFIRMED_TOTAL.inc();
            info!(transaction_id = %transaction_id, "transfer confirmed");
            Ok(transaction)
        })
    }

    fn cancel(&self, transaction_id: Uuid, reason: &str) -> Result<Transaction, TransferError> {
        measure!(TRANSFER_TRANSITION_TIME_SECONDS, {
            let transaction =
                self.transition(transaction_id, |transaction| transaction.cancel(reason))?;
            TRANSFERS_CANCELLED_TOTAL.inc();
            info!(transaction_id = %transaction_id, reason, "transfer cancelled");
            Ok(transaction)
        })
    }
}
