//! Transfer transaction entity: factory, invariant validation and the
//! status state machine.

use {
    crate::models::{Account, Base, ModelError, PixKey},
    serde::{Deserialize, Serialize},
    std::{fmt, str::FromStr},
    uuid::Uuid,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Confirmed,
    Error,
}

impl FromStr for TransactionStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TransactionStatus::Pending),
            "completed" => Ok(TransactionStatus::Completed),
            "confirmed" => Ok(TransactionStatus::Confirmed),
            "error" => Ok(TransactionStatus::Error),
            other => Err(ModelError::InvalidStatus(other.to_string())),
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Completed => "completed",
            TransactionStatus::Confirmed => "confirmed",
            TransactionStatus::Error => "error",
        })
    }
}

/// A single transfer instruction from a source account to a destination
/// pix key. Carries the resolved references for validation; only the id
/// fields cross the persistence boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(flatten)]
    pub base: Base,
    pub account_from: Account,
    pub account_from_id: Uuid,
    pub amount: f64,
    pub pix_key_to: PixKey,
    pub pix_key_id_to: Uuid,
    pub status: TransactionStatus,
    pub description: Option<String>,
    pub cancel_description: Option<String>,
}

impl Transaction {
    /// Builds a new pending transaction and runs the full invariant check.
    /// Either returns a fully valid entity or no entity at all.
    pub fn new(
        account_from: Account,
        amount: f64,
        pix_key_to: PixKey,
        description: Option<String>,
    ) -> Result<Self, ModelError> {
        let transaction = Transaction {
            base: Base::new(),
            account_from_id: account_from.base.id,
            account_from,
            amount,
            pix_key_id_to: pix_key_to.base.id,
            pix_key_to,
            status: TransactionStatus::Pending,
            description,
            cancel_description: None,
        };
        transaction.is_valid()?;
        Ok(transaction)
    }

    /// Re-checks every invariant over the whole entity. Runs at
    /// construction and after each transition, so a reference cleared or
    /// corrupted between passes is caught before the caller treats the new
    /// state as committed. Status membership is structural: the
    /// `TransactionStatus` enum cannot hold an unrecognized value.
    pub fn is_valid(&self) -> Result<(), ModelError> {
        if self.base.id.is_nil() {
            return Err(ModelError::RequiredField("id"));
        }
        if self.account_from_id.is_nil() {
            return Err(ModelError::RequiredField("account_from_id"));
        }
        if self.pix_key_id_to.is_nil() {
            return Err(ModelError::RequiredField("pix_key_id_to"));
        }
        // NaN fails this check as well.
        if !(self.amount > 0.0) {
            return Err(ModelError::NonPositiveAmount);
        }
        if self.pix_key_to.account_id == self.account_from.base.id {
            return Err(ModelError::SameAccountTransfer);
        }
        Ok(())
    }

    /// Marks the transfer as completed. Transitions do not check the prior
    /// status; the contract is post-hoc consistency only. On error the
    /// status field has already been mutated and the entity must not be
    /// persisted.
    pub fn complete(&mut self) -> Result<(), ModelError> {
        self.status = TransactionStatus::Completed;
        self.base.touch();
        self.is_valid()
    }

    /// Marks the transfer as confirmed by the destination institution.
    pub fn confirm(&mut self) -> Result<(), ModelError> {
        self.status = TransactionStatus::Confirmed;
        self.base.touch();
        self.is_valid()
    }

    /// Moves the transfer to the error state, recording the reason.
    pub fn cancel(&mut self, description: &str) -> Result<(), ModelError> {
        self.status = TransactionStatus::Error;
        self.description = Some(description.to_string());
        self.base.touch();
        self.is_valid()
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::models::{Bank, KeyStatus},
    };

    fn accounts_and_key() -> (Account, PixKey) {
        let bank = Bank::new("001", "test bank").unwrap();
        let account_from = Account::new(&bank, "12345-6", "Alice").unwrap();
        let account_to = Account::new(&bank, "65432-1", "Bob").unwrap();
        let pix_key = PixKey::new("email", &account_to, "bob@b.com").unwrap();
        (account_from, pix_key)
    }

    #[test]
    fn test_new_transaction() {
        let (account_from, pix_key) = accounts_and_key();
        let account_from_id = account_from.base.id;
        let pix_key_id = pix_key.base.id;

        let transaction = Transaction::new(account_from, 100.0, pix_key, None).unwrap();

        assert!(!transaction.base.id.is_nil());
        assert_eq!(transaction.status, TransactionStatus::Pending);
        assert_eq!(transaction.amount, 100.0);
        assert_eq!(transaction.account_from_id, account_from_id);
        assert_eq!(transaction.pix_key_id_to, pix_key_id);
        assert_eq!(transaction.cancel_description, None);
    }

    #[test]
    fn test_new_transaction_ids_are_unique() {
        let (account_from, pix_key) = accounts_and_key();
        let first = Transaction::new(account_from.clone(), 10.0, pix_key.clone(), None).unwrap();
        let second = Transaction::new(account_from, 10.0, pix_key, None).unwrap();
        assert_ne!(first.base.id, second.base.id);
    }

    #[test]
    fn test_new_transaction_rejects_non_positive_amount() {
        let (account_from, pix_key) = accounts_and_key();
        for amount in [0.0, -42.5, f64::NAN] {
            let result = Transaction::new(account_from.clone(), amount, pix_key.clone(), None);
            assert_eq!(result.unwrap_err(), ModelError::NonPositiveAmount);
        }
    }

    #[test]
    fn test_new_transaction_rejects_self_transfer() {
        let bank = Bank::new("001", "test bank").unwrap();
        let account = Account::new(&bank, "12345-6", "Alice").unwrap();
        let own_key = PixKey::new("cpf", &account, "111.222.333-44").unwrap();

        let result = Transaction::new(account, 100.0, own_key, None);
        assert_eq!(result.unwrap_err(), ModelError::SameAccountTransfer);
    }

    #[test]
    fn test_complete_then_confirm() {
        let (account_from, pix_key) = accounts_and_key();
        let mut transaction = Transaction::new(account_from, 100.0, pix_key, None).unwrap();

        transaction.complete().unwrap();
        assert_eq!(transaction.status, TransactionStatus::Completed);

        transaction.confirm().unwrap();
        assert_eq!(transaction.status, TransactionStatus::Confirmed);
    }

    #[test]
    fn test_transitions_stamp_updated_at() {
        let (account_from, pix_key) = accounts_and_key();
        let mut transaction = Transaction::new(account_from, 100.0, pix_key, None).unwrap();

        let created_at = transaction.base.created_at;
        transaction.complete().unwrap();
        let after_complete = transaction.base.updated_at;
        assert!(after_complete >= created_at);

        transaction.confirm().unwrap();
        assert!(transaction.base.updated_at >= after_complete);
    }

    #[test]
    fn test_cancel_records_reason() {
        let (account_from, pix_key) = accounts_and_key();
        let mut transaction = Transaction::new(account_from, 100.0, pix_key, None).unwrap();

        transaction.cancel("insufficient funds").unwrap();
        assert_eq!(transaction.status, TransactionStatus::Error);
        assert_eq!(
            transaction.description.as_deref(),
            Some("insufficient funds")
        );
    }

    #[test]
    fn test_transition_failure_leaves_status_mutated() {
        let (account_from, pix_key) = accounts_and_key();
        let mut transaction = Transaction::new(account_from, 100.0, pix_key, None).unwrap();

        // Corrupt the entity between validation passes; the re-validation
        // inside complete() must catch it, with the status already moved.
        transaction.amount = 0.0;
        assert_eq!(
            transaction.complete().unwrap_err(),
            ModelError::NonPositiveAmount
        );
        assert_eq!(transaction.status, TransactionStatus::Completed);
    }

    #[test]
    fn test_destination_key_stays_readable() {
        let (account_from, pix_key) = accounts_and_key();
        let transaction = Transaction::new(account_from, 50.0, pix_key, None).unwrap();
        assert_eq!(transaction.pix_key_to.status, KeyStatus::Active);
        assert_ne!(
            transaction.pix_key_to.account_id,
            transaction.account_from.base.id
        );
    }

    #[test]
    fn test_status_parse_round_trip() {
        for status in [
            TransactionStatus::Pending,
            TransactionStatus::Completed,
            TransactionStatus::Confirmed,
            TransactionStatus::Error,
        ] {
            assert_eq!(status.to_string().parse::<TransactionStatus>(), Ok(status));
        }
        assert_eq!(
            "settled".parse::<TransactionStatus>().unwrap_err(),
            ModelError::InvalidStatus("settled".to_string())
        );
    }

    #[test]
    fn test_serialized_field_surface() {
        let (account_from, pix_key) = accounts_and_key();
        let transaction =
            Transaction::new(account_from, 100.0, pix_key, Some("rent".to_string())).unwrap();

        let value = serde_json::to_value(&transaction).unwrap();
        assert_eq!(value["status"], "pending");
        assert_eq!(value["amount"], 100.0);
        assert_eq!(value["description"], "rent");
        assert!(value["id"].is_string());
        assert!(value["account_from_id"].is_string());
        assert!(value["pix_key_id_to"].is_string());
        assert!(value["created_at"].is_string());
    }
}
