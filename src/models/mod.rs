//! Domain entities for the transfer engine.

pub mod account;
pub mod bank;
pub mod error;
pub mod pix_key;
pub mod transaction;

pub use self::{
    account::Account,
    bank::Bank,
    error::ModelError,
    pix_key::{KeyStatus, PixKey, PixKeyKind},
    transaction::{Transaction, TransactionStatus},
};

use {
    chrono::{DateTime, Utc},
    serde::{Deserialize, Serialize},
    uuid::Uuid,
};

/// Identity and timestamps shared by every persisted entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Base {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Base {
    pub fn new() -> Self {
        let now = Utc::now();
        Base {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Refreshes `updated_at`. Every mutating operation must call this.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Default for Base {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_base_assigns_identity() {
        let base = Base::new();
        assert!(!base.id.is_nil());
        assert_eq!(base.created_at, base.updated_at);
    }

    #[test]
    fn test_touch_moves_updated_at_forward() {
        let mut base = Base::new();
        let before = base.updated_at;
        base.touch();
        assert!(base.updated_at >= before);
        assert!(base.updated_at >= base.created_at);
    }
}
