use {
    crate::models::{Bank, Base, ModelError},
    serde::{Deserialize, Serialize},
    uuid::Uuid,
};

/// Bank account capable of being a transfer source. The durable link to its
/// bank is `bank_id`; the bank record itself lives in the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    #[serde(flatten)]
    pub base: Base,
    pub bank_id: Uuid,
    pub number: String,
    pub owner_name: String,
}

impl Account {
    pub fn new(bank: &Bank, number: &str, owner_name: &str) -> Result<Self, ModelError> {
        let account = Account {
            base: Base::new(),
            bank_id: bank.base.id,
            number: number.to_string(),
            owner_name: owner_name.to_string(),
        };
        account.is_valid()?;
        Ok(account)
    }

    fn is_valid(&self) -> Result<(), ModelError> {
        if self.number.trim().is_empty() {
            return Err(ModelError::RequiredField("number"));
        }
        if self.owner_name.trim().is_empty() {
            return Err(ModelError::RequiredField("owner_name"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_account() {
        let bank = Bank::new("001", "test bank").unwrap();
        let account = Account::new(&bank, "12345-6", "Alice").unwrap();
        assert!(!account.base.id.is_nil());
        assert_eq!(account.bank_id, bank.base.id);
        assert_eq!(account.number, "12345-6");
        assert_eq!(account.owner_name, "Alice");
    }

    #[test]
    fn test_new_account_requires_number_and_owner() {
        let bank = Bank::new("001", "test bank").unwrap();
        assert_eq!(
            Account::new(&bank, "", "Alice").unwrap_err(),
            ModelError::RequiredField("number")
        );
        assert_eq!(
            Account::new(&bank, "12345-6", "").unwrap_err(),
            ModelError::RequiredField("owner_name")
        );
    }
}
