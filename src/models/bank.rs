use {
    crate::models::{Base, ModelError},
    serde::{Deserialize, Serialize},
};

/// Financial institution an account belongs to. Not managed by this core
/// beyond identity; carried so accounts can reference their bank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bank {
    #[serde(flatten)]
    pub base: Base,
    pub code: String,
    pub name: String,
}

impl Bank {
    pub fn new(code: &str, name: &str) -> Result<Self, ModelError> {
        let bank = Bank {
            base: Base::new(),
            code: code.to_string(),
            name: name.to_string(),
        };
        bank.is_valid()?;
        Ok(bank)
    }

    fn is_valid(&self) -> Result<(), ModelError> {
        if self.code.trim().is_empty() {
            return Err(ModelError::RequiredField("code"));
        }
        if self.name.trim().is_empty() {
            return Err(ModelError::RequiredField("name"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_bank() {
        let bank = Bank::new("001", "test bank").unwrap();
        assert!(!bank.base.id.is_nil());
        assert_eq!(bank.code, "001");
        assert_eq!(bank.name, "test bank");
    }

    #[test]
    fn test_new_bank_requires_code_and_name() {
        assert_eq!(
            Bank::new("", "test bank").unwrap_err(),
            ModelError::RequiredField("code")
        );
        assert_eq!(
            Bank::new("001", "  ").unwrap_err(),
            ModelError::RequiredField("name")
        );
    }
}
