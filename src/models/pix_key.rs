use {
    crate::models::{Account, Base, ModelError},
    serde::{Deserialize, Serialize},
    std::{fmt, str::FromStr},
    uuid::Uuid,
};

/// Alias kinds a destination can be addressed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PixKeyKind {
    Email,
    Phone,
    Cpf,
    Random,
}

impl FromStr for PixKeyKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(PixKeyKind::Email),
            "phone" => Ok(PixKeyKind::Phone),
            "cpf" => Ok(PixKeyKind::Cpf),
            "random" => Ok(PixKeyKind::Random),
            other => Err(ModelError::InvalidKeyKind(other.to_string())),
        }
    }
}

impl fmt::Display for PixKeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PixKeyKind::Email => "email",
            PixKeyKind::Phone => "phone",
            PixKeyKind::Cpf => "cpf",
            PixKeyKind::Random => "random",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyStatus {
    Active,
    Inactive,
}

impl FromStr for KeyStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(KeyStatus::Active),
            "inactive" => Ok(KeyStatus::Inactive),
            other => Err(ModelError::InvalidKeyStatus(other.to_string())),
        }
    }
}

impl fmt::Display for KeyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            KeyStatus::Active => "active",
            KeyStatus::Inactive => "inactive",
        })
    }
}

/// Alias bound to exactly one account. Transactions only read `account_id`
/// and `status`; key lifecycle transitions are managed elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PixKey {
    #[serde(flatten)]
    pub base: Base,
    pub kind: PixKeyKind,
    pub account_id: Uuid,
    pub key: String,
    pub status: KeyStatus,
}

impl PixKey {
    /// The kind arrives as text from the registration surface; anything
    /// outside the enumerated set is a creation error.
    pub fn new(kind: &str, account: &Account, key: &str) -> Result<Self, ModelError> {
        let kind = kind.parse::<PixKeyKind>()?;
        let pix_key = PixKey {
            base: Base::new(),
            kind,
            account_id: account.base.id,
            key: key.to_string(),
            status: KeyStatus::Active,
        };
        pix_key.is_valid()?;
        Ok(pix_key)
    }

    fn is_valid(&self) -> Result<(), ModelError> {
        if self.key.trim().is_empty() {
            return Err(ModelError::RequiredField("key"));
        }
        if self.account_id.is_nil() {
            return Err(ModelError::RequiredField("account_id"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Bank;

    fn test_account() -> Account {
        let bank = Bank::new("001", "test bank").unwrap();
        Account::new(&bank, "12345-6", "Alice").unwrap()
    }

    #[test]
    fn test_new_pix_key() {
        let account = test_account();
        let pix_key = PixKey::new("email", &account, "j@j.com").unwrap();

        assert!(!pix_key.base.id.is_nil());
        assert_eq!(pix_key.kind, PixKeyKind::Email);
        assert_eq!(pix_key.account_id, account.base.id);
        assert_eq!(pix_key.status, KeyStatus::Active);
    }

    #[test]
    fn test_new_pix_key_accepts_every_kind() {
        let account = test_account();
        for kind in ["email", "phone", "cpf", "random"] {
            let pix_key = PixKey::new(kind, &account, "some-key").unwrap();
            assert_eq!(pix_key.status, KeyStatus::Active);
            assert_eq!(pix_key.kind.to_string(), kind);
        }
    }

    #[test]
    fn test_new_pix_key_rejects_unknown_kind() {
        let account = test_account();
        assert_eq!(
            PixKey::new("nome", &account, "j@j.com").unwrap_err(),
            ModelError::InvalidKeyKind("nome".to_string())
        );
    }

    #[test]
    fn test_new_pix_key_requires_key_value() {
        let account = test_account();
        assert_eq!(
            PixKey::new("email", &account, "").unwrap_err(),
            ModelError::RequiredField("key")
        );
    }
}
