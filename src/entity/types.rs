//! Entity types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::NluError;

/// Kind of entity found in a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    /// Transaction id or UTR reference.
    Txn,
    /// Account number.
    Account,
    /// Monetary amount, with or without currency.
    Amount,
    /// Source account class (`savings`, `wallet`, ...).
    FromAccount,
    /// Destination account class.
    ToAccount,
}

impl EntityType {
    /// Wire name of this entity type.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Txn => "txn",
            EntityType::Account => "account",
            EntityType::Amount => "amount",
            EntityType::FromAccount => "from_account",
            EntityType::ToAccount => "to_account",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = NluError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "txn" => Ok(EntityType::Txn),
            "account" => Ok(EntityType::Account),
            "amount" => Ok(EntityType::Amount),
            "from_account" => Ok(EntityType::FromAccount),
            "to_account" => Ok(EntityType::ToAccount),
            other => Err(NluError::invalid_argument(format!(
                "unknown entity type: {other}"
            ))),
        }
    }
}

/// A typed, normalized entity. Carries no position information.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExtractedEntity {
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    pub value: String,
}

impl ExtractedEntity {
    pub fn new<S: Into<String>>(entity_type: EntityType, value: S) -> Self {
        Self {
            entity_type,
            value: value.into(),
        }
    }
}

impl fmt::Display for ExtractedEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.entity_type, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_type_names_round_trip() {
        for ty in [
            EntityType::Txn,
            EntityType::Account,
            EntityType::Amount,
            EntityType::FromAccount,
            EntityType::ToAccount,
        ] {
            assert_eq!(ty.as_str().parse::<EntityType>().unwrap(), ty);
        }
        assert!("iban".parse::<EntityType>().is_err());
    }

    #[test]
    fn test_entity_json_shape() {
        let entity = ExtractedEntity::new(EntityType::FromAccount, "salary");
        let json = serde_json::to_string(&entity).unwrap();
        assert_eq!(json, r#"{"type":"from_account","value":"salary"}"#);
    }
}
