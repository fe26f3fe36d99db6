//! Domain-native account identifiers.
//!
//! Both execution domains address accounts with a 20-byte identifier,
//! rendered as a `0x`-prefixed hex string on the wire. The all-zero
//! identifier is reserved and never a valid participant.
use std::{fmt, str::FromStr};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Error, Debug, PartialEq)]
pub enum AccountIdError {
    #[error("Invalid account id: {0}")]
    ConversionError(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ToSchema)]
#[schema(value_type = String, example = "0xc834dcdc9a074dbbadcc71584789ae4b463db116")]
pub struct AccountId([u8; 20]);

impl AccountId {
    pub const ZERO: AccountId = AccountId([0u8; 20]);

    pub fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for AccountId {
    type Err = AccountIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let stripped = s.strip_prefix("0x").ok_or_else(|| {
            AccountIdError::ConversionError(format!("missing 0x prefix: {}", s))
        })?;
        let bytes = hex::decode(stripped)
            .map_err(|e| AccountIdError::ConversionError(format!("invalid hex: {}", e)))?;
        let bytes: [u8; 20] = bytes.try_into().map_err(|_| {
            AccountIdError::ConversionError(format!("expected 20 bytes: {}", s))
        })?;
        Ok(Self(bytes))
    }
}

impl Serialize for AccountId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for AccountId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_round_trip() {
        let account: AccountId = "0xc834dcdc9a074dbbadcc71584789ae4b463db116"
            .parse()
            .unwrap();
        assert_eq!(
            account.to_string(),
            "0xc834dcdc9a074dbbadcc71584789ae4b463db116"
        );
    }

    #[test]
    fn test_rejects_malformed_input() {
        assert!("c834dcdc9a074dbbadcc71584789ae4b463db116"
            .parse::<AccountId>()
            .is_err());
        assert!("0x1234".parse::<AccountId>().is_err());
        assert!("0xzz34dcdc9a074dbbadcc71584789ae4b463db116"
            .parse::<AccountId>()
            .is_err());
    }

    #[test]
    fn test_zero_detection() {
        assert!(AccountId::ZERO.is_zero());
        let account: AccountId = "0x0000000000000000000000000000000000000000"
            .parse()
            .unwrap();
        assert!(account.is_zero());
        let account: AccountId = "0x0000000000000000000000000000000000000001"
            .parse()
            .unwrap();
        assert!(!account.is_zero());
    }

    #[test]
    fn test_serde_as_string() {
        let account: AccountId = "0xc834dcdc9a074dbbadcc71584789ae4b463db116"
            .parse()
            .unwrap();
        let json = serde_json::to_string(&account).unwrap();
        assert_eq!(json, "\"0xc834dcdc9a074dbbadcc71584789ae4b463db116\"");
        let back: AccountId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, account);
    }
}
