//! Shared primitive types.

use {
    borsh::{BorshDeserialize, BorshSerialize},
    serde::{de, Deserialize, Deserializer, Serialize, Serializer},
    std::{fmt, str::FromStr},
};

use crate::error::PortalError;

/// A 20-byte account address, rendered as `0x`-prefixed lowercase hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, BorshSerialize, BorshDeserialize)]
pub struct Address(pub [u8; 20]);

impl Address {
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = PortalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PortalError::InvalidAddress {
            input: s.to_string(),
        };
        let stripped = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        let bytes = hex::decode(stripped).map_err(|_| invalid())?;
        let raw: [u8; 20] = bytes.try_into().map_err(|_| invalid())?;
        Ok(Address(raw))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = <String as Deserialize>::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}
