//! Monetary amounts in the smallest denomination (wei).
//!
//! Amounts never touch floating point.  Addition is checked so a running
//! total can never silently wrap; callers get `None` and decide how to
//! report it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::{MemVaultError, Result};

/// Number of wei in one ether.
pub const WEI_PER_ETHER: u128 = 1_000_000_000_000_000_000;

/// A non-negative amount of wei.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(u128);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    /// Wrap a raw wei value.
    pub const fn from_wei(wei: u128) -> Self {
        Self(wei)
    }

    /// The raw wei value.
    pub const fn wei(self) -> u128 {
        self.0
    }

    pub fn checked_add(self, other: Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Amount)
    }

    /// Render as ether with up to 18 fractional digits, trailing zeros
    /// trimmed (e.g. `420000000000000` wei -> `"0.00042"`).
    pub fn to_ether_string(self) -> String {
        let whole = self.0 / WEI_PER_ETHER;
        let frac = self.0 % WEI_PER_ETHER;
        if frac == 0 {
            return whole.to_string();
        }
        let frac = format!("{frac:018}");
        format!("{whole}.{}", frac.trim_end_matches('0'))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Amount {
    type Err = MemVaultError;

    /// Parse a decimal wei string.  Underscores are accepted as digit
    /// separators so config files can write `10_000_000_000_000_000`.
    fn from_str(s: &str) -> Result<Self> {
        let cleaned: String = s.trim().chars().filter(|c| *c != '_').collect();
        if cleaned.is_empty() || !cleaned.bytes().all(|b| b.is_ascii_digit()) {
            return Err(MemVaultError::invalid(format!(
                "'{s}' is not a valid wei amount — expected a non-negative integer"
            )));
        }
        cleaned
            .parse::<u128>()
            .map(Amount)
            .map_err(|e| MemVaultError::invalid(format!("wei amount '{s}' out of range: {e}")))
    }
}

impl From<u128> for Amount {
    fn from(wei: u128) -> Self {
        Self(wei)
    }
}

impl From<u64> for Amount {
    fn from(wei: u64) -> Self {
        Self(u128::from(wei))
    }
}

// Serialized as a decimal string. Deserialization also accepts a plain
// integer up to u64::MAX.
impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Int(u64),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Text(s) => s.parse().map_err(serde::de::Error::custom),
            Raw::Int(n) => Ok(Amount::from(n)),
        }
    }
}
