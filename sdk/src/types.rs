//! Core value types: addresses, transaction ids, and wei amounts.
//!
//! They are kept small and immutable. Addresses and ids are plain 32-byte
//! arrays that render as lowercase hex, and amounts are unbounded integers
//! so a balance never silently wraps at `u64::MAX`.

use std::fmt;
use std::str::FromStr;

use num_bigint::BigUint;
use num_traits::{FromPrimitive, Zero};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::codec::{bytes_to_hex, hex_to_array};
use crate::config::{DECIMALS, ONE_RELYO_WEI};
use crate::error::{SdkError, SdkResult};

// ---------------------------------------------------------------------------
// 32-byte hex identifiers
// ---------------------------------------------------------------------------

macro_rules! hex_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name([u8; 32]);

        impl $name {
            pub const fn from_bytes(bytes: [u8; 32]) -> Self {
                Self(bytes)
            }

            pub fn as_bytes(&self) -> &[u8; 32] {
                &self.0
            }

            pub fn to_hex(&self) -> String {
                bytes_to_hex(&self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.to_hex())
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.to_hex())
            }
        }

        impl FromStr for $name {
            type Err = SdkError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                hex_to_array(s).map(Self).map_err(|_| {
                    SdkError::Format(format!(
                        "{} must be 64 hex characters, got {:?}",
                        stringify!($name),
                        s
                    ))
                })
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_hex())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

hex_id!(
    /// Account identifier: the BLAKE3 digest of an Ed25519 public key.
    Address
);

hex_id!(
    /// BLAKE3 digest of a transaction's public fields. Independent of the
    /// signature.
    TransactionId
);

// ---------------------------------------------------------------------------
// Amount
// ---------------------------------------------------------------------------

/// A non-negative quantity of wei (`10^-18` RELYO).
///
/// Serialized as a decimal string, which is how the node sends and expects
/// every balance, amount and fee.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(BigUint);

impl Amount {
    pub fn zero() -> Self {
        Self(BigUint::zero())
    }

    pub fn from_wei(wei: u128) -> Self {
        Self(BigUint::from(wei))
    }

    /// Strict decimal parse: ASCII digits only, at least one of them.
    ///
    /// Signs, underscores, whitespace and exponents are all rejected, even
    /// where `BigUint`'s own parser would be more forgiving.
    pub fn parse_wei(s: &str) -> SdkResult<Self> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(SdkError::Format(format!(
                "amount must be a non-negative integer, got {s:?}"
            )));
        }
        BigUint::parse_bytes(s.as_bytes(), 10)
            .map(Self)
            .ok_or_else(|| SdkError::Format(format!("unparseable amount {s:?}")))
    }

    /// Converts display units with `round(x * 10^18)`.
    ///
    /// Floats cannot hold every 18-decimal value, so large or very precise
    /// inputs lose digits. Prefer [`Amount::parse_display`] for user input.
    pub fn from_display(relyo: f64) -> SdkResult<Self> {
        if !relyo.is_finite() || relyo < 0.0 {
            return Err(SdkError::Format(format!(
                "display amount must be a finite non-negative number, got {relyo}"
            )));
        }
        let scaled = (relyo * ONE_RELYO_WEI as f64).round();
        BigUint::from_f64(scaled)
            .map(Self)
            .ok_or_else(|| SdkError::Format(format!("display amount {relyo} out of range")))
    }

    /// Exact parse of a display-unit decimal such as `"1.5"` or `"0.001"`.
    pub fn parse_display(s: &str) -> SdkResult<Self> {
        let (whole, frac) = match s.split_once('.') {
            Some((w, f)) => (w, f),
            None => (s, ""),
        };
        let malformed = || SdkError::Format(format!("malformed RELYO amount {s:?}"));

        if whole.is_empty() || (s.contains('.') && frac.is_empty()) {
            return Err(malformed());
        }
        if frac.len() > DECIMALS as usize {
            return Err(SdkError::Format(format!(
                "RELYO amount {:?} has more than {} decimal places",
                s, DECIMALS
            )));
        }
        if !whole.bytes().chain(frac.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }

        let digits = format!("{whole}{frac:0<width$}", width = DECIMALS as usize);
        Self::parse_wei(&digits)
    }

    /// `whole.fraction` in RELYO with trailing zeros trimmed.
    pub fn to_display_string(&self) -> String {
        let one = BigUint::from(ONE_RELYO_WEI);
        let whole = &self.0 / &one;
        let frac = &self.0 % &one;
        if frac.is_zero() {
            return whole.to_string();
        }
        let frac = format!("{:0>width$}", frac.to_string(), width = DECIMALS as usize);
        format!("{}.{}", whole, frac.trim_end_matches('0'))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Arbitrary precision, so the sum always exists.
    pub fn checked_add(&self, other: &Amount) -> Amount {
        Amount(&self.0 + &other.0)
    }

    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    pub fn into_biguint(self) -> BigUint {
        self.0
    }
}

impl From<BigUint> for Amount {
    fn from(v: BigUint) -> Self {
        Self(v)
    }
}

impl From<u128> for Amount {
    fn from(wei: u128) -> Self {
        Self::from_wei(wei)
    }
}

impl From<u64> for Amount {
    fn from(wei: u64) -> Self {
        Self(BigUint::from(wei))
    }
}

impl FromStr for Amount {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_wei(s)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Amount({} wei)", self.0)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse_wei(&s).map_err(serde::de::Error::custom)
    }
}

/// An amount as a caller supplies it: exact wei, or a float in RELYO.
#[derive(Debug, Clone, PartialEq)]
pub enum AmountInput {
    Wei(Amount),
    Display(f64),
}

impl AmountInput {
    /// Resolves to wei, rounding display values.
    pub fn to_wei(&self) -> SdkResult<Amount> {
        match self {
            Self::Wei(a) => Ok(a.clone()),
            Self::Display(x) => Amount::from_display(*x),
        }
    }
}

impl From<Amount> for AmountInput {
    fn from(a: Amount) -> Self {
        Self::Wei(a)
    }
}

impl From<f64> for AmountInput {
    fn from(x: f64) -> Self {
        Self::Display(x)
    }
}
