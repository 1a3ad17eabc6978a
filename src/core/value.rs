// Value containers carried by transaction outputs. The ledger moves opaque
// payloads; coins are just the one payload kind that supports balance
// arithmetic. New payload kinds extend the enum rather than subclassing.

use crate::error::{LedgerError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Significant digits kept for monetary amounts. Amounts are decimals, not
/// floats: repeated hash/compare cycles must never see rounding drift.
pub const COIN_PRECISION: u32 = 8;

/// A non-negative, fixed-precision monetary amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coin {
    value: Decimal,
}

impl Coin {
    /// Parse a coin amount from its decimal string form.
    pub fn new(input: &str) -> Result<Coin> {
        let value = Decimal::from_str(input)
            .map_err(|e| LedgerError::Data(format!("Invalid coin amount {input:?}: {e}")))?;
        Self::from_decimal(value)
    }

    /// Build a coin from an already-parsed decimal.
    pub fn from_decimal(value: Decimal) -> Result<Coin> {
        if value.is_sign_negative() {
            return Err(LedgerError::Data(format!(
                "Coin amount must not be negative: {value}"
            )));
        }
        let value = value.round_sf(COIN_PRECISION).unwrap_or(value).normalize();
        Ok(Coin { value })
    }

    pub fn value(&self) -> Decimal {
        self.value
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Opaque transferable payload placed under a spending condition.
///
/// `Raw` carries arbitrary text (the genesis block uses it for its
/// newspaper quote); `Coin` carries a monetary amount. The `check`
/// capability is the hook a payload kind uses to tell whether it is worth
/// spending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Data {
    Raw(String),
    Coin(Coin),
}

impl Data {
    /// Capability check for spendability of the container.
    ///
    /// For coins the candidate must coerce to a decimal (a type/format
    /// error otherwise) and the result reports whether the CONTAINER holds
    /// a strictly positive amount. Raw payloads define no check.
    pub fn check(&self, candidate: &str) -> Result<bool> {
        match self {
            Data::Raw(_) => Err(LedgerError::Data(
                "check is not implemented for raw data".to_string(),
            )),
            Data::Coin(coin) => {
                Decimal::from_str(candidate).map_err(|e| {
                    LedgerError::Data(format!("Invalid coin amount {candidate:?}: {e}"))
                })?;
                Ok(coin.value() > Decimal::ZERO)
            }
        }
    }

    /// Coin amount of the container, if it is one.
    pub fn as_coin(&self) -> Option<&Coin> {
        match self {
            Data::Coin(coin) => Some(coin),
            Data::Raw(_) => None,
        }
    }

    /// Canonical string form used in hash material.
    pub fn value_string(&self) -> String {
        match self {
            Data::Raw(payload) => payload.clone(),
            Data::Coin(coin) => coin.to_string(),
        }
    }
}
