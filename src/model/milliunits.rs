//! Integer amounts in YNAB's milliunit granularity.
//!
//! Up reports amounts in base units (cents, 1/100 of a dollar) while YNAB expects milliunits
//! (1/1000 of a dollar). The conversion is a checked integer multiplication so that no rounding
//! can creep in.

use crate::Result;
use anyhow::Context;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The number of milliunits in one base unit.
const MILLIUNITS_PER_BASE_UNIT: i64 = 10;

/// The number of decimal places in a milliunit amount.
const MILLIUNIT_SCALE: u32 = 3;

/// Represents a YNAB amount in milliunits, e.g. `-12340` for `-$12.34`.
///
/// Serializes as a bare JSON integer, which is what the YNAB API expects.
///
/// # Examples
///
/// ```
/// # use up_ynab_sync::model::Milliunits;
/// let amount = Milliunits::from_base_units(-1234).unwrap();
/// assert_eq!(amount.value(), -12340);
/// assert_eq!(amount.to_string(), "-$12.34");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Milliunits(i64);

impl Milliunits {
    /// Wraps a value that is already in milliunits.
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Converts an amount in base units (1/100 of a currency unit) to milliunits.
    ///
    /// # Errors
    /// - Returns an error if the result does not fit in an `i64`.
    pub fn from_base_units(base_units: i64) -> Result<Self> {
        base_units
            .checked_mul(MILLIUNITS_PER_BASE_UNIT)
            .map(Self)
            .with_context(|| format!("The amount {base_units} is too large to convert to milliunits"))
    }

    /// Returns the raw milliunit value.
    pub fn value(&self) -> i64 {
        self.0
    }

    /// Returns the amount as a `Decimal` in whole currency units, e.g. `-12.340`.
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, MILLIUNIT_SCALE)
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

impl fmt::Display for Milliunits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        let num = self.to_decimal().abs().round_dp(2);
        if num >= Decimal::from(1000) {
            write!(
                f,
                "{sign}${}",
                format_num::format_num!(",.2", num.to_f64().unwrap_or_default())
            )
        } else {
            write!(f, "{sign}${num:.2}")
        }
    }
}
