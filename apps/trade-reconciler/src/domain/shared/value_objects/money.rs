//! Billed amounts as shown on invoices and discrepancy reports.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A fee or invoice amount in the billing currency.
///
/// Arithmetic stays at full `Decimal` precision; only display is rounded to
/// cents, half away from zero, so `$2.005` prints as `$2.01`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Wrap a billed amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Unrounded amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Amount rounded to cents as printed on a report.
    #[must_use]
    pub fn cents(&self) -> Decimal {
        self.0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Returns true if `billed` differs from this amount by at most
    /// `tolerance`.
    #[must_use]
    pub fn within(&self, billed: Self, tolerance: Decimal) -> bool {
        self.0.saturating_sub(billed.0).abs() <= tolerance
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cents = self.cents();
        // A sub-cent negative rounds to zero and prints unsigned.
        let sign = if cents.is_sign_negative() && !cents.is_zero() {
            "-"
        } else {
            ""
        };
        write!(f, "{sign}${:.2}", cents.abs())
    }
}
