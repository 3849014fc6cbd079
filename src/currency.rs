//! Currency conversion between the base and display currencies
//!
//! Every user-entered amount that must become a base-currency value goes
//! through this module; no other call site performs conversions. The
//! exchange rate is expressed as units of display currency per one unit of
//! base currency.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::{Result, TrackerError};

/// Currency a user-entered amount is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnteredCurrency {
    /// Base currency, stored as-is
    Base,
    /// Display currency, divided by the exchange rate on entry
    Display,
}

impl EnteredCurrency {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnteredCurrency::Base => "BASE",
            EnteredCurrency::Display => "DISPLAY",
        }
    }
}

impl FromStr for EnteredCurrency {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BASE" | "USD" => Ok(EnteredCurrency::Base),
            "DISPLAY" | "MXN" | "SECONDARY" => Ok(EnteredCurrency::Display),
            _ => Err(()),
        }
    }
}

/// Convert a user-entered amount to the base currency.
///
/// Base amounts pass through untouched. Display amounts are divided by the
/// rate, which must be positive for the division to mean anything.
pub fn to_base(amount: Decimal, currency: EnteredCurrency, rate: Decimal) -> Result<Decimal> {
    match currency {
        EnteredCurrency::Base => Ok(amount),
        EnteredCurrency::Display => {
            if rate <= Decimal::ZERO {
                return Err(TrackerError::CurrencyError(format!(
                    "cannot convert display amount with non-positive exchange rate {}",
                    rate
                ))
                .into());
            }
            Ok(amount / rate)
        }
    }
}

/// Project a base-currency amount into the display currency.
pub fn to_display(amount: Decimal, rate: Decimal) -> Decimal {
    amount * rate
}
