use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TrackerError};

/// Pallet purchase configuration. One instance per database, user-edited,
/// never deleted (a reset clears the sales log, not the config).
///
/// All amounts are in the base currency; `exchange_rate` is units of
/// display currency per one base unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PalletConfig {
    pub investment_usd: Decimal,
    pub exchange_rate: Decimal,
    pub total_pieces: i64,
    pub additional_expenses_usd: Decimal,
    pub target_multiplier: Decimal,
}

impl Default for PalletConfig {
    /// Documented defaults: investment 1250, rate 18.5, 250 pieces,
    /// no extra expenses, x2 target.
    fn default() -> Self {
        Self {
            investment_usd: Decimal::from(1250),
            exchange_rate: Decimal::new(185, 1),
            total_pieces: 250,
            additional_expenses_usd: Decimal::ZERO,
            target_multiplier: Decimal::from(2),
        }
    }
}

impl PalletConfig {
    /// Base investment plus additional expenses.
    pub fn total_investment_usd(&self) -> Decimal {
        self.investment_usd + self.additional_expenses_usd
    }

    /// Check field ranges. The engine itself never validates; this is for
    /// the settings-edit path, so a bad value is rejected before it is
    /// persisted. Zero `total_pieces` is accepted and simply leaves the
    /// per-piece metrics absent in the snapshot.
    pub fn validate(&self) -> Result<()> {
        if self.investment_usd < Decimal::ZERO {
            return Err(TrackerError::ValidationError(format!(
                "investment must be >= 0, got {}",
                self.investment_usd
            ))
            .into());
        }
        if self.additional_expenses_usd < Decimal::ZERO {
            return Err(TrackerError::ValidationError(format!(
                "additional expenses must be >= 0, got {}",
                self.additional_expenses_usd
            ))
            .into());
        }
        if self.exchange_rate <= Decimal::ZERO {
            return Err(TrackerError::ValidationError(format!(
                "exchange rate must be > 0, got {}",
                self.exchange_rate
            ))
            .into());
        }
        if self.total_pieces < 0 {
            return Err(TrackerError::ValidationError(format!(
                "total pieces must be >= 0, got {}",
                self.total_pieces
            ))
            .into());
        }
        if self.target_multiplier <= Decimal::ZERO {
            return Err(TrackerError::ValidationError(format!(
                "target multiplier must be > 0, got {}",
                self.target_multiplier
            ))
            .into());
        }
        Ok(())
    }
}
