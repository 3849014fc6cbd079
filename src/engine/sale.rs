use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::currency::{self, EnteredCurrency};
use crate::error::Result;

use super::config::PalletConfig;
use super::snapshot::compute_snapshot;

/// One piece sold out of the pallet. Append-only log entry; deleted
/// individually or in bulk, never edited in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    /// Assigned by the persistence adapter on insert, immutable afterwards
    pub id: Option<i64>,
    pub date: NaiveDate,
    /// Always base currency, whatever currency the amount was entered in
    pub price_usd: Decimal,
    /// Free-form payment method label
    pub method: String,
    /// Free-form buyer reference
    pub client: Option<String>,
    /// Dynamic per-piece cost at the moment of this sale, captured for
    /// historical accuracy; never recomputed retroactively
    pub real_cost_at_sale_usd: Decimal,
    pub created_at: DateTime<Utc>,
}

/// User-entered sale data before conversion and cost stamping.
#[derive(Debug, Clone)]
pub struct SaleDraft {
    pub date: NaiveDate,
    pub amount: Decimal,
    pub currency: EnteredCurrency,
    pub method: String,
    pub client: Option<String>,
}

/// Build a `Sale` from user input against the current state of the log.
///
/// The entered amount is converted to base currency at the configured rate,
/// and the cost basis is stamped from the *pre-insertion* sales list: the
/// snapshot reflects the state immediately before this sale, not after.
/// The id stays unassigned until the database insert supplies one.
pub fn record_sale(config: &PalletConfig, sales: &[Sale], draft: SaleDraft) -> Result<Sale> {
    let price_usd = currency::to_base(draft.amount, draft.currency, config.exchange_rate)?;
    let snapshot = compute_snapshot(config, sales);

    Ok(Sale {
        id: None,
        date: draft.date,
        price_usd,
        method: draft.method,
        client: draft.client,
        real_cost_at_sale_usd: snapshot.dynamic_cost_per_piece_usd,
        created_at: Utc::now(),
    })
}
