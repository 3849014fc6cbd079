use rust_decimal::Decimal;
use serde::Serialize;

use crate::currency;

use super::config::PalletConfig;
use super::sale::Sale;

/// Derived metrics for the current state of the pallet.
///
/// Never persisted; recomputed from the config and the sales log on every
/// call. Ratio fields whose denominator is zero under a degenerate config
/// are `None` rather than infinity, so formatting code cannot accidentally
/// display garbage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialSnapshot {
    /// Base investment plus additional expenses
    pub total_investment_usd: Decimal,
    /// Investment projected into the display currency at the configured rate
    pub total_investment_display: Decimal,
    pub total_revenue_usd: Decimal,
    pub pieces_sold: i64,
    /// May go negative when oversold past the configured total; not clamped
    pub remaining_pieces: i64,
    /// Capped at the investment; revenue past it counts as profit instead
    pub capital_recovered_usd: Decimal,
    pub remaining_investment_usd: Decimal,
    /// Break-even price for each remaining piece; 0 once recovery is done
    /// or when no pieces remain
    pub dynamic_cost_per_piece_usd: Decimal,
    pub net_profit_usd: Decimal,
    /// Percentage in [0, 100]; None when the investment is zero
    pub recovery_progress: Option<Decimal>,
    /// Static original per-piece cost; None when the lot has zero pieces
    pub initial_cost_per_piece_usd: Option<Decimal>,
    /// Average per-sale margin against the initial (static) cost basis
    pub average_margin_usd: Option<Decimal>,
    pub target_revenue_usd: Decimal,
    /// Percentage; None when the target revenue is zero
    pub progress_to_target: Option<Decimal>,
    /// false = recovery phase, true = free-profit phase
    pub is_roi_reached: bool,
}

/// Derive a snapshot from the config and the sales log.
///
/// Pure function: no side effects, inputs untouched, O(n) over sales.
/// Aggregates are order-independent sums, so the ordering of `sales` only
/// matters to display code.
pub fn compute_snapshot(config: &PalletConfig, sales: &[Sale]) -> FinancialSnapshot {
    let total_investment_usd = config.total_investment_usd();
    let total_investment_display = currency::to_display(total_investment_usd, config.exchange_rate);

    let total_revenue_usd: Decimal = sales.iter().map(|s| s.price_usd).sum();
    let pieces_sold = sales.len() as i64;
    let remaining_pieces = config.total_pieces - pieces_sold;

    let capital_recovered_usd = total_revenue_usd.min(total_investment_usd);
    let remaining_investment_usd = (total_investment_usd - total_revenue_usd).max(Decimal::ZERO);

    let dynamic_cost_per_piece_usd = if remaining_pieces > 0 {
        remaining_investment_usd / Decimal::from(remaining_pieces)
    } else {
        Decimal::ZERO
    };

    let net_profit_usd = (total_revenue_usd - total_investment_usd).max(Decimal::ZERO);

    let recovery_progress = if total_investment_usd > Decimal::ZERO {
        Some(capital_recovered_usd / total_investment_usd * Decimal::ONE_HUNDRED)
    } else {
        None
    };

    let initial_cost_per_piece_usd = if config.total_pieces > 0 {
        Some(total_investment_usd / Decimal::from(config.total_pieces))
    } else {
        None
    };

    // Margin against the original cost basis, not the dynamic one. Absent
    // when the initial cost itself is undefined.
    let average_margin_usd = if pieces_sold == 0 {
        Some(Decimal::ZERO)
    } else {
        initial_cost_per_piece_usd
            .map(|initial| total_revenue_usd / Decimal::from(pieces_sold) - initial)
    };

    let target_revenue_usd = total_investment_usd * config.target_multiplier;
    let progress_to_target = if target_revenue_usd > Decimal::ZERO {
        Some(total_revenue_usd / target_revenue_usd * Decimal::ONE_HUNDRED)
    } else {
        None
    };

    let is_roi_reached = total_revenue_usd >= total_investment_usd;

    FinancialSnapshot {
        total_investment_usd,
        total_investment_display,
        total_revenue_usd,
        pieces_sold,
        remaining_pieces,
        capital_recovered_usd,
        remaining_investment_usd,
        dynamic_cost_per_piece_usd,
        net_profit_usd,
        recovery_progress,
        initial_cost_per_piece_usd,
        average_margin_usd,
        target_revenue_usd,
        progress_to_target,
        is_roi_reached,
    }
}
