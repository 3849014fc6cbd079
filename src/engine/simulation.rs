use rust_decimal::Decimal;
use serde::Serialize;

use super::snapshot::FinancialSnapshot;

/// Projection of "sell every remaining piece at this single price".
/// Pure what-if; the sales log is untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    /// Margin of the hypothetical price over the current dynamic cost,
    /// floored at zero
    pub profit_per_piece_usd: Decimal,
    pub projected_total_revenue_usd: Decimal,
    /// Signed under `simulate_raw`, floored at zero under `simulate_clamped`
    pub projected_net_profit_usd: Decimal,
    pub meets_target: bool,
}

/// Simulate selling out at `price_usd`, reporting projected net profit as a
/// signed value: a price below break-even shows up as a loss.
pub fn simulate_raw(snapshot: &FinancialSnapshot, price_usd: Decimal) -> SimulationResult {
    let profit_per_piece_usd =
        (price_usd - snapshot.dynamic_cost_per_piece_usd).max(Decimal::ZERO);

    let projected_total_revenue_usd =
        snapshot.total_revenue_usd + Decimal::from(snapshot.remaining_pieces) * price_usd;

    let projected_net_profit_usd = projected_total_revenue_usd - snapshot.total_investment_usd;

    let meets_target = projected_total_revenue_usd >= snapshot.target_revenue_usd;

    SimulationResult {
        profit_per_piece_usd,
        projected_total_revenue_usd,
        projected_net_profit_usd,
        meets_target,
    }
}

/// Simulate selling out at `price_usd` with the projected net profit
/// floored at zero, mirroring how the live `net_profit_usd` metric behaves
/// during the recovery phase.
pub fn simulate_clamped(snapshot: &FinancialSnapshot, price_usd: Decimal) -> SimulationResult {
    let raw = simulate_raw(snapshot, price_usd);
    SimulationResult {
        projected_net_profit_usd: raw.projected_net_profit_usd.max(Decimal::ZERO),
        ..raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{compute_snapshot, PalletConfig};
    use rust_decimal_macros::dec;

    fn fresh_snapshot() -> FinancialSnapshot {
        let config = PalletConfig {
            investment_usd: dec!(1000),
            exchange_rate: dec!(20),
            total_pieces: 100,
            additional_expenses_usd: dec!(0),
            target_multiplier: dec!(2),
        };
        compute_snapshot(&config, &[])
    }

    #[test]
    fn test_selling_out_above_cost_projects_profit() {
        let snapshot = fresh_snapshot();
        let result = simulate_raw(&snapshot, dec!(25));

        assert_eq!(result.profit_per_piece_usd, dec!(15));
        assert_eq!(result.projected_total_revenue_usd, dec!(2500));
        assert_eq!(result.projected_net_profit_usd, dec!(1500));
        assert!(result.meets_target);
    }

    #[test]
    fn test_price_below_break_even_diverges_between_variants() {
        let snapshot = fresh_snapshot();

        let raw = simulate_raw(&snapshot, dec!(5));
        assert_eq!(raw.profit_per_piece_usd, dec!(0));
        assert_eq!(raw.projected_total_revenue_usd, dec!(500));
        assert_eq!(raw.projected_net_profit_usd, dec!(-500));
        assert!(!raw.meets_target);

        let clamped = simulate_clamped(&snapshot, dec!(5));
        assert_eq!(clamped.projected_net_profit_usd, dec!(0));
        // Everything except the clamp is shared
        assert_eq!(clamped.profit_per_piece_usd, raw.profit_per_piece_usd);
        assert_eq!(
            clamped.projected_total_revenue_usd,
            raw.projected_total_revenue_usd
        );
        assert_eq!(clamped.meets_target, raw.meets_target);
    }

    #[test]
    fn test_target_boundary_is_inclusive() {
        let snapshot = fresh_snapshot();
        // target revenue is 2000 over 100 pieces
        let at_target = simulate_raw(&snapshot, dec!(20));
        assert!(at_target.meets_target);

        let below_target = simulate_raw(&snapshot, dec!(19.99));
        assert!(!below_target.meets_target);
    }

    #[test]
    fn test_clamp_leaves_profitable_projection_untouched() {
        let snapshot = fresh_snapshot();
        let raw = simulate_raw(&snapshot, dec!(30));
        let clamped = simulate_clamped(&snapshot, dec!(30));
        assert_eq!(raw, clamped);
    }
}
