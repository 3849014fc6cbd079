use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::engine::Sale;

/// One row of the per-sale ledger: the raw sale plus its realized profit
/// against the cost basis captured when the sale happened.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerEntry {
    pub date: NaiveDate,
    pub client: Option<String>,
    pub method: String,
    pub price_usd: Decimal,
    pub cost_at_sale_usd: Decimal,
    pub realized_profit_usd: Decimal,
}

/// Realized profit of a single sale against its stored cost basis,
/// floored at zero.
pub fn realized_profit(sale: &Sale) -> Decimal {
    (sale.price_usd - sale.real_cost_at_sale_usd).max(Decimal::ZERO)
}

/// Build ledger rows from the sales log, preserving insertion order.
pub fn build_ledger(sales: &[Sale]) -> Vec<LedgerEntry> {
    sales
        .iter()
        .map(|sale| LedgerEntry {
            date: sale.date,
            client: sale.client.clone(),
            method: sale.method.clone(),
            price_usd: sale.price_usd,
            cost_at_sale_usd: sale.real_cost_at_sale_usd,
            realized_profit_usd: realized_profit(sale),
        })
        .collect()
}
