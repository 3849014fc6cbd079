//! Output formatting module for CLI display
//!
//! This module handles all terminal output formatting, separating
//! the concerns of data calculation from presentation.

use colored::Colorize;
use tabled::{
    settings::{object::Columns, Alignment, Style},
    Table, Tabled,
};

use crate::engine::{FinancialSnapshot, Sale, SimulationResult};
use crate::reports::build_ledger;
use crate::utils::{format_currency, format_opt_currency, format_percent};

/// Format a snapshot for JSON output
pub fn format_snapshot_json(snapshot: &FinancialSnapshot) -> String {
    serde_json::to_string_pretty(snapshot)
        .unwrap_or_else(|e| format!(r#"{{"error": "JSON serialization failed: {}"}}"#, e))
}

/// Format a snapshot for terminal table output
pub fn format_snapshot_table(snapshot: &FinancialSnapshot) -> String {
    let mut output = String::new();

    output.push_str(&format!("\n{} Pallet Summary\n\n", "📦".cyan().bold()));

    #[derive(Tabled)]
    struct MetricRow {
        #[tabled(rename = "Metric")]
        metric: &'static str,
        #[tabled(rename = "Value")]
        value: String,
    }

    let rows = vec![
        MetricRow {
            metric: "Total investment",
            value: format_currency(snapshot.total_investment_usd),
        },
        MetricRow {
            metric: "Total investment (display)",
            value: format_currency(snapshot.total_investment_display),
        },
        MetricRow {
            metric: "Total revenue",
            value: format_currency(snapshot.total_revenue_usd),
        },
        MetricRow {
            metric: "Pieces sold",
            value: snapshot.pieces_sold.to_string(),
        },
        MetricRow {
            metric: "Remaining pieces",
            value: snapshot.remaining_pieces.to_string(),
        },
        MetricRow {
            metric: "Capital recovered",
            value: format_currency(snapshot.capital_recovered_usd),
        },
        MetricRow {
            metric: "Remaining investment",
            value: format_currency(snapshot.remaining_investment_usd),
        },
        MetricRow {
            metric: "Dynamic cost / piece",
            value: format_currency(snapshot.dynamic_cost_per_piece_usd),
        },
        MetricRow {
            metric: "Initial cost / piece",
            value: format_opt_currency(snapshot.initial_cost_per_piece_usd),
        },
        MetricRow {
            metric: "Net profit",
            value: format_currency(snapshot.net_profit_usd),
        },
        MetricRow {
            metric: "Average margin / sale",
            value: format_opt_currency(snapshot.average_margin_usd),
        },
        MetricRow {
            metric: "Recovery progress",
            value: format_percent(snapshot.recovery_progress),
        },
        MetricRow {
            metric: "Target revenue",
            value: format_currency(snapshot.target_revenue_usd),
        },
        MetricRow {
            metric: "Progress to target",
            value: format_percent(snapshot.progress_to_target),
        },
    ];

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.modify(Columns::new(1..2), Alignment::right());
    output.push_str(&table.to_string());
    output.push('\n');

    let phase = if snapshot.is_roi_reached {
        "Phase: free profit (investment recovered)".green().bold()
    } else {
        "Phase: recovery".yellow().bold()
    };
    output.push_str(&format!("\n{}\n", phase));

    output
}

/// Format the sales ledger for JSON output
pub fn format_sales_json(sales: &[Sale]) -> String {
    serde_json::to_string_pretty(sales)
        .unwrap_or_else(|e| format!(r#"{{"error": "JSON serialization failed: {}"}}"#, e))
}

/// Format the sales ledger for terminal table output
pub fn format_sales_table(sales: &[Sale]) -> String {
    if sales.is_empty() {
        return format!("\n{} No sales recorded\n", "ℹ".blue().bold());
    }

    let mut output = String::new();
    output.push_str(&format!(
        "\n{} Sales Ledger ({} sales)\n\n",
        "📦".cyan().bold(),
        sales.len()
    ));

    #[derive(Tabled)]
    struct LedgerRow {
        #[tabled(rename = "ID")]
        id: String,
        #[tabled(rename = "Date")]
        date: String,
        #[tabled(rename = "Client")]
        client: String,
        #[tabled(rename = "Method")]
        method: String,
        #[tabled(rename = "Price")]
        price: String,
        #[tabled(rename = "Cost at Sale")]
        cost: String,
        #[tabled(rename = "Profit")]
        profit: String,
    }

    let rows: Vec<LedgerRow> = sales
        .iter()
        .zip(build_ledger(sales))
        .map(|(sale, entry)| LedgerRow {
            id: sale
                .id
                .map(|id| id.to_string())
                .unwrap_or_else(|| "-".to_string()),
            date: entry.date.format("%Y-%m-%d").to_string(),
            client: entry.client.unwrap_or_default(),
            method: entry.method,
            price: format_currency(entry.price_usd),
            cost: format_currency(entry.cost_at_sale_usd),
            profit: format_currency(entry.realized_profit_usd),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.modify(Columns::new(4..), Alignment::right());
    output.push_str(&table.to_string());
    output.push('\n');

    output
}

/// Format a simulation result for JSON output
pub fn format_simulation_json(result: &SimulationResult) -> String {
    serde_json::to_string_pretty(result)
        .unwrap_or_else(|e| format!(r#"{{"error": "JSON serialization failed: {}"}}"#, e))
}

/// Format a simulation result for terminal table output
pub fn format_simulation_table(result: &SimulationResult) -> String {
    let mut output = String::new();

    output.push_str(&format!("\n{} Sell-out Projection\n\n", "📦".cyan().bold()));

    #[derive(Tabled)]
    struct ProjectionRow {
        #[tabled(rename = "Metric")]
        metric: &'static str,
        #[tabled(rename = "Value")]
        value: String,
    }

    let rows = vec![
        ProjectionRow {
            metric: "Profit / piece",
            value: format_currency(result.profit_per_piece_usd),
        },
        ProjectionRow {
            metric: "Projected total revenue",
            value: format_currency(result.projected_total_revenue_usd),
        },
        ProjectionRow {
            metric: "Projected net profit",
            value: format_currency(result.projected_net_profit_usd),
        },
    ];

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.modify(Columns::new(1..2), Alignment::right());
    output.push_str(&table.to_string());
    output.push('\n');

    let verdict = if result.meets_target {
        "Meets the target".green().bold()
    } else {
        "Falls short of the target".yellow().bold()
    };
    output.push_str(&format!("\n{}\n", verdict));

    output
}
