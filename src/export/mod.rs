//! Report export - spreadsheet output for the snapshot and sales ledger
//!
//! Both writers produce the same shape: a summary block of derived metrics
//! followed by the per-sale ledger (date, client, payment method, sale
//! price, cost at sale, realized profit).

use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_xlsxwriter::{Format, Workbook};

use crate::engine::{FinancialSnapshot, Sale};
use crate::reports::build_ledger;

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl FromStr for ExportFormat {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "xlsx" => Ok(ExportFormat::Xlsx),
            _ => Err(()),
        }
    }
}

impl ExportFormat {
    /// Pick a format from the file extension, defaulting to CSV.
    pub fn detect(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("xlsx") => ExportFormat::Xlsx,
            _ => ExportFormat::Csv,
        }
    }
}

const LEDGER_HEADERS: [&str; 6] = [
    "Date",
    "Client",
    "Payment Method",
    "Sale Price (USD)",
    "Cost at Sale (USD)",
    "Realized Profit (USD)",
];

fn fmt2(value: Decimal) -> String {
    format!("{:.2}", value)
}

fn fmt_opt(value: Option<Decimal>) -> String {
    value.map(fmt2).unwrap_or_else(|| "-".to_string())
}

/// Summary block rows shared by both writers
fn summary_rows(snapshot: &FinancialSnapshot) -> Vec<(&'static str, String)> {
    vec![
        (
            "Total Investment (USD)",
            fmt2(snapshot.total_investment_usd),
        ),
        (
            "Total Investment (display)",
            fmt2(snapshot.total_investment_display),
        ),
        (
            "Total Revenue (USD)",
            fmt2(snapshot.total_revenue_usd),
        ),
        ("Pieces Sold", snapshot.pieces_sold.to_string()),
        ("Remaining Pieces", snapshot.remaining_pieces.to_string()),
        (
            "Capital Recovered (USD)",
            fmt2(snapshot.capital_recovered_usd),
        ),
        (
            "Remaining Investment (USD)",
            fmt2(snapshot.remaining_investment_usd),
        ),
        (
            "Dynamic Cost per Piece (USD)",
            fmt2(snapshot.dynamic_cost_per_piece_usd),
        ),
        (
            "Initial Cost per Piece (USD)",
            fmt_opt(snapshot.initial_cost_per_piece_usd),
        ),
        ("Net Profit (USD)", fmt2(snapshot.net_profit_usd)),
        ("Average Margin (USD)", fmt_opt(snapshot.average_margin_usd)),
        ("Recovery Progress (%)", fmt_opt(snapshot.recovery_progress)),
        (
            "Target Revenue (USD)",
            fmt2(snapshot.target_revenue_usd),
        ),
        ("Progress to Target (%)", fmt_opt(snapshot.progress_to_target)),
        (
            "Phase",
            if snapshot.is_roi_reached {
                "free profit".to_string()
            } else {
                "recovery".to_string()
            },
        ),
    ]
}

/// Write the report in the given format.
pub fn export_report(
    path: &Path,
    format: ExportFormat,
    snapshot: &FinancialSnapshot,
    sales: &[Sale],
) -> Result<()> {
    match format {
        ExportFormat::Csv => export_csv(path, snapshot, sales),
        ExportFormat::Xlsx => export_xlsx(path, snapshot, sales),
    }
}

/// Write the summary block and ledger as CSV.
pub fn export_csv(path: &Path, snapshot: &FinancialSnapshot, sales: &[Sale]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .context(format!("Failed to create CSV file at {:?}", path))?;

    for (label, value) in summary_rows(snapshot) {
        writer.write_record([label, value.as_str(), "", "", "", ""])?;
    }

    writer.write_record(["", "", "", "", "", ""])?;
    writer.write_record(LEDGER_HEADERS)?;

    for entry in build_ledger(sales) {
        writer.write_record([
            entry.date.format("%Y-%m-%d").to_string(),
            entry.client.unwrap_or_default(),
            entry.method,
            fmt2(entry.price_usd),
            fmt2(entry.cost_at_sale_usd),
            fmt2(entry.realized_profit_usd),
        ])?;
    }

    writer.flush().context("Failed to flush CSV output")?;
    Ok(())
}

/// Write the summary block and ledger as a single-sheet XLSX workbook.
pub fn export_xlsx(path: &Path, snapshot: &FinancialSnapshot, sales: &[Sale]) -> Result<()> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Pallet Report")?;

    let mut row: u32 = 0;
    for (label, value) in summary_rows(snapshot) {
        worksheet.write_with_format(row, 0, label, &bold)?;
        worksheet.write_string(row, 1, value.as_str())?;
        row += 1;
    }

    row += 1;
    for (col, header) in LEDGER_HEADERS.iter().enumerate() {
        worksheet.write_with_format(row, col as u16, *header, &bold)?;
    }
    row += 1;

    for entry in build_ledger(sales) {
        worksheet.write_string(row, 0, entry.date.format("%Y-%m-%d").to_string())?;
        worksheet.write_string(row, 1, entry.client.unwrap_or_default())?;
        worksheet.write_string(row, 2, entry.method.as_str())?;
        worksheet.write_number(row, 3, entry.price_usd.to_f64().unwrap_or(0.0))?;
        worksheet.write_number(row, 4, entry.cost_at_sale_usd.to_f64().unwrap_or(0.0))?;
        worksheet.write_number(row, 5, entry.realized_profit_usd.to_f64().unwrap_or(0.0))?;
        row += 1;
    }

    workbook
        .save(path)
        .context(format!("Failed to write XLSX file at {:?}", path))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{compute_snapshot, PalletConfig};
    use chrono::{NaiveDate, Utc};
    use rust_decimal_macros::dec;

    fn make_state() -> (FinancialSnapshot, Vec<Sale>) {
        let config = PalletConfig {
            investment_usd: dec!(1000),
            exchange_rate: dec!(20),
            total_pieces: 100,
            additional_expenses_usd: dec!(0),
            target_multiplier: dec!(2),
        };
        let sales = vec![Sale {
            id: Some(1),
            date: NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
            price_usd: dec!(25),
            method: "cash".to_string(),
            client: Some("maria".to_string()),
            real_cost_at_sale_usd: dec!(10),
            created_at: Utc::now(),
        }];
        let snapshot = compute_snapshot(&config, &sales);
        (snapshot, sales)
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(
            ExportFormat::detect(Path::new("report.xlsx")),
            ExportFormat::Xlsx
        );
        assert_eq!(
            ExportFormat::detect(Path::new("report.csv")),
            ExportFormat::Csv
        );
        assert_eq!(ExportFormat::detect(Path::new("report")), ExportFormat::Csv);
        assert_eq!("XLSX".parse::<ExportFormat>().ok(), Some(ExportFormat::Xlsx));
        assert_eq!("ods".parse::<ExportFormat>().ok(), None);
    }

    #[test]
    fn test_csv_export_contains_summary_and_ledger() {
        let (snapshot, sales) = make_state();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");

        export_csv(&path, &snapshot, &sales).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("Total Investment (USD),1000.00"));
        assert!(content.contains("Payment Method"));
        assert!(content.contains("2025-06-15,maria,cash,25.00,10.00,15.00"));
    }

    #[test]
    fn test_csv_export_renders_absent_metrics_as_dash() {
        let config = PalletConfig {
            total_pieces: 0,
            ..PalletConfig::default()
        };
        let snapshot = compute_snapshot(&config, &[]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");

        export_csv(&path, &snapshot, &[]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("Initial Cost per Piece (USD),-"));
    }

    #[test]
    fn test_xlsx_export_writes_file() {
        let (snapshot, sales) = make_state();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.xlsx");

        export_xlsx(&path, &snapshot, &sales).unwrap();

        let metadata = std::fs::metadata(&path).unwrap();
        assert!(metadata.len() > 0);
    }
}
