//! Integration tests for the pallet tracker
//!
//! These tests verify end-to-end functionality:
//! - Recording sales through the engine and persisting them
//! - Snapshot round-trip through the SQLite adapter
//! - Cost-basis stamps staying fixed as the log grows
//! - Pallet reset semantics (sales cleared, config kept)

use anyhow::Result;
use chrono::NaiveDate;
use recoup::currency::EnteredCurrency;
use recoup::db::{
    clear_sales, get_all_sales, init_database, insert_sale, load_config, open_db, save_config,
};
use recoup::engine::{compute_snapshot, record_sale, PalletConfig, SaleDraft};
use rusqlite::Connection;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tempfile::TempDir;

/// Test helper: Create a temporary database
fn create_test_db() -> Result<(TempDir, Connection)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    init_database(Some(db_path.clone()))?;
    let conn = open_db(Some(db_path))?;
    Ok((temp_dir, conn))
}

fn test_config() -> PalletConfig {
    PalletConfig {
        investment_usd: dec!(1000),
        exchange_rate: dec!(20),
        total_pieces: 100,
        additional_expenses_usd: dec!(0),
        target_multiplier: dec!(2),
    }
}

fn make_draft(amount: Decimal, currency: EnteredCurrency) -> SaleDraft {
    SaleDraft {
        date: NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
        amount,
        currency,
        method: "cash".to_string(),
        client: None,
    }
}

/// Test helper: record a sale against the persisted log and insert it
fn record_and_insert(
    conn: &Connection,
    config: &PalletConfig,
    amount: Decimal,
    currency: EnteredCurrency,
) -> Result<i64> {
    let sales = get_all_sales(conn)?;
    let sale = record_sale(config, &sales, make_draft(amount, currency))?;
    insert_sale(conn, &sale)
}

#[test]
fn test_snapshot_round_trip_through_storage() -> Result<()> {
    let (_dir, conn) = create_test_db()?;
    let config = test_config();
    save_config(&conn, &config)?;

    // Build an in-memory log alongside the persisted one
    let mut in_memory = Vec::new();
    for amount in [dec!(120), dec!(80.50), dec!(45.25)] {
        let sale = record_sale(&config, &in_memory, make_draft(amount, EnteredCurrency::Base))?;
        insert_sale(&conn, &sale)?;
        in_memory.push(sale);
    }

    // Reloading config and sales must reproduce an identical snapshot
    let loaded_config = load_config(&conn)?;
    let loaded_sales = get_all_sales(&conn)?;

    assert_eq!(loaded_config, config);
    assert_eq!(
        compute_snapshot(&loaded_config, &loaded_sales),
        compute_snapshot(&config, &in_memory)
    );
    Ok(())
}

#[test]
fn test_cost_basis_stamps_drift_but_never_rewrite() -> Result<()> {
    let (_dir, conn) = create_test_db()?;
    let config = test_config();
    save_config(&conn, &config)?;

    // First sale on the fresh pallet carries the initial break-even cost
    record_and_insert(&conn, &config, dec!(500), EnteredCurrency::Base)?;
    let after_first = get_all_sales(&conn)?;
    assert_eq!(after_first[0].real_cost_at_sale_usd, dec!(10));

    // Second sale sees 500 remaining over 99 pieces
    record_and_insert(&conn, &config, dec!(100), EnteredCurrency::Base)?;
    let after_second = get_all_sales(&conn)?;
    assert_eq!(
        after_second[1].real_cost_at_sale_usd,
        dec!(500) / dec!(99)
    );

    // The first stamp is untouched by the second insert
    assert_eq!(after_second[0].real_cost_at_sale_usd, dec!(10));
    Ok(())
}

#[test]
fn test_display_currency_sales_are_stored_in_base() -> Result<()> {
    let (_dir, conn) = create_test_db()?;
    let config = test_config();
    save_config(&conn, &config)?;

    // 2000 in display currency at rate 20 is 100 base
    record_and_insert(&conn, &config, dec!(2000), EnteredCurrency::Display)?;
    let sales = get_all_sales(&conn)?;

    assert_eq!(sales[0].price_usd, dec!(100));

    let snapshot = compute_snapshot(&config, &sales);
    assert_eq!(snapshot.total_revenue_usd, dec!(100));
    assert_eq!(snapshot.capital_recovered_usd, dec!(100));
    Ok(())
}

#[test]
fn test_recovery_lifecycle_through_persistence() -> Result<()> {
    let (_dir, conn) = create_test_db()?;
    let config = test_config();
    save_config(&conn, &config)?;

    // Ten sales at 120 push revenue to 1200, past the 1000 investment
    for _ in 0..10 {
        record_and_insert(&conn, &config, dec!(120), EnteredCurrency::Base)?;
    }

    let sales = get_all_sales(&conn)?;
    let snapshot = compute_snapshot(&config, &sales);

    assert_eq!(snapshot.pieces_sold, 10);
    assert_eq!(snapshot.remaining_pieces, 90);
    assert!(snapshot.is_roi_reached);
    assert_eq!(snapshot.net_profit_usd, dec!(200));
    assert_eq!(snapshot.capital_recovered_usd, dec!(1000));
    assert_eq!(snapshot.remaining_investment_usd, dec!(0));
    assert_eq!(snapshot.dynamic_cost_per_piece_usd, dec!(0));
    assert_eq!(snapshot.recovery_progress, Some(dec!(100)));
    Ok(())
}

#[test]
fn test_pallet_reset_clears_sales_and_keeps_config() -> Result<()> {
    let (_dir, conn) = create_test_db()?;
    let config = test_config();
    save_config(&conn, &config)?;

    record_and_insert(&conn, &config, dec!(120), EnteredCurrency::Base)?;
    record_and_insert(&conn, &config, dec!(80), EnteredCurrency::Base)?;

    assert_eq!(clear_sales(&conn)?, 2);
    assert!(get_all_sales(&conn)?.is_empty());
    assert_eq!(load_config(&conn)?, config);

    // A fresh snapshot starts over from zero revenue
    let snapshot = compute_snapshot(&load_config(&conn)?, &get_all_sales(&conn)?);
    assert_eq!(snapshot.total_revenue_usd, dec!(0));
    assert_eq!(snapshot.recovery_progress, Some(dec!(0)));
    Ok(())
}

#[test]
fn test_sale_ids_are_unique_and_sequential() -> Result<()> {
    let (_dir, conn) = create_test_db()?;
    let config = test_config();
    save_config(&conn, &config)?;

    let first = record_and_insert(&conn, &config, dec!(10), EnteredCurrency::Base)?;
    let second = record_and_insert(&conn, &config, dec!(10), EnteredCurrency::Base)?;
    let third = record_and_insert(&conn, &config, dec!(10), EnteredCurrency::Base)?;

    assert!(first < second && second < third);

    let ids: Vec<Option<i64>> = get_all_sales(&conn)?.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![Some(first), Some(second), Some(third)]);
    Ok(())
}
