// Database module - SQLite persistence for the pallet config and sales log

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{info, warn};

use crate::engine::{PalletConfig, Sale};

/// Get the default database path (~/.recoup/data.db)
pub fn get_default_db_path() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    let recoup_dir = PathBuf::from(home).join(".recoup");

    // Create directory if it doesn't exist
    std::fs::create_dir_all(&recoup_dir).context("Failed to create .recoup directory")?;

    Ok(recoup_dir.join("data.db"))
}

/// Open database connection
pub fn open_db(db_path: Option<PathBuf>) -> Result<Connection> {
    let path = db_path.unwrap_or(get_default_db_path()?);
    let conn = Connection::open(&path).context(format!("Failed to open database at {:?}", path))?;

    conn.execute("PRAGMA foreign_keys = ON", [])
        .context("Failed to enable foreign keys")?;

    Ok(conn)
}

/// Initialize the database with schema
///
/// This function creates the database file and runs the schema SQL
/// to set up all tables and indexes.
pub fn init_database(db_path: Option<PathBuf>) -> Result<()> {
    let path = db_path.unwrap_or(get_default_db_path()?);

    info!("Initializing database at: {:?}", path);

    let conn = open_db(Some(path))?;

    let schema_sql = include_str!("schema.sql");

    conn.execute_batch(schema_sql)
        .context("Failed to execute schema")?;

    info!("Database initialized successfully");
    Ok(())
}

/// Load the pallet config, falling back to the documented defaults when the
/// row is missing or its values do not parse. A malformed row is reported
/// but never fatal.
pub fn load_config(conn: &Connection) -> Result<PalletConfig> {
    let mut stmt = conn.prepare(
        "SELECT investment_usd, exchange_rate, total_pieces,
                additional_expenses_usd, target_multiplier
         FROM pallet_config WHERE id = 1",
    )?;

    let row = stmt
        .query_row([], |row| {
            Ok(PalletConfig {
                investment_usd: get_decimal_value(row, 0)?,
                exchange_rate: get_decimal_value(row, 1)?,
                total_pieces: row.get(2)?,
                additional_expenses_usd: get_decimal_value(row, 3)?,
                target_multiplier: get_decimal_value(row, 4)?,
            })
        })
        .optional();

    match row {
        Ok(Some(config)) => Ok(config),
        Ok(None) => Ok(PalletConfig::default()),
        Err(e) => {
            warn!("Malformed pallet config row, using defaults: {}", e);
            Ok(PalletConfig::default())
        }
    }
}

/// Save the pallet config (single row, replaced in place)
pub fn save_config(conn: &Connection, config: &PalletConfig) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO pallet_config (
            id, investment_usd, exchange_rate, total_pieces,
            additional_expenses_usd, target_multiplier, updated_at
        ) VALUES (1, ?1, ?2, ?3, ?4, ?5, datetime('now'))",
        params![
            config.investment_usd.to_string(),
            config.exchange_rate.to_string(),
            config.total_pieces,
            config.additional_expenses_usd.to_string(),
            config.target_multiplier.to_string(),
        ],
    )?;

    Ok(())
}

/// Insert a sale, returning the fresh unique id assigned by SQLite.
/// This is the only mutation path for the sales log besides deletion.
pub fn insert_sale(conn: &Connection, sale: &Sale) -> Result<i64> {
    conn.execute(
        "INSERT INTO sales (
            sale_date, price_usd, method, client, real_cost_at_sale_usd, created_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            sale.date,
            sale.price_usd.to_string(),
            sale.method,
            sale.client,
            sale.real_cost_at_sale_usd.to_string(),
            sale.created_at,
        ],
    )?;

    Ok(conn.last_insert_rowid())
}

/// Get all sales in insertion order
pub fn get_all_sales(conn: &Connection) -> Result<Vec<Sale>> {
    let mut stmt = conn.prepare(
        "SELECT id, sale_date, price_usd, method, client, real_cost_at_sale_usd, created_at
         FROM sales
         ORDER BY id ASC",
    )?;

    let sales = stmt
        .query_map([], |row| {
            Ok(Sale {
                id: Some(row.get(0)?),
                date: row.get(1)?,
                price_usd: get_decimal_value(row, 2)?,
                method: row.get(3)?,
                client: row.get(4)?,
                real_cost_at_sale_usd: get_decimal_value(row, 5)?,
                created_at: row.get(6)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(sales)
}

/// Delete a single sale by id. Returns false when the id does not exist.
pub fn delete_sale(conn: &Connection, id: i64) -> Result<bool> {
    let affected = conn.execute("DELETE FROM sales WHERE id = ?1", params![id])?;
    Ok(affected > 0)
}

/// Delete every sale (pallet reset). The config row stays untouched.
pub fn clear_sales(conn: &Connection) -> Result<usize> {
    let affected = conn.execute("DELETE FROM sales", [])?;
    Ok(affected)
}

/// Helper to read Decimal from SQLite (handles INTEGER, REAL and TEXT)
pub fn get_decimal_value(row: &rusqlite::Row, idx: usize) -> Result<Decimal, rusqlite::Error> {
    use rusqlite::types::ValueRef;

    match row.get_ref(idx)? {
        ValueRef::Text(bytes) => {
            let s = std::str::from_utf8(bytes)
                .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
            Decimal::from_str(s).map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
        }
        ValueRef::Integer(i) => Ok(Decimal::from(i)),
        ValueRef::Real(f) => {
            Decimal::try_from(f).map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
        }
        _ => Err(rusqlite::Error::InvalidColumnType(
            idx,
            "decimal".to_string(),
            rusqlite::types::Type::Null,
        )),
    }
}
