use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use colored::Colorize;
use rust_decimal::Decimal;
use tracing::info;

use recoup::cli::{formatters, Cli, Commands, ConfigCommands, SalesCommands};
use recoup::currency::EnteredCurrency;
use recoup::engine::{
    compute_snapshot, record_sale, simulate_clamped, simulate_raw, SaleDraft,
};
use recoup::error::TrackerError;
use recoup::export::{export_report, ExportFormat};
use recoup::utils::format_currency;
use recoup::{db, engine};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    match cli.command {
        Commands::Init => handle_init(),

        Commands::Config { action } => match action {
            ConfigCommands::Show => handle_config_show(cli.json),
            ConfigCommands::Set {
                investment,
                rate,
                pieces,
                expenses,
                target_multiplier,
            } => handle_config_set(investment, rate, pieces, expenses, target_multiplier),
        },

        Commands::Sales { action } => match action {
            SalesCommands::Add {
                amount,
                currency,
                date,
                method,
                client,
            } => handle_sales_add(&amount, &currency, date, method, client),
            SalesCommands::List => handle_sales_list(cli.json),
            SalesCommands::Remove { id } => handle_sales_remove(id),
            SalesCommands::Clear { yes } => handle_sales_clear(yes),
        },

        Commands::Summary => handle_summary(cli.json),

        Commands::Simulate { price, raw } => handle_simulate(&price, raw, cli.json),

        Commands::Export { file, format } => handle_export(&file, format),
    }
}

/// Parse a decimal CLI argument with a readable error
fn parse_decimal(value: &str, field: &str) -> Result<Decimal> {
    Decimal::from_str(value.trim())
        .map_err(|_| TrackerError::ParseError(format!("invalid {} value: '{}'", field, value)).into())
}

/// Parse a YYYY-MM-DD date, defaulting to today when absent
fn parse_date(value: Option<String>) -> Result<NaiveDate> {
    match value {
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map_err(|_| TrackerError::ParseError(format!("invalid date: '{}'", s)).into()),
        None => Ok(Local::now().date_naive()),
    }
}

/// Open the database, creating schema on first use
fn open_database() -> Result<rusqlite::Connection> {
    db::init_database(None)?;
    db::open_db(None)
}

fn handle_init() -> Result<()> {
    db::init_database(None)?;
    println!("{} Database initialized", "✓".green().bold());
    Ok(())
}

fn handle_config_show(json_output: bool) -> Result<()> {
    let conn = open_database()?;
    let config = db::load_config(&conn)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    print_config(&config);
    Ok(())
}

fn handle_config_set(
    investment: Option<String>,
    rate: Option<String>,
    pieces: Option<i64>,
    expenses: Option<String>,
    target_multiplier: Option<String>,
) -> Result<()> {
    let conn = open_database()?;
    let mut config = db::load_config(&conn)?;

    if let Some(value) = investment {
        config.investment_usd = parse_decimal(&value, "investment")?;
    }
    if let Some(value) = rate {
        config.exchange_rate = parse_decimal(&value, "exchange rate")?;
    }
    if let Some(value) = pieces {
        config.total_pieces = value;
    }
    if let Some(value) = expenses {
        config.additional_expenses_usd = parse_decimal(&value, "expenses")?;
    }
    if let Some(value) = target_multiplier {
        config.target_multiplier = parse_decimal(&value, "target multiplier")?;
    }

    config.validate()?;
    db::save_config(&conn, &config).context("Failed to save configuration")?;
    info!("Configuration updated");

    println!("{} Configuration saved", "✓".green().bold());
    print_config(&config);
    Ok(())
}

fn print_config(config: &engine::PalletConfig) {
    println!("  Investment:        {}", format_currency(config.investment_usd));
    println!("  Exchange rate:     {}", config.exchange_rate);
    println!("  Total pieces:      {}", config.total_pieces);
    println!(
        "  Extra expenses:    {}",
        format_currency(config.additional_expenses_usd)
    );
    println!("  Target multiplier: x{}", config.target_multiplier);
}

fn handle_sales_add(
    amount: &str,
    currency: &str,
    date: Option<String>,
    method: String,
    client: Option<String>,
) -> Result<()> {
    let conn = open_database()?;
    let config = db::load_config(&conn)?;
    let sales = db::get_all_sales(&conn)?;

    let entered = EnteredCurrency::from_str(currency)
        .map_err(|_| TrackerError::ParseError(format!("invalid currency: '{}'", currency)))?;

    let draft = SaleDraft {
        date: parse_date(date)?,
        amount: parse_decimal(amount, "amount")?,
        currency: entered,
        method,
        client,
    };

    let sale = record_sale(&config, &sales, draft)?;
    let id = db::insert_sale(&conn, &sale).context("Failed to insert sale")?;
    info!("Recorded sale {} at {}", id, sale.price_usd);

    println!(
        "{} Sale #{} recorded: {} (cost basis {})",
        "✓".green().bold(),
        id,
        format_currency(sale.price_usd),
        format_currency(sale.real_cost_at_sale_usd)
    );
    Ok(())
}

fn handle_sales_list(json_output: bool) -> Result<()> {
    let conn = open_database()?;
    let sales = db::get_all_sales(&conn)?;

    if json_output {
        println!("{}", formatters::format_sales_json(&sales));
        return Ok(());
    }

    print!("{}", formatters::format_sales_table(&sales));
    Ok(())
}

fn handle_sales_remove(id: i64) -> Result<()> {
    let conn = open_database()?;

    if db::delete_sale(&conn, id)? {
        println!("{} Sale #{} removed", "✓".green().bold(), id);
    } else {
        println!("{} No sale with id {}", "ℹ".blue().bold(), id);
    }
    Ok(())
}

fn handle_sales_clear(yes: bool) -> Result<()> {
    if !yes {
        println!(
            "{} This deletes every sale. Re-run with --yes to confirm.",
            "ℹ".blue().bold()
        );
        return Ok(());
    }

    let conn = open_database()?;
    let removed = db::clear_sales(&conn)?;
    println!("{} Removed {} sales", "✓".green().bold(), removed);
    Ok(())
}

fn handle_summary(json_output: bool) -> Result<()> {
    let conn = open_database()?;
    let config = db::load_config(&conn)?;
    let sales = db::get_all_sales(&conn)?;
    let snapshot = compute_snapshot(&config, &sales);

    if json_output {
        println!("{}", formatters::format_snapshot_json(&snapshot));
        return Ok(());
    }

    print!("{}", formatters::format_snapshot_table(&snapshot));
    Ok(())
}

fn handle_simulate(price: &str, raw: bool, json_output: bool) -> Result<()> {
    let conn = open_database()?;
    let config = db::load_config(&conn)?;
    let sales = db::get_all_sales(&conn)?;
    let snapshot = compute_snapshot(&config, &sales);

    let price_usd = parse_decimal(price, "price")?;
    let result = if raw {
        simulate_raw(&snapshot, price_usd)
    } else {
        simulate_clamped(&snapshot, price_usd)
    };

    if json_output {
        println!("{}", formatters::format_simulation_json(&result));
        return Ok(());
    }

    print!("{}", formatters::format_simulation_table(&result));
    Ok(())
}

fn handle_export(file: &str, format: Option<String>) -> Result<()> {
    let conn = open_database()?;
    let config = db::load_config(&conn)?;
    let sales = db::get_all_sales(&conn)?;
    let snapshot = compute_snapshot(&config, &sales);

    let path = Path::new(file);
    let format = match format {
        Some(name) => ExportFormat::from_str(&name)
            .map_err(|_| TrackerError::ParseError(format!("invalid format: '{}'", name)))?,
        None => ExportFormat::detect(path),
    };

    export_report(path, format, &snapshot, &sales)?;
    info!("Report exported to {:?}", path);

    println!("{} Report written to {}", "✓".green().bold(), file);
    Ok(())
}
