use clap::{Parser, Subcommand};

pub mod formatters;

#[derive(Parser)]
#[command(name = "recoup")]
#[command(version, about = "Reseller pallet tracker with capital recovery analytics")]
#[command(
    long_about = "Track a bulk-lot resale operation: record individual sales, watch capital recovery and the dynamic break-even cost per piece, and project profit against a target return multiple."
)]
pub struct Cli {
    /// Disable colorized/ANSI output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Output results in JSON format
    #[arg(long = "json", global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Pallet configuration management
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Sales log management
    Sales {
        #[command(subcommand)]
        action: SalesCommands,
    },

    /// Show the current financial snapshot
    Summary,

    /// Project selling every remaining piece at a single price
    Simulate {
        /// Hypothetical per-piece price in base currency
        price: String,

        /// Report projected net profit as a signed value instead of
        /// flooring it at zero
        #[arg(long)]
        raw: bool,
    },

    /// Export the summary block and per-sale ledger to a spreadsheet
    Export {
        /// Output path (.csv or .xlsx)
        file: String,

        /// Format override (csv, xlsx); detected from the extension otherwise
        #[arg(short, long)]
        format: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the current configuration
    Show,

    /// Update configuration fields (only the given flags change)
    Set {
        /// Base purchase cost in base currency
        #[arg(long)]
        investment: Option<String>,

        /// Units of display currency per one base unit
        #[arg(long)]
        rate: Option<String>,

        /// Total units in the lot
        #[arg(long)]
        pieces: Option<i64>,

        /// Extra costs added to the investment base
        #[arg(long)]
        expenses: Option<String>,

        /// Desired return multiple on total investment (e.g., 2 = double)
        #[arg(long = "target")]
        target_multiplier: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum SalesCommands {
    /// Record a sale
    Add {
        /// Sale amount in the entered currency
        amount: String,

        /// Currency the amount was entered in
        #[arg(short, long, default_value = "base", value_parser = ["base", "display"])]
        currency: String,

        /// Sale date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Payment method label
        #[arg(short, long, default_value = "cash")]
        method: String,

        /// Buyer reference
        #[arg(long)]
        client: Option<String>,
    },

    /// List recorded sales with realized profit
    List,

    /// Remove a single sale by id
    Remove {
        /// Sale id
        id: i64,
    },

    /// Remove every sale (pallet reset; the config stays)
    Clear {
        /// Confirm the wholesale deletion
        #[arg(long)]
        yes: bool,
    },
}
