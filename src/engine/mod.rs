// Financial engine - pure derivation of metrics from config and sales log

pub mod config;
pub mod sale;
pub mod simulation;
pub mod snapshot;

pub use config::PalletConfig;
pub use sale::{record_sale, Sale, SaleDraft};
pub use simulation::{simulate_clamped, simulate_raw, SimulationResult};
pub use snapshot::{compute_snapshot, FinancialSnapshot};
