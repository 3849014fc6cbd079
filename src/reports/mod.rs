// Reports module - per-sale ledger rows consumed by display and export

pub mod ledger;

pub use ledger::{build_ledger, realized_profit, LedgerEntry};
