//! # ledgerlens-dataset
//!
//! Reads a bank-export CSV into [`Transaction`](ledgerlens_core::Transaction)
//! rows and owns the session state built over them: the clusterer registry
//! and the active frequency option.

pub mod dataset;
pub mod ingest;

pub use dataset::{StringClusters, TransactionDataset};
pub use ingest::{normalize_column_name, read_transactions, read_transactions_from_path};
