use super::error_category::{Categorized, ErrorCategory};

/// Ledger ingestion errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("malformed CSV at record {record}: {reason}")]
    Csv { record: u64, reason: String },

    #[error("required column missing: {column}")]
    MissingColumn { column: String },

    #[error("invalid date {value:?} for transaction {transaction_number}")]
    InvalidDate {
        value: String,
        transaction_number: String,
    },

    #[error("invalid amount {value:?} in column {column} for transaction {transaction_number}")]
    InvalidAmount {
        value: String,
        column: String,
        transaction_number: String,
    },

    #[error("duplicate transaction number: {transaction_number}")]
    DuplicateTransactionNumber { transaction_number: String },

    #[error("dataset contains no transactions")]
    Empty,
}

impl Categorized for DatasetError {
    fn category(&self) -> ErrorCategory {
        match self {
            Self::Io { .. } => ErrorCategory::Io,
            Self::Csv { .. }
            | Self::InvalidDate { .. }
            | Self::InvalidAmount { .. }
            | Self::MissingColumn { .. } => ErrorCategory::Parse,
            Self::DuplicateTransactionNumber { .. } | Self::Empty => {
                ErrorCategory::InvalidArgument
            }
        }
    }
}
