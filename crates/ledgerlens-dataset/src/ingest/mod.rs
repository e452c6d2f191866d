//! Ledger CSV ingestion.
//!
//! Headers are normalised to camelCase, text nulls read as empty strings,
//! `isCredit`/`transactionAmount` are derived from the amount columns and
//! the calendar columns from the date.

pub mod columns;
pub mod dates;

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use ledgerlens_core::errors::DatasetError;
use ledgerlens_core::models::Transaction;

pub use columns::{normalize_column_name, ColumnIndex};
pub use dates::parse_date;

use columns::{
    BALANCE, CATEGORY, CREDIT_AMOUNT, DEBIT_AMOUNT, LOCATION_CITY, LOCATION_COUNTRY,
    TRANSACTION_DATE, TRANSACTION_DESCRIPTION, TRANSACTION_NUMBER, TRANSACTION_TYPE,
};

/// Read every row of a ledger CSV.
///
/// Fails on the first malformed row; duplicate transaction numbers are rejected.
pub fn read_transactions<R: Read>(reader: R, day_first: bool) -> Result<Vec<Transaction>, DatasetError> {
    let mut csv = ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = csv.headers().map_err(csv_error)?.clone();
    let columns = ColumnIndex::from_headers(&headers)?;

    let mut seen = HashSet::new();
    let mut transactions = Vec::new();
    for record in csv.records() {
        let record = record.map_err(csv_error)?;
        let tx = parse_record(&columns, &record, day_first)?;
        if !seen.insert(tx.transaction_number.clone()) {
            return Err(DatasetError::DuplicateTransactionNumber {
                transaction_number: tx.transaction_number,
            });
        }
        transactions.push(tx);
    }
    Ok(transactions)
}

/// [`read_transactions`] over a file.
pub fn read_transactions_from_path(path: &Path, day_first: bool) -> Result<Vec<Transaction>, DatasetError> {
    let file = File::open(path).map_err(|e| DatasetError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    read_transactions(file, day_first)
}

fn parse_record(columns: &ColumnIndex, record: &StringRecord, day_first: bool) -> Result<Transaction, DatasetError> {
    let number = columns.text(record, TRANSACTION_NUMBER).to_string();
    let raw_date = columns.text(record, TRANSACTION_DATE);
    let date = parse_date(raw_date, day_first).ok_or_else(|| DatasetError::InvalidDate {
        value: raw_date.to_string(),
        transaction_number: number.clone(),
    })?;

    let debit = parse_amount(columns, record, DEBIT_AMOUNT, &number)?;
    let credit = parse_amount(columns, record, CREDIT_AMOUNT, &number)?;

    let mut tx = Transaction::new(
        number.clone(),
        date,
        columns.text(record, TRANSACTION_DESCRIPTION),
        columns.text(record, CATEGORY),
    )
    .with_amounts(debit, credit);
    tx.transaction_type = columns.text(record, TRANSACTION_TYPE).to_string();
    tx.balance = parse_amount(columns, record, BALANCE, &number)?;
    tx.location_city = columns.text(record, LOCATION_CITY).to_string();
    tx.location_country = columns.text(record, LOCATION_COUNTRY).to_string();
    Ok(tx)
}

/// Empty field → `None`; thousands separators are accepted.
fn parse_amount(
    columns: &ColumnIndex,
    record: &StringRecord,
    column: &str,
    transaction_number: &str,
) -> Result<Option<f64>, DatasetError> {
    let raw = columns.text(record, column);
    if raw.is_empty() {
        return Ok(None);
    }
    raw.replace(',', "")
        .parse::<f64>()
        .map(Some)
        .map_err(|_| DatasetError::InvalidAmount {
            value: raw.to_string(),
            column: column.to_string(),
            transaction_number: transaction_number.to_string(),
        })
}

fn csv_error(err: csv::Error) -> DatasetError {
    let record = err.position().map(|p| p.record()).unwrap_or(0);
    match err.into_kind() {
        csv::ErrorKind::Io(io) => DatasetError::Io {
            path: "<reader>".to_string(),
            reason: io.to_string(),
        },
        kind => DatasetError::Csv {
            record,
            reason: format!("{kind:?}"),
        },
    }
}
