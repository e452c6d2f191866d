//! Header normalisation and column lookup.

use std::collections::HashMap;

use csv::StringRecord;
use ledgerlens_core::errors::DatasetError;

pub const TRANSACTION_NUMBER: &str = "transactionNumber";
pub const TRANSACTION_DATE: &str = "transactionDate";
pub const TRANSACTION_TYPE: &str = "transactionType";
pub const TRANSACTION_DESCRIPTION: &str = "transactionDescription";
pub const DEBIT_AMOUNT: &str = "debitAmount";
pub const CREDIT_AMOUNT: &str = "creditAmount";
pub const BALANCE: &str = "balance";
pub const CATEGORY: &str = "category";
pub const LOCATION_CITY: &str = "locationCity";
pub const LOCATION_COUNTRY: &str = "locationCountry";

/// Columns a ledger must carry.
pub const REQUIRED_COLUMNS: [&str; 4] = [
    TRANSACTION_NUMBER,
    TRANSACTION_DATE,
    TRANSACTION_DESCRIPTION,
    CATEGORY,
];

/// Two-word headers become `first` lower-cased plus `Second` capitalised;
/// anything else is lower-cased whole.
///
/// `"Transaction Date"` → `"transactionDate"`, `"Category"` → `"category"`.
pub fn normalize_column_name(raw: &str) -> String {
    let raw = raw.trim();
    let parts: Vec<&str> = raw.split(' ').collect();
    match parts.as_slice() {
        [first, second] => format!("{}{}", first.to_lowercase(), capitalize(second)),
        _ => raw.to_lowercase(),
    }
}

fn capitalize(word: &str) -> String {
    let lower = word.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Normalised header name → field index.
#[derive(Debug, Clone)]
pub struct ColumnIndex {
    positions: HashMap<String, usize>,
    names: Vec<String>,
}

impl ColumnIndex {
    /// Index the header row, failing on the first missing required column.
    pub fn from_headers(headers: &StringRecord) -> Result<Self, DatasetError> {
        let names: Vec<String> = headers.iter().map(normalize_column_name).collect();
        let positions = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect::<HashMap<_, _>>();

        if let Some(missing) = REQUIRED_COLUMNS.iter().find(|c| !positions.contains_key(**c)) {
            return Err(DatasetError::MissingColumn {
                column: missing.to_string(),
            });
        }
        Ok(Self { positions, names })
    }

    /// Normalised names in file order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Trimmed field text; an absent column or null field reads as `""`.
    pub fn text<'r>(&self, record: &'r StringRecord, column: &str) -> &'r str {
        self.positions
            .get(column)
            .and_then(|&i| record.get(i))
            .map(str::trim)
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_word_headers_become_camel_case() {
        assert_eq!(normalize_column_name("Transaction Number"), "transactionNumber");
        assert_eq!(normalize_column_name("DEBIT AMOUNT"), "debitAmount");
        assert_eq!(normalize_column_name("location city"), "locationCity");
    }

    #[test]
    fn other_headers_are_lower_cased() {
        assert_eq!(normalize_column_name("Category"), "category");
        assert_eq!(normalize_column_name("Balance "), "balance");
        assert_eq!(normalize_column_name("Three Word Header"), "three word header");
        assert_eq!(normalize_column_name("transactionDate"), "transactiondate");
    }

    #[test]
    fn missing_required_column_is_reported() {
        let headers = StringRecord::from(vec!["Transaction Number", "Transaction Date", "Category"]);
        let err = ColumnIndex::from_headers(&headers).unwrap_err();
        assert_eq!(
            err,
            DatasetError::MissingColumn {
                column: "transactionDescription".into()
            }
        );
    }
}
