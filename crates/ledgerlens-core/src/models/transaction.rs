use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Grouping value a transaction's frequency was computed under.
///
/// Raw keys carry the category or description verbatim; clustered keys carry
/// the cluster id of the transaction's description.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FrequencyUniqueKey {
    Cluster(u32),
    Text(String),
}

impl fmt::Display for FrequencyUniqueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cluster(id) => write!(f, "{id}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// One ledger row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique identifier of the row.
    pub transaction_number: String,
    pub transaction_date: NaiveDate,
    pub transaction_type: String,
    /// Free-text description, the input of string clustering.
    pub transaction_description: String,
    pub debit_amount: Option<f64>,
    pub credit_amount: Option<f64>,
    pub balance: Option<f64>,
    pub category: String,
    pub location_city: String,
    pub location_country: String,
    /// True when the row carries a credit amount.
    pub is_credit: bool,
    /// Credit amount for credits, debit amount otherwise.
    pub transaction_amount: f64,
    /// 1..=366.
    pub day_of_year: u32,
    /// 1 = Monday .. 7 = Sunday.
    pub day_of_week: u32,
    /// ISO week, 1..=53.
    pub week_of_year: u32,
    /// Set by frequency recomputation.
    pub frequency_unique_key: Option<FrequencyUniqueKey>,
    /// Set by frequency recomputation.
    pub frequency: Option<f64>,
}

impl Transaction {
    /// Build a row from its identifying fields, deriving the calendar columns.
    /// Amount and location fields start empty.
    pub fn new(
        transaction_number: impl Into<String>,
        transaction_date: NaiveDate,
        transaction_description: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        let mut transaction = Self {
            transaction_number: transaction_number.into(),
            transaction_date,
            transaction_type: String::new(),
            transaction_description: transaction_description.into(),
            debit_amount: None,
            credit_amount: None,
            balance: None,
            category: category.into(),
            location_city: String::new(),
            location_country: String::new(),
            is_credit: false,
            transaction_amount: 0.0,
            day_of_year: 0,
            day_of_week: 0,
            week_of_year: 0,
            frequency_unique_key: None,
            frequency: None,
        };
        transaction.refresh_date_fields();
        transaction
    }

    /// Recompute `day_of_year`, `day_of_week` and `week_of_year` from the date.
    pub fn refresh_date_fields(&mut self) {
        use chrono::Datelike;
        self.day_of_year = self.transaction_date.ordinal();
        self.day_of_week = self.transaction_date.weekday().number_from_monday();
        self.week_of_year = self.transaction_date.iso_week().week();
    }

    /// Set the amounts and derive `is_credit` / `transaction_amount`.
    pub fn with_amounts(mut self, debit_amount: Option<f64>, credit_amount: Option<f64>) -> Self {
        self.debit_amount = debit_amount;
        self.credit_amount = credit_amount;
        self.is_credit = credit_amount.is_some();
        self.transaction_amount = if self.is_credit {
            credit_amount.unwrap_or_default()
        } else {
            debit_amount.unwrap_or_default()
        };
        self
    }
}
