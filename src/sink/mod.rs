//! Persistence sink module
//!
//! Writes the fraud subset into a relational table, creating it when absent.
//!
//! # Overview
//!
//! - `Sink` - `ensure_schema` and atomic `bulk_insert`
//! - `PostgresSink` - managed PostgreSQL via sqlx
//! - `DuckDbSink` - local DuckDB file for local runs and tests
//!
//! Every call opens its own connection and releases it before returning,
//! whatever the outcome. `bulk_insert` runs the table DDL and the insert in
//! one transaction, so a failed call leaves nothing behind.

mod duckdb;
mod postgres;

pub use self::duckdb::DuckDbSink;
pub use self::postgres::PostgresSink;

use crate::config::{Config, SinkConfig};
use crate::error::{Error, Result};
use crate::record::Transaction;
use async_trait::async_trait;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Destination column names, in insert order
pub const TABLE_COLUMNS: [&str; 11] = [
    "step",
    "type",
    "amount",
    "nameorig",
    "oldbalanceorg",
    "newbalanceorig",
    "namedest",
    "oldbalancedest",
    "newbalancedest",
    "isfraud",
    "isflaggedfraud",
];

/// Maximum length of the `type` column
pub const TYPE_MAX_LEN: usize = 20;
/// Maximum length of the account id columns
pub const NAME_MAX_LEN: usize = 50;

/// Relational destination for fraud records
#[async_trait]
pub trait Sink: Send + Sync {
    /// Create the destination table if it does not exist
    async fn ensure_schema(&self) -> Result<()>;

    /// Write every record as one row, all or nothing
    ///
    /// Runs the table DDL in the same transaction. Returns the number of
    /// rows written.
    async fn bulk_insert(&self, records: &[Transaction]) -> Result<u64>;

    /// Target description for logs, without secrets
    fn describe(&self) -> String;
}

/// Build the sink selected by the configuration
pub fn from_config(config: &Config) -> Box<dyn Sink> {
    match &config.sink {
        SinkConfig::Postgres(db) => Box::new(PostgresSink::new(db.clone(), &config.table)),
        SinkConfig::DuckDb { path } => Box::new(DuckDbSink::new(path, &config.table)),
    }
}

/// A transaction in the column types of the destination table
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Row {
    pub step: i32,
    pub kind: String,
    pub amount: f64,
    pub name_orig: String,
    pub old_balance_orig: f64,
    pub new_balance_orig: f64,
    pub name_dest: String,
    pub old_balance_dest: f64,
    pub new_balance_dest: f64,
    pub is_fraud: i16,
    pub is_flagged_fraud: i16,
}

impl TryFrom<&Transaction> for Row {
    type Error = Error;

    fn try_from(tx: &Transaction) -> Result<Self> {
        Ok(Self {
            step: tx.step,
            kind: tx.kind.clone(),
            amount: to_float("amount", tx.amount)?,
            name_orig: tx.name_orig.clone(),
            old_balance_orig: to_float("oldbalanceOrg", tx.old_balance_orig)?,
            new_balance_orig: to_float("newbalanceOrig", tx.new_balance_orig)?,
            name_dest: tx.name_dest.clone(),
            old_balance_dest: to_float("oldbalanceDest", tx.old_balance_dest)?,
            new_balance_dest: to_float("newbalanceDest", tx.new_balance_dest)?,
            is_fraud: i16::from(tx.is_fraud),
            is_flagged_fraud: i16::from(tx.is_flagged_fraud),
        })
    }
}

fn to_float(column: &str, value: Decimal) -> Result<f64> {
    value
        .to_f64()
        .ok_or_else(|| Error::persistence(format!("{column} value {value} is not representable")))
}

/// Convert a batch before any connection is opened
pub(crate) fn to_rows(records: &[Transaction]) -> Result<Vec<Row>> {
    records.iter().map(Row::try_from).collect()
}

/// Column list for INSERT statements
pub(crate) fn column_list() -> String {
    TABLE_COLUMNS.join(", ")
}
