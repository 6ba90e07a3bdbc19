//! CSV decoding of transaction files

use super::types::Transaction;
use crate::error::{Error, Result};
use csv::{ReaderBuilder, StringRecord, Trim};

/// Header names every input file must carry
pub const COLUMNS: [&str; 11] = [
    "step",
    "type",
    "amount",
    "nameOrig",
    "oldbalanceOrg",
    "newbalanceOrig",
    "nameDest",
    "oldbalanceDest",
    "newbalanceDest",
    "isFraud",
    "isFlaggedFraud",
];

/// Decode a whole comma-delimited file into transactions
///
/// The first line is the header. Every row must have as many fields as the
/// header; columns not listed in [`COLUMNS`] are ignored.
pub fn read_transactions(data: &[u8]) -> Result<Vec<Transaction>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .trim(Trim::All)
        .from_reader(data);

    let headers = reader.headers()?.clone();
    check_columns(&headers)?;

    let records = reader
        .deserialize::<Transaction>()
        .collect::<std::result::Result<Vec<_>, csv::Error>>()?;

    tracing::debug!(
        columns = headers.len(),
        rows = records.len(),
        "Decoded transaction file"
    );

    Ok(records)
}

/// Fail early with the column name rather than a serde field error
fn check_columns(headers: &StringRecord) -> Result<()> {
    if headers.iter().all(str::is_empty) {
        return Err(Error::malformed("file has no header line"));
    }

    let missing: Vec<&str> = COLUMNS
        .iter()
        .copied()
        .filter(|column| {
            !headers
                .iter()
                .any(|h| h == *column || h == column.to_ascii_lowercase())
        })
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::malformed(format!(
            "missing required column(s): {}",
            missing.join(", ")
        )))
    }
}
