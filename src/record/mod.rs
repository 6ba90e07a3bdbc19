//! Transaction record module
//!
//! The row model of the input files and the CSV decoder that produces it.
//!
//! # Overview
//!
//! - `Transaction` - one row of an input file, amounts as exact decimals
//! - `read_transactions` - decode a whole delimited file held in memory
//! - `COLUMNS` - the header names a file must carry

mod reader;
mod types;

pub use reader::{read_transactions, COLUMNS};
pub use types::Transaction;
