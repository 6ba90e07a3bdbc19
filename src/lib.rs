// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Fraud ETL
//!
//! An event-triggered job that loads a day of transactions from object
//! storage and keeps only the labelled fraud.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────────┐   ┌──────────┐   ┌──────────────────────┐   ┌────────────┐
//! │ S3 event     │──▶│ Source   │──▶│ Filter               │──▶│ Sink       │
//! │ bucket + key │   │ S3/local │   │ balances ─▶ isFraud  │   │ PG/DuckDB  │
//! └──────────────┘   └──────────┘   └──────────────────────┘   └────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use fraud_etl::handler::{Handler, NotificationExt, S3Event};
//! use fraud_etl::sink::DuckDbSink;
//! use fraud_etl::source::ObjectStoreSource;
//! use std::sync::Arc;
//!
//! let handler = Handler::new(
//!     Arc::new(ObjectStoreSource::local("./buckets")),
//!     Arc::new(DuckDbSink::new("fraud.duckdb", "fraud_transactions")),
//! );
//! let response = handler.handle(&S3Event::for_object("landing", "day.csv")).await;
//! println!("{}", response.message());
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Environment configuration
pub mod config;

/// Transaction records and CSV decoding
pub mod record;

/// Object storage access
pub mod source;

/// Validity and fraud predicates
pub mod filter;

/// Relational persistence
pub mod sink;

/// Invocation handler
pub mod handler;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
