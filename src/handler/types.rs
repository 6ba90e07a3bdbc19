//! Handler types
//!
//! The typed outcome of an invocation and the wire response it is
//! flattened into.

use crate::source::ObjectLocation;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Invocation State
// ============================================================================

/// Where an invocation is in its run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Event received
    Start,
    /// Downloading the object
    Fetching,
    /// Decoding the file
    Parsing,
    /// Applying the predicates
    Filtering,
    /// No fraud records, nothing to write
    EmptyExit,
    /// Writing the fraud subset
    Persisting,
    /// Finished successfully
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Start => "start",
            Stage::Fetching => "fetching",
            Stage::Parsing => "parsing",
            Stage::Filtering => "filtering",
            Stage::EmptyExit => "empty_exit",
            Stage::Persisting => "persisting",
            Stage::Done => "done",
        };
        f.write_str(name)
    }
}

/// Result of a successful invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Object that was processed
    pub location: ObjectLocation,
    /// Rows in the file
    pub total: usize,
    /// Rows passing the validity predicate
    pub valid: usize,
    /// Valid rows carrying a fraud label
    pub fraud: usize,
    /// Rows written to the sink
    pub inserted: u64,
}

impl Outcome {
    /// Human-readable summary
    pub fn message(&self) -> String {
        if self.fraud == 0 {
            "No fraud transactions found.".to_string()
        } else {
            format!(
                "{} fraud transactions processed and stored in the database!",
                self.fraud
            )
        }
    }
}

// ============================================================================
// Response
// ============================================================================

/// Status code of a successful invocation
pub const STATUS_OK: u16 = 200;
/// Status code of a failed invocation
pub const STATUS_ERROR: u16 = 500;

/// What the invocation hands back to its caller
///
/// `body` holds a JSON-encoded string, matching what API Gateway style
/// consumers expect from a Lambda proxy response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    /// 200 or 500
    pub status_code: u16,
    /// JSON string payload
    pub body: String,
}

impl Response {
    /// Successful response carrying a message
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            status_code: STATUS_OK,
            body: encode_body(message),
        }
    }

    /// Failed response carrying an error message
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status_code: STATUS_ERROR,
            body: encode_body(message),
        }
    }

    /// Whether the invocation succeeded
    pub fn is_success(&self) -> bool {
        self.status_code == STATUS_OK
    }

    /// The message inside `body`
    pub fn message(&self) -> String {
        serde_json::from_str::<String>(&self.body).unwrap_or_else(|_| self.body.clone())
    }
}

fn encode_body(message: impl Into<String>) -> String {
    serde_json::Value::String(message.into()).to_string()
}
