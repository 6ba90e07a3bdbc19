//! Invocation handler
//!
//! Runs one invocation end to end:
//!
//! ```text
//! Start → Fetching → Parsing → Filtering ─┬─ EmptyExit ─┐
//!                                         └─ Persisting ─┴─ Done
//! ```
//!
//! Any error moves straight to the failed state. `run` returns the typed
//! result; `handle` is the only place errors become a status code and body.

mod event;
mod types;

pub use aws_lambda_events::event::s3::S3Event;
pub use event::{NotificationExt, OBJECT_CREATED};
pub use types::{Outcome, Response, Stage, STATUS_ERROR, STATUS_OK};

use crate::error::Result;
use crate::filter;
use crate::record::read_transactions;
use crate::sink::Sink;
use crate::source::RecordSource;
use std::sync::Arc;
use std::time::Instant;
use tracing::field::Empty;
use tracing::{error, info, Instrument, Span};

/// Orchestrates source, filter and sink for one event at a time
#[derive(Clone)]
pub struct Handler {
    source: Arc<dyn RecordSource>,
    sink: Arc<dyn Sink>,
}

impl Handler {
    /// Create a handler over a source and a sink
    pub fn new(source: Arc<dyn RecordSource>, sink: Arc<dyn Sink>) -> Self {
        Self { source, sink }
    }

    /// Run one invocation and flatten the result into a response
    pub async fn handle(&self, event: &S3Event) -> Response {
        match self.run(event).await {
            Ok(outcome) => Response::ok(outcome.message()),
            Err(e) => Response::error(e.to_string()),
        }
    }

    /// Run one invocation
    ///
    /// Failures are logged here, once, with the stage they happened in.
    pub async fn run(&self, event: &S3Event) -> Result<Outcome> {
        let start = Instant::now();
        let mut stage = Stage::Start;

        let span = tracing::info_span!("invocation", bucket = Empty, key = Empty);
        let result = self
            .execute(event, &mut stage)
            .instrument(span.clone())
            .await;

        span.in_scope(|| match &result {
            Ok(outcome) => info!(
                stage = %stage,
                fraud = outcome.fraud,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "{}",
                outcome.message()
            ),
            Err(e) => error!(
                stage = %stage,
                kind = e.kind(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Error encountered: {e}"
            ),
        });

        result
    }

    async fn execute(&self, event: &S3Event, stage: &mut Stage) -> Result<Outcome> {
        let location = event.location()?;
        let span = Span::current();
        span.record("bucket", location.bucket.as_str());
        span.record("key", location.key.as_str());
        info!(source = %self.source.describe(), "Invocation started");

        *stage = Stage::Fetching;
        let body = self.source.fetch(&location).await?;
        info!(bytes = body.len(), "File downloaded");

        *stage = Stage::Parsing;
        let records = read_transactions(&body)?;
        info!(rows = records.len(), "Rows fetched from CSV");

        *stage = Stage::Filtering;
        let report = filter::split(&records);
        info!(valid = report.valid, "Valid transactions counted");
        info!(fraud = report.fraud.len(), "Fraud transactions counted");

        let mut outcome = Outcome {
            location,
            total: report.total,
            valid: report.valid,
            fraud: report.fraud.len(),
            inserted: 0,
        };

        if !report.has_fraud() {
            *stage = Stage::EmptyExit;
            return Ok(outcome);
        }

        *stage = Stage::Persisting;
        info!(sink = %self.sink.describe(), "Persisting fraud transactions");
        outcome.inserted = self.sink.bulk_insert(&report.fraud).await?;

        *stage = Stage::Done;
        Ok(outcome)
    }
}
