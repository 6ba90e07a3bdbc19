//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::config::Config;
use crate::error::{Error, Result, ResultExt};
use crate::filter;
use crate::handler::{Handler, NotificationExt, S3Event};
use crate::record::read_transactions;
use crate::sink::{self, Sink};
use crate::source::{ObjectStoreSource, RecordSource};
use lambda_runtime::{service_fn, LambdaEvent};
use serde_json::json;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command; `Ok(false)` means it ran but reported a failure
    pub async fn run(&self) -> Result<bool> {
        match &self.cli.command {
            Commands::Lambda => self.lambda().await,
            Commands::Invoke { event, bucket, key } => {
                let event = match (event, bucket, key) {
                    (Some(path), _, _) => load_event(path)?,
                    (None, Some(bucket), Some(key)) => S3Event::for_object(bucket, key),
                    _ => return Err(Error::config("invoke needs --event or --bucket and --key")),
                };
                self.invoke(&event).await
            }
            Commands::InitSchema => self.init_schema().await,
            Commands::Filter {
                input,
                summary_only,
            } => self.filter(input, *summary_only),
        }
    }

    /// Load configuration; with `--duckdb` no database credentials are read
    fn load_config(&self) -> Result<Config> {
        let config = match &self.cli.duckdb {
            Some(path) => Config::duckdb(path, |key| std::env::var(key).ok())?,
            None => Config::from_env()?,
        };

        match &self.cli.table {
            Some(table) => config.with_table(table.clone()),
            None => Ok(config),
        }
    }

    fn build_sink(&self) -> Result<Arc<dyn Sink>> {
        let config = self.load_config()?;
        Ok(Arc::from(sink::from_config(&config)))
    }

    fn build_source(&self) -> Arc<dyn RecordSource> {
        match &self.cli.local_root {
            Some(root) => Arc::new(ObjectStoreSource::local(root)),
            None => Arc::new(ObjectStoreSource::s3()),
        }
    }

    /// Build the handler; configuration problems surface here, before any event
    fn build_handler(&self) -> Result<Handler> {
        let sink = self.build_sink()?;
        let source = self.build_source();
        tracing::info!(
            source = %source.describe(),
            sink = %sink.describe(),
            "Handler configured"
        );
        Ok(Handler::new(source, sink))
    }

    /// Serve events from the Lambda runtime until it shuts the process down
    async fn lambda(&self) -> Result<bool> {
        let handler = self.build_handler()?;

        lambda_runtime::run(service_fn(move |event: LambdaEvent<S3Event>| {
            let handler = handler.clone();
            async move {
                tracing::debug!(request_id = %event.context.request_id, "Lambda execution started");
                Ok::<_, lambda_runtime::Error>(handler.handle(&event.payload).await)
            }
        }))
        .await
        .map_err(|e| Error::Other(format!("Lambda runtime failed: {e}")))?;

        Ok(true)
    }

    /// Run one invocation and print the response
    async fn invoke(&self, event: &S3Event) -> Result<bool> {
        let handler = self.build_handler()?;
        let response = handler.handle(event).await;

        println!("{}", serde_json::to_string_pretty(&response)?);

        Ok(response.is_success())
    }

    /// Create the destination table
    async fn init_schema(&self) -> Result<bool> {
        let sink = self.build_sink()?;
        sink.ensure_schema().await?;
        println!("Table ready: {}", sink.describe());
        Ok(true)
    }

    /// Decode and filter a local file, printing counts and fraud rows
    fn filter(&self, input: &Path, summary_only: bool) -> Result<bool> {
        let data =
            fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;
        let records = read_transactions(&data)?;
        let report = filter::split(&records);

        println!(
            "{}",
            json!({
                "file": input.display().to_string(),
                "total": report.total,
                "valid": report.valid,
                "fraud": report.fraud.len(),
            })
        );

        if !summary_only {
            for tx in &report.fraud {
                println!("{}", serde_json::to_string(tx)?);
            }
        }

        Ok(true)
    }
}

/// Read an S3 notification from a JSON file
fn load_event(path: &Path) -> Result<S3Event> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read event file {}", path.display()))?;
    serde_json::from_str(&content).map_err(|e| Error::invalid_event(format!("{}: {e}", path.display())))
}
