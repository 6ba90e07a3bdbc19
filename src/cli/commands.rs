//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Load transaction files from object storage and store the fraud subset
#[derive(Parser, Debug)]
#[command(name = "fraud-etl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Write to a local DuckDB file instead of PostgreSQL (RDS_* not needed)
    #[arg(long, global = true)]
    pub duckdb: Option<PathBuf>,

    /// Read buckets from sub-directories of this path instead of S3
    #[arg(long, global = true)]
    pub local_root: Option<PathBuf>,

    /// Destination table (overrides FRAUD_TABLE)
    #[arg(long, global = true)]
    pub table: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve invocations under the AWS Lambda runtime
    Lambda,

    /// Run a single invocation and print the response
    Invoke {
        /// S3 notification JSON file
        #[arg(long, conflicts_with_all = ["bucket", "key"], required_unless_present = "bucket")]
        event: Option<PathBuf>,

        /// Bucket of the object to process
        #[arg(long, requires = "key")]
        bucket: Option<String>,

        /// Key of the object to process
        #[arg(long, requires = "bucket")]
        key: Option<String>,
    },

    /// Create the destination table if it does not exist
    InitSchema,

    /// Decode and filter a local file without writing anything
    Filter {
        /// CSV file to read
        input: PathBuf,

        /// Print only the counts, not the fraud rows
        #[arg(long)]
        summary_only: bool,
    },
}
