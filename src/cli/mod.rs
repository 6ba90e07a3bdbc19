//! CLI module
//!
//! Command-line interface for running the job.
//!
//! # Commands
//!
//! - `lambda` - Serve invocations under the AWS Lambda runtime
//! - `invoke` - Run one invocation locally
//! - `init-schema` - Create the destination table
//! - `filter` - Dry-run the filter over a local file

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
