//! Record source module
//!
//! Fetches the object named by a trigger event from object storage.
//!
//! # Overview
//!
//! - `ObjectLocation` - bucket + key of the arrived file
//! - `RecordSource` - trait the handler fetches through
//! - `ObjectStoreSource` - S3, local directory or any pre-built `ObjectStore`
//!
//! The whole object is read into memory; decoding happens in
//! [`crate::record::read_transactions`].

mod store;
mod types;

pub use store::{ObjectStoreSource, StorageConfig};
pub use types::{ObjectLocation, RecordSource};

#[cfg(test)]
mod tests;
