//! Source types and traits

use crate::error::Result;
use async_trait::async_trait;
use bytes::Bytes;
use std::fmt;

/// Location of an object in storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectLocation {
    /// Bucket (container) name
    pub bucket: String,
    /// Object key within the bucket
    pub key: String,
}

impl ObjectLocation {
    /// Create a new location
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }
}

impl fmt::Display for ObjectLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.bucket, self.key)
    }
}

/// Something that can hand over the full contents of an object
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Read the whole object into memory
    ///
    /// Any failure to reach or read the object is `SourceUnavailable`.
    async fn fetch(&self, location: &ObjectLocation) -> Result<Bytes>;

    /// Short description for logs
    fn describe(&self) -> String;
}
