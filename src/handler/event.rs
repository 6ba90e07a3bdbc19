//! Trigger event
//!
//! The object-created notification comes straight from `aws_lambda_events`;
//! this module only adds what the handler needs on top of it.

use crate::error::{Error, Result};
use crate::source::ObjectLocation;
use aws_lambda_events::event::s3::{S3Bucket, S3Entity, S3Event, S3EventRecord, S3Object};

/// Event name used for locally built notifications
pub const OBJECT_CREATED: &str = "ObjectCreated:Put";

/// Handler view of an S3 notification
pub trait NotificationExt: Sized {
    /// Single-record notification for a known object
    fn for_object(bucket: impl Into<String>, key: impl Into<String>) -> Self;

    /// Location named by the first record; further records are ignored
    fn location(&self) -> Result<ObjectLocation>;
}

impl NotificationExt for S3Event {
    fn for_object(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        S3Event {
            records: vec![S3EventRecord {
                event_name: Some(OBJECT_CREATED.to_string()),
                s3: S3Entity {
                    bucket: S3Bucket {
                        name: Some(bucket.into()),
                        ..Default::default()
                    },
                    object: S3Object {
                        key: Some(key.into()),
                        ..Default::default()
                    },
                    ..Default::default()
                },
                ..Default::default()
            }],
        }
    }

    fn location(&self) -> Result<ObjectLocation> {
        let record = self
            .records
            .first()
            .ok_or_else(|| Error::invalid_event("notification has no records"))?;

        let bucket = record
            .s3
            .bucket
            .name
            .as_deref()
            .filter(|b| !b.is_empty())
            .ok_or_else(|| Error::invalid_event("record has no bucket name"))?;
        let key = record
            .s3
            .object
            .key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| Error::invalid_event("record has no object key"))?;

        if self.records.len() > 1 {
            tracing::warn!(
                records = self.records.len(),
                "Notification carries several records, only the first is processed"
            );
        }

        Ok(ObjectLocation::new(bucket, key))
    }
}
