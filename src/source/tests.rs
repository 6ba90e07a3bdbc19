//! Tests for source module

use super::*;
use crate::error::Error;
use bytes::Bytes;
use object_store::memory::InMemory;
use object_store::path::Path as ObjectPath;
use object_store::ObjectStore;
use std::sync::Arc;

// ============================================================================
// ObjectLocation Tests
// ============================================================================

#[test]
fn test_location_display() {
    let location = ObjectLocation::new("incoming", "2024/01/paysim.csv");
    assert_eq!(location.to_string(), "incoming/2024/01/paysim.csv");
}

// ============================================================================
// In-Memory Store Tests
// ============================================================================

#[tokio::test]
async fn test_fetch_from_memory_store() {
    let store = Arc::new(InMemory::new());
    store
        .put(
            &ObjectPath::from("uploads/day1.csv"),
            Bytes::from_static(b"step,type\n1,PAYMENT\n").into(),
        )
        .await
        .unwrap();

    let source = ObjectStoreSource::from_store(store);
    let body = source
        .fetch(&ObjectLocation::new("any-bucket", "uploads/day1.csv"))
        .await
        .unwrap();

    assert_eq!(body, Bytes::from_static(b"step,type\n1,PAYMENT\n"));
}

#[tokio::test]
async fn test_fetch_missing_object() {
    let source = ObjectStoreSource::from_store(Arc::new(InMemory::new()));
    let err = source
        .fetch(&ObjectLocation::new("bucket", "missing.csv"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::SourceUnavailable { .. }));
    assert!(err.to_string().contains("bucket/missing.csv"));
}

// ============================================================================
// Local Filesystem Tests
// ============================================================================

#[tokio::test]
async fn test_fetch_from_local_bucket_dir() {
    let root = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(root.path().join("landing/nested")).unwrap();
    std::fs::write(root.path().join("landing/nested/file.csv"), "a,b\n1,2\n").unwrap();

    let source = ObjectStoreSource::local(root.path());
    let body = source
        .fetch(&ObjectLocation::new("landing", "nested/file.csv"))
        .await
        .unwrap();

    assert_eq!(&body[..], b"a,b\n1,2\n");
    assert!(source.describe().starts_with("file://"));
}

#[tokio::test]
async fn test_fetch_from_missing_local_bucket() {
    let root = tempfile::tempdir().unwrap();
    let source = ObjectStoreSource::local(root.path());

    let err = source
        .fetch(&ObjectLocation::new("no-such-bucket", "file.csv"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::SourceUnavailable { .. }));
}

#[test]
fn test_describe_s3() {
    assert_eq!(ObjectStoreSource::s3().describe(), "s3");

    let source = ObjectStoreSource::s3_with(StorageConfig {
        endpoint: Some("http://localhost:4566".to_string()),
        allow_http: true,
        ..Default::default()
    });
    assert_eq!(source.describe(), "s3 (http://localhost:4566)");
}
