//! Object storage backed record source (S3, local filesystem, in-memory)

use super::types::{ObjectLocation, RecordSource};
use crate::error::{Error, Result};
use async_trait::async_trait;
use bytes::Bytes;
use object_store::aws::AmazonS3Builder;
use object_store::local::LocalFileSystem;
use object_store::path::Path as ObjectPath;
use object_store::ObjectStore;
use std::path::PathBuf;
use std::sync::Arc;

/// Explicit S3 settings layered over the standard AWS environment
///
/// Every field left `None` falls back to what `AmazonS3Builder::from_env`
/// picks up (`AWS_REGION`, `AWS_ENDPOINT`, `AWS_ACCESS_KEY_ID`, ...).
#[derive(Debug, Clone, Default)]
pub struct StorageConfig {
    /// AWS region
    pub region: Option<String>,
    /// Custom endpoint for S3-compatible stores (MinIO, LocalStack, R2)
    pub endpoint: Option<String>,
    /// Static access key id
    pub access_key_id: Option<String>,
    /// Static secret access key
    pub secret_access_key: Option<String>,
    /// Allow plain HTTP endpoints
    pub allow_http: bool,
}

#[derive(Debug, Clone)]
enum Backend {
    /// One S3 client per fetched bucket
    S3(StorageConfig),
    /// `root/<bucket>/<key>` on the local filesystem
    Local(PathBuf),
    /// A single store answering for every bucket
    Fixed(Arc<dyn ObjectStore>),
}

/// Record source reading through the `object_store` crate
#[derive(Debug, Clone)]
pub struct ObjectStoreSource {
    backend: Backend,
}

impl ObjectStoreSource {
    /// AWS S3 configured from the environment
    pub fn s3() -> Self {
        Self::s3_with(StorageConfig::default())
    }

    /// AWS S3 or an S3-compatible store with explicit settings
    pub fn s3_with(config: StorageConfig) -> Self {
        Self {
            backend: Backend::S3(config),
        }
    }

    /// Buckets are sub-directories of `root`
    pub fn local(root: impl Into<PathBuf>) -> Self {
        Self {
            backend: Backend::Local(root.into()),
        }
    }

    /// Serve every bucket from one pre-built store
    pub fn from_store(store: Arc<dyn ObjectStore>) -> Self {
        Self {
            backend: Backend::Fixed(store),
        }
    }

    /// Resolve the store holding `location`
    fn store_for(&self, location: &ObjectLocation) -> Result<Arc<dyn ObjectStore>> {
        match &self.backend {
            Backend::S3(config) => {
                let mut builder = AmazonS3Builder::from_env().with_bucket_name(&location.bucket);

                if let Some(region) = &config.region {
                    builder = builder.with_region(region);
                }
                if let Some(endpoint) = &config.endpoint {
                    builder = builder.with_endpoint(endpoint);
                }
                if let (Some(key_id), Some(secret)) =
                    (&config.access_key_id, &config.secret_access_key)
                {
                    builder = builder
                        .with_access_key_id(key_id)
                        .with_secret_access_key(secret);
                }
                if config.allow_http {
                    builder = builder.with_allow_http(true);
                }

                let store = builder.build().map_err(|e| {
                    Error::source_unavailable(location, format!("Failed to create S3 client: {e}"))
                })?;
                Ok(Arc::new(store))
            }
            Backend::Local(root) => {
                let dir = root.join(&location.bucket);
                let store = LocalFileSystem::new_with_prefix(&dir).map_err(|e| {
                    Error::source_unavailable(
                        location,
                        format!("Failed to open local bucket {}: {e}", dir.display()),
                    )
                })?;
                Ok(Arc::new(store))
            }
            Backend::Fixed(store) => Ok(Arc::clone(store)),
        }
    }
}

#[async_trait]
impl RecordSource for ObjectStoreSource {
    async fn fetch(&self, location: &ObjectLocation) -> Result<Bytes> {
        let store = self.store_for(location)?;
        let path = ObjectPath::from(location.key.as_str());

        let result = store
            .get(&path)
            .await
            .map_err(|e| Error::source_unavailable(location, e.to_string()))?;

        let body = result
            .bytes()
            .await
            .map_err(|e| Error::source_unavailable(location, e.to_string()))?;

        tracing::debug!(%location, bytes = body.len(), "Fetched object");
        Ok(body)
    }

    fn describe(&self) -> String {
        match &self.backend {
            Backend::S3(config) => match &config.endpoint {
                Some(endpoint) => format!("s3 ({endpoint})"),
                None => "s3".to_string(),
            },
            Backend::Local(root) => format!("file://{}", root.display()),
            Backend::Fixed(store) => store.to_string(),
        }
    }
}
