//! Blob CRUD against an S3-compatible object store, gated by a static policy.

use crate::error::AppError;
use aws_config::BehaviorVersion;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_CONTAINER: &str = "demo";

/// Deployment-time access policy. `read` is read-only; `write` allows both
/// reads and writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoragePolicy {
    Read,
    Write,
}

impl StoragePolicy {
    /// From `STORAGE_POLICY`, default `read`. An unrecognized value is a
    /// startup error rather than a silent deny-all.
    pub fn from_env() -> Result<Self, AppError> {
        match std::env::var("STORAGE_POLICY") {
            Ok(raw) => raw.parse(),
            Err(_) => Ok(StoragePolicy::Read),
        }
    }

    pub fn can_read(self) -> bool {
        matches!(self, StoragePolicy::Read | StoragePolicy::Write)
    }

    pub fn can_write(self) -> bool {
        matches!(self, StoragePolicy::Write)
    }
}

impl FromStr for StoragePolicy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "read" => Ok(StoragePolicy::Read),
            "write" => Ok(StoragePolicy::Write),
            other => Err(AppError::BadRequest(format!(
                "STORAGE_POLICY must be 'read' or 'write', got '{other}'"
            ))),
        }
    }
}

impl fmt::Display for StoragePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoragePolicy::Read => f.write_str("read"),
            StoragePolicy::Write => f.write_str("write"),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlobEntry {
    pub name: String,
    pub size: i64,
    pub last_modified: Option<DateTime<Utc>>,
}

/// Thin wrapper over one bucket of an S3-compatible store.
#[derive(Clone)]
pub struct BlobStore {
    client: Client,
    container: String,
}

impl BlobStore {
    pub fn new(client: Client, container: impl Into<String>) -> Self {
        Self {
            client,
            container: container.into(),
        }
    }

    /// Client from the SDK's default credential chain; `BLOB_STORAGE_ENDPOINT`
    /// points it at an S3-compatible store (path-style addressing). Container
    /// from `BLOB_CONTAINER_NAME`, default `demo`.
    pub async fn from_env() -> Result<Self, AppError> {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Ok(endpoint) = std::env::var("BLOB_STORAGE_ENDPOINT") {
            loader = loader.endpoint_url(endpoint);
        }
        let shared = loader.load().await;
        let config = aws_sdk_s3::config::Builder::from(&shared)
            .force_path_style(true)
            .build();
        let container =
            std::env::var("BLOB_CONTAINER_NAME").unwrap_or_else(|_| DEFAULT_CONTAINER.into());
        Ok(Self::new(Client::from_conf(config), container))
    }

    pub fn container(&self) -> &str {
        &self.container
    }

    pub async fn list(&self) -> Result<Vec<BlobEntry>, AppError> {
        let out = self
            .client
            .list_objects_v2()
            .bucket(&self.container)
            .send()
            .await
            .map_err(storage_error)?;
        let blobs = out
            .contents()
            .iter()
            .map(|object| BlobEntry {
                name: object.key().unwrap_or_default().to_string(),
                size: object.size().unwrap_or_default(),
                last_modified: object
                    .last_modified()
                    .and_then(|t| DateTime::from_timestamp(t.secs(), t.subsec_nanos())),
            })
            .collect();
        Ok(blobs)
    }

    /// Blob content as text, or None when the key does not exist.
    pub async fn get(&self, name: &str) -> Result<Option<String>, AppError> {
        let result = self
            .client
            .get_object()
            .bucket(&self.container)
            .key(name)
            .send()
            .await;
        match result {
            Ok(out) => {
                let bytes = out
                    .body
                    .collect()
                    .await
                    .map_err(|e| AppError::Storage(e.to_string()))?
                    .into_bytes();
                Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
            }
            Err(err) => {
                let service = err.into_service_error();
                if service.is_no_such_key() {
                    Ok(None)
                } else {
                    Err(storage_error(service))
                }
            }
        }
    }

    /// Create or overwrite.
    pub async fn put(&self, name: &str, content: String) -> Result<(), AppError> {
        self.client
            .put_object()
            .bucket(&self.container)
            .key(name)
            .body(ByteStream::from(content.into_bytes()))
            .send()
            .await
            .map_err(storage_error)?;
        Ok(())
    }

    /// Delete; false when the blob was absent.
    pub async fn delete(&self, name: &str) -> Result<bool, AppError> {
        if !self.exists(name).await? {
            return Ok(false);
        }
        self.client
            .delete_object()
            .bucket(&self.container)
            .key(name)
            .send()
            .await
            .map_err(storage_error)?;
        Ok(true)
    }

    async fn exists(&self, name: &str) -> Result<bool, AppError> {
        let result = self
            .client
            .head_object()
            .bucket(&self.container)
            .key(name)
            .send()
            .await;
        match result {
            Ok(_) => Ok(true),
            Err(err) => {
                let service = err.into_service_error();
                if service.is_not_found() {
                    Ok(false)
                } else {
                    Err(storage_error(service))
                }
            }
        }
    }
}

fn storage_error<E>(err: E) -> AppError
where
    E: std::error::Error + Send + Sync + 'static,
{
    AppError::Storage(DisplayErrorContext(err).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_policy_denies_writes() {
        let policy = StoragePolicy::Read;
        assert!(policy.can_read());
        assert!(!policy.can_write());
    }

    #[test]
    fn write_policy_allows_both() {
        let policy = StoragePolicy::Write;
        assert!(policy.can_read());
        assert!(policy.can_write());
    }

    #[test]
    fn policy_parses_known_values_only() {
        assert_eq!("read".parse::<StoragePolicy>().unwrap(), StoragePolicy::Read);
        assert_eq!("write".parse::<StoragePolicy>().unwrap(), StoragePolicy::Write);
        assert!("admin".parse::<StoragePolicy>().is_err());
        assert!("READ".parse::<StoragePolicy>().is_err());
    }

    #[test]
    fn policy_display_round_trips() {
        for policy in [StoragePolicy::Read, StoragePolicy::Write] {
            assert_eq!(policy.to_string().parse::<StoragePolicy>().unwrap(), policy);
        }
    }

    #[test]
    fn blob_entry_serializes_camel_case() {
        let entry = BlobEntry {
            name: "a.txt".into(),
            size: 12,
            last_modified: DateTime::from_timestamp(0, 0),
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["name"], "a.txt");
        assert_eq!(value["size"], 12);
        assert!(value["lastModified"].is_string());
    }
}
