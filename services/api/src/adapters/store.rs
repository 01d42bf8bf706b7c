//! services/api/src/adapters/store.rs
//!
//! The JSON-file implementation of the [`CollectionStore`] port: one
//! `<name>.json` document per collection under the configured data directory.

use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;

use dairy_cms_core::ports::{Collection, CollectionStore, StoreError, StoreResult};

pub struct JsonFileStore {
    data_dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn path(&self, name: Collection) -> PathBuf {
        self.data_dir.join(format!("{}.json", name.as_str()))
    }

    fn tmp_path(&self, name: Collection) -> PathBuf {
        self.data_dir.join(format!(".{}.json.tmp", name.as_str()))
    }
}

fn io_err(e: std::io::Error) -> StoreError {
    StoreError::Storage(e.to_string())
}

#[async_trait]
impl CollectionStore for JsonFileStore {
    async fn read(&self, name: Collection) -> StoreResult<Value> {
        let bytes = match tokio::fs::read(self.path(name)).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Value::Array(Vec::new()));
            }
            Err(e) => return Err(io_err(e)),
        };
        serde_json::from_slice(&bytes)
            .map_err(|e| StoreError::Corrupt(name.as_str(), e.to_string()))
    }

    async fn write(&self, name: Collection, data: &Value) -> StoreResult<()> {
        let bytes = serde_json::to_vec_pretty(data)
            .map_err(|e| StoreError::Corrupt(name.as_str(), e.to_string()))?;
        // Write to a sibling temp file and rename so a crash mid-write can
        // never leave a truncated document behind.
        let tmp = self.tmp_path(name);
        tokio::fs::write(&tmp, &bytes).await.map_err(io_err)?;
        tokio::fs::rename(&tmp, self.path(name))
            .await
            .map_err(io_err)
    }

    async fn exists(&self, name: Collection) -> StoreResult<bool> {
        tokio::fs::try_exists(self.path(name)).await.map_err(io_err)
    }
}
