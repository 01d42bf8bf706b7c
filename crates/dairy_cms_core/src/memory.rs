//! crates/dairy_cms_core/src/memory.rs
//!
//! An in-memory [`CollectionStore`] used by the engine tests and the router
//! integration tests. Mirrors the file store's observable behavior: missing
//! documents read as an empty array, writes replace wholesale.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::ports::{Collection, CollectionStore, StoreError, StoreResult};

#[derive(Default)]
pub struct MemoryStore {
    docs: Mutex<HashMap<&'static str, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CollectionStore for MemoryStore {
    async fn read(&self, name: Collection) -> StoreResult<Value> {
        let docs = self
            .docs
            .lock()
            .map_err(|e| StoreError::Storage(e.to_string()))?;
        Ok(docs
            .get(name.as_str())
            .cloned()
            .unwrap_or_else(|| Value::Array(Vec::new())))
    }

    async fn write(&self, name: Collection, data: &Value) -> StoreResult<()> {
        let mut docs = self
            .docs
            .lock()
            .map_err(|e| StoreError::Storage(e.to_string()))?;
        docs.insert(name.as_str(), data.clone());
        Ok(())
    }

    async fn exists(&self, name: Collection) -> StoreResult<bool> {
        let docs = self
            .docs
            .lock()
            .map_err(|e| StoreError::Storage(e.to_string()))?;
        Ok(docs.contains_key(name.as_str()))
    }
}
