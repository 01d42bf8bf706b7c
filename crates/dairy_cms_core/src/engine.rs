//! crates/dairy_cms_core/src/engine.rs
//!
//! The uniform CRUD engine. Every mutation is a read-modify-write of a whole
//! collection document, taken under that collection's lock so that two
//! concurrent updates to sibling records can never clobber each other.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::domain::{DashboardStats, InquiryStatus, Settings};
use crate::patch::Patch;
use crate::ports::{Collection, CollectionStore, StoreError, StoreResult};

/// A record type stored in one of the named collections.
pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const COLLECTION: Collection;

    fn id(&self) -> &str;

    /// Refreshes the update timestamp, for entities that model one.
    fn touch(&mut self) {}
}

pub struct Engine {
    store: Arc<dyn CollectionStore>,
    // One write lock per collection name; reads go straight to the store.
    locks: [Mutex<()>; Collection::ALL.len()],
}

impl Engine {
    pub fn new(store: Arc<dyn CollectionStore>) -> Self {
        Self {
            store,
            locks: std::array::from_fn(|_| Mutex::new(())),
        }
    }

    pub fn store(&self) -> &Arc<dyn CollectionStore> {
        &self.store
    }

    fn lock_for(&self, collection: Collection) -> &Mutex<()> {
        &self.locks[collection as usize]
    }

    async fn load<R: Resource>(&self) -> StoreResult<Vec<R>> {
        let value = self.store.read(R::COLLECTION).await?;
        serde_json::from_value(value)
            .map_err(|e| StoreError::Corrupt(R::COLLECTION.as_str(), e.to_string()))
    }

    async fn persist<R: Resource>(&self, records: &[R]) -> StoreResult<()> {
        let value = serde_json::to_value(records)
            .map_err(|e| StoreError::Corrupt(R::COLLECTION.as_str(), e.to_string()))?;
        self.store.write(R::COLLECTION, &value).await
    }

    /// Returns the full collection in insertion order.
    pub async fn list<R: Resource>(&self) -> StoreResult<Vec<R>> {
        self.load().await
    }

    /// Returns the first record matching the predicate, if any.
    pub async fn find<R, F>(&self, pred: F) -> StoreResult<Option<R>>
    where
        R: Resource,
        F: Fn(&R) -> bool + Send,
    {
        Ok(self.load::<R>().await?.into_iter().find(|r| pred(r)))
    }

    /// Appends a fully-formed record and persists the collection.
    pub async fn insert<R: Resource>(&self, record: R) -> StoreResult<R> {
        let _guard = self.lock_for(R::COLLECTION).lock().await;
        let mut records = self.load::<R>().await?;
        records.push(record.clone());
        self.persist(&records).await?;
        Ok(record)
    }

    /// Applies a typed patch over the record with the given id, refreshes its
    /// update timestamp where modeled, and persists. `NotFound` on a miss.
    pub async fn update<R, P>(&self, id: &str, patch: P) -> StoreResult<R>
    where
        R: Resource,
        P: Patch<R>,
    {
        let _guard = self.lock_for(R::COLLECTION).lock().await;
        let mut records = self.load::<R>().await?;
        let record = records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| StoreError::NotFound(R::COLLECTION.singular().to_string()))?;
        patch.apply(record);
        record.touch();
        let updated = record.clone();
        self.persist(&records).await?;
        Ok(updated)
    }

    /// Removes the record with the given id. Idempotent: a miss is reported
    /// as `Ok(false)`, never as an error.
    pub async fn remove<R: Resource>(&self, id: &str) -> StoreResult<bool> {
        let _guard = self.lock_for(R::COLLECTION).lock().await;
        let mut records = self.load::<R>().await?;
        let before = records.len();
        records.retain(|r| r.id() != id);
        let removed = records.len() != before;
        if removed {
            self.persist(&records).await?;
        }
        Ok(removed)
    }

    //-------------------------------------------------------------------------------------
    // Settings singleton
    //-------------------------------------------------------------------------------------

    pub async fn settings(&self) -> StoreResult<Settings> {
        let value = self.store.read(Collection::Settings).await?;
        // An absent document reads back as an empty array.
        if value.as_array().is_some_and(|a| a.is_empty()) {
            return Err(StoreError::NotFound("Settings".to_string()));
        }
        serde_json::from_value(value).map_err(|e| StoreError::Corrupt("settings", e.to_string()))
    }

    /// Replaces the settings document wholesale. No merge.
    pub async fn put_settings(&self, settings: &Settings) -> StoreResult<()> {
        let _guard = self.lock_for(Collection::Settings).lock().await;
        let value = serde_json::to_value(settings)
            .map_err(|e| StoreError::Corrupt("settings", e.to_string()))?;
        self.store.write(Collection::Settings, &value).await
    }

    //-------------------------------------------------------------------------------------
    // Dashboard stats
    //-------------------------------------------------------------------------------------

    pub async fn stats(&self) -> StoreResult<DashboardStats> {
        use crate::domain::{Banner, Inquiry, Product, Testimonial};
        let products = self.list::<Product>().await?.len();
        let banners = self.list::<Banner>().await?.len();
        let testimonials = self.list::<Testimonial>().await?.len();
        let inquiries = self.list::<Inquiry>().await?;
        let new_inquiries = inquiries
            .iter()
            .filter(|i| i.status == InquiryStatus::New)
            .count();
        Ok(DashboardStats {
            products,
            inquiries: inquiries.len(),
            banners,
            testimonials,
            new_inquiries,
        })
    }
}
