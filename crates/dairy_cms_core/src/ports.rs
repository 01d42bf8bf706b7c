//! crates/dairy_cms_core/src/ports.rs
//!
//! Defines the storage contract for the application's core logic. The engine
//! is written against this trait so it can run on the JSON-file store in
//! production and on an in-memory fake in tests.

use async_trait::async_trait;
use serde_json::Value;

//=========================================================================================
// Collection names
//=========================================================================================

/// The closed set of named collections. Each one maps to a single stored
/// document that is always read and rewritten as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Users,
    Categories,
    Products,
    Testimonials,
    Banners,
    Faqs,
    Inquiries,
    Settings,
}

impl Collection {
    pub const ALL: [Collection; 8] = [
        Collection::Users,
        Collection::Categories,
        Collection::Products,
        Collection::Testimonials,
        Collection::Banners,
        Collection::Faqs,
        Collection::Inquiries,
        Collection::Settings,
    ];

    /// The stable document name used by storage adapters.
    pub fn as_str(self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Categories => "categories",
            Collection::Products => "products",
            Collection::Testimonials => "testimonials",
            Collection::Banners => "banners",
            Collection::Faqs => "faqs",
            Collection::Inquiries => "inquiries",
            Collection::Settings => "settings",
        }
    }

    /// The label used in not-found messages ("Product not found").
    pub fn singular(self) -> &'static str {
        match self {
            Collection::Users => "User",
            Collection::Categories => "Category",
            Collection::Products => "Product",
            Collection::Testimonials => "Testimonial",
            Collection::Banners => "Banner",
            Collection::Faqs => "FAQ",
            Collection::Inquiries => "Inquiry",
            Collection::Settings => "Settings",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

//=========================================================================================
// Store error and result types
//=========================================================================================

/// Errors surfaced by the store and the engine built on top of it.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(String),
    #[error("Corrupt document for '{0}': {1}")]
    Corrupt(&'static str, String),
    #[error("Storage error: {0}")]
    Storage(String),
}

/// A convenience type alias for `Result<T, StoreError>`.
pub type StoreResult<T> = Result<T, StoreError>;

//=========================================================================================
// Storage port
//=========================================================================================

/// Durable storage of whole collection documents.
///
/// `read` of an absent document yields an empty JSON array, never an error;
/// `write` replaces the prior document wholesale. Nothing here is
/// transactional — callers that need read-modify-write atomicity must
/// serialize access themselves (the engine holds one lock per collection).
#[async_trait]
pub trait CollectionStore: Send + Sync {
    async fn read(&self, name: Collection) -> StoreResult<Value>;

    async fn write(&self, name: Collection, data: &Value) -> StoreResult<()>;

    /// Whether a document has ever been written for this name. Used by the
    /// seed initializer, which must never overwrite an existing collection.
    async fn exists(&self, name: Collection) -> StoreResult<bool>;
}
