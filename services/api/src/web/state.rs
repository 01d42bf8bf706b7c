//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use std::sync::Arc;

use dairy_cms_core::engine::Engine;
use dairy_cms_core::ports::CollectionStore;

use crate::config::Config;
use crate::web::token::TokenService;

/// The shared application state, created once at startup and passed to all
/// handlers. The engine owns the per-collection write locks, so there must be
/// exactly one of it per store.
pub struct AppState {
    pub engine: Engine,
    pub config: Arc<Config>,
    pub tokens: TokenService,
}

impl AppState {
    pub fn new(store: Arc<dyn CollectionStore>, config: Arc<Config>) -> Self {
        let tokens = TokenService::new(config.jwt_secret.as_bytes(), config.token_ttl_days);
        Self {
            engine: Engine::new(store),
            config,
            tokens,
        }
    }
}
