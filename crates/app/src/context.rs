//! App Context

use std::sync::Arc;

use pizzeria::{
    catalog::{Catalog, CatalogError},
    users::User,
};
use thiserror::Error;
use tracing::debug;

use crate::{
    auth::{AuthService, LocalAuthService, RemoteAuthService, Session},
    carts::CartStore,
    checkout::CheckoutService,
    config::{AppConfig, AuthMode, StorageBackend},
    orders::OrderStore,
    storage::{FileStore, KeyValueStore, MemoryStore},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to load menu")]
    Catalog(#[from] CatalogError),
}

/// Everything a storefront command needs, wired to one storage backend.
pub struct AppContext {
    pub catalog: Catalog,
    pub cart: CartStore,
    pub orders: OrderStore,
    pub auth: Arc<dyn AuthService>,
    pub checkout: CheckoutService,
}

impl AppContext {
    /// Build application context from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the built-in menu cannot be parsed.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppInitError> {
        let storage: Arc<dyn KeyValueStore> = match config.storage.storage {
            StorageBackend::File => Arc::new(FileStore::new(&config.storage.data_dir)),
            StorageBackend::Memory => Arc::new(MemoryStore::new()),
        };

        let auth: Arc<dyn AuthService> = match config.auth.auth_mode {
            AuthMode::Local => Arc::new(LocalAuthService::new(storage.clone())),
            AuthMode::Remote => Arc::new(RemoteAuthService::new(
                &config.auth.api_url,
                Session::new(storage.clone()),
            )),
        };

        debug!(
            storage = ?config.storage.storage,
            auth = ?config.auth.auth_mode,
            "building app context"
        );

        Self::new(storage, auth)
    }

    /// Build application context over an existing store and auth backend.
    ///
    /// # Errors
    ///
    /// Returns an error when the built-in menu cannot be parsed.
    pub fn new(
        storage: Arc<dyn KeyValueStore>,
        auth: Arc<dyn AuthService>,
    ) -> Result<Self, AppInitError> {
        Ok(Self {
            catalog: Catalog::builtin()?,
            cart: CartStore::load(storage.clone()),
            orders: OrderStore::load(storage),
            auth,
            checkout: CheckoutService::default(),
        })
    }

    /// The signed-in user, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.auth.current_user()
    }
}
