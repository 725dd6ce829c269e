//! Test context for command-level tests.

use std::sync::Arc;

use crate::{
    auth::{Credentials, LocalAuthService},
    context::AppContext,
    storage::{KeyValueStore, MemoryStore},
};

pub struct TestContext {
    pub storage: Arc<MemoryStore>,
    pub app: AppContext,
}

impl TestContext {
    pub fn new() -> Self {
        let storage = Arc::new(MemoryStore::new());
        let shared: Arc<dyn KeyValueStore> = storage.clone();
        let auth = Arc::new(LocalAuthService::new(shared.clone()));

        let app = AppContext::new(shared, auth).expect("built-in menu should load");

        Self { storage, app }
    }

    /// Context with one of the demo accounts signed in.
    pub async fn signed_in(email: &str, password: &str) -> Self {
        let ctx = Self::new();

        ctx.app
            .auth
            .login(Credentials::new(email, password))
            .await
            .expect("demo login should succeed");

        ctx
    }

    pub async fn customer() -> Self {
        Self::signed_in("user@pizza.com", "user123").await
    }

    pub async fn admin() -> Self {
        Self::signed_in("admin@pizza.com", "admin123").await
    }

    /// Rebuilds the app over the same storage, like a second CLI invocation.
    pub fn reopen(&self) -> AppContext {
        let shared: Arc<dyn KeyValueStore> = self.storage.clone();
        let auth = Arc::new(LocalAuthService::new(shared.clone()));

        AppContext::new(shared, auth).expect("built-in menu should load")
    }
}
