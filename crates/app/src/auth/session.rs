//! Persisted sign-in state.

use std::{fmt, sync::Arc};

use pizzeria::users::User;
use tracing::debug;

use crate::storage::{KeyValueStore, StorageError, TOKEN_KEY, USER_KEY, load_json, save_json};

/// The signed-in user and, for the remote backend, its bearer token.
#[derive(Clone)]
pub struct Session {
    storage: Arc<dyn KeyValueStore>,
}

impl Session {
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    #[must_use]
    pub fn user(&self) -> Option<User> {
        load_json(self.storage.as_ref(), USER_KEY)
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        load_json(self.storage.as_ref(), TOKEN_KEY)
    }

    /// Remembers `user`. A missing `token` clears any stored one.
    ///
    /// # Errors
    ///
    /// Returns an error when the session could not be written.
    pub fn sign_in(&self, user: &User, token: Option<&str>) -> Result<(), StorageError> {
        save_json(self.storage.as_ref(), USER_KEY, user)?;

        match token {
            Some(token) => save_json(self.storage.as_ref(), TOKEN_KEY, token)?,
            None => self.storage.remove(TOKEN_KEY)?,
        }

        debug!(user = %user.id, "session stored");

        Ok(())
    }

    /// Forgets the user and token.
    ///
    /// # Errors
    ///
    /// Returns an error when the session could not be removed.
    pub fn sign_out(&self) -> Result<(), StorageError> {
        self.storage.remove(USER_KEY)?;
        self.storage.remove(TOKEN_KEY)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}
