//! Key-value persistence for the storefront's client-side state.
//!
//! Values are whole JSON documents. Every write replaces the previous value
//! for its key; there is no partial update.

use serde::{Serialize, de::DeserializeOwned};
use tracing::warn;

mod errors;
mod file;
mod memory;
mod store;

pub use errors::StorageError;
pub use file::FileStore;
pub use memory::MemoryStore;
pub use store::*;

/// Serialized cart lines.
pub const CART_KEY: &str = "pizza-cart";

/// Serialized order list.
pub const ORDERS_KEY: &str = "pizza-orders";

/// Signed-in user.
pub const USER_KEY: &str = "pizza-user";

/// Bearer token issued by the remote auth API.
pub const TOKEN_KEY: &str = "pizza-token";

/// Accounts registered with the local auth backend.
pub const ACCOUNTS_KEY: &str = "pizza-accounts";

/// Reads and decodes the value stored under `key`.
///
/// Missing keys, unreadable storage and malformed JSON all yield `None`; the
/// last two are logged so a corrupt snapshot never blocks start-up.
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(error) => {
            warn!(key, error = %error, "failed to read stored value, starting empty");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(error) => {
            warn!(key, error = %error, "discarding malformed stored value");
            None
        }
    }
}

/// Encodes `value` as JSON and stores it under `key`.
///
/// # Errors
///
/// Returns an error when encoding fails or the store rejects the write.
pub fn save_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value).map_err(|source| StorageError::Serialize {
        key: key.to_string(),
        source,
    })?;

    store.set(key, &raw)
}

#[cfg(test)]
mod tests {
    use std::io;

    use testresult::TestResult;

    use super::*;

    #[test]
    fn load_json_returns_none_for_missing_key() {
        let store = MemoryStore::new();

        assert_eq!(load_json::<Vec<u32>>(&store, CART_KEY), None);
    }

    #[test]
    fn load_json_discards_malformed_value() -> TestResult {
        let store = MemoryStore::new();

        store.set(CART_KEY, "{not json")?;

        assert_eq!(load_json::<Vec<u32>>(&store, CART_KEY), None);

        Ok(())
    }

    #[test]
    fn load_json_treats_read_failure_as_missing() {
        let mut store = MockKeyValueStore::new();

        store.expect_get().once().returning(|key| {
            Err(StorageError::Io {
                key: key.to_string(),
                source: io::Error::other("disk on fire"),
            })
        });

        assert_eq!(load_json::<Vec<u32>>(&store, ORDERS_KEY), None);
    }

    #[test]
    fn save_json_writes_whole_document() -> TestResult {
        let store = MemoryStore::new();

        save_json(&store, ORDERS_KEY, &[1, 2, 3])?;

        assert_eq!(store.get(ORDERS_KEY)?.as_deref(), Some("[1,2,3]"));
        assert_eq!(load_json::<Vec<u32>>(&store, ORDERS_KEY), Some(vec![1, 2, 3]));

        Ok(())
    }
}
