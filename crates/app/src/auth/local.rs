//! Built-in and locally registered accounts.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use pizzeria::users::{User, UserUuid};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    auth::{AuthError, AuthService, Credentials, PasswordHash, Registration, Session},
    storage::{ACCOUNTS_KEY, KeyValueStore, load_json, save_json},
};

#[derive(Clone, Serialize, Deserialize)]
struct Account {
    user: User,
    password: PasswordHash,
}

impl Account {
    fn matches_email(&self, email: &str) -> bool {
        self.user.email.eq_ignore_ascii_case(email)
    }
}

/// Auth backend with the two demo accounts built in.
///
/// Registered accounts are stored under [`ACCOUNTS_KEY`] with salted password
/// digests, so they survive across processes sharing the same storage.
pub struct LocalAuthService {
    builtin: Vec<Account>,
    registered: Mutex<Vec<Account>>,
    storage: Arc<dyn KeyValueStore>,
    session: Session,
}

impl LocalAuthService {
    /// Service seeded with `admin@pizza.com` / `admin123` (admin) and
    /// `user@pizza.com` / `user123`.
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self::with_accounts(
            storage,
            [
                (demo_user(1, "Admin User", "admin@pizza.com", true), "admin123"),
                (demo_user(2, "Test User", "user@pizza.com", false), "user123"),
            ],
        )
    }

    /// Service with the given built-in accounts plus whatever has been
    /// registered in `storage`.
    #[must_use]
    pub fn with_accounts<P: AsRef<str>>(
        storage: Arc<dyn KeyValueStore>,
        accounts: impl IntoIterator<Item = (User, P)>,
    ) -> Self {
        let builtin = accounts
            .into_iter()
            .map(|(user, password)| Account {
                user,
                password: PasswordHash::new(password.as_ref()),
            })
            .collect();

        let registered: Vec<Account> =
            load_json(storage.as_ref(), ACCOUNTS_KEY).unwrap_or_default();

        Self {
            builtin,
            registered: Mutex::new(registered),
            session: Session::new(storage.clone()),
            storage,
        }
    }
}

impl fmt::Debug for LocalAuthService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalAuthService")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

fn demo_user(id: u128, name: &str, email: &str, is_admin: bool) -> User {
    User {
        id: UserUuid::from_uuid(Uuid::from_u128(id)),
        name: name.to_string(),
        email: email.to_string(),
        is_admin,
    }
}

#[async_trait]
impl AuthService for LocalAuthService {
    async fn login(&self, credentials: Credentials) -> Result<User, AuthError> {
        credentials.require_filled()?;

        let email = credentials.email.trim();

        let user = {
            let registered = self.registered.lock().await;

            self.builtin
                .iter()
                .chain(registered.iter())
                .find(|account| {
                    account.matches_email(email) && account.password.verify(&credentials.password)
                })
                .map(|account| account.user.clone())
        };

        let Some(user) = user else {
            warn!(email = %credentials.email, "login rejected");

            return Err(AuthError::InvalidCredentials);
        };

        self.session.sign_in(&user, None)?;

        info!(user = %user.id, "signed in");

        Ok(user)
    }

    async fn register(&self, registration: Registration) -> Result<User, AuthError> {
        registration.require_filled()?;

        let email = registration.email.trim().to_string();
        let mut registered = self.registered.lock().await;

        if self
            .builtin
            .iter()
            .chain(registered.iter())
            .any(|account| account.matches_email(&email))
        {
            return Err(AuthError::EmailTaken(email));
        }

        let user = User {
            id: UserUuid::new(),
            name: registration.name.trim().to_string(),
            email,
            is_admin: false,
        };

        registered.push(Account {
            user: user.clone(),
            password: PasswordHash::new(&registration.password),
        });

        if let Err(error) = save_json(self.storage.as_ref(), ACCOUNTS_KEY, &*registered) {
            registered.pop();

            return Err(error.into());
        }

        self.session.sign_in(&user, None)?;

        info!(user = %user.id, "registered");

        Ok(user)
    }

    async fn logout(&self) -> Result<(), AuthError> {
        self.session.sign_out()?;

        info!("signed out");

        Ok(())
    }

    fn current_user(&self) -> Option<User> {
        self.session.user()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use testresult::TestResult;

    use crate::storage::{MemoryStore, MockKeyValueStore, StorageError};

    use super::*;

    fn service() -> LocalAuthService {
        LocalAuthService::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn demo_admin_can_sign_in() -> TestResult {
        let auth = service();

        let user = auth
            .login(Credentials::new("admin@pizza.com", "admin123"))
            .await?;

        assert!(user.is_admin);
        assert_eq!(user.name, "Admin User");
        assert_eq!(auth.current_user(), Some(user));

        Ok(())
    }

    #[tokio::test]
    async fn wrong_password_is_rejected_and_session_untouched() {
        let auth = service();

        let result = auth
            .login(Credentials::new("user@pizza.com", "admin123"))
            .await;

        assert!(
            matches!(result, Err(AuthError::InvalidCredentials)),
            "expected InvalidCredentials, got {result:?}"
        );
        assert_eq!(auth.current_user(), None);
    }

    #[tokio::test]
    async fn register_signs_in_a_regular_user() -> TestResult {
        let auth = service();

        let user = auth
            .register(Registration::new("Pat Doe", "pat@example.com", "secret"))
            .await?;

        assert!(!user.is_admin);
        assert_eq!(auth.current_user(), Some(user.clone()));

        auth.logout().await?;

        assert_eq!(auth.current_user(), None);

        let again = auth
            .login(Credentials::new("pat@example.com", "secret"))
            .await?;

        assert_eq!(again.id, user.id);

        Ok(())
    }

    #[tokio::test]
    async fn registered_account_survives_a_new_service() -> TestResult {
        let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());

        let user = LocalAuthService::new(storage.clone())
            .register(Registration::new("Pat Doe", "pat@example.com", "secret"))
            .await?;

        let reopened = LocalAuthService::new(storage.clone());
        reopened.logout().await?;

        let again = reopened
            .login(Credentials::new("PAT@example.com", "secret"))
            .await?;

        assert_eq!(again.id, user.id);

        let result = reopened
            .register(Registration::new("Other Pat", "pat@example.com", "other"))
            .await;

        assert!(
            matches!(result, Err(AuthError::EmailTaken(_))),
            "expected EmailTaken, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn stored_accounts_hold_no_plain_password() -> TestResult {
        let storage = Arc::new(MemoryStore::new());

        LocalAuthService::new(storage.clone())
            .register(Registration::new("Pat Doe", "pat@example.com", "hunter22"))
            .await?;

        let stored = storage.get(ACCOUNTS_KEY)?.ok_or("accounts not stored")?;

        assert!(stored.contains("pat@example.com"));
        assert!(!stored.contains("hunter22"), "plain password in {stored}");

        Ok(())
    }

    #[tokio::test]
    async fn failed_account_write_leaves_no_account_behind() {
        let mut storage = MockKeyValueStore::new();
        storage.expect_get().returning(|_| Ok(None));
        storage
            .expect_set()
            .returning(|_, _| Err(StorageError::Poisoned));

        let auth = LocalAuthService::new(Arc::new(storage));

        let result = auth
            .register(Registration::new("Pat Doe", "pat@example.com", "secret"))
            .await;

        assert!(
            matches!(result, Err(AuthError::Storage(_))),
            "expected Storage, got {result:?}"
        );

        let result = auth
            .login(Credentials::new("pat@example.com", "secret"))
            .await;

        assert!(
            matches!(result, Err(AuthError::InvalidCredentials)),
            "expected InvalidCredentials, got {result:?}"
        );
    }

    #[tokio::test]
    async fn register_rejects_existing_email() {
        let auth = service();

        let result = auth
            .register(Registration::new("Someone", "USER@pizza.com", "x"))
            .await;

        assert!(
            matches!(result, Err(AuthError::EmailTaken(_))),
            "expected EmailTaken, got {result:?}"
        );
    }
}
