//! Auth service.

use async_trait::async_trait;
use mockall::automock;
use pizzeria::users::User;

use crate::auth::{AuthError, Credentials, Registration};

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Signs in and remembers the session.
    async fn login(&self, credentials: Credentials) -> Result<User, AuthError>;

    /// Creates a non-admin account and signs it in.
    async fn register(&self, registration: Registration) -> Result<User, AuthError>;

    /// Forgets the session.
    async fn logout(&self) -> Result<(), AuthError>;

    /// The signed-in user, if any.
    fn current_user(&self) -> Option<User>;
}
