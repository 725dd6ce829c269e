//! HTTP auth backend.

use async_trait::async_trait;
use pizzeria::users::{User, UserUuid};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use crate::auth::{AuthError, AuthService, Credentials, Registration, Session};

/// Auth backend that delegates to the storefront API and keeps its bearer token.
#[derive(Debug, Clone)]
pub struct RemoteAuthService {
    base_url: String,
    http: Client,
    session: Session,
}

impl RemoteAuthService {
    #[must_use]
    pub fn new(base_url: impl Into<String>, session: Session) -> Self {
        Self::with_client(base_url, Client::new(), session)
    }

    #[must_use]
    pub fn with_client(base_url: impl Into<String>, http: Client, session: Session) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
            session,
        }
    }

    /// Bearer token of the signed-in user, if any.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.session.token()
    }

    fn endpoint(&self, action: &str) -> String {
        format!("{}/api/auth/{action}/", self.base_url)
    }

    async fn exchange<B: Serialize + Sync + ?Sized>(
        &self,
        action: &str,
        body: &B,
    ) -> Result<User, AuthError> {
        let result = self.post(action, body).await;

        match result {
            Ok(response) => {
                let user = response.user.into_user();

                self.session.sign_in(&user, Some(&response.token))?;

                info!(user = %user.id, action, "remote auth succeeded");

                Ok(user)
            }
            Err(auth_error) => {
                error!(action, error = %auth_error, "remote auth failed");

                Err(auth_error)
            }
        }
    }

    async fn post<B: Serialize + Sync + ?Sized>(
        &self,
        action: &str,
        body: &B,
    ) -> Result<AuthResponse, AuthError> {
        let url = self.endpoint(action);
        let response = self.http.post(&url).json(body).send().await?;
        let status = response.status();

        if status.is_client_error() {
            let message = response.text().await.unwrap_or_default();

            return Err(AuthError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();

            return Err(AuthError::UnexpectedResponse(format!(
                "{action} request failed with status {status}: {text}"
            )));
        }

        let text = response.text().await?;

        serde_json::from_str(&text)
            .map_err(|error| AuthError::UnexpectedResponse(format!("{action} response: {error}")))
    }
}

#[async_trait]
impl AuthService for RemoteAuthService {
    async fn login(&self, credentials: Credentials) -> Result<User, AuthError> {
        credentials.require_filled()?;

        let body = LoginRequest {
            email: credentials.email.trim(),
            password: &credentials.password,
        };

        self.exchange("login", &body).await.map_err(|error| match error {
            AuthError::Rejected { status, .. }
                if status == StatusCode::BAD_REQUEST.as_u16()
                    || status == StatusCode::UNAUTHORIZED.as_u16() =>
            {
                AuthError::InvalidCredentials
            }
            other => other,
        })
    }

    async fn register(&self, registration: Registration) -> Result<User, AuthError> {
        registration.require_filled()?;

        let body = RegisterRequest {
            name: registration.name.trim(),
            email: registration.email.trim(),
            password: &registration.password,
        };

        self.exchange("register", &body).await
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

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RegisterRequest<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    token: String,
    user: RemoteUser,
}

#[derive(Debug, Deserialize)]
struct RemoteUser {
    id: RemoteUserId,
    name: String,
    email: String,
    #[serde(default)]
    is_admin: bool,
}

/// The API may identify users by UUID or by integer primary key.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RemoteUserId {
    Uuid(Uuid),
    Number(u64),
}

impl RemoteUser {
    fn into_user(self) -> User {
        let id = match self.id {
            RemoteUserId::Uuid(uuid) => uuid,
            RemoteUserId::Number(number) => Uuid::from_u128(u128::from(number)),
        };

        User {
            id: UserUuid::from_uuid(id),
            name: self.name,
            email: self.email,
            is_admin: self.is_admin,
        }
    }
}
