//! Auth request models.

use std::fmt;

use zeroize::Zeroizing;

use crate::auth::AuthError;

/// Email and password for signing in.
#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: Zeroizing<String>,
}

impl Credentials {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    pub(crate) fn require_filled(&self) -> Result<(), AuthError> {
        require("email", &self.email)?;
        require("password", &self.password)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"**redacted**")
            .finish()
    }
}

/// Details for a new account.
#[derive(Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: Zeroizing<String>,
}

impl Registration {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    pub(crate) fn require_filled(&self) -> Result<(), AuthError> {
        require("name", &self.name)?;
        require("email", &self.email)?;
        require("password", &self.password)
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"**redacted**")
            .finish()
    }
}

fn require(field: &'static str, value: &str) -> Result<(), AuthError> {
    if value.trim().is_empty() {
        return Err(AuthError::MissingField(field));
    }

    Ok(())
}
