//! Auth Config

use clap::Args;

/// Authentication backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum AuthMode {
    /// Built-in demo accounts.
    Local,

    /// The storefront's HTTP auth API.
    Remote,
}

/// Authentication settings.
#[derive(Debug, Clone, Args)]
pub struct AuthConfig {
    /// Authentication backend (local, remote)
    #[arg(long, env = "PIZZERIA_AUTH_MODE", value_enum, default_value_t = AuthMode::Local)]
    pub auth_mode: AuthMode,

    /// Base URL of the auth API, used in remote mode
    #[arg(long, env = "PIZZERIA_API_URL", default_value = "http://localhost:8000")]
    pub api_url: String,
}
