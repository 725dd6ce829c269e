//! Storefront configuration
//!
//! Every option can be given as a flag or through the environment; a `.env`
//! file in the working directory is read first when present.

use clap::Args;

mod auth;
mod observability;
mod storage;

pub use auth::{AuthConfig, AuthMode};
pub use observability::{LogFormat, LoggingConfig};
pub use storage::{StorageBackend, StorageConfig};

/// Settings shared by every command.
#[derive(Debug, Clone, Args)]
pub struct AppConfig {
    /// Where cart, orders and session are kept.
    #[command(flatten)]
    pub storage: StorageConfig,

    /// Which authentication backend to use.
    #[command(flatten)]
    pub auth: AuthConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}
