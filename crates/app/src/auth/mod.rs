//! Authentication

mod errors;
mod local;
mod models;
mod password;
mod remote;
mod service;
mod session;

pub use errors::AuthError;
pub use local::LocalAuthService;
pub use models::{Credentials, Registration};
pub use password::PasswordHash;
pub use remote::RemoteAuthService;
pub use service::*;
pub use session::Session;
