//! Users

use serde::{Deserialize, Serialize};

use crate::uuids::TypedUuid;

/// User UUID
pub type UserUuid = TypedUuid<User>;

/// A signed-in storefront user, as every authentication backend reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User identifier, used to attribute orders.
    pub id: UserUuid,

    /// Display name.
    pub name: String,

    /// Login email address.
    pub email: String,

    /// Whether the user may manage every order.
    #[serde(default)]
    pub is_admin: bool,
}
