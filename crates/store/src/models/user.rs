//! User entity model and DTOs.

use pancheck_core::types::DbId;
use serde::{Serialize, Serializer};

/// Stored account.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`UserInfo`] for external-facing output.
#[derive(Debug, Clone)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Safe user representation for API responses (no password hash).
///
/// Clients receive the id as a string (`"1"`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserInfo {
    #[serde(serialize_with = "id_as_string")]
    pub id: DbId,
    pub name: String,
    pub email: String,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

fn id_as_string<S: Serializer>(id: &DbId, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(id)
}

/// DTO for creating a new user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}
