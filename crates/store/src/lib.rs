//! Account storage.
//!
//! Accounts live in process memory behind the [`repositories::UserRepo`]
//! trait so the HTTP layer never touches a concrete store. Everything is lost
//! on restart.

pub mod models;
pub mod repositories;
pub mod seed;

/// Errors from the account store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// An account with this email already exists.
    #[error("User with email {0} already exists")]
    DuplicateEmail(String),
}
