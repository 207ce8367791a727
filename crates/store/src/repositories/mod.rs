//! Repository layer.
//!
//! Repositories are traits so handlers can be given any backing store.
//! [`InMemoryUserRepo`] is the only implementation.

pub mod user_repo;

pub use user_repo::{InMemoryUserRepo, UserRepo};
