//! Repositories owned by the API service

pub mod contact;

pub use contact::{ContactRepository, MemoryContactRepository, PgContactRepository};
