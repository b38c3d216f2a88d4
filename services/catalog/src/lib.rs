//! Book catalog for LibraryHub
//!
//! Genres live in the relational store and are seeded once at startup. Books
//! are read through a cache: the first request for a genre queries the
//! external catalog API and stores the results, later requests are served
//! from the stored rows.

pub mod cache;
pub mod client;
pub mod error;
pub mod models;
pub mod repositories;
pub mod seed;

pub use cache::CatalogCache;
pub use client::{CatalogClient, GoogleBooksClient};
pub use error::{CatalogError, CatalogResult};
