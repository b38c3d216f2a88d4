//! HTTP API for LibraryHub
//!
//! An axum router over the credential service, the catalog cache, the
//! notification ledger and contact intake. Sessions travel in an HTTP-only
//! cookie and are resolved by [`middleware::session_middleware`] on every
//! request.

pub mod contact;
pub mod cookie;
pub mod error;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppState, Repositories};
