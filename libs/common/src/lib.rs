//! Common library for the LibraryHub services
//!
//! This crate provides shared functionality used by the credential, catalog
//! and API crates: settings, logging setup, database connectivity and schema,
//! error handling, and the per-user notification ledger.
//!
//! ```rust,no_run
//! use common::database::{ensure_schema, health_check, init_pool};
//! use common::settings::Settings;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = Settings::load()?;
//!     let pool = init_pool(&settings.database).await?;
//!     ensure_schema(&pool).await?;
//!     println!("Database health check: {}", health_check(&pool).await?);
//!     Ok(())
//! }
//! ```

pub mod database;
pub mod error;
pub mod notifications;
pub mod settings;
pub mod telemetry;
