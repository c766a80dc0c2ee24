//! SQLite storage implementation for Expensebook.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the store traits defined in `expensebook-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for categories and expenses
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//! The core crate is database-agnostic and works with traits.
//!
//! ```text
//!          core (domain, services)
//!                  │
//!                  ▼
//!          storage-sqlite (this crate)
//!                  │
//!                  ▼
//!              SQLite DB
//! ```
//!
//! Every repository call checks out its own pooled connection and runs as a
//! single statement, so each call commits atomically on its own. Serializing
//! check-then-write sequences is the job of the core services.

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod categories;
pub mod expenses;

// Re-export database utilities
pub use db::{create_pool, get_connection, get_db_path, init, run_migrations, DbConnection, DbPool};

// Re-export storage errors
pub use errors::StorageError;

// Re-export from expensebook-core for convenience
pub use expensebook_core::errors::{DatabaseError, Error, Result};
