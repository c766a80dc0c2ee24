//! Expensebook Core - Domain entities, services, and traits.
//!
//! This crate contains the business rules for categories and expenses.
//! It is database-agnostic and defines the store traits that are implemented
//! by the `storage-sqlite` crate, and the sink traits that presentation
//! layers implement to receive outcomes.

pub mod categories;
pub mod errors;
pub mod events;
pub mod expenses;
pub mod utils;
pub mod validation;

#[cfg(test)]
mod testing;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
