//! SQLite storage implementation for expenses.

mod model;
mod repository;

pub use model::ExpenseDB;
pub use repository::ExpenseRepository;
