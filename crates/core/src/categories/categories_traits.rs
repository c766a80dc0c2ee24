//! Category repository and service traits.
//!
//! These traits define the contract for category operations without any
//! database-specific types, allowing for different storage implementations.

use super::categories_model::Category;
use crate::errors::Result;

/// Trait defining the contract for Category repository operations.
///
/// Every call blocks until the store answers and is committed atomically on
/// its own. Errors are infrastructure failures only; "not found" is `Ok(None)`.
pub trait CategoryRepositoryTrait: Send + Sync {
    /// Lists every persisted category.
    fn find_all(&self) -> Result<Vec<Category>>;

    /// Retrieves a category by its ID.
    fn find_by_id(&self, category_id: &str) -> Result<Option<Category>>;

    /// Retrieves a category by exact name.
    fn find_by_name(&self, name: &str) -> Result<Option<Category>>;

    /// Persists a new category and returns it with its assigned ID.
    ///
    /// An empty ID is replaced by a generated one.
    fn save(&self, category: &Category) -> Result<Category>;

    /// Overwrites the stored category with the same ID.
    fn update(&self, category: &Category) -> Result<Category>;

    /// Deletes the category with the same ID.
    ///
    /// Returns the number of deleted records.
    fn delete(&self, category: &Category) -> Result<usize>;
}

/// Trait defining the contract for Category service operations.
///
/// Outcomes are pushed to the service's sink. An `Err` is only returned when
/// a store call itself fails.
pub trait CategoryServiceTrait: Send + Sync {
    /// Sends every category to the sink.
    fn list_categories(&self) -> Result<()>;

    /// Validates and persists a new category with a unique name.
    fn create_category(&self, category: Category) -> Result<()>;

    /// Validates and overwrites an existing category.
    fn update_category(&self, category: Category) -> Result<()>;

    /// Deletes a category that has no expenses.
    fn delete_category(&self, category: Category) -> Result<()>;

    /// Sends the expenses filed under `category` to the sink.
    fn list_expenses_of(&self, category: &Category) -> Result<()>;
}
