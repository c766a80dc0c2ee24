use super::expenses_model::Expense;
use crate::errors::Result;

/// Trait for expense repository operations
pub trait ExpenseRepositoryTrait: Send + Sync {
    fn find_all(&self) -> Result<Vec<Expense>>;
    fn find_by_id(&self, expense_id: &str) -> Result<Option<Expense>>;
    /// Expenses filed under a category. This is the only link from a
    /// category to its expenses.
    fn find_by_category_id(&self, category_id: &str) -> Result<Vec<Expense>>;
    fn save(&self, expense: &Expense) -> Result<Expense>;
    fn update(&self, expense: &Expense) -> Result<Expense>;
    fn delete(&self, expense: &Expense) -> Result<usize>;
}

/// Trait for expense service operations
pub trait ExpenseServiceTrait: Send + Sync {
    fn list_expenses(&self) -> Result<()>;
    fn create_expense(&self, expense: Expense) -> Result<()>;
    fn update_expense(&self, expense: Expense) -> Result<()>;
    fn delete_expense(&self, expense: Expense) -> Result<()>;
}
