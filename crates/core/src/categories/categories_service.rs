use log::{debug, info, warn};
use std::sync::{Arc, Mutex, MutexGuard};

use super::categories_model::Category;
use super::categories_traits::{CategoryRepositoryTrait, CategoryServiceTrait};
use crate::errors::{Rejection, Result, ValidationError};
use crate::events::CategorySink;
use crate::expenses::ExpenseRepositoryTrait;
use crate::validation::require_non_blank;

/// Service for managing categories.
///
/// All mutating operations run their existence checks and the store write
/// under one lock owned by this instance, so two callers can never both pass
/// the same check. Listing does not take the lock.
pub struct CategoryService {
    repository: Arc<dyn CategoryRepositoryTrait>,
    expense_repository: Arc<dyn ExpenseRepositoryTrait>,
    sink: Arc<dyn CategorySink>,
    write_lock: Mutex<()>,
}

impl CategoryService {
    /// Creates a new CategoryService instance
    pub fn new(
        repository: Arc<dyn CategoryRepositoryTrait>,
        expense_repository: Arc<dyn ExpenseRepositoryTrait>,
        sink: Arc<dyn CategorySink>,
    ) -> Self {
        Self {
            repository,
            expense_repository,
            sink,
            write_lock: Mutex::new(()),
        }
    }

    fn validate(category: &Category) -> std::result::Result<(), ValidationError> {
        require_non_blank(Some(category.name.as_str()), "Name")?;
        require_non_blank(Some(category.description.as_str()), "Description")?;
        Ok(())
    }

    // The guarded value is `()`, so a poisoned lock carries no broken state.
    fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn reject(&self, rejection: Rejection, subject: &Category) {
        let message = rejection.message_for(subject);
        warn!("Category operation rejected: {}", message);
        self.sink.error(message, subject.clone());
    }
}

impl CategoryServiceTrait for CategoryService {
    fn list_categories(&self) -> Result<()> {
        let categories = self.repository.find_all()?;
        self.sink.show_all(categories);
        Ok(())
    }

    fn create_category(&self, category: Category) -> Result<()> {
        debug!("Creating category {}", category);
        if let Err(err) = Self::validate(&category) {
            self.reject(err.into(), &category);
            return Ok(());
        }

        let _guard = self.lock_writes();

        if let Some(existing) = self.repository.find_by_id(&category.id)? {
            self.reject(
                Rejection::Conflict(format!(
                    "Already existing category with id {}",
                    category.id
                )),
                &existing,
            );
            return Ok(());
        }

        if let Some(existing) = self.repository.find_by_name(&category.name)? {
            self.reject(
                Rejection::Conflict(format!(
                    "Already existing category with name {}",
                    category.name
                )),
                &existing,
            );
            return Ok(());
        }

        let saved = self.repository.save(&category)?;
        info!("Category added: {}", saved);
        self.sink.added(saved);
        Ok(())
    }

    fn update_category(&self, category: Category) -> Result<()> {
        debug!("Updating category {}", category);
        if let Err(err) = Self::validate(&category) {
            self.reject(err.into(), &category);
            return Ok(());
        }

        let _guard = self.lock_writes();

        if self.repository.find_by_id(&category.id)?.is_none() {
            self.reject(
                Rejection::NotFound(format!("Category does not exist with id {}", category.id)),
                &category,
            );
            return Ok(());
        }

        // Keeping one's own name is not a conflict.
        if let Some(other) = self.repository.find_by_name(&category.name)? {
            if other.id != category.id {
                self.reject(
                    Rejection::Conflict(format!(
                        "Already existing category with name {}",
                        category.name
                    )),
                    &other,
                );
                return Ok(());
            }
        }

        let updated = self.repository.update(&category)?;
        info!("Category updated: {}", updated);
        self.sink.updated(updated);
        Ok(())
    }

    fn delete_category(&self, category: Category) -> Result<()> {
        debug!("Deleting category {}", category);
        let _guard = self.lock_writes();

        let Some(existing) = self.repository.find_by_id(&category.id)? else {
            self.reject(
                Rejection::NotFound(format!("Category does not exist with id {}", category.id)),
                &category,
            );
            return Ok(());
        };

        if !self
            .expense_repository
            .find_by_category_id(&existing.id)?
            .is_empty()
        {
            self.reject(
                Rejection::Integrity(
                    "Category cannot be deleted. Expenses are associated with it".to_string(),
                ),
                &existing,
            );
            return Ok(());
        }

        self.repository.delete(&existing)?;
        info!("Category deleted: {}", existing);
        self.sink.deleted(existing);
        Ok(())
    }

    fn list_expenses_of(&self, category: &Category) -> Result<()> {
        let expenses = self.expense_repository.find_by_category_id(&category.id)?;
        if expenses.is_empty() {
            self.reject(
                Rejection::NotFound("No Expense created for this category".to_string()),
                category,
            );
            return Ok(());
        }
        self.sink.show_expenses(expenses);
        Ok(())
    }
}
