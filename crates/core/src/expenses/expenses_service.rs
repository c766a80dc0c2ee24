use log::{debug, info, warn};
use std::sync::{Arc, Mutex, MutexGuard};

use super::expenses_model::Expense;
use super::expenses_traits::{ExpenseRepositoryTrait, ExpenseServiceTrait};
use crate::categories::{Category, CategoryRepositoryTrait};
use crate::errors::{Rejection, Result, ValidationError};
use crate::events::ExpenseSink;
use crate::validation::{require_non_blank, require_not_future_date, require_positive_amount};

/// Service for managing expenses.
///
/// Mutations are serialized on a lock owned by this instance, independent of
/// the category service's lock. The category store is only read, to check
/// that the referenced category exists at write time.
pub struct ExpenseService {
    repository: Arc<dyn ExpenseRepositoryTrait>,
    category_repository: Arc<dyn CategoryRepositoryTrait>,
    sink: Arc<dyn ExpenseSink>,
    write_lock: Mutex<()>,
}

impl ExpenseService {
    pub fn new(
        repository: Arc<dyn ExpenseRepositoryTrait>,
        category_repository: Arc<dyn CategoryRepositoryTrait>,
        sink: Arc<dyn ExpenseSink>,
    ) -> Self {
        Self {
            repository,
            category_repository,
            sink,
            write_lock: Mutex::new(()),
        }
    }

    /// Field checks, then the category reference. Returns the referenced category.
    fn validate(expense: &Expense) -> std::result::Result<&Category, ValidationError> {
        require_positive_amount(expense.amount)?;
        require_non_blank(Some(expense.description.as_str()), "Description")?;
        require_not_future_date(expense.date)?;
        expense
            .category
            .as_ref()
            .ok_or(ValidationError::MissingCategory)
    }

    fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Missing records go to the not-found channel, everything else to `error`.
    fn reject(&self, rejection: Rejection, subject: &Expense) {
        let message = rejection.message_for(subject);
        warn!("Expense operation rejected: {}", message);
        if rejection.is_not_found() {
            self.sink.not_found_error(message, subject.clone());
        } else {
            self.sink.error(message, subject.clone());
        }
    }

    fn category_exists(&self, category: &Category) -> Result<bool> {
        Ok(self.category_repository.find_by_id(&category.id)?.is_some())
    }

    fn missing_category(category: &Category) -> Rejection {
        Rejection::NotFound(format!("Category does not exist with id {}", category.id))
    }

    fn missing_expense(expense: &Expense) -> Rejection {
        Rejection::NotFound(format!("Expense does not exist with id {}", expense.id))
    }
}

impl ExpenseServiceTrait for ExpenseService {
    fn list_expenses(&self) -> Result<()> {
        let expenses = self.repository.find_all()?;
        self.sink.show_all(expenses);
        Ok(())
    }

    fn create_expense(&self, expense: Expense) -> Result<()> {
        debug!("Creating expense {}", expense);
        let category = match Self::validate(&expense) {
            Ok(category) => category,
            Err(err) => {
                self.reject(err.into(), &expense);
                return Ok(());
            }
        };

        let _guard = self.lock_writes();

        if let Some(existing) = self.repository.find_by_id(&expense.id)? {
            self.reject(
                Rejection::Conflict(format!("Already existing expense with id {}", expense.id)),
                &existing,
            );
            return Ok(());
        }

        if !self.category_exists(category)? {
            self.reject(Self::missing_category(category), &expense);
            return Ok(());
        }

        let saved = self.repository.save(&expense)?;
        info!("Expense added: {}", saved);
        self.sink.added(saved);
        Ok(())
    }

    fn update_expense(&self, expense: Expense) -> Result<()> {
        debug!("Updating expense {}", expense);
        let category = match Self::validate(&expense) {
            Ok(category) => category,
            Err(err) => {
                self.reject(err.into(), &expense);
                return Ok(());
            }
        };

        let _guard = self.lock_writes();

        if self.repository.find_by_id(&expense.id)?.is_none() {
            self.reject(Self::missing_expense(&expense), &expense);
            return Ok(());
        }

        if !self.category_exists(category)? {
            self.reject(Self::missing_category(category), &expense);
            return Ok(());
        }

        let updated = self.repository.update(&expense)?;
        info!("Expense updated: {}", updated);
        self.sink.updated(updated);
        Ok(())
    }

    fn delete_expense(&self, expense: Expense) -> Result<()> {
        debug!("Deleting expense {}", expense);
        let _guard = self.lock_writes();

        let Some(existing) = self.repository.find_by_id(&expense.id)? else {
            self.reject(Self::missing_expense(&expense), &expense);
            return Ok(());
        };

        self.repository.delete(&existing)?;
        info!("Expense deleted: {}", existing);
        self.sink.deleted(existing);
        Ok(())
    }
}
