//! Domain event types.

use serde::{Deserialize, Serialize};

use crate::categories::Category;
use crate::expenses::Expense;

/// Domain events emitted by core services, one per sink notification.
///
/// These events represent outcomes of service calls. Runtime adapters
/// translate them into platform-specific actions (printing, refreshing a
/// table, showing an error dialog, etc.).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    /// The full category list was requested.
    CategoriesListed { categories: Vec<Category> },

    /// The expenses filed under one category were requested.
    CategoryExpensesListed { expenses: Vec<Expense> },

    CategoryAdded { category: Category },

    CategoryUpdated { category: Category },

    CategoryDeleted { category: Category },

    /// A category operation was turned down.
    CategoryRejected { message: String, subject: Category },

    /// The full expense list was requested.
    ExpensesListed { expenses: Vec<Expense> },

    ExpenseAdded { expense: Expense },

    ExpenseUpdated { expense: Expense },

    ExpenseDeleted { expense: Expense },

    /// An expense operation was turned down for a reason other than a
    /// missing record.
    ExpenseRejected { message: String, subject: Expense },

    /// An expense operation referenced a record that does not exist.
    ExpenseNotFound { message: String, subject: Expense },
}

impl DomainEvent {
    /// Creates a CategoryRejected event.
    pub fn category_rejected(message: impl Into<String>, subject: Category) -> Self {
        Self::CategoryRejected {
            message: message.into(),
            subject,
        }
    }

    /// Creates an ExpenseRejected event.
    pub fn expense_rejected(message: impl Into<String>, subject: Expense) -> Self {
        Self::ExpenseRejected {
            message: message.into(),
            subject,
        }
    }

    /// Creates an ExpenseNotFound event.
    pub fn expense_not_found(message: impl Into<String>, subject: Expense) -> Self {
        Self::ExpenseNotFound {
            message: message.into(),
            subject,
        }
    }

    /// The rejection message, if this event reports one.
    pub fn rejection_message(&self) -> Option<&str> {
        match self {
            Self::CategoryRejected { message, .. }
            | Self::ExpenseRejected { message, .. }
            | Self::ExpenseNotFound { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn is_rejection(&self) -> bool {
        self.rejection_message().is_some()
    }
}
