//! Expense domain models.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::categories::Category;

/// Domain model representing an expense.
///
/// `date` and `category` are optional so that incomplete input can reach the
/// service and be rejected there with a proper message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub amount: Decimal,
    pub description: String,
    pub date: Option<NaiveDate>,
    pub category: Option<Category>,
}

impl Expense {
    /// Creates a transient expense with no id.
    pub fn new(
        amount: Decimal,
        description: impl Into<String>,
        date: NaiveDate,
        category: Category,
    ) -> Self {
        Self {
            id: String::new(),
            amount,
            description: description.into(),
            date: Some(date),
            category: Some(category),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Id of the referenced category, if any.
    pub fn category_id(&self) -> Option<&str> {
        self.category.as_ref().map(|c| c.id.as_str())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Expense[id={}, amount={}, description={}, date=",
            self.id, self.amount, self.description
        )?;
        match &self.date {
            Some(date) => write!(f, "{}", date)?,
            None => f.write_str("null")?,
        }
        f.write_str(", category=")?;
        match &self.category {
            Some(category) => write!(f, "{}]", category),
            None => f.write_str("null]"),
        }
    }
}
