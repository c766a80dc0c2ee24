//! Database models for expenses.

use std::str::FromStr;

use chrono::NaiveDate;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use expensebook_core::expenses::Expense;

use crate::categories::CategoryDB;
use crate::errors::StorageError;

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Database model for expenses.
///
/// Amounts are stored as decimal strings so no precision is lost.
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    Associations,
    AsChangeset,
    Selectable,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(belongs_to(CategoryDB, foreign_key = category_id))]
#[diesel(table_name = crate::schema::expenses)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct ExpenseDB {
    pub id: String,
    pub amount: String,
    pub description: String,
    pub date: String,
    pub category_id: String,
}

impl ExpenseDB {
    /// Rebuilds the domain expense from a row and its joined category.
    pub fn into_domain(self, category: CategoryDB) -> Result<Expense, StorageError> {
        let amount = Decimal::from_str(&self.amount).map_err(|e| {
            StorageError::SerializationError(format!(
                "Invalid amount '{}' for expense {}: {}",
                self.amount, self.id, e
            ))
        })?;
        let date = NaiveDate::parse_from_str(&self.date, DATE_FORMAT).map_err(|e| {
            StorageError::SerializationError(format!(
                "Invalid date '{}' for expense {}: {}",
                self.date, self.id, e
            ))
        })?;

        Ok(Expense {
            id: self.id,
            amount,
            description: self.description,
            date: Some(date),
            category: Some(category.into()),
        })
    }
}

impl TryFrom<&Expense> for ExpenseDB {
    type Error = StorageError;

    fn try_from(domain: &Expense) -> Result<Self, Self::Error> {
        let category_id = domain.category_id().ok_or_else(|| {
            StorageError::InvalidRecord(format!("Expense {} has no category", domain))
        })?;
        let date = domain.date.ok_or_else(|| {
            StorageError::InvalidRecord(format!("Expense {} has no date", domain))
        })?;

        Ok(Self {
            id: domain.id.clone(),
            amount: domain.amount.to_string(),
            description: domain.description.clone(),
            date: date.format(DATE_FORMAT).to_string(),
            category_id: category_id.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expensebook_core::categories::Category;
    use rust_decimal_macros::dec;

    fn bills_db() -> CategoryDB {
        CategoryDB {
            id: "c-1".to_string(),
            name: "bills".to_string(),
            description: "utilities".to_string(),
        }
    }

    #[test]
    fn test_row_keeps_decimal_precision() {
        let expense = Expense::new(
            dec!(0.10),
            "stamp",
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
            Category::new("bills", "utilities").with_id("c-1"),
        )
        .with_id("e-1");

        let row = ExpenseDB::try_from(&expense).unwrap();
        assert_eq!(row.amount, "0.10");
        assert_eq!(row.date, "2024-02-29");
        assert_eq!(row.category_id, "c-1");

        assert_eq!(row.into_domain(bills_db()).unwrap(), expense);
    }

    #[test]
    fn test_expense_without_category_is_invalid() {
        let expense = Expense {
            category: None,
            ..Expense::new(
                dec!(1),
                "stamp",
                NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
                Category::default(),
            )
        };

        assert!(matches!(
            ExpenseDB::try_from(&expense),
            Err(StorageError::InvalidRecord(_))
        ));
    }

    #[test]
    fn test_corrupt_amount_is_reported() {
        let row = ExpenseDB {
            id: "e-1".to_string(),
            amount: "ten".to_string(),
            description: "stamp".to_string(),
            date: "2024-02-29".to_string(),
            category_id: "c-1".to_string(),
        };

        let err = row.into_domain(bills_db()).unwrap_err();
        assert!(err.to_string().contains("Invalid amount 'ten'"));
    }
}
