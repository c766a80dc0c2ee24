use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use log::debug;
use std::sync::Arc;
use uuid::Uuid;

use expensebook_core::errors::{DatabaseError, Error};
use expensebook_core::expenses::{Expense, ExpenseRepositoryTrait};
use expensebook_core::Result;

use super::model::ExpenseDB;
use crate::categories::CategoryDB;
use crate::db::{get_connection, DbConnection};
use crate::errors::StorageError;
use crate::schema::{categories, expenses};

pub struct ExpenseRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
}

impl ExpenseRepository {
    pub fn new(pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>) -> Self {
        ExpenseRepository { pool }
    }

    fn to_domain(rows: Vec<(ExpenseDB, CategoryDB)>) -> Result<Vec<Expense>> {
        rows.into_iter()
            .map(|(expense_db, category_db)| Ok(expense_db.into_domain(category_db)?))
            .collect()
    }

    fn load_one(conn: &mut DbConnection, expense_id: &str) -> Result<Option<Expense>> {
        let row = expenses::table
            .inner_join(categories::table)
            .filter(expenses::id.eq(expense_id))
            .select((ExpenseDB::as_select(), CategoryDB::as_select()))
            .first::<(ExpenseDB, CategoryDB)>(conn)
            .optional()
            .map_err(StorageError::from)?;

        match row {
            Some((expense_db, category_db)) => Ok(Some(expense_db.into_domain(category_db)?)),
            None => Ok(None),
        }
    }
}

impl ExpenseRepositoryTrait for ExpenseRepository {
    fn find_all(&self) -> Result<Vec<Expense>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = expenses::table
            .inner_join(categories::table)
            .order((expenses::date.asc(), expenses::id.asc()))
            .select((ExpenseDB::as_select(), CategoryDB::as_select()))
            .load::<(ExpenseDB, CategoryDB)>(&mut conn)
            .map_err(StorageError::from)?;
        Self::to_domain(rows)
    }

    fn find_by_id(&self, expense_id: &str) -> Result<Option<Expense>> {
        let mut conn = get_connection(&self.pool)?;
        Self::load_one(&mut conn, expense_id)
    }

    fn find_by_category_id(&self, category_id: &str) -> Result<Vec<Expense>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = expenses::table
            .inner_join(categories::table)
            .filter(expenses::category_id.eq(category_id))
            .order((expenses::date.asc(), expenses::id.asc()))
            .select((ExpenseDB::as_select(), CategoryDB::as_select()))
            .load::<(ExpenseDB, CategoryDB)>(&mut conn)
            .map_err(StorageError::from)?;
        Self::to_domain(rows)
    }

    fn save(&self, expense: &Expense) -> Result<Expense> {
        let mut expense_db = ExpenseDB::try_from(expense)?;
        if expense_db.id.is_empty() {
            expense_db.id = Uuid::new_v4().to_string();
        }

        let mut conn = get_connection(&self.pool)?;
        diesel::insert_into(expenses::table)
            .values(&expense_db)
            .execute(&mut conn)
            .map_err(StorageError::from)?;
        debug!("Inserted expense {}", expense_db.id);

        Self::load_one(&mut conn, &expense_db.id)?.ok_or_else(|| {
            Error::Database(DatabaseError::NotFound(format!(
                "Expense {} vanished after insert",
                expense_db.id
            )))
        })
    }

    fn update(&self, expense: &Expense) -> Result<Expense> {
        let expense_db = ExpenseDB::try_from(expense)?;

        let mut conn = get_connection(&self.pool)?;
        let affected = diesel::update(expenses::table.find(&expense_db.id))
            .set(&expense_db)
            .execute(&mut conn)
            .map_err(StorageError::from)?;
        if affected == 0 {
            return Err(Error::Database(DatabaseError::NotFound(format!(
                "Expense {} not found",
                expense_db.id
            ))));
        }

        Self::load_one(&mut conn, &expense_db.id)?.ok_or_else(|| {
            Error::Database(DatabaseError::NotFound(format!(
                "Expense {} not found",
                expense_db.id
            )))
        })
    }

    fn delete(&self, expense: &Expense) -> Result<usize> {
        let mut conn = get_connection(&self.pool)?;
        Ok(diesel::delete(expenses::table.find(&expense.id))
            .execute(&mut conn)
            .map_err(StorageError::from)?)
    }
}
