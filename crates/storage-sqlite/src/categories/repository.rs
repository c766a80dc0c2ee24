use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use log::debug;
use std::sync::Arc;
use uuid::Uuid;

use expensebook_core::categories::{Category, CategoryRepositoryTrait};
use expensebook_core::errors::{DatabaseError, Error};
use expensebook_core::Result;

use super::model::CategoryDB;
use crate::db::get_connection;
use crate::errors::StorageError;
use crate::schema::categories;
use crate::schema::categories::dsl::*;

pub struct CategoryRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
}

impl CategoryRepository {
    pub fn new(pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>) -> Self {
        CategoryRepository { pool }
    }
}

impl CategoryRepositoryTrait for CategoryRepository {
    fn find_all(&self) -> Result<Vec<Category>> {
        let mut conn = get_connection(&self.pool)?;
        let categories_db = categories
            .order(name.asc())
            .select(CategoryDB::as_select())
            .load::<CategoryDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(categories_db.into_iter().map(Category::from).collect())
    }

    fn find_by_id(&self, category_id: &str) -> Result<Option<Category>> {
        let mut conn = get_connection(&self.pool)?;
        let category_db = categories
            .find(category_id)
            .select(CategoryDB::as_select())
            .first::<CategoryDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(category_db.map(Category::from))
    }

    fn find_by_name(&self, category_name: &str) -> Result<Option<Category>> {
        let mut conn = get_connection(&self.pool)?;
        let category_db = categories
            .filter(name.eq(category_name))
            .select(CategoryDB::as_select())
            .first::<CategoryDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(category_db.map(Category::from))
    }

    fn save(&self, category: &Category) -> Result<Category> {
        let mut category_db = CategoryDB::from(category);
        if category_db.id.is_empty() {
            category_db.id = Uuid::new_v4().to_string();
        }

        let mut conn = get_connection(&self.pool)?;
        let result_db = diesel::insert_into(categories::table)
            .values(&category_db)
            .returning(CategoryDB::as_returning())
            .get_result(&mut conn)
            .map_err(StorageError::from)?;
        debug!("Inserted category {}", result_db.id);
        Ok(Category::from(result_db))
    }

    fn update(&self, category: &Category) -> Result<Category> {
        let category_db = CategoryDB::from(category);

        let mut conn = get_connection(&self.pool)?;
        let result_db = diesel::update(categories.find(&category_db.id))
            .set(&category_db)
            .returning(CategoryDB::as_returning())
            .get_result(&mut conn)
            .optional()
            .map_err(StorageError::from)?;

        result_db.map(Category::from).ok_or_else(|| {
            Error::Database(DatabaseError::NotFound(format!(
                "Category {} not found",
                category.id
            )))
        })
    }

    fn delete(&self, category: &Category) -> Result<usize> {
        let mut conn = get_connection(&self.pool)?;
        Ok(diesel::delete(categories.find(&category.id))
            .execute(&mut conn)
            .map_err(StorageError::from)?)
    }
}
