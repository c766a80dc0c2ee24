//! Database models for categories.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use expensebook_core::categories::Category;

/// Database model for categories
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::categories)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct CategoryDB {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl From<CategoryDB> for Category {
    fn from(db: CategoryDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
            description: db.description,
        }
    }
}

impl From<&Category> for CategoryDB {
    fn from(domain: &Category) -> Self {
        Self {
            id: domain.id.clone(),
            name: domain.name.clone(),
            description: domain.description.clone(),
        }
    }
}
