//! Category domain models.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Domain model representing a category.
///
/// A category is transient while `id` is empty; the store assigns the id on
/// save. Expenses of a category are not held here: they are looked up by
/// category id through the expense store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl Category {
    /// Creates a transient category with no id.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            description: description.into(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn is_transient(&self) -> bool {
        self.id.is_empty()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Category[id={}, name={}, description={}]",
            self.id, self.name, self.description
        )
    }
}
