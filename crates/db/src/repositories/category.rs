//! Category repository.
//!
//! Ads reference categories by name only; removing a category leaves ads as they are.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use fesa_shared::AppError;
use fesa_shared::types::CategoryId;

use super::user::is_unique_violation;
use crate::entities::categories;

/// Error types for category operations.
#[derive(Debug, thiserror::Error)]
pub enum CategoryError {
    /// Name already exists.
    #[error("Category '{0}' already exists")]
    DuplicateName(String),

    /// Blank name.
    #[error("Category name must not be empty")]
    EmptyName,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl CategoryError {
    /// Machine-readable failure reason for API responses.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::DuplicateName(_) => "duplicate_category",
            Self::EmptyName => "invalid_category",
            Self::Database(_) => "database_error",
        }
    }
}

impl From<CategoryError> for AppError {
    fn from(err: CategoryError) -> Self {
        match err {
            CategoryError::DuplicateName(_) => Self::Conflict(err.to_string()),
            CategoryError::EmptyName => Self::Validation(err.to_string()),
            CategoryError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Category repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    db: DatabaseConnection,
}

impl CategoryRepository {
    /// Creates a new category repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists categories by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<categories::Model>, DbErr> {
        categories::Entity::find()
            .order_by_asc(categories::Column::Name)
            .all(&self.db)
            .await
    }

    /// Counts categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn count(&self) -> Result<u64, DbErr> {
        categories::Entity::find().count(&self.db).await
    }

    /// Adds a category. The name is trimmed.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateName` if the name exists, `EmptyName` if blank.
    pub async fn create(
        &self,
        name: &str,
        now: DateTime<Utc>,
    ) -> Result<categories::Model, CategoryError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CategoryError::EmptyName);
        }

        let exists = categories::Entity::find()
            .filter(categories::Column::Name.eq(name))
            .count(&self.db)
            .await?;
        if exists > 0 {
            return Err(CategoryError::DuplicateName(name.to_string()));
        }

        let category = categories::ActiveModel {
            id: Set(CategoryId::new().into_inner()),
            name: Set(name.to_string()),
            created_at: Set(now),
        };

        category.insert(&self.db).await.map_err(|err| {
            if is_unique_violation(&err) {
                CategoryError::DuplicateName(name.to_string())
            } else {
                CategoryError::Database(err)
            }
        })
    }

    /// Deletes a category. Returns whether a row was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete(&self, id: CategoryId) -> Result<bool, DbErr> {
        let result = categories::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
