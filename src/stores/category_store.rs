use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, DatabaseConnection, DbErr, EntityTrait,
    FromQueryResult, PaginatorTrait, QueryOrder, QuerySelect, Set,
};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::InternalError;
use crate::types::db::category::{self, ActiveModel, Entity as Category};

pub const COLLECTION: &str = "categories";

/// Validated, sanitized category fields ready to be written
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryFields {
    pub name: String,
    pub description: String,
}

/// `(id, name)` pair for the category selector on item forms
#[derive(Debug, Clone, PartialEq, FromQueryResult, Serialize)]
pub struct CategoryOption {
    pub id: String,
    pub name: String,
}

/// CategoryStore reads and writes the `categories` collection
///
/// Every call goes to the database; nothing is cached.
pub struct CategoryStore {
    db: DatabaseConnection,
}

impl CategoryStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// All categories, name ascending
    pub async fn list(&self) -> Result<Vec<category::Model>, InternalError> {
        Category::find()
            .order_by_asc(category::Column::Name)
            .order_by_asc(category::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_categories", e))
    }

    /// Id and name of every category, name ascending
    pub async fn list_options(&self) -> Result<Vec<CategoryOption>, InternalError> {
        Category::find()
            .select_only()
            .column(category::Column::Id)
            .column(category::Column::Name)
            .order_by_asc(category::Column::Name)
            .order_by_asc(category::Column::Id)
            .into_model::<CategoryOption>()
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_category_options", e))
    }

    pub async fn get(&self, id: &str) -> Result<category::Model, InternalError> {
        Category::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("get_category", e))?
            .ok_or_else(|| InternalError::not_found(COLLECTION, id))
    }

    /// Insert a new category with a fresh id; both timestamps are the same instant
    pub async fn create(
        &self,
        fields: CategoryFields,
        image_url: Option<String>,
    ) -> Result<category::Model, InternalError> {
        let now = Utc::now().timestamp();
        let new_category = ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            name: Set(fields.name),
            description: Set(fields.description),
            image: Set(image_url),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let created = new_category
            .insert(&self.db)
            .await
            .map_err(|e| InternalError::database("create_category", e))?;

        tracing::debug!("Created category {}", created.id);

        Ok(created)
    }

    /// Overwrite every field of a category
    ///
    /// `image_url: None` keeps the stored image. Writing to an id that matches
    /// no row yields `RecordError::NotFound`.
    pub async fn update(
        &self,
        id: &str,
        fields: CategoryFields,
        image_url: Option<String>,
    ) -> Result<category::Model, InternalError> {
        let changes = ActiveModel {
            id: Set(id.to_string()),
            name: Set(fields.name),
            description: Set(fields.description),
            image: image_url.map(|url| Set(Some(url))).unwrap_or(NotSet),
            created_at: NotSet,
            updated_at: Set(Utc::now().timestamp()),
        };

        match changes.update(&self.db).await {
            Ok(updated) => {
                tracing::debug!("Updated category {}", updated.id);
                Ok(updated)
            }
            Err(DbErr::RecordNotUpdated) | Err(DbErr::RecordNotFound(_)) => {
                Err(InternalError::not_found(COLLECTION, id))
            }
            Err(e) => Err(InternalError::database("update_category", e)),
        }
    }

    /// Delete a category; an absent id is not an error
    pub async fn delete(&self, id: &str) -> Result<(), InternalError> {
        let result = Category::delete_by_id(id.to_string())
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("delete_category", e))?;

        tracing::debug!(
            "Deleted category {} ({} rows affected)",
            id,
            result.rows_affected
        );

        Ok(())
    }

    pub async fn count(&self) -> Result<u64, InternalError> {
        Category::find()
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count_categories", e))
    }
}

impl std::fmt::Debug for CategoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CategoryStore")
            .field("db", &"<connection>")
            .finish()
    }
}
