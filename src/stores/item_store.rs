use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryOrder, Set,
};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::types::db::item::{self, ActiveModel, Entity as Item};

pub const COLLECTION: &str = "items";

/// Validated, parsed item fields ready to be written
#[derive(Debug, Clone, PartialEq)]
pub struct ItemFields {
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    pub number_in_stock: i64,
}

/// ItemStore reads and writes the `items` collection
pub struct ItemStore {
    db: DatabaseConnection,
}

impl ItemStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// All items, most recently updated first
    pub async fn list(&self) -> Result<Vec<item::Model>, InternalError> {
        Item::find()
            .order_by_desc(item::Column::UpdatedAt)
            .order_by_asc(item::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_items", e))
    }

    pub async fn get(&self, id: &str) -> Result<item::Model, InternalError> {
        Item::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("get_item", e))?
            .ok_or_else(|| InternalError::not_found(COLLECTION, id))
    }

    pub async fn create(
        &self,
        fields: ItemFields,
        image_url: Option<String>,
    ) -> Result<item::Model, InternalError> {
        let now = Utc::now().timestamp();
        let new_item = ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            name: Set(fields.name),
            description: Set(fields.description),
            category: Set(fields.category),
            price: Set(fields.price),
            number_in_stock: Set(fields.number_in_stock),
            image: Set(image_url),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let created = new_item
            .insert(&self.db)
            .await
            .map_err(|e| InternalError::database("create_item", e))?;

        tracing::debug!("Created item {} in category {}", created.id, created.category);

        Ok(created)
    }

    /// Overwrite every field of an item, keeping the image when `image_url` is `None`
    pub async fn update(
        &self,
        id: &str,
        fields: ItemFields,
        image_url: Option<String>,
    ) -> Result<item::Model, InternalError> {
        let changes = ActiveModel {
            id: Set(id.to_string()),
            name: Set(fields.name),
            description: Set(fields.description),
            category: Set(fields.category),
            price: Set(fields.price),
            number_in_stock: Set(fields.number_in_stock),
            image: image_url.map(|url| Set(Some(url))).unwrap_or(NotSet),
            created_at: NotSet,
            updated_at: Set(Utc::now().timestamp()),
        };

        match changes.update(&self.db).await {
            Ok(updated) => {
                tracing::debug!("Updated item {}", updated.id);
                Ok(updated)
            }
            Err(DbErr::RecordNotUpdated) | Err(DbErr::RecordNotFound(_)) => {
                Err(InternalError::not_found(COLLECTION, id))
            }
            Err(e) => Err(InternalError::database("update_item", e)),
        }
    }

    /// Delete an item; an absent id is not an error
    pub async fn delete(&self, id: &str) -> Result<(), InternalError> {
        let result = Item::delete_by_id(id.to_string())
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("delete_item", e))?;

        tracing::debug!("Deleted item {} ({} rows affected)", id, result.rows_affected);

        Ok(())
    }

    pub async fn count(&self) -> Result<u64, InternalError> {
        Item::find()
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count_items", e))
    }
}

impl std::fmt::Debug for ItemStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemStore")
            .field("db", &"<connection>")
            .finish()
    }
}
