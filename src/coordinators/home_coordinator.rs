use std::sync::Arc;

use crate::app_data::AppData;
use crate::errors::InternalError;
use crate::stores::{CategoryStore, ItemStore};
use crate::types::dto::views::DashboardView;

/// Dashboard counts
pub struct HomeCoordinator {
    category_store: Arc<CategoryStore>,
    item_store: Arc<ItemStore>,
}

impl HomeCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            category_store: app_data.category_store.clone(),
            item_store: app_data.item_store.clone(),
        }
    }

    /// Both counts are independent reads and run concurrently
    pub async fn dashboard(&self) -> Result<DashboardView, InternalError> {
        let (count_item, count_category) =
            tokio::try_join!(self.item_store.count(), self.category_store.count())?;

        Ok(DashboardView {
            count_item,
            count_category,
        })
    }
}
