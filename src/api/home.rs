use std::sync::Arc;

use poem::web::{Data, Html};
use poem::handler;

use crate::api::helpers::render_page;
use crate::app_data::AppData;
use crate::coordinators::HomeCoordinator;
use crate::errors::PageError;

/// GET / - dashboard with item and category counts
#[handler]
pub async fn index(Data(app_data): Data<&Arc<AppData>>) -> Result<Html<String>, PageError> {
    let dashboard = HomeCoordinator::new(app_data.clone())
        .dashboard()
        .await
        .map_err(PageError::from_internal_error)?;

    render_page(app_data, "index.html", &dashboard)
}
