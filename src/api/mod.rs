// API layer - HTTP endpoints
pub mod category;
pub mod error_page;
pub mod health;
pub mod helpers;
pub mod home;
pub mod item;


use std::sync::Arc;

use poem::middleware::Tracing;
use poem::{get, post, Endpoint, EndpointExt, Route};
use poem_openapi::OpenApiService;

pub use health::HealthApi;

use crate::app_data::AppData;

/// Compose every page route, the JSON API and the shared error page
///
/// ```text
/// /                          dashboard
/// /category, /item           list / new / :id / :id/delete
/// /api/health                poem-openapi health check
/// /swagger                   Swagger UI for /api
/// ```
pub fn build_routes(app_data: Arc<AppData>) -> impl Endpoint {
    let api_service = OpenApiService::new(
        HealthApi::new(app_data.clone()),
        "Inventory API",
        env!("CARGO_PKG_VERSION"),
    )
    .server("/api");
    let ui = api_service.swagger_ui();

    let error_data = app_data.clone();

    Route::new()
        .at("/", get(home::index))
        .at("/category", get(category::list))
        .at("/category/new", get(category::new_form).post(category::create))
        .at("/category/:id", get(category::edit_form).post(category::update))
        .at("/category/:id/delete", post(category::delete))
        .at("/item", get(item::list))
        .at("/item/new", get(item::new_form).post(item::create))
        .at("/item/:id", get(item::edit_form).post(item::update))
        .at("/item/:id/delete", post(item::delete))
        .nest("/api", api_service)
        .nest("/swagger", ui)
        .data(app_data)
        .with(Tracing)
        .catch_all_error(move |err| {
            let app_data = error_data.clone();
            async move { error_page::render_error(&app_data, err) }
        })
}
