use poem::error::NotFoundError;
use poem::http::StatusCode;
use poem::web::Html;
use poem::{IntoResponse, Response};

use crate::app_data::AppData;
use crate::errors::PageError;
use crate::types::dto::views::ErrorView;

/// Render any endpoint error through the shared error view
///
/// Unmatched routes and missing records become 404, everything else keeps the
/// status the error carries. The underlying cause is shown in development only.
pub fn render_error(app_data: &AppData, err: poem::Error) -> Response {
    let status = err.status();

    if err.is::<NotFoundError>() {
        tracing::debug!("No route matched: {}", err);
    } else if status.is_server_error() && err.downcast_ref::<PageError>().is_none() {
        tracing::error!("Unhandled endpoint error: {}", err);
    }

    let detail = app_data.app_env.is_development().then(|| {
        err.downcast_ref::<PageError>()
            .map(|page_error| page_error.detail().to_string())
            .unwrap_or_else(|| err.to_string())
    });

    let view = ErrorView {
        status: status.as_u16(),
        message: status.canonical_reason().unwrap_or("Error").to_string(),
        detail,
    };

    match app_data.view_renderer.render("error.html", &view) {
        Ok(html) => Html(html).with_status(status).into_response(),
        Err(render_err) => {
            tracing::error!("Failed to render error page: {}", render_err);
            Response::builder()
                .status(StatusCode::INTERNAL_SERVER_ERROR)
                .body(view.message)
        }
    }
}
