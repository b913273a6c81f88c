use std::collections::HashMap;

use poem::http::{header, StatusCode};
use poem::web::{Html, Multipart};
use poem::Response;
use serde::Serialize;

use crate::app_data::AppData;
use crate::errors::PageError;
use crate::types::dto::forms::FormSubmission;

/// Name of the file part carrying an optional image
pub const IMAGE_FIELD: &str = "image";

/// `302 Found` pointing at `location`
pub fn found(location: &str) -> Response {
    Response::builder()
        .status(StatusCode::FOUND)
        .header(header::LOCATION, location)
        .finish()
}

/// Render a view, converting failures into a 500 page error
pub fn render_page<T: Serialize>(
    app_data: &AppData,
    view: &str,
    data: &T,
) -> Result<Html<String>, PageError> {
    app_data
        .view_renderer
        .render(view, data)
        .map(Html)
        .map_err(|err| PageError::from_internal_error(err.into()))
}

/// Collect a multipart form body into text fields and an optional image
///
/// An `image` part with no content (no file chosen in the browser) counts as
/// no image. Repeated text fields keep the last value.
pub async fn read_submission(mut multipart: Multipart) -> poem::Result<FormSubmission> {
    let mut fields = HashMap::new();
    let mut image = None;

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(ToString::to_string) else {
            continue;
        };

        if name == IMAGE_FIELD {
            let bytes = field.bytes().await.map_err(poem::error::BadRequest)?;
            if !bytes.is_empty() {
                image = Some(bytes);
            }
        } else {
            let value = field.text().await.map_err(poem::error::BadRequest)?;
            fields.insert(name, value);
        }
    }

    Ok(FormSubmission { fields, image })
}
