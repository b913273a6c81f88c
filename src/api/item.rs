use std::sync::Arc;

use poem::web::{Data, Html, Multipart, Path};
use poem::{handler, IntoResponse, Response};

use crate::api::helpers::{found, read_submission, render_page};
use crate::app_data::AppData;
use crate::coordinators::{FormOutcome, ItemCoordinator};
use crate::errors::PageError;
use crate::types::dto::views::ItemFormView;

const LIST_URL: &str = "/item";
const FORM_VIEW: &str = "item_form.html";

fn coordinator(app_data: &Arc<AppData>) -> ItemCoordinator {
    ItemCoordinator::new(app_data.clone())
}

#[handler]
pub async fn list(Data(app_data): Data<&Arc<AppData>>) -> Result<Html<String>, PageError> {
    let view = coordinator(app_data)
        .list()
        .await
        .map_err(PageError::from_internal_error)?;

    render_page(app_data, "item_list.html", &view)
}

#[handler]
pub async fn new_form(Data(app_data): Data<&Arc<AppData>>) -> Result<Html<String>, PageError> {
    let form = coordinator(app_data)
        .new_form()
        .await
        .map_err(PageError::from_internal_error)?;

    render_page(app_data, FORM_VIEW, &form)
}

#[handler]
pub async fn create(
    Data(app_data): Data<&Arc<AppData>>,
    multipart: Multipart,
) -> poem::Result<Response> {
    let submission = read_submission(multipart).await?;
    let outcome = coordinator(app_data)
        .create(submission)
        .await
        .map_err(PageError::from_internal_error)?;

    Ok(respond(app_data, outcome)?)
}

/// GET /item/:id - edit form, 404 when the item is missing
#[handler]
pub async fn edit_form(
    Data(app_data): Data<&Arc<AppData>>,
    Path(id): Path<String>,
) -> Result<Html<String>, PageError> {
    let form = coordinator(app_data)
        .edit_form(&id)
        .await
        .map_err(PageError::from_internal_error)?;

    render_page(app_data, FORM_VIEW, &form)
}

#[handler]
pub async fn update(
    Data(app_data): Data<&Arc<AppData>>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> poem::Result<Response> {
    let submission = read_submission(multipart).await?;
    let outcome = coordinator(app_data)
        .update(&id, submission)
        .await
        .map_err(PageError::from_internal_error)?;

    Ok(respond(app_data, outcome)?)
}

#[handler]
pub async fn delete(
    Data(app_data): Data<&Arc<AppData>>,
    Path(id): Path<String>,
) -> Result<Response, PageError> {
    coordinator(app_data)
        .delete(&id)
        .await
        .map_err(PageError::from_internal_error)?;

    Ok(found(LIST_URL))
}

fn respond(app_data: &AppData, outcome: FormOutcome<ItemFormView>) -> Result<Response, PageError> {
    match outcome {
        FormOutcome::Rejected(form) => Ok(render_page(app_data, FORM_VIEW, &form)?.into_response()),
        FormOutcome::Committed { url, .. } => Ok(found(&url)),
    }
}
