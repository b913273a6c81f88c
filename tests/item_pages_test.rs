mod common;

use std::sync::Arc;

use common::{location, setup_test_app, setup_test_app_data, RecordingUploader};
use inventory_backend::api::build_routes;
use inventory_backend::config::AppEnvironment;
use poem::http::StatusCode;
use poem::test::{TestClient, TestForm, TestFormField};

fn widget_form() -> TestForm {
    TestForm::new()
        .text("item_name", "Widget")
        .text("item_description", "A small widget")
        .text("item_category", "c1")
        .text("item_price", "9.99")
        .text("item_number_in_stock", "5")
}

#[tokio::test]
async fn test_create_item_redirects_and_edit_form_shows_values() {
    let (app_data, cli) = setup_test_app(Arc::new(RecordingUploader::default())).await;

    let resp = cli.post("/item/new").multipart(widget_form()).send().await;

    resp.assert_status(StatusCode::FOUND);
    let url = location(&resp);
    assert!(url.starts_with("/item/"));
    let stored = app_data
        .item_store
        .get(url.trim_start_matches("/item/"))
        .await
        .unwrap();
    assert_eq!(stored.image, None);

    let resp = cli.get(&url).send().await;
    resp.assert_status_is_ok();
    let body = resp.0.into_body().into_string().await.unwrap();
    assert!(body.contains("value=\"Widget\""));
    assert!(body.contains("value=\"9.99\""));
    assert!(body.contains("value=\"5\""));
    assert!(!body.contains("<img"));
}

#[tokio::test]
async fn test_invalid_price_rerenders_with_violation() {
    let (app_data, cli) = setup_test_app(Arc::new(RecordingUploader::default())).await;

    let resp = cli
        .post("/item/new")
        .multipart(widget_form().text("item_price", "-1"))
        .send()
        .await;

    resp.assert_status_is_ok();
    let body = resp.0.into_body().into_string().await.unwrap();
    assert!(body.contains("data-field=\"item_price\""));
    assert_eq!(app_data.item_store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_new_form_lists_categories() {
    let (_app_data, cli) = setup_test_app(Arc::new(RecordingUploader::default())).await;
    cli.post("/category/new")
        .multipart(
            TestForm::new()
                .text("category_name", "Tools")
                .text("category_description", "Hand tools"),
        )
        .send()
        .await
        .assert_status(StatusCode::FOUND);

    let resp = cli.get("/item/new").send().await;

    resp.assert_status_is_ok();
    let body = resp.0.into_body().into_string().await.unwrap();
    assert!(body.contains(">Tools</option>"));
}

#[tokio::test]
async fn test_update_with_image_replaces_url() {
    let uploader = RecordingUploader::default();
    let (app_data, cli) = setup_test_app(Arc::new(uploader.clone())).await;
    let url = location(&cli.post("/item/new").multipart(widget_form()).send().await);

    let resp = cli
        .post(&url)
        .multipart(
            widget_form().field(TestFormField::bytes(vec![7, 7, 7]).name("image").filename("w.png")),
        )
        .send()
        .await;

    resp.assert_status(StatusCode::FOUND);
    let stored = app_data
        .item_store
        .get(url.trim_start_matches("/item/"))
        .await
        .unwrap();
    assert_eq!(stored.image.as_deref(), Some(common::UPLOADED_URL));
    assert_eq!(uploader.call_count(), 1);
}

#[tokio::test]
async fn test_dashboard_counts() {
    let (_app_data, cli) = setup_test_app(Arc::new(RecordingUploader::default())).await;
    for _ in 0..2 {
        cli.post("/item/new")
            .multipart(widget_form())
            .send()
            .await
            .assert_status(StatusCode::FOUND);
    }

    let resp = cli.get("/").send().await;

    resp.assert_status_is_ok();
    let body = resp.0.into_body().into_string().await.unwrap();
    assert!(body.contains("<strong id=\"count-item\">2</strong>"));
    assert!(body.contains("<strong id=\"count-category\">0</strong>"));
}

#[tokio::test]
async fn test_delete_missing_item_still_redirects() {
    let (_app_data, cli) = setup_test_app(Arc::new(RecordingUploader::default())).await;

    let resp = cli.post("/item/never-existed/delete").send().await;

    resp.assert_status(StatusCode::FOUND);
    resp.assert_header("location", "/item");
}

#[tokio::test]
async fn test_unknown_route_renders_error_page() {
    let (_app_data, cli) = setup_test_app(Arc::new(RecordingUploader::default())).await;

    let resp = cli.get("/does/not/exist").send().await;

    resp.assert_status(StatusCode::NOT_FOUND);
    let body = resp.0.into_body().into_string().await.unwrap();
    assert!(body.contains("<h2>404</h2>"));
}

#[tokio::test]
async fn test_production_error_page_hides_detail() {
    let app_data =
        setup_test_app_data(AppEnvironment::Production, Arc::new(RecordingUploader::default()))
            .await;
    let cli = TestClient::new(build_routes(app_data));

    let resp = cli.get("/item/missing").send().await;

    resp.assert_status(StatusCode::NOT_FOUND);
    let body = resp.0.into_body().into_string().await.unwrap();
    assert!(body.contains("Not Found"));
    assert!(!body.contains("Record not found"));
}

#[tokio::test]
async fn test_health_endpoint_reports_database() {
    let (_app_data, cli) = setup_test_app(Arc::new(RecordingUploader::default())).await;

    let resp = cli.get("/api/health").send().await;

    resp.assert_status_is_ok();
    let json = resp.json().await;
    json.value().object().get("status").assert_string("healthy");
    json.value().object().get("database").assert_string("ok");
}
