use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use tempfile::TempDir;
use tower::ServiceExt;
use warranty_card::generator::{DocumentGenerator, GeneratorConfig};
use warranty_card::inspect::inspect_card;
use warranty_card::server::{router, GenerateResponse};

fn app(dir: &TempDir) -> Router {
    let config = GeneratorConfig::default()
        .with_output_dir(dir.path().join("out"))
        .with_logo_path(dir.path().join("download.jpg"));
    router(DocumentGenerator::new(config).expect("create generator"))
}

fn post_json(body: &str) -> Request<Body> {
    Request::post("/generate_pdf")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_owned()))
        .expect("build request")
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body")
        .to_vec()
}

#[tokio::test]
async fn generate_returns_created_with_locator() {
    let dir = tempfile::tempdir().expect("tempdir");
    let response = app(&dir)
        .oneshot(post_json(r#"{"product_name":"Widget","from":"alice"}"#))
        .await
        .expect("call service");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: GenerateResponse =
        serde_json::from_slice(&body_bytes(response).await).expect("json body");
    assert!(body.download_url.starts_with("/alice_"));
    assert!(body.download_url.ends_with(".pdf"));

    let file_name = body.download_url.trim_start_matches('/');
    assert!(dir.path().join("out").join(file_name).is_file());
}

#[tokio::test]
async fn empty_object_is_accepted() {
    let dir = tempfile::tempdir().expect("tempdir");
    let response = app(&dir)
        .oneshot(post_json("{}"))
        .await
        .expect("call service");

    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn generated_card_can_be_downloaded() {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = app(&dir);

    let response = app
        .clone()
        .oneshot(post_json(r#"{"customer_name":"Dana"}"#))
        .await
        .expect("call service");
    let body: GenerateResponse =
        serde_json::from_slice(&body_bytes(response).await).expect("json body");

    let download = app
        .oneshot(
            Request::get(body.download_url.as_str())
                .body(Body::empty())
                .expect("build request"),
        )
        .await
        .expect("call service");

    assert_eq!(download.status(), StatusCode::OK);
    assert_eq!(
        download.headers().get(header::CONTENT_TYPE).map(|v| v.as_bytes()),
        Some(&b"application/pdf"[..])
    );
    let inspection = inspect_card(&body_bytes(download).await).expect("inspect download");
    assert!(inspection.contains_line("Customer Name: Dana"));
}

#[tokio::test]
async fn unknown_file_is_not_found() {
    let dir = tempfile::tempdir().expect("tempdir");
    let response = app(&dir)
        .oneshot(
            Request::get("/nobody_00000000.pdf")
                .body(Body::empty())
                .expect("build request"),
        )
        .await
        .expect("call service");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_body_is_rejected_by_the_framework() {
    let dir = tempfile::tempdir().expect("tempdir");
    let response = app(&dir)
        .oneshot(post_json("{not json"))
        .await
        .expect("call service");

    assert!(response.status().is_client_error());
    let written = std::fs::read_dir(dir.path().join("out"))
        .expect("list output dir")
        .count();
    assert_eq!(written, 0);
}

#[tokio::test]
async fn output_dir_failure_surfaces_as_server_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = app(&dir);
    std::fs::remove_dir(dir.path().join("out")).expect("remove output dir");

    let response = app.oneshot(post_json("{}")).await.expect("call service");
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn locator_with_reserved_characters_resolves() {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = app(&dir);

    let response = app
        .clone()
        .oneshot(post_json(r#"{"from":"frank & co? #1"}"#))
        .await
        .expect("call service");
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: GenerateResponse =
        serde_json::from_slice(&body_bytes(response).await).expect("json body");
    assert!(body.download_url.starts_with("/frank%20&%20co%3F%20%231_"));

    let download = app
        .oneshot(
            Request::get(body.download_url.as_str())
                .body(Body::empty())
                .expect("build request"),
        )
        .await
        .expect("call service");
    assert_eq!(download.status(), StatusCode::OK);
}
