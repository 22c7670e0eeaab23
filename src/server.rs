//! HTTP surface of the generator.
//!
//! `POST /generate_pdf` renders a card and answers `201 Created` with its
//! locator; `GET /{file_name}` hands generated artifacts back out of the
//! output directory.

use std::io;
use std::path::Path as FsPath;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use log::{error, info};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

use crate::config::ServiceConfig;
use crate::error::{Error, Result};
use crate::generator::DocumentGenerator;
use crate::record::WarrantyRecord;

const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    generator: Arc<DocumentGenerator>,
}

impl AppState {
    pub fn new(generator: DocumentGenerator) -> Self {
        Self {
            generator: Arc::new(generator),
        }
    }
}

/// Body returned by `POST /generate_pdf`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub download_url: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        error!("Request failed: {}", self);
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}

/// Builds the service router around `generator`.
pub fn router(generator: DocumentGenerator) -> Router {
    Router::new()
        .route("/generate_pdf", post(generate_pdf))
        .route("/:file_name", get(download))
        .with_state(AppState::new(generator))
}

async fn generate_pdf(
    State(state): State<AppState>,
    Json(record): Json<WarrantyRecord>,
) -> Result<(StatusCode, Json<GenerateResponse>)> {
    let generator = Arc::clone(&state.generator);
    let document = tokio::task::spawn_blocking(move || generator.generate(&record)).await??;

    Ok((
        StatusCode::CREATED,
        Json(GenerateResponse {
            download_url: document.download_url(),
        }),
    ))
}

fn is_plain_file_name(name: &str) -> bool {
    let path = FsPath::new(name);
    path.file_name()
        .map_or(false, |file_name| file_name == path.as_os_str())
}

async fn download(
    State(state): State<AppState>,
    Path(file_name): Path<String>,
) -> Result<Response> {
    if !is_plain_file_name(&file_name) {
        return Ok(StatusCode::NOT_FOUND.into_response());
    }

    let path = state.generator.config().output_dir.join(&file_name);
    match tokio::fs::read(&path).await {
        Ok(bytes) => Ok(([(header::CONTENT_TYPE, PDF_CONTENT_TYPE)], bytes).into_response()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(StatusCode::NOT_FOUND.into_response()),
        Err(err) => Err(err.into()),
    }
}

/// Runs the service until the process receives Ctrl-C.
pub async fn serve(config: ServiceConfig) -> Result<()> {
    let generator = DocumentGenerator::new(config.generator)?;
    let listener = TcpListener::bind(config.bind).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router(generator))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", err);
    }
    info!("Shutting down");
}
