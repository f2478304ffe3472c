//! Browser UI: upload a CSV, watch warnings, download the export.

mod pages;

use std::sync::{Arc, Mutex, PoisonError};

use anyhow::{Context, Result};
use axum::extract::{Multipart, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use chrono::Utc;
use vin_core::SearchUrlBuilder;
use vin_engine::{
    read_queries, run_queries, to_csv_string, CollectingSink, HarvestLimits, Harvester, LogSink,
    EXPORT_CONTENT_TYPE, EXPORT_FILENAME,
};
use vin_logging::{vin_error, vin_info};

use crate::settings::Settings;

const UPLOAD_FIELD: &str = "file";

#[derive(Clone)]
pub struct AppState {
    shared: Arc<SharedState>,
}

struct SharedState {
    harvester: Harvester,
    builder: SearchUrlBuilder,
    limits: HarvestLimits,
    last_export: Mutex<Option<String>>,
}

impl AppState {
    pub fn new(settings: &Settings) -> Result<Self> {
        let harvester = settings.harvester().context("failed to build HTTP client")?;
        let builder = settings.url_builder().context("invalid base_url setting")?;
        Ok(Self {
            shared: Arc::new(SharedState {
                harvester,
                builder,
                limits: settings.limits(),
                last_export: Mutex::new(None),
            }),
        })
    }

    fn store_export(&self, csv: String) {
        *self
            .shared
            .last_export
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(csv);
    }

    fn last_export(&self) -> Option<String> {
        self.shared
            .last_export
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/extract", post(extract))
        .route("/download", get(download))
        .with_state(state)
}

pub async fn serve(settings: &Settings, addr: &str) -> Result<()> {
    let state = AppState::new(settings)?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;
    vin_info!("VIN extractor UI listening on http://{}", addr);
    axum::serve(listener, router(state))
        .await
        .context("server error")?;
    Ok(())
}

async fn index(State(state): State<AppState>) -> Html<String> {
    Html(pages::index(&state.shared.limits))
}

async fn extract(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let upload = match read_upload(&mut multipart).await {
        Ok(Some(bytes)) => bytes,
        Ok(None) => {
            return bad_request("Please upload a CSV file to begin.".to_string());
        }
        Err(err) => return bad_request(format!("Could not read the upload: {err}")),
    };

    let queries = match read_queries(upload.as_slice()) {
        Ok(queries) => queries,
        Err(err) => return bad_request(err.to_string()),
    };
    vin_info!("Extracting VINs for {} uploaded rows", queries.len());

    let collected = CollectingSink::new();
    let sink = (LogSink, &collected);
    let result = run_queries(&state.shared.harvester, &state.shared.builder, &queries, &sink).await;

    let csv = match to_csv_string(&result) {
        Ok(csv) => csv,
        Err(err) => {
            vin_error!("Failed to build export: {}", err);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(pages::message("Export failed", &err.to_string())),
            )
                .into_response();
        }
    };
    state.store_export(csv);

    let generated = Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();
    Html(pages::results(&queries, &result, &collected.take(), &generated)).into_response()
}

async fn download(State(state): State<AppState>) -> Response {
    match state.last_export() {
        Some(csv) => (
            [
                (CONTENT_TYPE, format!("{EXPORT_CONTENT_TYPE}; charset=utf-8")),
                (
                    CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{EXPORT_FILENAME}\""),
                ),
            ],
            csv,
        )
            .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Html(pages::message(
                "Nothing to download",
                "Run an extraction first.",
            )),
        )
            .into_response(),
    }
}

async fn read_upload(
    multipart: &mut Multipart,
) -> Result<Option<Vec<u8>>, axum::extract::multipart::MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(UPLOAD_FIELD) {
            return Ok(Some(field.bytes().await?.to_vec()));
        }
    }
    Ok(None)
}

fn bad_request(message: String) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Html(pages::message("Invalid input", &message)),
    )
        .into_response()
}
