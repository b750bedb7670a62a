use crate::infra::{AppState, DocumentState};
use crate::pages;
use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use scholar_detect::analysis::{DocumentAnalysis, DocumentAnalyzer};
use scholar_detect::classifier::ZeroShotClassifier;
use scholar_detect::document::{self, DocumentError};
use scholar_detect::error::AppError;
use scholar_detect::report::AnalysisView;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

const UPLOAD_FIELD: &str = "file";

/// Router exposing the upload form, the JSON API, and the probe endpoints.
/// Probe handlers expect an `Extension<AppState>` layer.
pub fn with_document_routes<C>(
    analyzer: Arc<DocumentAnalyzer<C>>,
    max_upload_bytes: usize,
) -> Router
where
    C: ZeroShotClassifier + 'static,
{
    let state = DocumentState {
        analyzer,
        max_upload_bytes,
    };

    Router::new()
        .route("/", get(upload_form::<C>))
        .route("/classify", post(classify_form::<C>))
        .route("/api/v1/documents/classify", post(classify_endpoint::<C>))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn upload_form<C>(
    State(state): State<DocumentState<C>>,
) -> Result<Html<String>, AppError>
where
    C: ZeroShotClassifier + 'static,
{
    pages::upload_page(None, state.max_upload_bytes).map(Html)
}

pub(crate) async fn classify_form<C>(
    State(state): State<DocumentState<C>>,
    multipart: Multipart,
) -> Response
where
    C: ZeroShotClassifier + 'static,
{
    let outcome = match analyze_upload(&state.analyzer, multipart).await {
        Ok((upload, analysis)) => {
            pages::result_page(upload.file_name.as_deref(), &AnalysisView::from(&analysis))
                .map(|html| (StatusCode::OK, html))
        }
        Err(err) => {
            let status = err.status();
            pages::upload_page(Some(&err.to_string()), state.max_upload_bytes)
                .map(|html| (status, html))
        }
    };

    match outcome {
        Ok((status, html)) => (status, Html(html)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn classify_endpoint<C>(
    State(state): State<DocumentState<C>>,
    multipart: Multipart,
) -> Result<Json<AnalysisView>, AppError>
where
    C: ZeroShotClassifier + 'static,
{
    let (_, analysis) = analyze_upload(&state.analyzer, multipart).await?;
    Ok(Json(AnalysisView::from(&analysis)))
}

pub(crate) struct Upload {
    pub(crate) file_name: Option<String>,
    pub(crate) bytes: Bytes,
}

async fn analyze_upload<C>(
    analyzer: &DocumentAnalyzer<C>,
    multipart: Multipart,
) -> Result<(Upload, DocumentAnalysis), AppError>
where
    C: ZeroShotClassifier + 'static,
{
    let upload = read_upload(multipart).await?;
    info!(
        file_name = upload.file_name.as_deref().unwrap_or("<unnamed>"),
        bytes = upload.bytes.len(),
        "analyzing uploaded document"
    );

    match analyzer.analyze_pdf(&upload.bytes).await {
        Ok(analysis) => Ok((upload, analysis)),
        Err(err) => {
            warn!(error = %err, "document analysis failed");
            Err(err.into())
        }
    }
}

/// Takes the first `file` field; other fields are ignored.
pub(crate) async fn read_upload(mut multipart: Multipart) -> Result<Upload, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        if let Some(content_type) = field.content_type() {
            if !document::accepts_content_type(content_type) {
                return Err(DocumentError::NotPdf.into());
            }
        }
        let file_name = field.file_name().map(str::to_string);
        let bytes = field.bytes().await?;
        return Ok(Upload { file_name, bytes });
    }
    Err(AppError::MissingUpload)
}
