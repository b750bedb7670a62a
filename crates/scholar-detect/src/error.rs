use crate::analysis::AnalysisError;
use crate::classifier::ClassifierError;
use crate::config::ConfigError;
use crate::document::DocumentError;
use crate::telemetry::TelemetryError;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Analysis(AnalysisError),
    Upload(MultipartError),
    MissingUpload,
    Render(String),
    Serialization(serde_json::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Analysis(AnalysisError::Document(DocumentError::Io(_))) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Analysis(AnalysisError::Document(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Analysis(AnalysisError::Classifier(
                ClassifierError::NoLabels | ClassifierError::EmptyInput,
            )) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Analysis(AnalysisError::Classifier(_)) => StatusCode::BAD_GATEWAY,
            AppError::Upload(err) => err.status(),
            AppError::MissingUpload => StatusCode::BAD_REQUEST,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Render(_)
            | AppError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Analysis(err) => write!(f, "analysis failed: {}", err),
            AppError::Upload(err) => write!(f, "invalid upload: {}", err.body_text()),
            AppError::MissingUpload => write!(f, "no PDF file was uploaded"),
            AppError::Render(err) => write!(f, "failed to render page: {}", err),
            AppError::Serialization(err) => write!(f, "failed to serialize output: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Analysis(err) => Some(err),
            AppError::Upload(err) => Some(err),
            AppError::Serialization(err) => Some(err),
            AppError::MissingUpload | AppError::Render(_) => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<AnalysisError> for AppError {
    fn from(value: AnalysisError) -> Self {
        Self::Analysis(value)
    }
}

impl From<DocumentError> for AppError {
    fn from(value: DocumentError) -> Self {
        Self::Analysis(AnalysisError::Document(value))
    }
}

impl From<ClassifierError> for AppError {
    fn from(value: ClassifierError) -> Self {
        Self::Analysis(AnalysisError::Classifier(value))
    }
}

impl From<MultipartError> for AppError {
    fn from(value: MultipartError) -> Self {
        Self::Upload(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_problems_are_unprocessable() {
        let err = AppError::from(DocumentError::NotPdf);
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.to_string(), "analysis failed: document is not a PDF");
    }

    #[test]
    fn upstream_failures_are_bad_gateway() {
        let err = AppError::from(ClassifierError::Status {
            status: 500,
            body: "boom".to_string(),
        });
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn missing_upload_is_bad_request() {
        assert_eq!(AppError::MissingUpload.status(), StatusCode::BAD_REQUEST);
    }
}
