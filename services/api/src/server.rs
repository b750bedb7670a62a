use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_document_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use scholar_detect::analysis::{AnalyzerSettings, DocumentAnalyzer};
use scholar_detect::classifier::InferenceClient;
use scholar_detect::config::AppConfig;
use scholar_detect::error::AppError;
use scholar_detect::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(endpoint) = args.endpoint.take() {
        config.classifier.endpoint = endpoint;
        config.classifier.validate()?;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let client = InferenceClient::new(&config.classifier)?;
    let analyzer = Arc::new(DocumentAnalyzer::new(
        client,
        AnalyzerSettings::from_config(&config.documents),
    ));

    let app = with_document_routes(analyzer, config.documents.max_upload_bytes)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        endpoint = %config.classifier.endpoint,
        "scholarly article detector ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
