use metrics_exporter_prometheus::PrometheusHandle;
use scholar_detect::analysis::DocumentAnalyzer;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Router state shared by the upload handlers.
pub(crate) struct DocumentState<C> {
    pub(crate) analyzer: Arc<DocumentAnalyzer<C>>,
    pub(crate) max_upload_bytes: usize,
}

impl<C> Clone for DocumentState<C> {
    fn clone(&self) -> Self {
        Self {
            analyzer: Arc::clone(&self.analyzer),
            max_upload_bytes: self.max_upload_bytes,
        }
    }
}
