//! Zero-shot classification through a remote inference endpoint.
//!
//! The model scores how strongly the text entails each candidate label;
//! scores across labels sum to one.

mod http;
mod labels;

pub use http::InferenceClient;
pub use labels::{CandidateLabels, POPULAR_LABEL, SCHOLARLY_LABEL};

use serde::{Deserialize, Serialize};
use std::future::Future;

/// A candidate label with the model's confidence for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f32,
}

/// Classification result with predictions ranked by descending score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZeroShotOutput {
    pub sequence: Option<String>,
    pub predictions: Vec<LabelScore>,
}

impl ZeroShotOutput {
    pub fn new(sequence: Option<String>, mut predictions: Vec<LabelScore>) -> Self {
        predictions.sort_by(|a, b| b.score.total_cmp(&a.score));
        Self {
            sequence,
            predictions,
        }
    }

    pub fn top(&self) -> Option<&LabelScore> {
        self.predictions.first()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("inference request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("inference endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("inference service error: {message}")]
    Service {
        message: String,
        estimated_time: Option<f32>,
    },
    #[error("unable to decode inference response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("inference response carried {labels} labels but {scores} scores")]
    MismatchedScores { labels: usize, scores: usize },
    #[error("inference response contained no predictions")]
    EmptyResponse,
    #[error("at least one candidate label is required")]
    NoLabels,
    #[error("no text to classify")]
    EmptyInput,
}

/// Anything that can score text against candidate labels.
pub trait ZeroShotClassifier: Send + Sync {
    fn classify(
        &self,
        text: &str,
        labels: &CandidateLabels,
    ) -> impl Future<Output = Result<ZeroShotOutput, ClassifierError>> + Send;
}
