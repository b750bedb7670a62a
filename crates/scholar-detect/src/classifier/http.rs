use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info, warn};

use super::{CandidateLabels, ClassifierError, LabelScore, ZeroShotClassifier, ZeroShotOutput};
use crate::config::ClassifierConfig;

/// Client for Hugging Face compatible zero-shot classification endpoints,
/// hosted or self-served.
#[derive(Debug, Clone)]
pub struct InferenceClient {
    http: Client,
    endpoint: String,
    api_token: Option<String>,
    hypothesis_template: String,
}

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: InferenceParameters<'a>,
    options: InferenceOptions,
}

#[derive(Debug, Serialize)]
struct InferenceParameters<'a> {
    candidate_labels: &'a CandidateLabels,
    multi_label: bool,
    hypothesis_template: &'a str,
}

#[derive(Debug, Serialize)]
struct InferenceOptions {
    /// Block until a cold model is loaded instead of failing with 503.
    wait_for_model: bool,
}

/// The legacy API answers with parallel arrays; newer routers answer with
/// a list of label/score pairs.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Pairs(Vec<LabelScore>),
    Ranked {
        #[serde(default)]
        sequence: Option<String>,
        labels: Vec<String>,
        scores: Vec<f32>,
    },
}

#[derive(Debug, Deserialize)]
struct ServiceErrorBody {
    error: String,
    #[serde(default)]
    estimated_time: Option<f32>,
}

impl InferenceClient {
    pub fn new(config: &ClassifierConfig) -> Result<Self, ClassifierError> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            endpoint: config.endpoint.trim().to_string(),
            api_token: config.api_token.clone(),
            hypothesis_template: config.hypothesis_template.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl ZeroShotClassifier for InferenceClient {
    async fn classify(
        &self,
        text: &str,
        labels: &CandidateLabels,
    ) -> Result<ZeroShotOutput, ClassifierError> {
        if text.trim().is_empty() {
            return Err(ClassifierError::EmptyInput);
        }
        if labels.as_slice().is_empty() {
            return Err(ClassifierError::NoLabels);
        }

        let payload = InferenceRequest {
            inputs: text,
            parameters: InferenceParameters {
                candidate_labels: labels,
                multi_label: false,
                hypothesis_template: &self.hypothesis_template,
            },
            options: InferenceOptions {
                wait_for_model: true,
            },
        };

        debug!(
            endpoint = %self.endpoint,
            chars = text.chars().count(),
            "requesting zero-shot classification"
        );
        let started = Instant::now();

        let mut request = self.http.post(&self.endpoint).json(&payload);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "inference endpoint rejected request");
            return Err(match serde_json::from_str::<ServiceErrorBody>(&body) {
                Ok(service) => ClassifierError::Service {
                    message: service.error,
                    estimated_time: service.estimated_time,
                },
                Err(_) => ClassifierError::Status {
                    status: status.as_u16(),
                    body,
                },
            });
        }

        let output = match serde_json::from_str::<InferenceResponse>(&body)? {
            InferenceResponse::Ranked {
                sequence,
                labels,
                scores,
            } => {
                if labels.len() != scores.len() {
                    return Err(ClassifierError::MismatchedScores {
                        labels: labels.len(),
                        scores: scores.len(),
                    });
                }
                let predictions = labels
                    .into_iter()
                    .zip(scores)
                    .map(|(label, score)| LabelScore { label, score })
                    .collect();
                ZeroShotOutput::new(sequence, predictions)
            }
            InferenceResponse::Pairs(predictions) => ZeroShotOutput::new(None, predictions),
        };

        let top = output.top().ok_or(ClassifierError::EmptyResponse)?;
        info!(
            label = %top.label,
            score = top.score,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "zero-shot classification complete"
        );

        Ok(output)
    }
}
