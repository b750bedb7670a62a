use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::analysis::{DocumentAnalysis, Verdict};

use super::{confidence_label, indicator_icon};

/// Serialized shape of an analysis for API clients and templates.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisView {
    pub verdict: Verdict,
    pub headline: &'static str,
    pub confidence: f32,
    pub confidence_label: String,
    pub predicted_label: String,
    pub predictions: Vec<PredictionView>,
    pub indicators: Vec<IndicatorView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages_with_text: Option<usize>,
    pub total_chars: usize,
    pub truncated: bool,
    pub extracted_text: String,
    pub analyzed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictionView {
    pub label: String,
    pub score: f32,
    pub score_label: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct IndicatorView {
    pub name: &'static str,
    pub present: bool,
    pub icon: &'static str,
}

impl From<&DocumentAnalysis> for AnalysisView {
    fn from(analysis: &DocumentAnalysis) -> Self {
        Self {
            verdict: analysis.verdict,
            headline: analysis.verdict.headline(),
            confidence: analysis.confidence,
            confidence_label: confidence_label(analysis.confidence),
            predicted_label: analysis.predicted_label.clone(),
            predictions: analysis
                .predictions
                .iter()
                .map(|prediction| PredictionView {
                    label: prediction.label.clone(),
                    score: prediction.score,
                    score_label: confidence_label(prediction.score),
                })
                .collect(),
            indicators: analysis
                .indicators
                .checks()
                .iter()
                .map(|check| IndicatorView {
                    name: check.name,
                    present: check.present,
                    icon: indicator_icon(check.present),
                })
                .collect(),
            pages_with_text: analysis.pages_with_text,
            total_chars: analysis.total_chars,
            truncated: analysis.truncated,
            extracted_text: analysis.preview.clone(),
            analyzed_at: analysis.analyzed_at,
        }
    }
}
