use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, instrument};

use crate::classifier::{CandidateLabels, ClassifierError, LabelScore, ZeroShotClassifier};
use crate::config::DocumentConfig;
use crate::document::{
    self, DocumentError, ExtractedDocument, ExtractionLimits, DEFAULT_PREVIEW_CHARS,
};
use crate::heuristics::{scholarly_indicators, ScholarlyIndicators};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Scholarly,
    Popular,
}

impl Verdict {
    /// Any top label mentioning "scholarly" counts as a scholarly verdict.
    pub fn from_label(label: &str) -> Self {
        if label.contains("scholarly") {
            Self::Scholarly
        } else {
            Self::Popular
        }
    }

    pub const fn headline(self) -> &'static str {
        match self {
            Self::Scholarly => "Scholarly / Peer-reviewed",
            Self::Popular => "Popular / Non-academic",
        }
    }
}

/// Everything shown to the user for one document.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentAnalysis {
    pub verdict: Verdict,
    pub confidence: f32,
    pub predicted_label: String,
    pub predictions: Vec<LabelScore>,
    pub indicators: ScholarlyIndicators,
    /// `None` when raw text was analyzed instead of a PDF.
    pub pages_with_text: Option<usize>,
    pub total_chars: usize,
    pub truncated: bool,
    pub preview: String,
    pub analyzed_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error(transparent)]
    Classifier(#[from] ClassifierError),
}

#[derive(Debug, Clone)]
pub struct AnalyzerSettings {
    pub labels: CandidateLabels,
    pub limits: ExtractionLimits,
    pub preview_chars: usize,
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        Self {
            labels: CandidateLabels::default(),
            limits: ExtractionLimits::default(),
            preview_chars: DEFAULT_PREVIEW_CHARS,
        }
    }
}

impl AnalyzerSettings {
    pub fn from_config(config: &DocumentConfig) -> Self {
        Self {
            labels: CandidateLabels::default(),
            limits: ExtractionLimits {
                max_chars: config.max_extract_chars,
            },
            preview_chars: config.preview_chars,
        }
    }
}

/// Runs extraction, classification, and the keyword checks for a document.
pub struct DocumentAnalyzer<C> {
    classifier: C,
    settings: AnalyzerSettings,
}

impl<C: ZeroShotClassifier> DocumentAnalyzer<C> {
    pub fn new(classifier: C, settings: AnalyzerSettings) -> Self {
        Self {
            classifier,
            settings,
        }
    }

    pub fn settings(&self) -> &AnalyzerSettings {
        &self.settings
    }

    #[instrument(skip_all, fields(bytes = bytes.len()))]
    pub async fn analyze_pdf(&self, bytes: &[u8]) -> Result<DocumentAnalysis, AnalysisError> {
        let extracted = document::extract_pdf_text(bytes, self.settings.limits)?;
        self.analyze_extracted(extracted, true).await
    }

    /// Same pipeline for text that is already extracted.
    pub async fn analyze_text(&self, text: &str) -> Result<DocumentAnalysis, AnalysisError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DocumentError::NoText.into());
        }
        let (kept, truncated) = document::truncate_chars(text, self.settings.limits.max_chars);
        let extracted = ExtractedDocument {
            text: kept.to_string(),
            pages_with_text: 0,
            total_chars: text.chars().count(),
            truncated,
        };
        self.analyze_extracted(extracted, false).await
    }

    async fn analyze_extracted(
        &self,
        extracted: ExtractedDocument,
        from_pdf: bool,
    ) -> Result<DocumentAnalysis, AnalysisError> {
        let output = self
            .classifier
            .classify(&extracted.text, &self.settings.labels)
            .await?;
        let top = output.top().ok_or(ClassifierError::EmptyResponse)?;
        let verdict = Verdict::from_label(&top.label);
        let confidence = top.score;
        let predicted_label = top.label.clone();

        let indicators = scholarly_indicators(&extracted.text);
        info!(
            ?verdict,
            confidence,
            indicators = indicators.present_count(),
            "document analyzed"
        );

        Ok(DocumentAnalysis {
            verdict,
            confidence,
            predicted_label,
            predictions: output.predictions,
            indicators,
            pages_with_text: from_pdf.then_some(extracted.pages_with_text),
            total_chars: extracted.total_chars,
            truncated: extracted.truncated,
            preview: document::preview(&extracted.text, self.settings.preview_chars),
            analyzed_at: Utc::now(),
        })
    }
}
