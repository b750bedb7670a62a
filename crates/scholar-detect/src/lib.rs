//! Scholarly-versus-popular document classification.
//!
//! A PDF is reduced to plain text, sent to a zero-shot classification
//! endpoint with two candidate labels, and paired with a few keyword
//! indicators that explain the verdict.

pub mod analysis;
pub mod classifier;
pub mod config;
pub mod document;
pub mod error;
pub mod heuristics;
pub mod report;
pub mod telemetry;

pub use analysis::{AnalysisError, DocumentAnalysis, DocumentAnalyzer, Verdict};
pub use classifier::{CandidateLabels, InferenceClient, ZeroShotClassifier};
