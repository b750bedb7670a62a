use clap::Args;
use scholar_detect::analysis::{AnalyzerSettings, DocumentAnalyzer};
use scholar_detect::classifier::InferenceClient;
use scholar_detect::config::AppConfig;
use scholar_detect::document::DocumentError;
use scholar_detect::error::AppError;
use scholar_detect::report::{render_text, AnalysisView};
use scholar_detect::telemetry;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct ClassifyArgs {
    /// PDF document to classify
    #[arg(required_unless_present = "text", conflicts_with = "text")]
    pub(crate) path: Option<PathBuf>,
    /// Classify raw text instead of a PDF
    #[arg(long)]
    pub(crate) text: Option<String>,
    /// Print the analysis as JSON instead of a readable report
    #[arg(long)]
    pub(crate) json: bool,
    /// Include the extracted text in the readable report
    #[arg(long)]
    pub(crate) show_text: bool,
    /// Override the zero-shot inference endpoint URL
    #[arg(long)]
    pub(crate) endpoint: Option<String>,
}

pub(crate) async fn run_classify(args: ClassifyArgs) -> Result<(), AppError> {
    let ClassifyArgs {
        path,
        text,
        json,
        show_text,
        endpoint,
    } = args;

    let mut config = AppConfig::load()?;
    if let Some(endpoint) = endpoint {
        config.classifier.endpoint = endpoint;
        config.classifier.validate()?;
    }
    telemetry::init(&config.telemetry)?;

    let client = InferenceClient::new(&config.classifier)?;
    info!(endpoint = client.endpoint(), "classifying from the command line");
    let analyzer = DocumentAnalyzer::new(client, AnalyzerSettings::from_config(&config.documents));

    let analysis = match (path, text) {
        (Some(path), _) => {
            ensure_pdf_path(&path)?;
            let bytes = tokio::fs::read(&path).await?;
            analyzer.analyze_pdf(&bytes).await?
        }
        (None, Some(text)) => analyzer.analyze_text(&text).await?,
        (None, None) => return Err(AppError::MissingUpload),
    };

    if json {
        let view = AnalysisView::from(&analysis);
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", render_text(&analysis, show_text));
    }

    Ok(())
}

/// Mirrors the upload form's `.pdf` filter.
pub(crate) fn ensure_pdf_path(path: &Path) -> Result<(), DocumentError> {
    let guessed = mime_guess::from_path(path).first();
    match guessed {
        Some(mime) if mime == mime_guess::mime::APPLICATION_PDF => Ok(()),
        _ => Err(DocumentError::NotPdf),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_pdf_extensions_pass() {
        assert!(ensure_pdf_path(Path::new("papers/attention.pdf")).is_ok());
        assert!(ensure_pdf_path(Path::new("papers/ATTENTION.PDF")).is_ok());
        assert!(matches!(
            ensure_pdf_path(Path::new("notes.txt")),
            Err(DocumentError::NotPdf)
        ));
        assert!(ensure_pdf_path(Path::new("no_extension")).is_err());
    }
}
