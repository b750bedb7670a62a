pub mod views;

use std::fmt::Write as _;

use crate::analysis::{DocumentAnalysis, Verdict};

pub use views::{AnalysisView, IndicatorView, PredictionView};

/// Formats a 0..=1 score as a percentage with two decimals.
pub fn confidence_label(score: f32) -> String {
    format!("{:.2}%", score * 100.0)
}

pub const fn indicator_icon(present: bool) -> &'static str {
    if present {
        "✅"
    } else {
        "❌"
    }
}

pub const fn verdict_icon(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Scholarly => "✅",
        Verdict::Popular => "⚠️",
    }
}

/// Plain-text rendering used by the command line.
pub fn render_text(analysis: &DocumentAnalysis, show_text: bool) -> String {
    let mut out = String::new();

    writeln!(&mut out, "Classification result").expect("write heading");
    writeln!(
        &mut out,
        "{} {} (Confidence: {})",
        verdict_icon(analysis.verdict),
        analysis.verdict.headline(),
        confidence_label(analysis.confidence)
    )
    .expect("write verdict");
    for prediction in &analysis.predictions {
        writeln!(
            &mut out,
            "- {}: {}",
            prediction.label,
            confidence_label(prediction.score)
        )
        .expect("write prediction");
    }

    writeln!(&mut out, "\nEvidence detected").expect("write evidence heading");
    for check in analysis.indicators.checks() {
        writeln!(&mut out, "{} {}", indicator_icon(check.present), check.name)
            .expect("write indicator");
    }

    writeln!(&mut out).expect("write separator");
    match analysis.pages_with_text {
        Some(pages) => write!(
            &mut out,
            "Extracted {} characters from {} page(s)",
            analysis.total_chars, pages
        )
        .expect("write extraction summary"),
        None => write!(&mut out, "Read {} characters", analysis.total_chars)
            .expect("write extraction summary"),
    }
    if analysis.truncated {
        write!(&mut out, " (truncated for the model)").expect("write truncation note");
    }
    writeln!(&mut out).expect("write separator");

    if show_text {
        writeln!(&mut out, "\nExtracted text").expect("write text heading");
        writeln!(&mut out, "{}", analysis.preview).expect("write extracted text");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{LabelScore, POPULAR_LABEL, SCHOLARLY_LABEL};
    use crate::heuristics::scholarly_indicators;
    use chrono::Utc;

    fn sample_analysis() -> DocumentAnalysis {
        let text = "Abstract\nJournal of Examples\n";
        DocumentAnalysis {
            verdict: Verdict::Scholarly,
            confidence: 0.8731,
            predicted_label: SCHOLARLY_LABEL.to_string(),
            predictions: vec![
                LabelScore {
                    label: SCHOLARLY_LABEL.to_string(),
                    score: 0.8731,
                },
                LabelScore {
                    label: POPULAR_LABEL.to_string(),
                    score: 0.1269,
                },
            ],
            indicators: scholarly_indicators(text),
            pages_with_text: Some(2),
            total_chars: 5120,
            truncated: true,
            preview: text.to_string(),
            analyzed_at: Utc::now(),
        }
    }

    #[test]
    fn confidence_uses_two_decimal_percent() {
        assert_eq!(confidence_label(0.8731), "87.31%");
        assert_eq!(confidence_label(1.0), "100.00%");
        assert_eq!(confidence_label(0.0), "0.00%");
    }

    #[test]
    fn text_report_lists_verdict_and_evidence() {
        let rendered = render_text(&sample_analysis(), false);
        assert!(rendered.contains("✅ Scholarly / Peer-reviewed (Confidence: 87.31%)"));
        assert!(rendered.contains("✅ Contains Abstract"));
        assert!(rendered.contains("❌ Contains DOI"));
        assert!(rendered.contains("from 2 page(s) (truncated for the model)"));
        assert!(!rendered.contains("Extracted text"));
    }

    #[test]
    fn text_report_can_include_extracted_text() {
        let rendered = render_text(&sample_analysis(), true);
        assert!(rendered.contains("Extracted text\nAbstract\nJournal of Examples"));
    }

    #[test]
    fn text_report_without_pages_counts_characters_only() {
        let mut analysis = sample_analysis();
        analysis.pages_with_text = None;
        analysis.truncated = false;
        let rendered = render_text(&analysis, false);
        assert!(rendered.contains("Read 5120 characters\n"));
        assert!(!rendered.contains("page(s)"));
    }

    #[test]
    fn view_carries_display_labels() {
        let view = AnalysisView::from(&sample_analysis());
        assert_eq!(view.headline, "Scholarly / Peer-reviewed");
        assert_eq!(view.confidence_label, "87.31%");
        assert_eq!(view.indicators.len(), 4);
        assert_eq!(view.predictions[1].score_label, "12.69%");

        let json = serde_json::to_value(&view).expect("view serializes");
        assert_eq!(json["verdict"], "scholarly");
        assert_eq!(json["indicators"][0]["name"], "Contains Abstract");
        assert_eq!(json["pages_with_text"], 2);
    }
}
