//! Keyword indicators shown next to the model verdict.
//!
//! These are weak evidence for explainability only and never change the
//! classification.

use serde::Serialize;

/// One substring check and whether it matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndicatorCheck {
    pub name: &'static str,
    pub present: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ScholarlyIndicators(Vec<IndicatorCheck>);

impl ScholarlyIndicators {
    pub fn checks(&self) -> &[IndicatorCheck] {
        &self.0
    }

    pub fn present_count(&self) -> usize {
        self.0.iter().filter(|check| check.present).count()
    }

    pub fn get(&self, name: &str) -> Option<bool> {
        self.0
            .iter()
            .find(|check| check.name == name)
            .map(|check| check.present)
    }
}

pub const CONTAINS_ABSTRACT: &str = "Contains Abstract";
pub const CONTAINS_REFERENCES: &str = "Contains References";
pub const CONTAINS_DOI: &str = "Contains DOI";
pub const MENTIONS_JOURNAL: &str = "Mentions Journal/Volume";

/// Runs the fixed set of checks. Matching is case-sensitive except for the
/// DOI check.
pub fn scholarly_indicators(text: &str) -> ScholarlyIndicators {
    let lowered = text.to_lowercase();
    ScholarlyIndicators(vec![
        IndicatorCheck {
            name: CONTAINS_ABSTRACT,
            present: text.contains("Abstract"),
        },
        IndicatorCheck {
            name: CONTAINS_REFERENCES,
            present: text.contains("References") || text.contains("Bibliography"),
        },
        IndicatorCheck {
            name: CONTAINS_DOI,
            present: lowered.contains("doi"),
        },
        IndicatorCheck {
            name: MENTIONS_JOURNAL,
            present: text.contains("Journal") || text.contains("Vol."),
        },
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn research_paper_trips_every_indicator() {
        let text = "Abstract\nWe study things.\nJournal of Things, Vol. 12\n\
                    DOI: 10.1000/xyz123\nReferences\n[1] Someone.";
        let indicators = scholarly_indicators(text);
        assert_eq!(indicators.present_count(), 4);
        let names: Vec<_> = indicators.checks().iter().map(|check| check.name).collect();
        assert_eq!(
            names,
            [
                CONTAINS_ABSTRACT,
                CONTAINS_REFERENCES,
                CONTAINS_DOI,
                MENTIONS_JOURNAL
            ]
        );
    }

    #[test]
    fn abstract_and_references_are_case_sensitive() {
        let indicators = scholarly_indicators("an abstract painting with references to nothing");
        assert_eq!(indicators.get(CONTAINS_ABSTRACT), Some(false));
        assert_eq!(indicators.get(CONTAINS_REFERENCES), Some(false));
    }

    #[test]
    fn doi_matches_any_case() {
        let indicators = scholarly_indicators("Available at https://DOI.org/10.1/abc");
        assert_eq!(indicators.get(CONTAINS_DOI), Some(true));
    }

    #[test]
    fn bibliography_and_volume_are_alternates() {
        let indicators = scholarly_indicators("Bibliography\nVol. 3");
        assert_eq!(indicators.get(CONTAINS_REFERENCES), Some(true));
        assert_eq!(indicators.get(MENTIONS_JOURNAL), Some(true));
    }

    #[test]
    fn magazine_copy_trips_nothing() {
        let indicators = scholarly_indicators("Ten recipes you can make tonight!");
        assert_eq!(indicators.present_count(), 0);
        assert_eq!(indicators.get("Unknown"), None);
    }
}
