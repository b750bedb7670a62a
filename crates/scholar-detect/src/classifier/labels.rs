use serde::Serialize;

use super::ClassifierError;

pub const SCHOLARLY_LABEL: &str = "scholarly peer-reviewed academic article";
pub const POPULAR_LABEL: &str = "popular or non-academic article";

/// Ordered, non-empty set of label descriptions sent to the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CandidateLabels(Vec<String>);

impl CandidateLabels {
    pub fn scholarly_vs_popular() -> Self {
        Self(vec![SCHOLARLY_LABEL.to_string(), POPULAR_LABEL.to_string()])
    }

    pub fn new<I, S>(labels: I) -> Result<Self, ClassifierError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels
            .into_iter()
            .map(Into::into)
            .map(|label| label.trim().to_string())
            .filter(|label| !label.is_empty())
            .collect();
        if labels.is_empty() {
            return Err(ClassifierError::NoLabels);
        }
        Ok(Self(labels))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn contains(&self, label: &str) -> bool {
        self.0.iter().any(|candidate| candidate == label)
    }
}

impl Default for CandidateLabels {
    fn default() -> Self {
        Self::scholarly_vs_popular()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_keep_scholarly_first() {
        let labels = CandidateLabels::default();
        assert_eq!(labels.as_slice(), [SCHOLARLY_LABEL, POPULAR_LABEL]);
    }

    #[test]
    fn blank_labels_are_dropped() {
        let labels = CandidateLabels::new(["  news  ", "", "research"]).expect("labels");
        assert_eq!(labels.as_slice(), ["news", "research"]);
        assert!(matches!(
            CandidateLabels::new(["   "]),
            Err(ClassifierError::NoLabels)
        ));
    }
}
