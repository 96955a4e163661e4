//! Issue detection seam
//!
//! Matches are handed one at a time to an [`IssueDetector`] (typically an
//! LLM-backed service living outside this crate), which returns an
//! [`IssueAnalysis`]. Matches judged to have an issue become [`RedlineIssue`]s.

use clausematch_core::{ClauseMatch, Error, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Failure reported by an [`IssueDetector`]
#[derive(Error, Debug)]
#[error("{0}")]
pub struct DetectionError(#[source] Box<dyn std::error::Error + Send + Sync>);

impl DetectionError {
    pub fn new<E>(source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self(source.into())
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self(message.into().into())
    }
}

#[derive(Debug, Clone, Deserialize)]
struct IssueAnalysisRecord {
    has_issue: bool,
    #[serde(default)]
    problematic_snippet: String,
    #[serde(default)]
    reasoning: String,
    confidence: f32,
    #[serde(default)]
    suggested_fix: String,
}

/// Structured judgment about one clause match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "IssueAnalysisRecord")]
pub struct IssueAnalysis {
    has_issue: bool,
    problematic_snippet: String,
    reasoning: String,
    confidence: f32,
    suggested_fix: String,
}

impl IssueAnalysis {
    /// `confidence` must lie in `[0, 1]`.
    pub fn new(
        has_issue: bool,
        problematic_snippet: impl Into<String>,
        reasoning: impl Into<String>,
        confidence: f32,
        suggested_fix: impl Into<String>,
    ) -> Result<Self> {
        if !(0.0..=1.0).contains(&confidence) {
            return Err(Error::validation(
                "confidence",
                format!("{} is outside [0, 1]", confidence),
            ));
        }
        Ok(Self {
            has_issue,
            problematic_snippet: problematic_snippet.into(),
            reasoning: reasoning.into(),
            confidence,
            suggested_fix: suggested_fix.into(),
        })
    }

    /// No red flag found
    pub fn clean(confidence: f32) -> Result<Self> {
        Self::new(false, "", "", confidence, "")
    }

    pub fn has_issue(&self) -> bool {
        self.has_issue
    }

    pub fn problematic_snippet(&self) -> &str {
        &self.problematic_snippet
    }

    pub fn reasoning(&self) -> &str {
        &self.reasoning
    }

    pub fn confidence(&self) -> f32 {
        self.confidence
    }

    pub fn suggested_fix(&self) -> &str {
        &self.suggested_fix
    }
}

impl TryFrom<IssueAnalysisRecord> for IssueAnalysis {
    type Error = Error;

    fn try_from(record: IssueAnalysisRecord) -> Result<Self> {
        Self::new(
            record.has_issue,
            record.problematic_snippet,
            record.reasoning,
            record.confidence,
            record.suggested_fix,
        )
    }
}

/// A flagged passage with the catalogue entry it violates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedlineIssue {
    pub text_snippet: String,
    pub catalogue_reference: String,
    pub suggested_fix: String,
}

/// Judges one clause match at a time.
pub trait IssueDetector: Send + Sync {
    fn analyze(
        &self,
        clause_match: &ClauseMatch,
    ) -> std::result::Result<IssueAnalysis, DetectionError>;
}

impl<F> IssueDetector for F
where
    F: Fn(&ClauseMatch) -> std::result::Result<IssueAnalysis, DetectionError> + Send + Sync,
{
    fn analyze(
        &self,
        clause_match: &ClauseMatch,
    ) -> std::result::Result<IssueAnalysis, DetectionError> {
        self(clause_match)
    }
}

/// Analyze every match and keep those flagged as having an issue.
///
/// A failed analysis is logged and skipped; it does not abort the batch.
pub fn analyze_matches<'a, D>(
    detector: &D,
    matches: &'a [ClauseMatch],
) -> Vec<(&'a ClauseMatch, IssueAnalysis)>
where
    D: IssueDetector + ?Sized,
{
    let mut flagged = Vec::new();
    for (i, clause_match) in matches.iter().enumerate() {
        let address = clause_match.document_clause().address();
        match detector.analyze(clause_match) {
            Ok(analysis) if analysis.has_issue() => {
                debug!("{}/{}: red flag in section {}", i + 1, matches.len(), address);
                flagged.push((clause_match, analysis));
            }
            Ok(_) => debug!("{}/{}: section {} has no issues", i + 1, matches.len(), address),
            Err(err) => warn!("Issue detection failed for section {}: {}", address, err),
        }
    }
    flagged
}

/// Analyze `matches` and turn flagged ones into redline issues.
pub fn generate_redlines<D>(detector: &D, matches: &[ClauseMatch]) -> Vec<RedlineIssue>
where
    D: IssueDetector + ?Sized,
{
    analyze_matches(detector, matches)
        .into_iter()
        .map(|(clause_match, analysis)| RedlineIssue {
            text_snippet: analysis.problematic_snippet,
            catalogue_reference: clause_match.catalogue_entry().name().to_string(),
            suggested_fix: analysis.suggested_fix,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::loaded_matcher;
    use clausematch_core::DocumentClause;

    fn clause(text: &str, address: &str) -> DocumentClause {
        DocumentClause::new(text, address, None).unwrap()
    }

    fn matches() -> Vec<ClauseMatch> {
        let clauses = vec![
            clause("The recipient may share confidential data freely.", "1.1"),
            clause("This agreement lasts for a term of one year.", "3.1"),
            clause("Confidential notes are returned on request.", "1.2"),
        ];
        loaded_matcher().best_matches(&clauses, 0.0).unwrap()
    }

    fn detector(m: &ClauseMatch) -> std::result::Result<IssueAnalysis, DetectionError> {
        let text = m.document_clause().text();
        if text.contains("returned") {
            return Err(DetectionError::message("model timed out"));
        }
        if text.contains("freely") {
            return IssueAnalysis::new(
                true,
                "share confidential data freely",
                "No restriction on sharing",
                0.9,
                "The recipient shall not share confidential data.",
            )
            .map_err(DetectionError::new);
        }
        IssueAnalysis::clean(0.8).map_err(DetectionError::new)
    }

    #[test]
    fn test_generate_redlines_keeps_only_issues() {
        let matches = matches();
        let redlines = generate_redlines(&detector, &matches);

        assert_eq!(redlines.len(), 1);
        assert_eq!(redlines[0].catalogue_reference, "Confidentiality");
        assert_eq!(redlines[0].text_snippet, "share confidential data freely");
        assert_eq!(redlines[0].suggested_fix, "The recipient shall not share confidential data.");
    }

    #[test]
    fn test_analyze_matches_skips_failures() {
        let matches = matches();
        let flagged = analyze_matches(&detector, &matches);
        assert_eq!(flagged.len(), 1);
        assert_eq!(flagged[0].0.document_clause().address(), "1.1");
        assert!((flagged[0].1.confidence() - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_confidence_validated() {
        assert_eq!(
            IssueAnalysis::new(true, "", "", 1.2, "").unwrap_err().field(),
            Some("confidence")
        );

        let parsed: IssueAnalysis =
            serde_json::from_str(r#"{"has_issue": false, "confidence": 0.7}"#).unwrap();
        assert!(!parsed.has_issue());
        assert_eq!(parsed.problematic_snippet(), "");

        let out_of_range = r#"{"has_issue": true, "confidence": 7}"#;
        assert!(serde_json::from_str::<IssueAnalysis>(out_of_range).is_err());
    }
}
