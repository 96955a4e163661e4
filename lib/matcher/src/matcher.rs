use clausematch_core::{CatalogueIndex, ClauseMatch, DocumentClause, Error, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Similarity floor used when none is configured.
pub const DEFAULT_MIN_SIMILARITY: f32 = 0.4;

/// Candidates per clause for [`Matcher::match_single_clause`] callers that
/// have no preference.
pub const DEFAULT_SINGLE_CLAUSE_TOP_K: usize = 3;

/// Breadth and similarity floor for a matching run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub top_k: usize,
    pub min_similarity: f32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            top_k: 1,
            min_similarity: DEFAULT_MIN_SIMILARITY,
        }
    }
}

impl MatchConfig {
    pub fn validate(&self) -> Result<()> {
        if self.top_k == 0 {
            return Err(Error::validation("top_k", "must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.min_similarity) {
            return Err(Error::validation(
                "min_similarity",
                format!("{} is outside [0, 1]", self.min_similarity),
            ));
        }
        Ok(())
    }
}

/// Connects document clauses to catalogue entries through a [`CatalogueIndex`].
#[derive(Clone)]
pub struct Matcher {
    index: Arc<CatalogueIndex>,
}

impl Matcher {
    pub fn new(index: Arc<CatalogueIndex>) -> Self {
        Self { index }
    }

    pub fn index(&self) -> &CatalogueIndex {
        &self.index
    }

    /// Rank the `top_k` nearest entries for one clause and keep those at or
    /// above `min_similarity`. Ranks are assigned before filtering.
    fn candidates(
        &self,
        clause: &DocumentClause,
        top_k: usize,
        min_similarity: Option<f32>,
    ) -> Result<Vec<ClauseMatch>> {
        let similar = self.index.find_similar(clause.text(), top_k)?;

        let mut matches = Vec::with_capacity(similar.len());
        for (rank, (entry, similarity)) in (1..).zip(similar) {
            if min_similarity.map_or(false, |floor| similarity < floor) {
                continue;
            }
            matches.push(ClauseMatch::new(clause.clone(), entry, similarity, rank)?);
        }
        Ok(matches)
    }

    /// Match every clause against the catalogue.
    ///
    /// Output follows input clause order, then ascending rank. Clauses with no
    /// candidate at or above `min_similarity` contribute nothing, and several
    /// clauses may match the same entry.
    pub fn match_clauses(
        &self,
        clauses: &[DocumentClause],
        top_k: usize,
        min_similarity: f32,
    ) -> Result<Vec<ClauseMatch>> {
        let mut matches = Vec::new();
        for clause in clauses {
            matches.extend(self.candidates(clause, top_k, Some(min_similarity))?);
        }

        debug!(
            "Matched {} clauses into {} pairs (top_k {}, min_similarity {})",
            clauses.len(),
            matches.len(),
            top_k,
            min_similarity
        );
        Ok(matches)
    }

    /// At most one match per clause: `match_clauses(clauses, 1, min_similarity)`.
    pub fn best_matches(
        &self,
        clauses: &[DocumentClause],
        min_similarity: f32,
    ) -> Result<Vec<ClauseMatch>> {
        self.match_clauses(clauses, 1, min_similarity)
    }

    /// The `top_k` candidates for one clause, with no similarity floor.
    pub fn match_single_clause(
        &self,
        clause: &DocumentClause,
        top_k: usize,
    ) -> Result<Vec<ClauseMatch>> {
        self.candidates(clause, top_k, None)
    }

    /// Same result as [`match_clauses`](Self::match_clauses), with one index
    /// query per clause spread over the rayon pool.
    pub fn par_match_clauses(
        &self,
        clauses: &[DocumentClause],
        top_k: usize,
        min_similarity: f32,
    ) -> Result<Vec<ClauseMatch>> {
        let per_clause: Vec<Vec<ClauseMatch>> = clauses
            .par_iter()
            .map(|clause| self.candidates(clause, top_k, Some(min_similarity)))
            .collect::<Result<_>>()?;

        Ok(per_clause.into_iter().flatten().collect())
    }

    /// [`match_clauses`](Self::match_clauses) driven by a validated config.
    pub fn match_with(
        &self,
        clauses: &[DocumentClause],
        config: &MatchConfig,
    ) -> Result<Vec<ClauseMatch>> {
        config.validate()?;
        self.match_clauses(clauses, config.top_k, config.min_similarity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{keyword_matcher, loaded_matcher};

    fn clause(text: &str, address: &str) -> DocumentClause {
        DocumentClause::new(text, address, None).unwrap()
    }

    fn sample_clauses() -> Vec<DocumentClause> {
        vec![
            clause("The recipient shall keep all confidential material safe.", "1.1"),
            clause("Governed by the law of Delaware state.", "2.1"),
            clause("This agreement lasts for a term of one year.", "3.1"),
        ]
    }

    #[test]
    fn test_best_matches_drops_low_similarity() {
        let matcher = loaded_matcher();
        let matches = matcher.best_matches(&sample_clauses(), 0.9).unwrap();

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].document_clause().address(), "1.1");
        assert_eq!(matches[0].catalogue_entry().name(), "Confidentiality");
        assert_eq!(matches[1].document_clause().address(), "3.1");
        assert_eq!(matches[1].catalogue_entry().name(), "Duration");
        assert!(matches.iter().all(|m| m.rank() == 1));
    }

    #[test]
    fn test_rank_contiguity() {
        let matcher = loaded_matcher();
        let matches = matcher.match_clauses(&sample_clauses(), 2, 0.0).unwrap();

        assert_eq!(matches.len(), 6);
        for chunk in matches.chunks(2) {
            assert_eq!(chunk[0].document_clause(), chunk[1].document_clause());
            assert_eq!(chunk[0].rank(), 1);
            assert_eq!(chunk[1].rank(), 2);
            assert!(chunk[0].similarity_score() >= chunk[1].similarity_score());
        }
    }

    #[test]
    fn test_threshold_monotonicity() {
        let matcher = loaded_matcher();
        let clauses = sample_clauses();
        let mut previous = usize::MAX;
        for floor in [0.0, 0.2, 0.3, 0.5, 0.9, 1.0] {
            let count = matcher.match_clauses(&clauses, 2, floor).unwrap().len();
            assert!(count <= previous);
            previous = count;
        }
    }

    #[test]
    fn test_no_dedup_across_clauses() {
        let matcher = loaded_matcher();
        let clauses = vec![
            clause("Confidential records stay private.", "1.1"),
            clause("Confidential notes are returned on request.", "4.2"),
        ];
        let matches = matcher.best_matches(&clauses, 0.5).unwrap();
        assert_eq!(matches.len(), 2);
        assert!(matches
            .iter()
            .all(|m| m.catalogue_entry().name() == "Confidentiality"));
    }

    #[test]
    fn test_empty_input() {
        let matcher = keyword_matcher();
        assert!(matcher.match_clauses(&[], 3, 0.4).unwrap().is_empty());
    }

    #[test]
    fn test_not_loaded_propagates() {
        let matcher = keyword_matcher();
        assert!(matches!(
            matcher.best_matches(&sample_clauses(), 0.4),
            Err(Error::NotLoaded)
        ));
    }

    #[test]
    fn test_single_clause_has_no_floor() {
        let matcher = loaded_matcher();
        let c = clause("Governed by the law of Delaware state.", "2.1");
        let matches = matcher
            .match_single_clause(&c, DEFAULT_SINGLE_CLAUSE_TOP_K)
            .unwrap();

        assert_eq!(matches.len(), 2);
        assert_eq!(
            matches.iter().map(|m| m.rank()).collect::<Vec<_>>(),
            vec![1, 2]
        );
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let matcher = loaded_matcher();
        let clauses = sample_clauses();
        let sequential = matcher.match_clauses(&clauses, 2, 0.3).unwrap();
        let parallel = matcher.par_match_clauses(&clauses, 2, 0.3).unwrap();

        assert_eq!(sequential.len(), parallel.len());
        for (a, b) in sequential.iter().zip(&parallel) {
            assert_eq!(a.document_clause(), b.document_clause());
            assert_eq!(a.catalogue_entry(), b.catalogue_entry());
            assert_eq!(a.rank(), b.rank());
            assert_eq!(a.similarity_score().to_bits(), b.similarity_score().to_bits());
        }
    }

    #[test]
    fn test_config_validation() {
        assert!(MatchConfig::default().validate().is_ok());
        let zero = MatchConfig { top_k: 0, ..Default::default() };
        assert_eq!(zero.validate().unwrap_err().field(), Some("top_k"));
        let high = MatchConfig { min_similarity: 1.5, ..Default::default() };
        assert_eq!(high.validate().unwrap_err().field(), Some("min_similarity"));

        let parsed: MatchConfig = serde_json::from_str(r#"{"top_k": 3}"#).unwrap();
        assert_eq!(parsed.top_k, 3);
        assert_eq!(parsed.min_similarity, DEFAULT_MIN_SIMILARITY);
    }

    #[test]
    fn test_match_with_rejects_bad_config() {
        let matcher = loaded_matcher();
        let config = MatchConfig { top_k: 0, min_similarity: 0.4 };
        assert!(matches!(
            matcher.match_with(&sample_clauses(), &config),
            Err(Error::Validation { .. })
        ));
    }
}
