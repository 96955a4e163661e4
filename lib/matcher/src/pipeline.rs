//! Pipeline results
//!
//! A [`PipelineRun`] segments a document and matches it once. Consumers hold
//! the run and look up what they need instead of re-running the pipeline.

use crate::matcher::{MatchConfig, Matcher};
use clausematch_core::{ClauseMatch, DocumentClause, Result};
use clausematch_segment::segment;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use tracing::info;

/// Counts describing one run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchSummary {
    pub total_clauses: usize,
    pub matched_clauses: usize,
    pub unmatched_clauses: usize,
    pub total_matches: usize,
    pub entries_matched: usize,
    pub top_k: usize,
    pub min_similarity: f32,
}

/// Segmented clauses and their matches for one document
#[derive(Debug, Clone, Serialize)]
pub struct PipelineRun {
    config: MatchConfig,
    clauses: Vec<DocumentClause>,
    matches: Vec<ClauseMatch>,
}

impl PipelineRun {
    /// Segment `text` and match every clause with `config`.
    pub fn execute(text: &str, matcher: &Matcher, config: &MatchConfig) -> Result<Self> {
        config.validate()?;

        let clauses = segment(text);
        let matches = matcher.match_clauses(&clauses, config.top_k, config.min_similarity)?;
        info!(
            "Pipeline run: {} clauses, {} matches",
            clauses.len(),
            matches.len()
        );

        Ok(Self {
            config: *config,
            clauses,
            matches,
        })
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Clauses in document order
    pub fn clauses(&self) -> &[DocumentClause] {
        &self.clauses
    }

    /// Matches in clause order, then rank
    pub fn matches(&self) -> &[ClauseMatch] {
        &self.matches
    }

    /// Matches whose catalogue entry is named `entry_name`
    pub fn matches_for<'a>(
        &'a self,
        entry_name: &'a str,
    ) -> impl Iterator<Item = &'a ClauseMatch> + 'a {
        self.matches
            .iter()
            .filter(move |m| m.catalogue_entry().name() == entry_name)
    }

    /// Matches grouped by catalogue entry name
    pub fn matches_by_entry(&self) -> BTreeMap<&str, Vec<&ClauseMatch>> {
        let mut grouped: BTreeMap<&str, Vec<&ClauseMatch>> = BTreeMap::new();
        for m in &self.matches {
            grouped.entry(m.catalogue_entry().name()).or_default().push(m);
        }
        grouped
    }

    /// Clauses that produced no match
    pub fn unmatched_clauses(&self) -> Vec<&DocumentClause> {
        let matched: HashSet<&DocumentClause> =
            self.matches.iter().map(|m| m.document_clause()).collect();
        self.clauses
            .iter()
            .filter(|c| !matched.contains(c))
            .collect()
    }

    pub fn summary(&self) -> MatchSummary {
        let unmatched = self.unmatched_clauses().len();
        MatchSummary {
            total_clauses: self.clauses.len(),
            matched_clauses: self.clauses.len() - unmatched,
            unmatched_clauses: unmatched,
            total_matches: self.matches.len(),
            entries_matched: self.matches_by_entry().len(),
            top_k: self.config.top_k,
            min_similarity: self.config.min_similarity,
        }
    }
}
