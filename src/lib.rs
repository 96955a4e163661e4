//! # clausematch
//!
//! Contract clause segmentation and catalogue matching.
//!
//! clausematch splits a plain-text contract into numbered clauses, embeds a
//! catalogue of reference clause types, and pairs each document clause with
//! the catalogue entries nearest to it under exact L2 search.
//!
//! ## Quick Start
//!
//! ### As a CLI
//!
//! ```bash
//! clausematch --document nda.txt --catalogue playbook.json --top-k 1 --min-similarity 0.4
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use clausematch::prelude::*;
//! use std::sync::Arc;
//!
//! let json = r#"[{
//!     "clause": "Term",
//!     "clause_definition": "How long the agreement lasts",
//!     "is_required": true,
//!     "review_instruction": "Check the duration",
//!     "ideal": "", "acceptable": "", "red_flag": "",
//!     "example_ideal_clause": "", "example_fallback_clause": ""
//! }]"#;
//!
//! let index = Arc::new(CatalogueIndex::new(Arc::new(HashingEmbedder::default())));
//! index.load(records_from_json(json)?)?;
//!
//! let matcher = Matcher::new(index);
//! let run = PipelineRun::execute(
//!     "1. Term\n1.1 This agreement lasts for one year.",
//!     &matcher,
//!     &MatchConfig { top_k: 1, min_similarity: 0.0 },
//! )?;
//! assert_eq!(run.matches()[0].catalogue_entry().name(), "Term");
//! # Ok::<(), clausematch::Error>(())
//! ```
//!
//! ## Crate Structure
//!
//! - `clausematch-core` - clauses, catalogue entries, embedders and the catalogue index
//! - `clausematch-segment` - section titles and clause extraction
//! - `clausematch-matcher` - top-k matching, pipeline runs and the issue-detection seam

// Re-export core types
pub use clausematch_core::{
    distance_to_similarity, is_clause_address, records_from_json, records_from_path,
    CatalogueEntry, CatalogueIndex, CatalogueRecord, ClauseMatch, DocumentClause,
    EmbeddingError, Error, FlatL2Index, HashingEmbedder, Result, TextEmbedder, Vector,
    DEFAULT_EMBEDDING_DIM, MIN_CLAUSE_CHARS,
};

// Re-export segmentation
pub use clausematch_segment::{
    extract_clauses, extract_section_titles, normalize, segment, SectionTitles,
    END_OF_DOCUMENT_MARKER,
};

// Re-export matching
pub use clausematch_matcher::{
    analyze_matches, generate_redlines, DetectionError, IssueAnalysis, IssueDetector,
    MatchConfig, MatchSummary, Matcher, PipelineRun, RedlineIssue, DEFAULT_MIN_SIMILARITY,
    DEFAULT_SINGLE_CLAUSE_TOP_K,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        records_from_json, records_from_path, segment, normalize,
        CatalogueIndex, CatalogueRecord, CatalogueEntry,
        DocumentClause, ClauseMatch,
        HashingEmbedder, TextEmbedder,
        Matcher, MatchConfig, PipelineRun,
        IssueDetector, RedlineIssue,
        Error, Result,
    };
}
