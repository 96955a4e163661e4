//! # clausematch matcher
//!
//! Ranks catalogue entries for each document clause and packages the result.
//!
//! - [`Matcher`] - top-k retrieval with a similarity floor, sequential or on the rayon pool
//! - [`PipelineRun`] - segment once, match once, then look results up by entry or clause
//! - [`IssueDetector`] - seam for an external reviewer that turns matches into [`RedlineIssue`]s

pub mod matcher;
pub mod pipeline;
pub mod review;

pub use matcher::{MatchConfig, Matcher, DEFAULT_MIN_SIMILARITY, DEFAULT_SINGLE_CLAUSE_TOP_K};
pub use pipeline::{MatchSummary, PipelineRun};
pub use review::{
    analyze_matches, generate_redlines, DetectionError, IssueAnalysis, IssueDetector, RedlineIssue,
};
