use crate::catalogue::CatalogueEntry;
use crate::error::{Error, Result};
use serde::Serialize;
use std::sync::Arc;

/// Shortest clause text, in characters, that is kept by segmentation.
pub const MIN_CLAUSE_CHARS: usize = 10;

/// An addressable text unit extracted from a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DocumentClause {
    text: String,
    address: String,
    parent_heading: Option<String>,
}

impl DocumentClause {
    /// Validates that `text` is trimmed, whitespace-collapsed and at least
    /// [`MIN_CLAUSE_CHARS`] long, and that `address` is `<major>.<minor>`.
    pub fn new(
        text: impl Into<String>,
        address: impl Into<String>,
        parent_heading: Option<String>,
    ) -> Result<Self> {
        let text = text.into();
        let address = address.into();

        if text.chars().count() < MIN_CLAUSE_CHARS {
            return Err(Error::validation(
                "text",
                format!("shorter than {} characters", MIN_CLAUSE_CHARS),
            ));
        }
        if text.split_whitespace().collect::<Vec<_>>().join(" ") != text {
            return Err(Error::validation(
                "text",
                "must be trimmed with single spaces between words",
            ));
        }
        if !is_clause_address(&address) {
            return Err(Error::validation(
                "address",
                format!("`{}` is not of the form <major>.<minor>", address),
            ));
        }

        Ok(Self {
            text,
            address,
            parent_heading,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Hierarchical number such as `"5.1"`
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Leading component of the address
    pub fn major(&self) -> &str {
        self.address
            .split_once('.')
            .map_or(self.address.as_str(), |(major, _)| major)
    }

    pub fn parent_heading(&self) -> Option<&str> {
        self.parent_heading.as_deref()
    }
}

/// `true` for ASCII `<digits>.<digits>`.
pub fn is_clause_address(address: &str) -> bool {
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    match address.split_once('.') {
        Some((major, minor)) => all_digits(major) && all_digits(minor),
        None => false,
    }
}

/// A scored pairing of a document clause with a catalogue entry.
#[derive(Debug, Clone, Serialize)]
pub struct ClauseMatch {
    document_clause: DocumentClause,
    catalogue_entry: Arc<CatalogueEntry>,
    similarity_score: f32,
    rank: usize,
}

impl ClauseMatch {
    /// `similarity_score` must lie in `[0, 1]` and `rank` must be at least 1.
    pub fn new(
        document_clause: DocumentClause,
        catalogue_entry: Arc<CatalogueEntry>,
        similarity_score: f32,
        rank: usize,
    ) -> Result<Self> {
        if !(0.0..=1.0).contains(&similarity_score) {
            return Err(Error::validation(
                "similarity_score",
                format!("{} is outside [0, 1]", similarity_score),
            ));
        }
        if rank == 0 {
            return Err(Error::validation("rank", "ranks start at 1"));
        }

        Ok(Self {
            document_clause,
            catalogue_entry,
            similarity_score,
            rank,
        })
    }

    pub fn document_clause(&self) -> &DocumentClause {
        &self.document_clause
    }

    pub fn catalogue_entry(&self) -> &CatalogueEntry {
        &self.catalogue_entry
    }

    /// Shared handle to the matched entry
    pub fn catalogue_entry_arc(&self) -> &Arc<CatalogueEntry> {
        &self.catalogue_entry
    }

    pub fn similarity_score(&self) -> f32 {
        self.similarity_score
    }

    /// 1 is the best candidate
    pub fn rank(&self) -> usize {
        self.rank
    }
}
