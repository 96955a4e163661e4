//! # clausematch core
//!
//! Shared types and the catalogue index for clausematch.
//!
//! - [`DocumentClause`] - an addressable unit of contract text (`"5.1"`)
//! - [`CatalogueEntry`] - one reference clause type with its review criteria
//! - [`ClauseMatch`] - a scored, ranked pairing of the two
//! - [`CatalogueIndex`] - exact L2 nearest-neighbour search over embedded entries
//! - [`TextEmbedder`] - the injected embedding function, with [`HashingEmbedder`] as default
//!
//! ## Example
//!
//! ```rust
//! use clausematch_core::{CatalogueIndex, CatalogueRecord, HashingEmbedder};
//! use std::sync::Arc;
//!
//! let index = CatalogueIndex::new(Arc::new(HashingEmbedder::default()));
//! let record = CatalogueRecord {
//!     clause: Some("Governing Law".into()),
//!     clause_definition: Some("Which jurisdiction's law applies".into()),
//!     is_required: Some(true),
//!     review_instruction: Some("Check the chosen state".into()),
//!     ideal: Some(String::new()),
//!     acceptable: Some(String::new()),
//!     red_flag: Some(String::new()),
//!     example_ideal_clause: Some(String::new()),
//!     example_fallback_clause: Some(String::new()),
//! };
//! index.load(vec![record]).unwrap();
//!
//! let results = index.find_similar("governed by the laws of Delaware", 1).unwrap();
//! assert_eq!(results[0].0.name(), "Governing Law");
//! ```

pub mod catalogue;
pub mod clause;
pub mod embedder;
pub mod error;
pub mod flat;
pub mod index;
pub mod vector;

pub use catalogue::{records_from_json, records_from_path, CatalogueEntry, CatalogueRecord};
pub use clause::{is_clause_address, ClauseMatch, DocumentClause, MIN_CLAUSE_CHARS};
pub use embedder::{HashingEmbedder, TextEmbedder, DEFAULT_EMBEDDING_DIM};
pub use error::{EmbeddingError, Error, Result};
pub use flat::FlatL2Index;
pub use index::{distance_to_similarity, CatalogueIndex};
pub use vector::Vector;
