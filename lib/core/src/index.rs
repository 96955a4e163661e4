//! Catalogue index
//!
//! Holds one embedding per catalogue entry in an exact [`FlatL2Index`] and
//! answers "which entries are closest to this text" queries.
//!
//! The loaded state lives behind a single `RwLock<Option<Arc<_>>>`. [`load`]
//! validates, embeds and indexes the whole catalogue before taking the write
//! lock, so a failed load leaves the previous catalogue in place and readers
//! never observe a half-built index. Queries clone the `Arc` and release the
//! lock before doing any work.
//!
//! [`load`]: CatalogueIndex::load

use crate::catalogue::{CatalogueEntry, CatalogueRecord};
use crate::embedder::TextEmbedder;
use crate::error::{Error, Result};
use crate::flat::FlatL2Index;
use ahash::AHashMap;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, info};

/// Map a squared L2 distance to a similarity in `(0, 1]`.
///
/// Distance 0 maps to 1 and the mapping is strictly decreasing. This is not
/// cosine similarity; thresholds are calibrated against this transform.
#[inline]
pub fn distance_to_similarity(distance: f32) -> f32 {
    1.0 / (1.0 + distance.max(0.0))
}

struct LoadedCatalogue {
    entries: Vec<Arc<CatalogueEntry>>,
    by_name: AHashMap<String, usize>,
    search: FlatL2Index,
}

/// Similarity index over catalogue entries.
pub struct CatalogueIndex {
    embedder: Arc<dyn TextEmbedder>,
    loaded: RwLock<Option<Arc<LoadedCatalogue>>>,
}

impl CatalogueIndex {
    pub fn new(embedder: Arc<dyn TextEmbedder>) -> Self {
        Self {
            embedder,
            loaded: RwLock::new(None),
        }
    }

    /// Validate, embed and index `records`, then replace the current catalogue.
    ///
    /// Entry names must be unique and the catalogue must not be empty. On any
    /// error the previously loaded catalogue (if any) stays active.
    pub fn load<I>(&self, records: I) -> Result<()>
    where
        I: IntoIterator<Item = CatalogueRecord>,
    {
        let mut entries = Vec::new();
        let mut by_name = AHashMap::new();

        for (position, record) in records.into_iter().enumerate() {
            let entry = CatalogueEntry::try_from(record).map_err(|err| match err {
                Error::Validation { field, reason } => Error::Validation {
                    field,
                    reason: format!("entry {}: {}", position, reason),
                },
                other => other,
            })?;

            if by_name.contains_key(entry.name()) {
                return Err(Error::validation(
                    "clause",
                    format!("entry {}: duplicate clause name `{}`", position, entry.name()),
                ));
            }
            by_name.insert(entry.name().to_string(), position);
            entries.push(Arc::new(entry));
        }

        if entries.is_empty() {
            return Err(Error::validation("catalogue", "no entries"));
        }

        let dim = self.embedder.dimension();
        let mut search = FlatL2Index::new(dim);
        for entry in &entries {
            let vector = self.embedder.embed(&entry.display_text())?;
            search.add(vector)?;
        }

        let loaded = LoadedCatalogue {
            entries,
            by_name,
            search,
        };
        let count = loaded.entries.len();

        *self.loaded.write() = Some(Arc::new(loaded));
        info!("Loaded catalogue index: {} entries, dimension {}", count, dim);
        Ok(())
    }

    /// Load already-validated entries.
    pub fn load_entries<I>(&self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = CatalogueEntry>,
    {
        self.load(entries.into_iter().map(CatalogueRecord::from))
    }

    fn snapshot(&self) -> Result<Arc<LoadedCatalogue>> {
        self.loaded.read().clone().ok_or(Error::NotLoaded)
    }

    /// The `k` entries nearest to `query_text`, most similar first.
    ///
    /// `k` larger than the catalogue is clamped; `k == 0` is rejected.
    pub fn find_similar(
        &self,
        query_text: &str,
        k: usize,
    ) -> Result<Vec<(Arc<CatalogueEntry>, f32)>> {
        let loaded = self.snapshot()?;
        if k == 0 {
            return Err(Error::InvalidArgument("k must be at least 1".to_string()));
        }

        let query = self.embedder.embed(query_text)?;
        let hits = loaded.search.search(&query, k)?;
        debug!("find_similar returned {} of {} entries", hits.len(), loaded.entries.len());

        Ok(hits
            .into_iter()
            .map(|(ordinal, distance)| {
                (
                    Arc::clone(&loaded.entries[ordinal]),
                    distance_to_similarity(distance),
                )
            })
            .collect())
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.read().is_some()
    }

    /// Number of loaded entries, 0 before the first load
    pub fn len(&self) -> usize {
        self.loaded
            .read()
            .as_ref()
            .map_or(0, |loaded| loaded.entries.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Embedding dimension used by this index
    pub fn dimension(&self) -> usize {
        self.embedder.dimension()
    }

    pub fn get_entry(&self, name: &str) -> Result<Option<Arc<CatalogueEntry>>> {
        let loaded = self.snapshot()?;
        Ok(loaded
            .by_name
            .get(name)
            .map(|&ordinal| Arc::clone(&loaded.entries[ordinal])))
    }

    /// Entry names in catalogue order
    pub fn entry_names(&self) -> Result<Vec<String>> {
        let loaded = self.snapshot()?;
        Ok(loaded
            .entries
            .iter()
            .map(|entry| entry.name().to_string())
            .collect())
    }
}
