//! Catalogue entries
//!
//! A catalogue is the fixed reference list of expected clause types together
//! with their review criteria. Entries arrive as loosely-typed
//! [`CatalogueRecord`]s (usually parsed from a JSON array) and become
//! immutable [`CatalogueEntry`] values only after validation.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Raw catalogue record as supplied by the catalogue source.
///
/// Every field is optional so that a missing key surfaces as a validation
/// error naming that key rather than as an opaque parse failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogueRecord {
    pub clause: Option<String>,
    pub clause_definition: Option<String>,
    pub is_required: Option<bool>,
    pub review_instruction: Option<String>,
    pub ideal: Option<String>,
    pub acceptable: Option<String>,
    pub red_flag: Option<String>,
    pub example_ideal_clause: Option<String>,
    pub example_fallback_clause: Option<String>,
}

/// One reference clause type. Construct through [`CatalogueEntry::try_from`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CatalogueRecord")]
pub struct CatalogueEntry {
    #[serde(rename = "clause")]
    name: String,
    #[serde(rename = "clause_definition")]
    definition: String,
    is_required: bool,
    review_instruction: String,
    ideal: String,
    acceptable: String,
    red_flag: String,
    example_ideal_clause: String,
    example_fallback_clause: String,
}

impl CatalogueEntry {
    /// Unique key of the entry
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn definition(&self) -> &str {
        &self.definition
    }

    pub fn is_required(&self) -> bool {
        self.is_required
    }

    pub fn review_instruction(&self) -> &str {
        &self.review_instruction
    }

    pub fn ideal(&self) -> &str {
        &self.ideal
    }

    pub fn acceptable(&self) -> &str {
        &self.acceptable
    }

    pub fn red_flag(&self) -> &str {
        &self.red_flag
    }

    pub fn example_ideal_clause(&self) -> &str {
        &self.example_ideal_clause
    }

    pub fn example_fallback_clause(&self) -> &str {
        &self.example_fallback_clause
    }

    /// Text that gets embedded for this entry: name, definition and review
    /// instruction joined by `". "`.
    pub fn display_text(&self) -> String {
        format!(
            "{}. {}. {}",
            self.name, self.definition, self.review_instruction
        )
    }
}

fn required_text(field: &'static str, value: Option<String>) -> Result<String> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        Some(_) => Err(Error::validation(field, "must not be blank")),
        None => Err(Error::validation(field, "missing")),
    }
}

fn present_text(field: &'static str, value: Option<String>) -> Result<String> {
    value.ok_or_else(|| Error::validation(field, "missing"))
}

impl TryFrom<CatalogueRecord> for CatalogueEntry {
    type Error = Error;

    /// Fields are checked in declaration order; the first failure wins.
    fn try_from(record: CatalogueRecord) -> Result<Self> {
        Ok(Self {
            name: required_text("clause", record.clause)?,
            definition: required_text("clause_definition", record.clause_definition)?,
            is_required: record
                .is_required
                .ok_or_else(|| Error::validation("is_required", "missing"))?,
            review_instruction: required_text("review_instruction", record.review_instruction)?,
            ideal: present_text("ideal", record.ideal)?,
            acceptable: present_text("acceptable", record.acceptable)?,
            red_flag: present_text("red_flag", record.red_flag)?,
            example_ideal_clause: present_text(
                "example_ideal_clause",
                record.example_ideal_clause,
            )?,
            example_fallback_clause: present_text(
                "example_fallback_clause",
                record.example_fallback_clause,
            )?,
        })
    }
}

impl From<CatalogueEntry> for CatalogueRecord {
    fn from(entry: CatalogueEntry) -> Self {
        Self {
            clause: Some(entry.name),
            clause_definition: Some(entry.definition),
            is_required: Some(entry.is_required),
            review_instruction: Some(entry.review_instruction),
            ideal: Some(entry.ideal),
            acceptable: Some(entry.acceptable),
            red_flag: Some(entry.red_flag),
            example_ideal_clause: Some(entry.example_ideal_clause),
            example_fallback_clause: Some(entry.example_fallback_clause),
        }
    }
}

/// Parse a JSON array of catalogue records. Schema validation happens at load.
pub fn records_from_json(json: &str) -> Result<Vec<CatalogueRecord>> {
    Ok(serde_json::from_str(json)?)
}

/// Read and parse a catalogue JSON file.
pub fn records_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<CatalogueRecord>> {
    let content = std::fs::read_to_string(path)?;
    records_from_json(&content)
}

#[cfg(test)]
pub(crate) fn test_record(name: &str, definition: &str, instruction: &str) -> CatalogueRecord {
    CatalogueRecord {
        clause: Some(name.to_string()),
        clause_definition: Some(definition.to_string()),
        is_required: Some(true),
        review_instruction: Some(instruction.to_string()),
        ideal: Some(String::new()),
        acceptable: Some(String::new()),
        red_flag: Some(String::new()),
        example_ideal_clause: Some(String::new()),
        example_fallback_clause: Some(String::new()),
    }
}
