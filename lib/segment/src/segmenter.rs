use crate::headings::{extract_section_titles, SectionTitles};
use clausematch_core::{DocumentClause, MIN_CLAUSE_CHARS};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

/// Literal that opens the signature block; clause text never runs past it.
pub const END_OF_DOCUMENT_MARKER: &str = "IN WITNESS";

lazy_static! {
    /// `"<major>.<minor>"` followed by whitespace
    static ref CLAUSE_START: Regex = Regex::new(r"([0-9]+)\.([0-9]+)\s+").unwrap();

    /// Next numbered line (`"\n 3."`, `"\n3.2"`) or the signature block
    static ref CLAUSE_END: Regex = Regex::new(&format!(
        r"\n\s*[0-9]+\.|{}",
        regex::escape(END_OF_DOCUMENT_MARKER)
    ))
    .unwrap();

    static ref BLANK_LINES: Regex = Regex::new(r"\n\s*\n").unwrap();
}

/// Collapse runs of blank lines into a single blank line and trim the text.
pub fn normalize(text: &str) -> String {
    BLANK_LINES.replace_all(text, "\n\n").trim().to_string()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split `text` into sub-numbered clauses.
///
/// Scanning is leftmost and non-overlapping: each clause body starts after the
/// whitespace following its number and ends at the next numbered line, the
/// signature block, or the end of the text, and the next scan resumes there.
/// Bodies shorter than [`MIN_CLAUSE_CHARS`] are dropped.
pub fn extract_clauses(text: &str, titles: &SectionTitles) -> Vec<DocumentClause> {
    let mut clauses = Vec::new();
    let mut pos = 0;

    while let Some(caps) = CLAUSE_START.captures_at(text, pos) {
        let (Some(number), Some(major), Some(minor)) = (caps.get(0), caps.get(1), caps.get(2))
        else {
            break;
        };

        let body_start = number.end();
        let body_end = CLAUSE_END
            .find_at(text, body_start)
            .map_or(text.len(), |end| end.start());
        pos = body_end;

        let address = format!("{}.{}", major.as_str(), minor.as_str());
        let body = collapse_whitespace(&text[body_start..body_end]);
        if body.chars().count() < MIN_CLAUSE_CHARS {
            debug!("Dropping clause {}: {} characters", address, body.chars().count());
            continue;
        }

        let heading = titles.get(major.as_str()).map(str::to_string);
        match DocumentClause::new(body, address, heading) {
            Ok(clause) => clauses.push(clause),
            Err(err) => debug!("Dropping clause: {}", err),
        }
    }

    clauses
}

/// Segment normalized document text into clauses tagged with their section title.
///
/// Never fails; malformed text simply yields fewer (or zero) clauses.
pub fn segment(text: &str) -> Vec<DocumentClause> {
    let titles = extract_section_titles(text);
    let clauses = extract_clauses(text, &titles);
    debug!(
        "Segmented {} clauses under {} section titles",
        clauses.len(),
        titles.len()
    );
    clauses
}
