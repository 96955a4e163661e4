//! # clausematch segment
//!
//! Turns plain contract text into an ordered list of [`DocumentClause`]s.
//!
//! Two passes over the text:
//!
//! 1. **Titles** - lines of the form `"<n>. <title>"` give the top-level
//!    section titles.
//! 2. **Clauses** - every `"<major>.<minor> <body>"` becomes a clause whose
//!    body runs to the next numbered line, the signature block
//!    ([`END_OF_DOCUMENT_MARKER`]) or the end of the text. The clause's parent
//!    heading is the title of its major number, if there is one.
//!
//! Rich-text conversion happens upstream; [`normalize`] only tidies blank lines.
//!
//! ```rust
//! use clausematch_segment::segment;
//!
//! let clauses = segment("1. Term\n1.1 This agreement lasts one year.");
//! assert_eq!(clauses[0].address(), "1.1");
//! assert_eq!(clauses[0].parent_heading(), Some("Term"));
//! ```
//!
//! [`DocumentClause`]: clausematch_core::DocumentClause

pub mod headings;
pub mod segmenter;

pub use headings::{extract_section_titles, SectionTitles};
pub use segmenter::{extract_clauses, normalize, segment, END_OF_DOCUMENT_MARKER};
