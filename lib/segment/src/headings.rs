use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

lazy_static! {
    /// `"<n>. <title>"` at the start of a line
    static ref SECTION_TITLE: Regex =
        Regex::new(r"(?m)^([0-9]+)\.\s+([^\n]+?)(?:\s*\n|$)").unwrap();
}

/// Top-level section numbers mapped to their titles, in document order.
///
/// Keys are the section number exactly as written (`"01"` and `"1"` differ).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionTitles {
    titles: Vec<(String, String)>,
    by_number: HashMap<String, usize>,
}

impl SectionTitles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a title. A number that already has a title keeps the first one.
    pub fn insert(&mut self, number: impl Into<String>, title: impl Into<String>) -> bool {
        let number = number.into();
        if self.by_number.contains_key(&number) {
            return false;
        }
        self.by_number.insert(number.clone(), self.titles.len());
        self.titles.push((number, title.into()));
        true
    }

    pub fn get(&self, number: &str) -> Option<&str> {
        self.by_number
            .get(number)
            .map(|&i| self.titles[i].1.as_str())
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    /// `(number, title)` pairs in document order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.titles.iter().map(|(n, t)| (n.as_str(), t.as_str()))
    }
}

/// Scan line starts for `"<n>. <title>"` headings.
pub fn extract_section_titles(text: &str) -> SectionTitles {
    let mut titles = SectionTitles::new();

    for caps in SECTION_TITLE.captures_iter(text) {
        if let (Some(number), Some(title)) = (caps.get(1), caps.get(2)) {
            titles.insert(number.as_str(), title.as_str().trim());
        }
    }

    titles
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_titles_at_line_start() {
        let text = "1. Definitions\n1.1 Some clause text here.\n2. Confidentiality Obligations  \n2.1 More.";
        let titles = extract_section_titles(text);

        assert_eq!(titles.len(), 2);
        assert_eq!(titles.get("1"), Some("Definitions"));
        assert_eq!(titles.get("2"), Some("Confidentiality Obligations"));
        assert_eq!(titles.get("3"), None);
    }

    #[test]
    fn test_sub_numbers_are_not_titles() {
        let titles =
            extract_section_titles("1.1 The parties agree\n  2. indented is not a heading");
        assert!(titles.is_empty());
    }

    #[test]
    fn test_first_title_wins() {
        let titles = extract_section_titles("4. Term\n4.1 text\n4. Duration\n");
        assert_eq!(titles.get("4"), Some("Term"));
        assert_eq!(titles.len(), 1);
    }

    #[test]
    fn test_document_order() {
        let titles = extract_section_titles("10. Notices\n2. Term\n");
        let order: Vec<_> = titles.iter().collect();
        assert_eq!(order, vec![("10", "Notices"), ("2", "Term")]);
    }
}
