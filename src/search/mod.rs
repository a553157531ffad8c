//! Search functionality.
//!
//! Provides substring search over the current projection with:
//! - Case-insensitive matching on keys and primitive values
//! - Next/previous navigation relative to the cursor, with wraparound
//! - Staleness tracking against the document revision

use crate::document::Document;
use crate::error::{NavError, NavResult};
use crate::projection::{LineKind, LineRecord};

/// Which part of a row matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Key,
    Value,
}

/// A single hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMatch {
    pub virtual_line: usize,
    pub path: String,
    pub kind: MatchKind,
    /// The key or value text that matched
    pub content: String,
}

/// Scan `lines` for `term`, ignoring case.
///
/// Keys and primitive values are searched; composite values and closing
/// brackets are not. Results are ordered by line, key before value.
pub fn build_matches(lines: &[LineRecord], term: &str) -> Vec<SearchMatch> {
    if term.is_empty() {
        return Vec::new();
    }
    let needle = term.to_lowercase();
    let mut matches = Vec::new();
    for (virtual_line, line) in lines.iter().enumerate() {
        if line.kind == LineKind::CloseBracket {
            continue;
        }
        if let Some(key) = &line.key
            && key.to_lowercase().contains(&needle)
        {
            matches.push(SearchMatch {
                virtual_line,
                path: line.path.clone(),
                kind: MatchKind::Key,
                content: key.clone(),
            });
        }
        if line.kind == LineKind::Leaf && line.value_text.to_lowercase().contains(&needle) {
            matches.push(SearchMatch {
                virtual_line,
                path: line.path.clone(),
                kind: MatchKind::Value,
                content: line.value_text.clone(),
            });
        }
    }
    matches
}

/// Matches for one term against one snapshot of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchIndex {
    term: String,
    matches: Vec<SearchMatch>,
    current: usize,
    revision: u64,
}

impl SearchIndex {
    /// Search the current projection of `doc`.
    pub fn build(doc: &Document, term: &str) -> Self {
        let _scope = crate::logging::scope("search::build");
        let matches = build_matches(doc.lines(), term);
        tracing::debug!(term, matches = matches.len(), "search index built");
        Self {
            term: term.to_string(),
            matches,
            current: 0,
            revision: doc.revision(),
        }
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn matches(&self) -> &[SearchMatch] {
        &self.matches
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// The selected match.
    pub fn current(&self) -> Option<&SearchMatch> {
        self.matches.get(self.current)
    }

    /// True once `doc` has been re-projected since this index was built.
    pub const fn is_stale(&self, doc: &Document) -> bool {
        self.revision != doc.revision()
    }

    /// Select the first match at or after `cursor`, else the first.
    ///
    /// # Errors
    ///
    /// `NoMatches` when nothing matched.
    pub fn activate(&mut self, cursor: usize) -> NavResult<&SearchMatch> {
        let idx = self
            .matches
            .iter()
            .position(|m| m.virtual_line >= cursor)
            .unwrap_or(0);
        self.select(idx)
    }

    /// Select the first match after `cursor`, wrapping to the first.
    ///
    /// # Errors
    ///
    /// `NoMatches` when nothing matched.
    pub fn next(&mut self, cursor: usize) -> NavResult<&SearchMatch> {
        let idx = self
            .matches
            .iter()
            .position(|m| m.virtual_line > cursor)
            .unwrap_or(0);
        self.select(idx)
    }

    /// Select the last match before `cursor`, wrapping to the last.
    ///
    /// # Errors
    ///
    /// `NoMatches` when nothing matched.
    pub fn previous(&mut self, cursor: usize) -> NavResult<&SearchMatch> {
        let idx = self
            .matches
            .iter()
            .rposition(|m| m.virtual_line < cursor)
            .unwrap_or_else(|| self.matches.len().saturating_sub(1));
        self.select(idx)
    }

    fn select(&mut self, idx: usize) -> NavResult<&SearchMatch> {
        if self.matches.is_empty() {
            return Err(NavError::NoMatches(self.term.clone()));
        }
        self.current = idx;
        Ok(&self.matches[idx])
    }

    /// Progress line for the status bar.
    pub fn status(&self) -> String {
        if self.matches.is_empty() {
            NavError::NoMatches(self.term.clone()).to_string()
        } else {
            format!("/{} [{}/{}]", self.term, self.current + 1, self.matches.len())
        }
    }

    /// Whether any match sits on `virtual_line`.
    pub fn is_match_line(&self, virtual_line: usize) -> bool {
        self.matches
            .binary_search_by(|m| m.virtual_line.cmp(&virtual_line))
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{"a":1,"b":[2,3]}"#;

    fn doc(src: &str) -> Document {
        Document::from_json_str(src).unwrap()
    }

    #[test]
    fn test_single_value_match() {
        let d = doc(SAMPLE);
        let matches = build_matches(d.lines(), "3");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].kind, MatchKind::Value);
        assert_eq!(matches[0].virtual_line, 4);
        assert_eq!(matches[0].path, "b[1]");
        assert_eq!(d.lines()[4].plain_text(), "3");
    }

    #[test]
    fn test_key_match_skips_closing_bracket() {
        let d = doc(SAMPLE);
        let matches = build_matches(d.lines(), "b");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].kind, MatchKind::Key);
        assert_eq!(matches[0].virtual_line, 2);
    }

    #[test]
    fn test_key_before_value_on_same_line() {
        let d = doc(r#"{"name": "nameless"}"#);
        let kinds: Vec<_> = build_matches(d.lines(), "NAME")
            .iter()
            .map(|m| m.kind)
            .collect();
        assert_eq!(kinds, vec![MatchKind::Key, MatchKind::Value]);
    }

    #[test]
    fn test_unicode_case_folding() {
        let d = doc(r#"{"city": "ÅLESUND"}"#);
        assert_eq!(build_matches(d.lines(), "åle").len(), 1);
    }

    #[test]
    fn test_literal_types_are_searchable() {
        let d = doc(r#"[null, true, 1.5]"#);
        assert_eq!(build_matches(d.lines(), "null").len(), 1);
        assert_eq!(build_matches(d.lines(), "tru").len(), 1);
        assert_eq!(build_matches(d.lines(), "1.5").len(), 1);
    }

    #[test]
    fn test_hidden_rows_are_not_searched() {
        let mut d = doc(SAMPLE);
        d.collapse("b");
        assert!(build_matches(d.lines(), "3").is_empty());
    }

    #[test]
    fn test_empty_term_matches_nothing() {
        let d = doc(SAMPLE);
        assert!(build_matches(d.lines(), "").is_empty());
    }

    #[test]
    fn test_activation_and_wraparound() {
        let d = doc(r#"{"x1": 1, "y": 2, "x2": 3, "x3": 4}"#);
        let mut index = SearchIndex::build(&d, "x");
        assert_eq!(index.len(), 3);
        assert_eq!(index.activate(2).unwrap().path, "x2");
        assert_eq!(index.status(), "/x [2/3]");
        assert_eq!(index.next(3).unwrap().path, "x3");
        assert_eq!(index.next(4).unwrap().path, "x1");
        assert_eq!(index.previous(1).unwrap().path, "x3");
        assert_eq!(index.previous(4).unwrap().path, "x2");
        assert_eq!(index.activate(5).unwrap().path, "x1");
    }

    #[test]
    fn test_no_matches() {
        let d = doc(SAMPLE);
        let mut index = SearchIndex::build(&d, "zzz");
        assert_eq!(index.activate(0), Err(NavError::NoMatches("zzz".into())));
        assert_eq!(index.next(0), Err(NavError::NoMatches("zzz".into())));
        assert_eq!(index.status(), "Pattern not found: zzz");
        assert!(index.current().is_none());
    }

    #[test]
    fn test_fold_edit_makes_index_stale() {
        let mut d = doc(SAMPLE);
        let index = SearchIndex::build(&d, "3");
        assert!(!index.is_stale(&d));
        d.collapse("b");
        assert!(index.is_stale(&d));
        d.expand("b");
        assert!(index.is_stale(&d));
    }

    #[test]
    fn test_is_match_line() {
        let d = doc(SAMPLE);
        let index = SearchIndex::build(&d, "3");
        assert!(index.is_match_line(4));
        assert!(!index.is_match_line(3));
    }
}
