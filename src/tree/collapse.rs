//! Fold state.

use std::collections::HashSet;

/// The set of currently folded node paths.
///
/// Folding a path leaves its descendants' own entries untouched, so
/// unfolding it later brings back whatever nested folds they had.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollapseState {
    collapsed: HashSet<String>,
}

impl CollapseState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold `path`. Returns true if it was not folded before.
    pub fn collapse(&mut self, path: &str) -> bool {
        self.collapsed.insert(path.to_string())
    }

    /// Unfold `path`. Returns true if it was folded before.
    pub fn expand(&mut self, path: &str) -> bool {
        self.collapsed.remove(path)
    }

    pub fn is_collapsed(&self, path: &str) -> bool {
        self.collapsed.contains(path)
    }

    pub fn len(&self) -> usize {
        self.collapsed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collapsed.is_empty()
    }

    /// Keep only the paths for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.collapsed.retain(|path| keep(path));
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.collapsed.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_and_expand_report_changes() {
        let mut state = CollapseState::new();
        assert!(state.collapse("a"));
        assert!(!state.collapse("a"));
        assert!(state.is_collapsed("a"));
        assert!(state.expand("a"));
        assert!(!state.expand("a"));
        assert!(state.is_empty());
    }

    #[test]
    fn test_nested_flags_are_independent() {
        let mut state = CollapseState::new();
        state.collapse("a.b");
        state.collapse("a");
        state.expand("a");
        assert!(state.is_collapsed("a.b"));
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn test_unknown_paths_are_accepted() {
        let mut state = CollapseState::new();
        assert!(state.collapse("does.not[9].exist"));
        assert!(state.is_collapsed("does.not[9].exist"));
    }

    #[test]
    fn test_retain_drops_paths() {
        let mut state = CollapseState::new();
        state.collapse("keep");
        state.collapse("drop");
        state.retain(|p| p == "keep");
        assert_eq!(state.iter().collect::<Vec<_>>(), vec!["keep"]);
    }
}
