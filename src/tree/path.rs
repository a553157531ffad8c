//! Node addresses.
//!
//! Paths are dotted for object members and bracketed for array elements:
//! `users[0].email`. Members of the root object have no leading dot and
//! elements of a root array start with their index (`[3].id`). Keys that
//! would make a path ambiguous are written in bracketed, quoted form
//! (`meta["a.b"]`).

use super::value::escape_json_string;

/// One step from a parent to a child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Root,
    Key(String),
    Index(usize),
}

impl Segment {
    /// Object key for this segment, if it is one.
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Key(key) => Some(key),
            Self::Root | Self::Index(_) => None,
        }
    }

    /// Array index for this segment, if it is one.
    pub const fn index(&self) -> Option<usize> {
        match self {
            Self::Index(idx) => Some(*idx),
            Self::Root | Self::Key(_) => None,
        }
    }
}

/// Join a parent path with a child segment.
pub fn child_path(parent: &str, segment: &Segment) -> String {
    match segment {
        Segment::Root => parent.to_string(),
        Segment::Index(idx) => format!("{parent}[{idx}]"),
        Segment::Key(key) if needs_quoting(key) => {
            format!("{parent}[\"{}\"]", escape_json_string(key))
        }
        Segment::Key(key) if parent.is_empty() => key.clone(),
        Segment::Key(key) => format!("{parent}.{key}"),
    }
}

/// Normalize user input from the path command.
///
/// Strips surrounding whitespace and one leading `.`, so `.a.b`, `a.b`
/// and ` .a.b ` all address the same node. A lone `.` addresses the root.
pub fn normalize_user_path(input: &str) -> &str {
    let trimmed = input.trim();
    trimmed.strip_prefix('.').unwrap_or(trimmed)
}

/// Render a path for display, with the leading `.` the command line uses.
pub fn display_path(path: &str) -> String {
    format!(".{path}")
}

fn needs_quoting(key: &str) -> bool {
    key.is_empty() || key.contains(['.', '[', ']', '"'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_members_have_no_leading_dot() {
        assert_eq!(child_path("", &Segment::Key("user".into())), "user");
        assert_eq!(child_path("", &Segment::Index(2)), "[2]");
    }

    #[test]
    fn test_nested_paths() {
        let user = child_path("", &Segment::Key("users".into()));
        let first = child_path(&user, &Segment::Index(0));
        let email = child_path(&first, &Segment::Key("email".into()));
        assert_eq!(email, "users[0].email");
    }

    #[test]
    fn test_ambiguous_keys_are_quoted() {
        assert_eq!(child_path("meta", &Segment::Key("a.b".into())), r#"meta["a.b"]"#);
        assert_eq!(child_path("", &Segment::Key(String::new())), r#"[""]"#);
        assert_eq!(child_path("x", &Segment::Key("[0]".into())), r#"x["[0]"]"#);
    }

    #[test]
    fn test_normalize_user_path_strips_marker() {
        assert_eq!(normalize_user_path(".users[0].email"), "users[0].email");
        assert_eq!(normalize_user_path("users"), "users");
        assert_eq!(normalize_user_path(" .[1] "), "[1]");
        assert_eq!(normalize_user_path("."), "");
    }

    #[test]
    fn test_display_path_adds_marker() {
        assert_eq!(display_path("a.b"), ".a.b");
        assert_eq!(display_path(""), ".");
    }
}
