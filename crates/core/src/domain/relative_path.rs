use std::fmt;
use std::path::{Path, PathBuf};

use super::{DomainError, EntryName};

/// Root-relative, slash-separated path in normalized form.
///
/// The empty path is the root itself. A normalized path never has leading or
/// trailing separators, empty segments, or `.`/`..` segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct RelativePath(String);

impl RelativePath {
    pub const SEPARATOR: char = '/';

    pub fn root() -> Self {
        Self(String::new())
    }

    /// Normalizes a user supplied path lexically.
    ///
    /// Both `/` and `\` count as separators. `..` that would climb above the
    /// root is rejected, as is any whitespace-only segment or a NUL byte.
    /// Other whitespace is part of the name and kept as given.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let mut segments: Vec<&str> = Vec::new();

        for segment in raw.split(['/', '\\']) {
            match segment {
                "" | "." => {}
                ".." => {
                    if segments.pop().is_none() {
                        return Err(DomainError::EscapesRoot(raw.to_string()));
                    }
                }
                s if s.trim().is_empty() || s.contains('\0') => {
                    return Err(DomainError::InvalidPath(raw.to_string()));
                }
                s => segments.push(s),
            }
        }

        Ok(Self(segments.join("/")))
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(Self::SEPARATOR).filter(|s| !s.is_empty())
    }

    pub fn depth(&self) -> usize {
        self.segments().count()
    }

    /// Last segment, `None` for the root.
    pub fn name(&self) -> Option<&str> {
        self.segments().last()
    }

    /// Parent directory, `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }

        match self.0.rfind(Self::SEPARATOR) {
            Some(idx) => Some(Self(self.0[..idx].to_string())),
            None => Some(Self::root()),
        }
    }

    pub fn join(&self, name: &EntryName) -> Self {
        self.child(name.as_str())
    }

    /// Appends a segment that is already known to be a single valid name,
    /// such as one read back from a directory listing.
    pub(crate) fn child(&self, segment: &str) -> Self {
        if self.is_root() {
            Self(segment.to_string())
        } else {
            Self(format!("{}{}{}", self.0, Self::SEPARATOR, segment))
        }
    }

    /// Location of this path below `root` on the local filesystem.
    pub fn under(&self, root: &Path) -> PathBuf {
        let mut path = root.to_path_buf();
        for segment in self.segments() {
            path.push(segment);
        }
        path
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RelativePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_slash_only_paths_are_root() {
        for raw in ["", "/", "//", ".", "./."] {
            let path = RelativePath::parse(raw).expect("root path should parse");
            assert!(path.is_root(), "{raw:?} should be the root");
        }
    }

    #[test]
    fn redundant_separators_and_dots_are_collapsed() {
        let path = RelativePath::parse("/docs//./reports/../2024/").expect("path should parse");
        assert_eq!(path.as_str(), "docs/2024");
    }

    #[test]
    fn backslash_is_treated_as_separator() {
        let path = RelativePath::parse("docs\\reports").expect("path should parse");
        assert_eq!(path.segments().collect::<Vec<_>>(), vec!["docs", "reports"]);
    }

    #[test]
    fn climbing_above_root_is_rejected() {
        let err = RelativePath::parse("docs/../../etc").expect_err("escape should be rejected");
        assert_eq!(err, DomainError::EscapesRoot("docs/../../etc".to_string()));

        let err = RelativePath::parse("..").expect_err("escape should be rejected");
        assert!(matches!(err, DomainError::EscapesRoot(_)));
    }

    #[test]
    fn blank_segment_is_rejected() {
        let err = RelativePath::parse("docs/  /x").expect_err("blank segment should be rejected");
        assert!(matches!(err, DomainError::InvalidPath(_)));
    }

    #[test]
    fn edge_whitespace_is_part_of_the_name() {
        let path = RelativePath::parse(" lead/trail ").expect("path should parse");
        assert_eq!(path.segments().collect::<Vec<_>>(), vec![" lead", "trail "]);

        let err = RelativePath::parse(" / ").expect_err("blank segment should be rejected");
        assert!(matches!(err, DomainError::InvalidPath(_)));
    }

    #[test]
    fn nul_byte_is_rejected() {
        let err = RelativePath::parse("docs/a\0b").expect_err("nul should be rejected");
        assert!(matches!(err, DomainError::InvalidPath(_)));
    }

    #[test]
    fn parent_and_name() {
        let path = RelativePath::parse("a/b/c").expect("path should parse");
        assert_eq!(path.name(), Some("c"));
        assert_eq!(path.depth(), 3);

        let parent = path.parent().expect("non-root has a parent");
        assert_eq!(parent.as_str(), "a/b");
        assert_eq!(
            parent.parent().and_then(|p| p.parent()),
            Some(RelativePath::root())
        );
        assert_eq!(RelativePath::root().parent(), None);
        assert_eq!(RelativePath::root().name(), None);
    }

    #[test]
    fn under_root_appends_segments() {
        let path = RelativePath::parse("a/b").expect("path should parse");
        assert_eq!(path.under(Path::new("/srv")), PathBuf::from("/srv/a/b"));
        assert_eq!(RelativePath::root().under(Path::new("/srv")), PathBuf::from("/srv"));
    }

    #[test]
    fn join_appends_name() {
        let name = EntryName::new("notes.txt").expect("name should be valid");
        assert_eq!(RelativePath::root().join(&name).as_str(), "notes.txt");

        let dir = RelativePath::parse("docs").expect("path should parse");
        assert_eq!(dir.join(&name).as_str(), "docs/notes.txt");
    }
}
