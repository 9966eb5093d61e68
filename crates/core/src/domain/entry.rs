use chrono::{DateTime, Utc};

use super::RelativePath;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File { size: u64 },
    Directory,
}

impl EntryKind {
    pub fn is_dir(self) -> bool {
        matches!(self, Self::Directory)
    }

    pub fn size(self) -> Option<u64> {
        match self {
            Self::File { size } => Some(size),
            Self::Directory => None,
        }
    }
}

/// One member of a listed directory. Built fresh for every listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub path: RelativePath,
    pub kind: EntryKind,
    pub modified: Option<DateTime<Utc>>,
    pub is_symlink: bool,
}

impl Entry {
    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }

    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }

    pub fn size(&self) -> Option<u64> {
        self.kind.size()
    }
}

/// A row of a directory listing.
///
/// `ParentLink` is the synthetic `..` row pointing one level up. It is only
/// for navigation and is never an operand of rename or delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListedItem {
    ParentLink { path: RelativePath },
    Entry(Entry),
}

impl ListedItem {
    pub const PARENT_NAME: &'static str = "..";

    pub fn name(&self) -> &str {
        match self {
            Self::ParentLink { .. } => Self::PARENT_NAME,
            Self::Entry(entry) => &entry.name,
        }
    }

    pub fn path(&self) -> &RelativePath {
        match self {
            Self::ParentLink { path } => path,
            Self::Entry(entry) => &entry.path,
        }
    }

    pub fn as_entry(&self) -> Option<&Entry> {
        match self {
            Self::ParentLink { .. } => None,
            Self::Entry(entry) => Some(entry),
        }
    }
}
