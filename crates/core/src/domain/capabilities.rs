use std::fmt;

use serde::{Deserialize, Serialize};

/// Operation flags granted by the caller's configuration.
///
/// Every flag defaults to `true`; unset keys in a config table keep the
/// default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Capabilities {
    pub can_rename: bool,
    pub can_delete: bool,
    pub can_delete_dirs: bool,
    pub can_upload: bool,
    pub can_mkdir: bool,
    pub can_download: bool,
}

impl Capabilities {
    pub fn all() -> Self {
        Self {
            can_rename: true,
            can_delete: true,
            can_delete_dirs: true,
            can_upload: true,
            can_mkdir: true,
            can_download: true,
        }
    }

    /// Browsing and downloading only.
    pub fn read_only() -> Self {
        Self {
            can_rename: false,
            can_delete: false,
            can_delete_dirs: false,
            can_upload: false,
            can_mkdir: false,
            can_download: true,
        }
    }

    pub fn allows(self, capability: Capability) -> bool {
        match capability {
            Capability::Rename => self.can_rename,
            Capability::Delete => self.can_delete,
            Capability::DeleteDirs => self.can_delete && self.can_delete_dirs,
            Capability::Upload => self.can_upload,
            Capability::Mkdir => self.can_mkdir,
            Capability::Download => self.can_download,
        }
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::all()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Rename,
    Delete,
    DeleteDirs,
    Upload,
    Mkdir,
    Download,
}

impl Capability {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rename => "rename",
            Self::Delete => "delete",
            Self::DeleteDirs => "delete_dirs",
            Self::Upload => "upload",
            Self::Mkdir => "mkdir",
            Self::Download => "download",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deleting_directories_needs_both_flags() {
        let caps = Capabilities {
            can_delete: false,
            ..Capabilities::all()
        };
        assert!(!caps.allows(Capability::DeleteDirs));

        let caps = Capabilities {
            can_delete_dirs: false,
            ..Capabilities::all()
        };
        assert!(caps.allows(Capability::Delete));
        assert!(!caps.allows(Capability::DeleteDirs));
    }

    #[test]
    fn read_only_allows_download_only() {
        let caps = Capabilities::read_only();
        assert!(caps.allows(Capability::Download));
        assert!(!caps.allows(Capability::Rename));
        assert!(!caps.allows(Capability::Upload));
        assert!(!caps.allows(Capability::Mkdir));
        assert!(!caps.allows(Capability::Delete));
    }
}
