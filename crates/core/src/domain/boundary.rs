use std::path::{Path, PathBuf};

use super::{Breadcrumb, DomainError, RelativePath, breadcrumbs_of};

/// The directory every resolved path must stay inside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootBoundary {
    root: PathBuf,
}

impl RootBoundary {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let root = root.into();

        if !root.is_absolute() {
            return Err(DomainError::InvalidPath(root.display().to_string()));
        }

        Ok(Self { root })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    pub fn resolve(&self, raw: &str) -> Result<ResolvedPath, DomainError> {
        let relative = RelativePath::parse(raw)?;
        Ok(self.locate(relative))
    }

    pub fn locate(&self, relative: RelativePath) -> ResolvedPath {
        let absolute = relative.under(&self.root);
        let breadcrumbs = breadcrumbs_of(&relative);

        ResolvedPath {
            relative,
            absolute,
            breadcrumbs,
        }
    }

    pub fn contains(&self, path: &Path) -> bool {
        path.starts_with(&self.root)
    }
}

/// A path that passed lexical validation against a [`RootBoundary`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    relative: RelativePath,
    absolute: PathBuf,
    breadcrumbs: Vec<Breadcrumb>,
}

impl ResolvedPath {
    pub fn relative(&self) -> &RelativePath {
        &self.relative
    }

    pub fn absolute(&self) -> &Path {
        &self.absolute
    }

    pub fn breadcrumbs(&self) -> &[Breadcrumb] {
        &self.breadcrumbs
    }

    pub fn is_root(&self) -> bool {
        self.relative.is_root()
    }

    pub fn into_parts(self) -> (RelativePath, PathBuf, Vec<Breadcrumb>) {
        (self.relative, self.absolute, self.breadcrumbs)
    }
}
