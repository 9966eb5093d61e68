//! 路径解析与根目录约束。

use std::path::{Path, PathBuf};

use fileadmin_core::{RelativePath, ResolvedPath, RootBoundary};

use crate::error::{FileManagerError, Result};

/// 将用户提交的相对路径解析为根目录内的绝对路径。
///
/// 先做纯词法规范化，再从最深的已存在祖先解析符号链接，
/// 确认其真实位置仍在根目录内。
#[derive(Debug, Clone)]
pub struct PathResolver {
    boundary: RootBoundary,
}

impl PathResolver {
    /// 创建解析器，根目录必须是已存在的目录。
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        let display = root.display().to_string();

        let canonical = root.canonicalize().map_err(|source| match source.kind() {
            std::io::ErrorKind::NotFound => FileManagerError::NotFound(display.clone()),
            _ => FileManagerError::Io {
                path: display.clone(),
                source,
            },
        })?;

        if !canonical.is_dir() {
            return Err(FileManagerError::NotADirectory(display));
        }

        Ok(Self {
            boundary: RootBoundary::new(canonical)?,
        })
    }

    /// 根目录（规范化后的绝对路径）。
    pub fn root(&self) -> &Path {
        self.boundary.path()
    }

    /// 解析路径，末级符号链接会被跟随检查。用于列目录与下载。
    pub fn resolve(&self, raw: &str) -> Result<ResolvedPath> {
        let resolved = self.boundary.resolve(raw)?;
        self.ensure_contained(&resolved, true)?;
        Ok(resolved)
    }

    /// 解析操作对象路径，不跟随末级符号链接。
    ///
    /// 重命名与删除作用于链接本身，只需保证其所在目录位于根目录内。
    pub fn resolve_operand(&self, raw: &str) -> Result<ResolvedPath> {
        let resolved = self.boundary.resolve(raw)?;
        self.ensure_contained(&resolved, false)?;
        Ok(resolved)
    }

    /// 定位已规范化的相对路径。
    pub fn locate(&self, relative: RelativePath) -> Result<ResolvedPath> {
        let resolved = self.boundary.locate(relative);
        self.ensure_contained(&resolved, true)?;
        Ok(resolved)
    }

    fn ensure_contained(&self, resolved: &ResolvedPath, follow_leaf: bool) -> Result<()> {
        let probe: PathBuf = if follow_leaf || resolved.is_root() {
            resolved.absolute().to_path_buf()
        } else {
            match resolved.absolute().parent() {
                Some(parent) => parent.to_path_buf(),
                None => return Ok(()),
            }
        };

        // 从最深的已存在祖先开始解析，不存在的部分只做词法检查
        for ancestor in probe.ancestors() {
            match ancestor.canonicalize() {
                Ok(canonical) if self.boundary.contains(&canonical) => return Ok(()),
                Ok(_) => break,
                // 悬空链接无法确认真实位置
                Err(_) if is_symlink(ancestor) => break,
                Err(_) => continue,
            }
        }

        Err(FileManagerError::InvalidPath(resolved.relative().to_string()))
    }
}

fn is_symlink(path: &Path) -> bool {
    std::fs::symlink_metadata(path).is_ok_and(|meta| meta.file_type().is_symlink())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn missing_root_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = PathResolver::new(dir.path().join("missing")).expect_err("missing root");
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn file_root_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = dir.path().join("a.txt");
        std::fs::write(&file, b"x").expect("write file");

        let err = PathResolver::new(&file).expect_err("file root");
        assert_eq!(err.kind(), ErrorKind::NotADirectory);
    }

    #[test]
    fn traversal_is_invalid_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let resolver = PathResolver::new(dir.path()).expect("resolver");

        let err = resolver.resolve("../etc").expect_err("escape");
        assert_eq!(err.kind(), ErrorKind::InvalidPath);
    }

    #[test]
    fn missing_path_resolves_lexically() {
        let dir = tempfile::tempdir().expect("tempdir");
        let resolver = PathResolver::new(dir.path()).expect("resolver");

        let resolved = resolver.resolve("not/yet/there").expect("lexical resolve");
        assert!(resolved.absolute().starts_with(resolver.root()));
    }

    #[cfg(unix)]
    #[test]
    fn symlink_escaping_root_is_rejected() {
        let outside = tempfile::tempdir().expect("tempdir");
        let dir = tempfile::tempdir().expect("tempdir");
        std::os::unix::fs::symlink(outside.path(), dir.path().join("escape")).expect("symlink");

        let resolver = PathResolver::new(dir.path()).expect("resolver");

        let err = resolver.resolve("escape").expect_err("escape through symlink");
        assert_eq!(err.kind(), ErrorKind::InvalidPath);

        let err = resolver.resolve("escape/inner").expect_err("escape through symlink");
        assert_eq!(err.kind(), ErrorKind::InvalidPath);

        // 链接本身仍可作为操作对象
        let operand = resolver.resolve_operand("escape").expect("link itself is inside");
        assert_eq!(operand.relative().as_str(), "escape");
    }

    #[cfg(unix)]
    #[test]
    fn existence_outside_root_is_not_revealed() {
        let outside = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir(outside.path().join("exists")).expect("mkdir");
        let dir = tempfile::tempdir().expect("tempdir");
        std::os::unix::fs::symlink(outside.path(), dir.path().join("esc")).expect("symlink");

        let resolver = PathResolver::new(dir.path()).expect("resolver");
        for raw in ["esc/exists", "esc/nope", "esc/nope/deeper"] {
            let err = resolver.resolve(raw).expect_err("escape through symlink");
            assert_eq!(err.kind(), ErrorKind::InvalidPath, "{raw:?}");

            let err = resolver.resolve_operand(raw).expect_err("escape through symlink");
            assert_eq!(err.kind(), ErrorKind::InvalidPath, "{raw:?}");
        }
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_is_not_traversed() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::os::unix::fs::symlink("/nonexistent/fileadmin", dir.path().join("dangling"))
            .expect("symlink");

        let resolver = PathResolver::new(dir.path()).expect("resolver");
        let err = resolver.resolve("dangling/x").expect_err("dangling link");
        assert_eq!(err.kind(), ErrorKind::InvalidPath);

        resolver.resolve_operand("dangling").expect("link itself can be removed");
    }
}
