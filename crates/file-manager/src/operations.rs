//! 受能力开关约束的文件操作集合。

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use fileadmin_core::{
    Capabilities, Capability, CaseSensitivity, EntryName, RelativePath, ResolvedPath,
};
use glob::{MatchOptions, Pattern};
use tracing::info;
use walkdir::WalkDir;

use crate::error::{FileManagerError, Result};
use crate::resolver::PathResolver;

/// 删除结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deletion {
    /// 被删除的路径。
    pub path: RelativePath,
    /// 是否为目录。
    pub was_dir: bool,
    /// 实际移除的文件系统条目数（目录包含其自身）。
    pub entries_removed: usize,
}

/// 上传目标。字节传输由外部负责。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTarget {
    pub path: RelativePath,
    pub absolute: PathBuf,
}

/// 下载目标。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTarget {
    pub path: RelativePath,
    pub absolute: PathBuf,
    pub size: u64,
}

/// 文件操作集合。
///
/// 每个操作先检查对应的能力开关，所有校验都在修改文件系统之前完成。
#[derive(Debug, Clone)]
pub struct OperationSet {
    resolver: PathResolver,
    capabilities: Capabilities,
    case_sensitivity: CaseSensitivity,
    upload_patterns: Vec<Pattern>,
}

impl OperationSet {
    pub fn new(
        resolver: PathResolver,
        capabilities: Capabilities,
        case_sensitivity: CaseSensitivity,
    ) -> Self {
        Self {
            resolver,
            capabilities,
            case_sensitivity,
            upload_patterns: Vec::new(),
        }
    }

    /// 限制上传文件名必须匹配的 glob 模式。
    pub fn with_upload_patterns<I, S>(mut self, patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.upload_patterns = patterns
            .into_iter()
            .map(|raw| {
                let raw = raw.as_ref();
                Pattern::new(raw).with_context(|| format!("Invalid upload pattern: {raw}"))
            })
            .collect::<anyhow::Result<_>>()?;
        Ok(self)
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// 创建目录，返回新目录的相对路径。
    pub fn mkdir(&self, raw_parent: &str, new_name: &str) -> Result<RelativePath> {
        self.require(Capability::Mkdir, raw_parent)?;
        let name = EntryName::new(new_name)?;
        let parent = self.resolver.resolve(raw_parent)?;
        ensure_directory(&parent)?;
        self.ensure_vacant(&parent, &name, None)?;

        let target = parent.relative().join(&name);
        fs::create_dir(parent.absolute().join(name.as_str()))
            .map_err(|e| FileManagerError::from_io(&target, e))?;

        info!(path = %target, "Created directory");
        Ok(target)
    }

    /// 在原目录内重命名，返回新的相对路径。
    pub fn rename(&self, raw_path: &str, new_name: &str) -> Result<RelativePath> {
        reject_pseudo_target(raw_path)?;
        self.require(Capability::Rename, raw_path)?;
        let name = EntryName::new(new_name)?;
        let source = self.operand(raw_path)?;

        fs::symlink_metadata(source.absolute())
            .map_err(|e| FileManagerError::from_io(source.relative(), e))?;

        let current = source.relative().name().unwrap_or_default();
        if current == name.as_str() {
            return Ok(source.relative().clone());
        }

        let (parent, parent_abs) = parent_of(&source)?;
        let parent = self.resolver.locate(parent)?;
        self.ensure_vacant(&parent, &name, Some(current))?;

        let target = parent.relative().join(&name);
        fs::rename(source.absolute(), parent_abs.join(name.as_str()))
            .map_err(|e| FileManagerError::from_io(source.relative(), e))?;

        info!(from = %source.relative(), to = %target, "Renamed entry");
        Ok(target)
    }

    /// 删除文件或目录。
    ///
    /// 必须由调用方传入明确的确认；目录递归删除，符号链接只删除链接本身。
    pub fn delete(&self, raw_path: &str, confirmed: bool) -> Result<Deletion> {
        reject_pseudo_target(raw_path)?;
        self.require(Capability::Delete, raw_path)?;
        let target = self.operand(raw_path)?;

        let metadata = fs::symlink_metadata(target.absolute())
            .map_err(|e| FileManagerError::from_io(target.relative(), e))?;
        if metadata.is_dir() {
            self.require(Capability::DeleteDirs, target.relative().as_str())?;
        }

        if !confirmed {
            return Err(FileManagerError::ConfirmationRequired(
                target.relative().to_string(),
            ));
        }

        let deletion = if metadata.is_dir() {
            let entries_removed = WalkDir::new(target.absolute())
                .into_iter()
                .filter_map(|entry| entry.ok())
                .count();
            fs::remove_dir_all(target.absolute())
                .map_err(|e| FileManagerError::from_io(target.relative(), e))?;
            Deletion {
                path: target.relative().clone(),
                was_dir: true,
                entries_removed,
            }
        } else {
            fs::remove_file(target.absolute())
                .map_err(|e| FileManagerError::from_io(target.relative(), e))?;
            Deletion {
                path: target.relative().clone(),
                was_dir: false,
                entries_removed: 1,
            }
        };

        info!(
            path = %deletion.path,
            was_dir = deletion.was_dir,
            entries_removed = deletion.entries_removed,
            "Deleted entry"
        );
        Ok(deletion)
    }

    /// 校验上传文件名并返回目标路径。
    pub fn resolve_upload_target(&self, raw_parent: &str, filename: &str) -> Result<UploadTarget> {
        self.require(Capability::Upload, raw_parent)?;
        let name = EntryName::for_upload(filename)?;
        self.ensure_upload_allowed(&name)?;

        let parent = self.resolver.resolve(raw_parent)?;
        ensure_directory(&parent)?;
        self.ensure_vacant(&parent, &name, None)?;

        let target = UploadTarget {
            path: parent.relative().join(&name),
            absolute: parent.absolute().join(name.as_str()),
        };

        info!(path = %target.path, "Prepared upload target");
        Ok(target)
    }

    /// 校验下载对象并返回其绝对路径，只允许文件。
    pub fn resolve_download_target(&self, raw_path: &str) -> Result<DownloadTarget> {
        self.require(Capability::Download, raw_path)?;
        let target = self.resolver.resolve(raw_path)?;

        let metadata = fs::metadata(target.absolute())
            .map_err(|e| FileManagerError::from_io(target.relative(), e))?;
        if metadata.is_dir() {
            return Err(FileManagerError::InvalidTarget(target.relative().to_string()));
        }

        let (path, absolute, _) = target.into_parts();
        Ok(DownloadTarget {
            path,
            absolute,
            size: metadata.len(),
        })
    }

    fn require(&self, capability: Capability, path: &str) -> Result<()> {
        if self.capabilities.allows(capability) {
            Ok(())
        } else {
            Err(FileManagerError::forbidden(capability, path))
        }
    }

    /// 解析重命名、删除的操作对象；根目录不能作为操作对象。
    fn operand(&self, raw_path: &str) -> Result<ResolvedPath> {
        let resolved = self.resolver.resolve_operand(raw_path)?;
        if resolved.is_root() {
            return Err(FileManagerError::InvalidTarget(raw_path.to_string()));
        }
        Ok(resolved)
    }

    fn ensure_upload_allowed(&self, name: &EntryName) -> Result<()> {
        if self.upload_patterns.is_empty() {
            return Ok(());
        }

        let options = MatchOptions {
            case_sensitive: false,
            ..MatchOptions::new()
        };
        if self
            .upload_patterns
            .iter()
            .any(|pattern| pattern.matches_with(name.as_str(), options))
        {
            Ok(())
        } else {
            Err(FileManagerError::InvalidName {
                name: name.to_string(),
                reason: "file type is not allowed".to_string(),
            })
        }
    }

    /// 检查同级目录中是否已有同名条目（按名称比较策略），`except` 为被重命名的条目自身。
    fn ensure_vacant(
        &self,
        parent: &ResolvedPath,
        name: &EntryName,
        except: Option<&str>,
    ) -> Result<()> {
        let target = parent.relative().join(name);
        let entries = fs::read_dir(parent.absolute())
            .map_err(|e| FileManagerError::from_io(parent.relative(), e))?;

        for entry in entries.flatten() {
            let existing = entry.file_name();
            let existing = existing.to_string_lossy();
            if Some(existing.as_ref()) == except {
                continue;
            }
            if self.case_sensitivity.same_name(&existing, name.as_str()) {
                return Err(FileManagerError::AlreadyExists(target.to_string()));
            }
        }

        Ok(())
    }
}

/// `..` 伪条目与根目录不能被重命名或删除。
fn reject_pseudo_target(raw_path: &str) -> Result<()> {
    let last = raw_path
        .split(['/', '\\'])
        .filter(|segment| !segment.is_empty())
        .next_back();

    match last {
        None | Some(".") | Some("..") => {
            Err(FileManagerError::InvalidTarget(raw_path.to_string()))
        }
        Some(_) => Ok(()),
    }
}

fn ensure_directory(dir: &ResolvedPath) -> Result<()> {
    let metadata =
        fs::metadata(dir.absolute()).map_err(|e| FileManagerError::from_io(dir.relative(), e))?;
    if metadata.is_dir() {
        Ok(())
    } else {
        Err(FileManagerError::NotADirectory(dir.relative().to_string()))
    }
}

fn parent_of(resolved: &ResolvedPath) -> Result<(RelativePath, &Path)> {
    match (resolved.relative().parent(), resolved.absolute().parent()) {
        (Some(relative), Some(absolute)) => Ok((relative, absolute)),
        _ => Err(FileManagerError::InvalidTarget(resolved.relative().to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use tempfile::TempDir;

    fn setup(capabilities: Capabilities) -> (TempDir, OperationSet) {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::create_dir_all(dir.path().join("docs/nested")).expect("mkdir");
        fs::write(dir.path().join("docs/nested/deep.txt"), b"deep").expect("write");
        fs::write(dir.path().join("readme.md"), b"hello").expect("write");

        let resolver = PathResolver::new(dir.path()).expect("resolver");
        let ops = OperationSet::new(resolver, capabilities, CaseSensitivity::Insensitive);
        (dir, ops)
    }

    #[test]
    fn mkdir_creates_directory() {
        let (dir, ops) = setup(Capabilities::all());

        let created = ops.mkdir("docs", "reports").expect("mkdir");
        assert_eq!(created.as_str(), "docs/reports");
        assert!(dir.path().join("docs/reports").is_dir());
    }

    #[test]
    fn mkdir_rejects_existing_name_case_insensitively() {
        let (dir, ops) = setup(Capabilities::all());

        let err = ops.mkdir("", "DOCS").expect_err("collision");
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
        let count = fs::read_dir(dir.path()).expect("read root").count();
        assert_eq!(count, 2);
    }

    #[test]
    fn mkdir_validates_name_and_capability() {
        let (_dir, ops) = setup(Capabilities::all());
        assert_eq!(ops.mkdir("", "").expect_err("empty").kind(), ErrorKind::InvalidName);
        assert_eq!(ops.mkdir("", "a/b").expect_err("sep").kind(), ErrorKind::InvalidName);
        assert_eq!(
            ops.mkdir("readme.md", "x").expect_err("file parent").kind(),
            ErrorKind::NotADirectory
        );
        assert_eq!(ops.mkdir("missing", "x").expect_err("no parent").kind(), ErrorKind::NotFound);

        let (_dir, ops) = setup(Capabilities {
            can_mkdir: false,
            ..Capabilities::all()
        });
        assert_eq!(ops.mkdir("", "x").expect_err("forbidden").kind(), ErrorKind::Forbidden);
    }

    #[test]
    fn rename_keeps_parent_directory() {
        let (dir, ops) = setup(Capabilities::all());

        let renamed = ops.rename("docs/nested/deep.txt", "shallow.txt").expect("rename");
        assert_eq!(renamed.as_str(), "docs/nested/shallow.txt");
        assert!(dir.path().join("docs/nested/shallow.txt").is_file());
        assert!(!dir.path().join("docs/nested/deep.txt").exists());
    }

    #[test]
    fn rename_allows_case_only_change_of_same_entry() {
        let (dir, ops) = setup(Capabilities::all());

        let renamed = ops.rename("readme.md", "README.md").expect("case-only rename");
        assert_eq!(renamed.as_str(), "README.md");
        assert!(dir.path().join("README.md").exists());
    }

    #[test]
    fn rename_rejects_collision_and_missing_source() {
        let (_dir, ops) = setup(Capabilities::all());

        let err = ops.rename("readme.md", "Docs").expect_err("collision");
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);

        let err = ops.rename("missing.txt", "x").expect_err("missing");
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn rename_rejects_pseudo_entries() {
        let (_dir, ops) = setup(Capabilities::all());

        for raw in ["..", "docs/..", "", "/", "."] {
            let err = ops.rename(raw, "x").expect_err("pseudo target");
            assert_eq!(err.kind(), ErrorKind::InvalidTarget, "{raw:?}");
        }

        let (_dir, ops) = setup(Capabilities::read_only());
        let err = ops.rename("..", "x").expect_err("pseudo target");
        assert_eq!(err.kind(), ErrorKind::InvalidTarget);
    }

    #[test]
    fn delete_requires_confirmation() {
        let (dir, ops) = setup(Capabilities::all());

        let err = ops.delete("readme.md", false).expect_err("unconfirmed");
        assert_eq!(err.kind(), ErrorKind::ConfirmationRequired);
        assert!(dir.path().join("readme.md").exists());

        let deletion = ops.delete("readme.md", true).expect("confirmed delete");
        assert!(!deletion.was_dir);
        assert_eq!(deletion.entries_removed, 1);
        assert!(!dir.path().join("readme.md").exists());
    }

    #[test]
    fn delete_directory_is_recursive() {
        let (dir, ops) = setup(Capabilities::all());

        let deletion = ops.delete("docs", true).expect("delete dir");
        assert!(deletion.was_dir);
        assert_eq!(deletion.entries_removed, 3);
        assert!(!dir.path().join("docs").exists());
    }

    #[test]
    fn delete_directory_needs_delete_dirs() {
        let (dir, ops) = setup(Capabilities {
            can_delete_dirs: false,
            ..Capabilities::all()
        });

        let err = ops.delete("docs", true).expect_err("dirs forbidden");
        assert_eq!(err.kind(), ErrorKind::Forbidden);
        assert!(dir.path().join("docs/nested/deep.txt").exists());

        // 不会先要求确认再拒绝
        let err = ops.delete("docs", false).expect_err("dirs forbidden");
        assert_eq!(err.kind(), ErrorKind::Forbidden);
        let err = ops.delete("readme.md", false).expect_err("unconfirmed");
        assert_eq!(err.kind(), ErrorKind::ConfirmationRequired);

        ops.delete("readme.md", true).expect("files still deletable");
    }

    #[test]
    fn delete_missing_is_not_found() {
        let (_dir, ops) = setup(Capabilities::all());
        let err = ops.delete("ghost.txt", true).expect_err("missing");
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[cfg(unix)]
    #[test]
    fn names_with_edge_whitespace_are_kept() {
        let (dir, ops) = setup(Capabilities::all());
        fs::write(dir.path().join(" lead"), b"x").expect("write");

        let created = ops.mkdir("", " sp ").expect("mkdir");
        assert_eq!(created.as_str(), " sp ");
        assert!(dir.path().join(" sp ").is_dir());
        assert!(!dir.path().join("sp").exists());

        let renamed = ops.rename(" sp ", "trail ").expect("rename");
        assert_eq!(renamed.as_str(), "trail ");

        ops.delete(" lead", true).expect("delete");
        assert!(!dir.path().join(" lead").exists());

        let err = ops.mkdir("", "   ").expect_err("blank name");
        assert_eq!(err.kind(), ErrorKind::InvalidName);
    }

    #[test]
    fn delete_root_is_invalid_target() {
        let (_dir, ops) = setup(Capabilities::all());
        assert_eq!(ops.delete("", true).expect_err("root").kind(), ErrorKind::InvalidTarget);
        assert_eq!(
            ops.delete("docs/..", true).expect_err("parent link").kind(),
            ErrorKind::InvalidTarget
        );
    }

    #[cfg(unix)]
    #[test]
    fn delete_symlink_keeps_target() {
        let (dir, ops) = setup(Capabilities::all());
        std::os::unix::fs::symlink(dir.path().join("docs"), dir.path().join("link"))
            .expect("symlink");

        let deletion = ops.delete("link", true).expect("delete link");
        assert!(!deletion.was_dir);
        assert!(dir.path().join("docs/nested/deep.txt").exists());
    }

    #[test]
    fn upload_target_is_validated() {
        let (dir, ops) = setup(Capabilities::all());

        let target = ops.resolve_upload_target("docs", "photo.png").expect("upload target");
        assert_eq!(target.path.as_str(), "docs/photo.png");
        let root = dir.path().canonicalize().expect("canonical root");
        assert_eq!(target.absolute, root.join("docs/photo.png"));

        for bad in ["", "../x", "a\\b", "CON", "aux.txt", ".."] {
            let err = ops.resolve_upload_target("docs", bad).expect_err("unsafe name");
            assert_eq!(err.kind(), ErrorKind::InvalidName, "{bad:?}");
        }

        let err = ops.resolve_upload_target("", "README.MD").expect_err("exists");
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
    }

    #[test]
    fn upload_patterns_restrict_names() {
        let (_dir, ops) = setup(Capabilities::all());
        let ops = ops.with_upload_patterns(["*.png", "*.txt"]).expect("patterns");

        ops.resolve_upload_target("", "photo.PNG").expect("png allowed");
        let err = ops.resolve_upload_target("", "script.sh").expect_err("sh rejected");
        assert_eq!(err.kind(), ErrorKind::InvalidName);
    }

    #[test]
    fn invalid_upload_pattern_is_reported() {
        let (_dir, ops) = setup(Capabilities::all());
        let err = ops.with_upload_patterns(["[unclosed"]).expect_err("bad glob");
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[test]
    fn upload_and_download_are_gated() {
        let (_dir, ops) = setup(Capabilities::read_only());
        let err = ops.resolve_upload_target("", "a.txt").expect_err("forbidden");
        assert_eq!(err.kind(), ErrorKind::Forbidden);

        let target = ops.resolve_download_target("readme.md").expect("download allowed");
        assert_eq!(target.size, 5);

        let err = ops.resolve_download_target("docs").expect_err("dir download");
        assert_eq!(err.kind(), ErrorKind::InvalidTarget);
    }
}
