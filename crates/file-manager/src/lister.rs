//! 目录列表。

use std::fs;

use chrono::{DateTime, Utc};
use fileadmin_core::{
    Breadcrumb, CaseSensitivity, Entry, EntryKind, EntryName, ListedItem, RelativePath,
    ResolvedPath,
};
use tracing::{debug, info};

use crate::error::{FileManagerError, Result};

/// 一次目录列表请求的结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryListing {
    /// 目录路径。
    pub path: RelativePath,
    /// 从根目录到当前目录的面包屑。
    pub breadcrumbs: Vec<Breadcrumb>,
    /// 有序条目，非根目录以 `..` 行开头。
    pub items: Vec<ListedItem>,
}

/// 生成有序的目录条目列表。
///
/// 排序：目录优先，然后按名称排序；非根目录在最前面插入指向上级目录的 `..` 行。
/// 每次调用都重新读取目录，不做缓存。
#[derive(Debug, Clone, Copy)]
pub struct DirectoryLister {
    case_sensitivity: CaseSensitivity,
    show_hidden: bool,
}

impl DirectoryLister {
    pub fn new(case_sensitivity: CaseSensitivity, show_hidden: bool) -> Self {
        Self {
            case_sensitivity,
            show_hidden,
        }
    }

    /// 列出目录内容。
    pub fn list(&self, dir: &ResolvedPath) -> Result<Vec<ListedItem>> {
        let relative = dir.relative();
        let metadata =
            fs::metadata(dir.absolute()).map_err(|e| FileManagerError::from_io(relative, e))?;

        if !metadata.is_dir() {
            return Err(FileManagerError::NotADirectory(relative.to_string()));
        }

        info!(path = %relative, "Listing directory");

        let mut directories = Vec::new();
        let mut files = Vec::new();

        let entries =
            fs::read_dir(dir.absolute()).map_err(|e| FileManagerError::from_io(relative, e))?;
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    debug!(path = %relative, error = %err, "Skipping unreadable directory entry");
                    continue;
                }
            };

            match self.entry_to_info(relative, &entry) {
                Ok(Some(info)) if info.is_dir() => directories.push(info),
                Ok(Some(info)) => files.push(info),
                Ok(None) => {}
                Err(err) => {
                    debug!(
                        entry = %entry.path().display(),
                        error = %err,
                        "Skipping entry without readable metadata"
                    );
                }
            }
        }

        let policy = self.case_sensitivity;
        directories.sort_by(|a, b| policy.compare(&a.name, &b.name));
        files.sort_by(|a, b| policy.compare(&a.name, &b.name));

        let mut items = Vec::with_capacity(directories.len() + files.len() + 1);
        if let Some(parent) = relative.parent() {
            items.push(ListedItem::ParentLink { path: parent });
        }
        items.extend(directories.into_iter().map(ListedItem::Entry));
        items.extend(files.into_iter().map(ListedItem::Entry));

        Ok(items)
    }

    /// 将目录条目转换为领域条目；被过滤的条目返回 `None`。
    fn entry_to_info(
        &self,
        parent: &RelativePath,
        entry: &fs::DirEntry,
    ) -> std::io::Result<Option<Entry>> {
        let Ok(name) = entry.file_name().into_string() else {
            debug!(entry = %entry.path().display(), "Skipping entry with non UTF-8 name");
            return Ok(None);
        };

        if !self.show_hidden && name.starts_with('.') {
            return Ok(None);
        }

        // 纯空白名称无法通过路径寻址
        let Ok(entry_name) = EntryName::new(name.as_str()) else {
            debug!(entry = %entry.path().display(), "Skipping entry with blank name");
            return Ok(None);
        };

        let link_metadata = entry.metadata()?;
        let is_symlink = link_metadata.file_type().is_symlink();
        let metadata = if is_symlink {
            fs::metadata(entry.path()).unwrap_or(link_metadata)
        } else {
            link_metadata
        };

        let kind = if metadata.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::File {
                size: metadata.len(),
            }
        };

        Ok(Some(Entry {
            name,
            path: parent.join(&entry_name),
            kind,
            modified: metadata.modified().ok().map(DateTime::<Utc>::from),
            is_symlink,
        }))
    }
}

impl Default for DirectoryLister {
    fn default() -> Self {
        Self::new(CaseSensitivity::default(), true)
    }
}
