//! File Manager - 根目录受限的文件管理能力。
//!
//! 提供路径解析、目录列表、受能力开关约束的增删改操作、批量操作协议，
//! 以及供渲染层使用的视图模型组装。

pub mod actions;
pub mod config;
pub mod error;
pub mod lister;
pub mod manager;
pub mod operations;
pub mod presentation;
pub mod resolver;

pub use actions::{ActionInfo, BulkAction, BulkActionDispatcher, BulkReport, DeleteAction};
pub use config::FileManagerConfig;
pub use error::{ErrorKind, FileManagerError, Result};
pub use lister::{DirectoryLister, DirectoryListing};
pub use manager::FileManager;
pub use operations::{Deletion, DownloadTarget, OperationSet, UploadTarget};
pub use presentation::PresentationAdapter;
pub use resolver::PathResolver;

pub use fileadmin_core::{
    ActionOutcome, ActionResult, ActionStatus, Breadcrumb, Capabilities, Capability,
    CaseSensitivity, Entry, EntryKind, ListedItem, RelativePath,
};
