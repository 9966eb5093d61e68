//! 文件管理错误类型。

use std::io;

use fileadmin_core::{Capability, DomainError, RelativePath};
use thiserror::Error;

/// 文件管理错误类型。
///
/// 每个变体都携带出错的相对路径（或名称），用于向调用方展示。
#[derive(Debug, Error)]
pub enum FileManagerError {
    #[error("路径无效: {0}")]
    InvalidPath(String),

    #[error("路径不存在: {0}")]
    NotFound(String),

    #[error("路径不是目录: {0}")]
    NotADirectory(String),

    #[error("名称无效: {name} ({reason})")]
    InvalidName { name: String, reason: String },

    #[error("目标已存在: {0}")]
    AlreadyExists(String),

    #[error("未授权的操作 {operation}: {path}")]
    Forbidden { operation: Capability, path: String },

    #[error("不能对该目标执行操作: {0}")]
    InvalidTarget(String),

    #[error("未知的批量操作: {0}")]
    UnknownAction(String),

    #[error("未选择任何条目")]
    EmptySelection,

    #[error("操作需要确认: {0}")]
    ConfirmationRequired(String),

    #[error("IO 错误: {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("其他错误: {0}")]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, FileManagerError>;

/// 错误类别，供传输层映射状态码与错误码。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidPath,
    NotFound,
    NotADirectory,
    InvalidName,
    AlreadyExists,
    Forbidden,
    InvalidTarget,
    UnknownAction,
    EmptySelection,
    ConfirmationRequired,
    Io,
    Internal,
}

impl ErrorKind {
    /// 稳定的错误码字符串。
    pub fn code(self) -> &'static str {
        match self {
            Self::InvalidPath => "INVALID_PATH",
            Self::NotFound => "NOT_FOUND",
            Self::NotADirectory => "NOT_A_DIRECTORY",
            Self::InvalidName => "INVALID_NAME",
            Self::AlreadyExists => "ALREADY_EXISTS",
            Self::Forbidden => "FORBIDDEN",
            Self::InvalidTarget => "INVALID_TARGET",
            Self::UnknownAction => "UNKNOWN_ACTION",
            Self::EmptySelection => "EMPTY_SELECTION",
            Self::ConfirmationRequired => "CONFIRMATION_REQUIRED",
            Self::Io => "IO_ERROR",
            Self::Internal => "INTERNAL_ERROR",
        }
    }
}

impl FileManagerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidPath(_) => ErrorKind::InvalidPath,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::NotADirectory(_) => ErrorKind::NotADirectory,
            Self::InvalidName { .. } => ErrorKind::InvalidName,
            Self::AlreadyExists(_) => ErrorKind::AlreadyExists,
            Self::Forbidden { .. } => ErrorKind::Forbidden,
            Self::InvalidTarget(_) => ErrorKind::InvalidTarget,
            Self::UnknownAction(_) => ErrorKind::UnknownAction,
            Self::EmptySelection => ErrorKind::EmptySelection,
            Self::ConfirmationRequired(_) => ErrorKind::ConfirmationRequired,
            Self::Io { .. } => ErrorKind::Io,
            Self::Other(_) => ErrorKind::Internal,
        }
    }

    /// 出错的路径或名称（如有）。
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::InvalidPath(path)
            | Self::NotFound(path)
            | Self::NotADirectory(path)
            | Self::AlreadyExists(path)
            | Self::InvalidTarget(path)
            | Self::ConfirmationRequired(path)
            | Self::Forbidden { path, .. }
            | Self::Io { path, .. } => Some(path),
            Self::InvalidName { name, .. } => Some(name),
            Self::UnknownAction(_) | Self::EmptySelection | Self::Other(_) => None,
        }
    }

    pub(crate) fn forbidden(operation: Capability, path: impl Into<String>) -> Self {
        Self::Forbidden {
            operation,
            path: path.into(),
        }
    }

    /// 将 IO 错误映射为领域错误，`NotFound` 与 `AlreadyExists` 保留语义。
    pub(crate) fn from_io(path: &RelativePath, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_string()),
            io::ErrorKind::AlreadyExists => Self::AlreadyExists(path.to_string()),
            _ => Self::Io {
                path: path.to_string(),
                source,
            },
        }
    }
}

impl From<DomainError> for FileManagerError {
    fn from(err: DomainError) -> Self {
        let reason = err.to_string();
        match err {
            DomainError::InvalidPath(path) | DomainError::EscapesRoot(path) => {
                Self::InvalidPath(path)
            }
            DomainError::EmptyName => Self::InvalidName {
                name: String::new(),
                reason,
            },
            DomainError::NameContainsSeparator(name) | DomainError::ReservedName(name) => {
                Self::InvalidName { name, reason }
            }
        }
    }
}
