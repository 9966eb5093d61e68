use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("path escapes the root: {0}")]
    EscapesRoot(String),

    #[error("name must not be empty")]
    EmptyName,

    #[error("name must not contain a path separator: {0}")]
    NameContainsSeparator(String),

    #[error("name is reserved: {0}")]
    ReservedName(String),
}
