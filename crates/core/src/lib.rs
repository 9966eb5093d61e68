//! Domain model for the file manager: paths, names, entries, capabilities
//! and bulk action results. Nothing in this crate touches the filesystem.

mod domain;

pub use domain::*;
