mod action;
mod boundary;
mod breadcrumb;
mod capabilities;
mod entry;
mod entry_name;
mod error;
mod name_policy;
mod relative_path;

pub use action::{ActionOutcome, ActionRequest, ActionResult, ActionStatus};
pub use boundary::{ResolvedPath, RootBoundary};
pub use breadcrumb::{Breadcrumb, ROOT_LABEL, breadcrumbs_of};
pub use capabilities::{Capabilities, Capability};
pub use entry::{Entry, EntryKind, ListedItem};
pub use entry_name::EntryName;
pub use error::DomainError;
pub use name_policy::CaseSensitivity;
pub use relative_path::RelativePath;
