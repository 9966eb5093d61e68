//! 视图模型组装。
//!
//! 只做可见性判断，不包含业务逻辑，也从不触发修改操作。

use fileadmin_api_types::{
    ActionResultView, ActionView, BreadcrumbView, BulkActionResponse, BulkOutcome, DeletePrompts,
    DirectoryView, ItemStatus, RowControls, RowKind, RowView, ToolbarView,
};
use fileadmin_core::{
    ActionOutcome, ActionStatus, Capabilities, Capability, Entry, EntryKind, ListedItem,
};

use crate::actions::{ActionInfo, BulkReport};
use crate::lister::DirectoryListing;

pub const FILE_DELETE_PROMPT: &str = "Are you sure you want to delete this file?";
pub const DIRECTORY_DELETE_PROMPT: &str =
    "Are you sure you want to delete this directory and everything in it?";

#[derive(Debug, Clone, Copy)]
pub struct PresentationAdapter {
    capabilities: Capabilities,
}

impl PresentationAdapter {
    pub fn new(capabilities: Capabilities) -> Self {
        Self { capabilities }
    }

    /// 组装目录页视图。`actions` 为当前可用的批量操作。
    pub fn directory_view(
        &self,
        listing: &DirectoryListing,
        actions: &[ActionInfo],
    ) -> DirectoryView {
        let selectable = !actions.is_empty();

        DirectoryView {
            path: listing.path.to_string(),
            breadcrumbs: listing
                .breadcrumbs
                .iter()
                .map(|crumb| BreadcrumbView {
                    name: crumb.name.clone(),
                    path: crumb.path.to_string(),
                })
                .collect(),
            rows: listing
                .items
                .iter()
                .map(|item| self.row(item, selectable))
                .collect(),
            toolbar: self.toolbar(actions),
            delete_prompts: DeletePrompts {
                file: FILE_DELETE_PROMPT.to_string(),
                directory: DIRECTORY_DELETE_PROMPT.to_string(),
            },
        }
    }

    pub fn row(&self, item: &ListedItem, selectable: bool) -> RowView {
        match item {
            ListedItem::ParentLink { path } => RowView {
                name: ListedItem::PARENT_NAME.to_string(),
                path: path.to_string(),
                kind: RowKind::Parent,
                size: None,
                modified: None,
                hidden: false,
                symlink: false,
                controls: RowControls::default(),
            },
            ListedItem::Entry(entry) => RowView {
                name: entry.name.clone(),
                path: entry.path.to_string(),
                kind: match entry.kind {
                    EntryKind::File { .. } => RowKind::File,
                    EntryKind::Directory => RowKind::Directory,
                },
                size: entry.size(),
                modified: entry.modified.map(|time| time.timestamp()),
                hidden: entry.is_hidden(),
                symlink: entry.is_symlink,
                controls: self.controls(entry, selectable),
            },
        }
    }

    pub fn controls(&self, entry: &Entry, selectable: bool) -> RowControls {
        let caps = self.capabilities;
        let (delete, download) = match entry.kind {
            EntryKind::File { .. } => (
                caps.allows(Capability::Delete),
                caps.allows(Capability::Download),
            ),
            EntryKind::Directory => (caps.allows(Capability::DeleteDirs), false),
        };

        RowControls {
            selectable,
            rename: caps.allows(Capability::Rename),
            delete,
            download,
        }
    }

    pub fn toolbar(&self, actions: &[ActionInfo]) -> ToolbarView {
        ToolbarView {
            upload: self.capabilities.allows(Capability::Upload),
            mkdir: self.capabilities.allows(Capability::Mkdir),
            actions: actions
                .iter()
                .map(|info| ActionView {
                    name: info.name.clone(),
                    label: info.label.clone(),
                    confirmation: info.confirmation.clone(),
                })
                .collect(),
        }
    }

    pub fn bulk_view(&self, report: &BulkReport) -> BulkActionResponse {
        BulkActionResponse {
            action: report.action.clone(),
            outcome: match report.outcome() {
                ActionOutcome::Success => BulkOutcome::Success,
                ActionOutcome::Partial => BulkOutcome::Partial,
            },
            results: report
                .results
                .iter()
                .map(|result| ActionResultView {
                    path: result.path.clone(),
                    status: match result.status {
                        ActionStatus::Success => ItemStatus::Success,
                        ActionStatus::Skipped => ItemStatus::Skipped,
                        ActionStatus::Failed => ItemStatus::Failed,
                    },
                    message: result.message.clone(),
                })
                .collect(),
        }
    }
}
