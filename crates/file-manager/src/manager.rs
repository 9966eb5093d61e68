//! 文件管理门面：对传输层暴露的全部操作。

use std::path::Path;
use std::sync::Arc;

use fileadmin_api_types::{BulkActionResponse, DirectoryView, ToolbarView};
use fileadmin_core::{ActionRequest, Capabilities, RelativePath};
use tracing::info;

use crate::actions::{ActionInfo, BulkAction, BulkActionDispatcher, BulkReport};
use crate::config::FileManagerConfig;
use crate::error::Result;
use crate::lister::{DirectoryLister, DirectoryListing};
use crate::operations::{Deletion, DownloadTarget, OperationSet, UploadTarget};
use crate::presentation::PresentationAdapter;
use crate::resolver::PathResolver;

/// 文件管理器。
///
/// 只持有启动时确定的只读配置，可在请求之间克隆共享；每个请求同步完成一次操作。
#[derive(Debug, Clone)]
pub struct FileManager {
    resolver: PathResolver,
    lister: DirectoryLister,
    operations: OperationSet,
    dispatcher: BulkActionDispatcher,
    presenter: PresentationAdapter,
}

impl FileManager {
    /// 根据配置创建文件管理器。
    pub fn new(config: &FileManagerConfig) -> Result<Self> {
        let resolver = PathResolver::new(&config.root)?;
        let capabilities = config.capabilities;

        let operations =
            OperationSet::new(resolver.clone(), capabilities, config.case_sensitivity)
                .with_upload_patterns(&config.upload_patterns)?;

        info!(
            root = %resolver.root().display(),
            capabilities = ?capabilities,
            case_sensitivity = ?config.case_sensitivity,
            "initializing file manager"
        );

        Ok(Self {
            lister: DirectoryLister::new(config.case_sensitivity, config.show_hidden),
            operations,
            dispatcher: BulkActionDispatcher::with_default_actions(),
            presenter: PresentationAdapter::new(capabilities),
            resolver,
        })
    }

    /// 以默认配置在指定根目录上创建。
    pub fn with_root(root: impl AsRef<Path>, capabilities: Capabilities) -> Result<Self> {
        let config = FileManagerConfig {
            capabilities,
            ..FileManagerConfig::with_root(root.as_ref())
        };
        Self::new(&config)
    }

    pub fn root(&self) -> &Path {
        self.resolver.root()
    }

    pub fn capabilities(&self) -> Capabilities {
        self.operations.capabilities()
    }

    /// 注册额外的批量操作。
    pub fn register_action(&mut self, action: Arc<dyn BulkAction>) {
        self.dispatcher.register(action);
    }

    /// 当前能力开关下可用的批量操作。
    pub fn available_actions(&self) -> Vec<ActionInfo> {
        self.dispatcher.available(self.capabilities())
    }

    /// 列出目录内容。
    pub fn list_directory(&self, raw_path: &str) -> Result<DirectoryListing> {
        let dir = self.resolver.resolve(raw_path)?;
        let items = self.lister.list(&dir)?;
        let (path, _, breadcrumbs) = dir.into_parts();

        Ok(DirectoryListing {
            path,
            breadcrumbs,
            items,
        })
    }

    pub fn create_directory(&self, raw_parent: &str, name: &str) -> Result<RelativePath> {
        self.operations.mkdir(raw_parent, name)
    }

    pub fn rename_path(&self, raw_path: &str, new_name: &str) -> Result<RelativePath> {
        self.operations.rename(raw_path, new_name)
    }

    pub fn delete_path(&self, raw_path: &str, confirmed: bool) -> Result<Deletion> {
        self.operations.delete(raw_path, confirmed)
    }

    pub fn prepare_upload(&self, raw_parent: &str, filename: &str) -> Result<UploadTarget> {
        self.operations.resolve_upload_target(raw_parent, filename)
    }

    pub fn prepare_download(&self, raw_path: &str) -> Result<DownloadTarget> {
        self.operations.resolve_download_target(raw_path)
    }

    /// 是否需要在分发前取得用户确认。
    pub fn requires_confirmation(&self, action: &str) -> Result<bool> {
        self.dispatcher.requires_confirmation(action)
    }

    pub fn dispatch_bulk_action(
        &self,
        action: &str,
        raw_paths: Vec<String>,
        confirmed: bool,
    ) -> Result<BulkReport> {
        let request = ActionRequest::new(action, raw_paths);
        self.dispatcher.dispatch(&self.operations, &request, confirmed)
    }

    /// 工具栏视图：上传、新建目录开关与当前可用的批量操作。
    pub fn toolbar(&self) -> ToolbarView {
        self.presenter.toolbar(&self.available_actions())
    }

    /// 组装目录页视图模型。
    pub fn view(&self, listing: &DirectoryListing) -> DirectoryView {
        self.presenter
            .directory_view(listing, &self.available_actions())
    }

    /// 组装批量操作结果视图。
    pub fn bulk_view(&self, report: &BulkReport) -> BulkActionResponse {
        self.presenter.bulk_view(report)
    }
}
