//! 批量操作：注册、确认协议与逐项执行。

use std::fmt;
use std::sync::Arc;

use fileadmin_core::{ActionOutcome, ActionRequest, ActionResult, Capabilities, Capability};
use tracing::{debug, info, warn};

use crate::error::{FileManagerError, Result};
use crate::operations::OperationSet;

/// 批量操作接口。
///
/// 每个操作针对单个路径独立执行；破坏性操作通过 `confirmation` 提供确认提示文本。
pub trait BulkAction: Send + Sync {
    /// 注册名称。
    fn name(&self) -> &str;

    /// 展示名称。
    fn label(&self) -> &str;

    /// 确认提示文本，`None` 表示无需确认。
    fn confirmation(&self) -> Option<&str> {
        None
    }

    /// 执行该操作所需的能力开关。
    fn capability(&self) -> Option<Capability> {
        None
    }

    /// 对单个路径执行，成功时可返回附加说明。
    fn apply(&self, operations: &OperationSet, path: &str) -> Result<Option<String>>;

    fn requires_confirmation(&self) -> bool {
        self.confirmation().is_some()
    }
}

/// 内置的批量删除操作。
#[derive(Debug, Clone, Copy, Default)]
pub struct DeleteAction;

impl DeleteAction {
    pub const NAME: &'static str = "delete";
}

impl BulkAction for DeleteAction {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn label(&self) -> &str {
        "Delete"
    }

    fn confirmation(&self) -> Option<&str> {
        Some("Are you sure you want to delete the selected files?")
    }

    fn capability(&self) -> Option<Capability> {
        Some(Capability::Delete)
    }

    fn apply(&self, operations: &OperationSet, path: &str) -> Result<Option<String>> {
        // 确认已在分发前完成
        let deletion = operations.delete(path, true)?;
        if deletion.was_dir {
            Ok(Some(format!("removed {} entries", deletion.entries_removed)))
        } else {
            Ok(None)
        }
    }
}

/// 可展示的批量操作描述。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionInfo {
    pub name: String,
    pub label: String,
    pub confirmation: Option<String>,
}

/// 一次批量操作的逐项结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkReport {
    pub action: String,
    pub results: Vec<ActionResult>,
}

impl BulkReport {
    pub fn outcome(&self) -> ActionOutcome {
        ActionOutcome::of(&self.results)
    }
}

/// 批量操作分发器。
///
/// 按注册顺序保存操作，供工具栏稳定展示。
#[derive(Clone, Default)]
pub struct BulkActionDispatcher {
    actions: Vec<Arc<dyn BulkAction>>,
}

impl BulkActionDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// 预置删除操作的分发器。
    pub fn with_default_actions() -> Self {
        let mut dispatcher = Self::new();
        dispatcher.register(Arc::new(DeleteAction));
        dispatcher
    }

    /// 注册操作，同名操作会被替换。
    pub fn register(&mut self, action: Arc<dyn BulkAction>) {
        match self.actions.iter().position(|a| a.name() == action.name()) {
            Some(idx) => self.actions[idx] = action,
            None => self.actions.push(action),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn BulkAction>> {
        self.actions.iter().find(|action| action.name() == name)
    }

    /// 指定操作是否需要用户确认。
    pub fn requires_confirmation(&self, name: &str) -> Result<bool> {
        self.get(name)
            .map(|action| action.requires_confirmation())
            .ok_or_else(|| FileManagerError::UnknownAction(name.to_string()))
    }

    /// 当前能力开关下可用的操作。
    pub fn available(&self, capabilities: Capabilities) -> Vec<ActionInfo> {
        self.actions
            .iter()
            .filter(|action| is_allowed(action.as_ref(), capabilities))
            .map(|action| ActionInfo {
                name: action.name().to_string(),
                label: action.label().to_string(),
                confirmation: action.confirmation().map(str::to_string),
            })
            .collect()
    }

    /// 对选中的每个路径执行操作。
    ///
    /// 单项失败不会中断其余条目：执行时已不存在的路径记为 `skipped`，其他错误记为 `failed`。
    pub fn dispatch(
        &self,
        operations: &OperationSet,
        request: &ActionRequest,
        confirmed: bool,
    ) -> Result<BulkReport> {
        if request.is_empty() {
            return Err(FileManagerError::EmptySelection);
        }

        let action = self
            .get(&request.action)
            .ok_or_else(|| FileManagerError::UnknownAction(request.action.clone()))?;

        if let Some(capability) = action.capability() {
            if !operations.capabilities().allows(capability) {
                return Err(FileManagerError::Forbidden {
                    operation: capability,
                    path: request.paths.join(", "),
                });
            }
        }

        if action.requires_confirmation() && !confirmed {
            return Err(FileManagerError::ConfirmationRequired(request.action.clone()));
        }

        info!(
            action = %request.action,
            count = request.paths.len(),
            "Dispatching bulk action"
        );

        let results = request
            .paths
            .iter()
            .map(|path| match action.apply(operations, path) {
                Ok(None) => ActionResult::success(path.as_str()),
                Ok(Some(message)) => ActionResult::success(path.as_str()).with_message(message),
                Err(err @ FileManagerError::NotFound(_)) => {
                    debug!(path = %path, "Bulk action target vanished, skipping");
                    ActionResult::skipped(path.as_str(), err.to_string())
                }
                Err(err) => {
                    warn!(path = %path, error = %err, "Bulk action item failed");
                    ActionResult::failed(path.as_str(), err.to_string())
                }
            })
            .collect();

        let report = BulkReport {
            action: request.action.clone(),
            results,
        };
        info!(action = %report.action, outcome = ?report.outcome(), "Bulk action finished");
        Ok(report)
    }
}

impl fmt::Debug for BulkActionDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BulkActionDispatcher")
            .field(
                "actions",
                &self.actions.iter().map(|a| a.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

fn is_allowed(action: &dyn BulkAction, capabilities: Capabilities) -> bool {
    action
        .capability()
        .is_none_or(|capability| capabilities.allows(capability))
}
