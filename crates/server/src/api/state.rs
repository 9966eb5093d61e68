//! 统一的应用状态。

use file_manager::FileManager;

/// 统一的应用状态，包含所有请求共享的只读数据。
#[derive(Clone)]
pub struct AppState {
    /// 文件管理器。
    pub file_manager: FileManager,
}

impl AppState {
    /// 创建新的应用状态。
    pub fn new(file_manager: FileManager) -> Self {
        Self { file_manager }
    }
}
