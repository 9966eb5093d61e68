//! 文件管理 API 路由。
//!
//! 提供目录浏览、增删改与批量操作给前端组件使用。

use axum::{
    Json, Router,
    extract::Query,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use file_manager::{ErrorKind, FileManagerError};
use fileadmin_api_types::{
    ActionView, BulkActionRequest, BulkActionResponse, CreateDirectoryRequest, DeleteRequest,
    DeleteResponse, DirectoryView, DownloadTargetResponse, ErrorResponse, PathQuery, PathResponse,
    RenameRequest, UploadTargetRequest,
};
use std::sync::Arc;
use tracing::warn;

use super::state::AppState;

/// 创建文件管理 API 路由。
pub fn create_filesystem_router() -> Router<Arc<AppState>> {
    Router::new()
        // 列出目录内容
        .route("/api/fs/list", get(list_directory))
        // 创建目录
        .route("/api/fs/mkdir", post(create_directory))
        // 重命名
        .route("/api/fs/rename", post(rename_path))
        // 删除（需确认）
        .route("/api/fs/delete", post(delete_path))
        // 校验上传目标
        .route("/api/fs/upload-target", post(prepare_upload))
        // 校验下载目标
        .route("/api/fs/download-target", get(prepare_download))
        // 批量操作
        .route("/api/fs/actions", get(list_actions).post(dispatch_action))
}

/// 列出目录内容。
async fn list_directory(
    state: axum::extract::State<Arc<AppState>>,
    Query(query): Query<PathQuery>,
) -> Result<Json<DirectoryView>, ApiError> {
    let listing = state.file_manager.list_directory(&query.path)?;
    Ok(Json(state.file_manager.view(&listing)))
}

/// 创建目录。
async fn create_directory(
    state: axum::extract::State<Arc<AppState>>,
    Json(request): Json<CreateDirectoryRequest>,
) -> Result<(StatusCode, Json<PathResponse>), ApiError> {
    let path = state
        .file_manager
        .create_directory(&request.path, &request.name)?;
    Ok((
        StatusCode::CREATED,
        Json(PathResponse {
            path: path.to_string(),
        }),
    ))
}

/// 重命名文件或目录。
async fn rename_path(
    state: axum::extract::State<Arc<AppState>>,
    Json(request): Json<RenameRequest>,
) -> Result<Json<PathResponse>, ApiError> {
    let path = state
        .file_manager
        .rename_path(&request.path, &request.new_name)?;
    Ok(Json(PathResponse {
        path: path.to_string(),
    }))
}

/// 删除文件或目录。
async fn delete_path(
    state: axum::extract::State<Arc<AppState>>,
    Json(request): Json<DeleteRequest>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let deletion = state
        .file_manager
        .delete_path(&request.path, request.confirmed)?;
    Ok(Json(DeleteResponse {
        path: deletion.path.to_string(),
        was_dir: deletion.was_dir,
        entries_removed: deletion.entries_removed,
    }))
}

/// 校验上传目标，字节传输由外部完成。
async fn prepare_upload(
    state: axum::extract::State<Arc<AppState>>,
    Json(request): Json<UploadTargetRequest>,
) -> Result<Json<PathResponse>, ApiError> {
    let target = state
        .file_manager
        .prepare_upload(&request.path, &request.filename)?;
    Ok(Json(PathResponse {
        path: target.path.to_string(),
    }))
}

/// 校验下载目标。
async fn prepare_download(
    state: axum::extract::State<Arc<AppState>>,
    Query(query): Query<PathQuery>,
) -> Result<Json<DownloadTargetResponse>, ApiError> {
    let target = state.file_manager.prepare_download(&query.path)?;
    Ok(Json(DownloadTargetResponse {
        path: target.path.to_string(),
        size: target.size,
    }))
}

/// 当前可用的批量操作。
async fn list_actions(state: axum::extract::State<Arc<AppState>>) -> Json<Vec<ActionView>> {
    Json(state.file_manager.toolbar().actions)
}

/// 执行批量操作。
async fn dispatch_action(
    state: axum::extract::State<Arc<AppState>>,
    Json(request): Json<BulkActionRequest>,
) -> Result<Json<BulkActionResponse>, ApiError> {
    let report = state.file_manager.dispatch_bulk_action(
        &request.action,
        request.paths,
        request.confirmed,
    )?;
    Ok(Json(state.file_manager.bulk_view(&report)))
}

/// API 错误类型。
#[derive(Debug)]
struct ApiError {
    message: String,
    code: &'static str,
    path: Option<String>,
    status: StatusCode,
}

impl From<FileManagerError> for ApiError {
    fn from(err: FileManagerError) -> Self {
        let kind = err.kind();
        let status = match kind {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::AlreadyExists => StatusCode::CONFLICT,
            ErrorKind::ConfirmationRequired => StatusCode::PRECONDITION_REQUIRED,
            ErrorKind::InvalidPath
            | ErrorKind::NotADirectory
            | ErrorKind::InvalidName
            | ErrorKind::InvalidTarget
            | ErrorKind::UnknownAction
            | ErrorKind::EmptySelection => StatusCode::BAD_REQUEST,
            ErrorKind::Io | ErrorKind::Internal => {
                warn!(error = %err, "file manager request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        ApiError {
            message: err.to_string(),
            code: kind.code(),
            path: err.path().map(str::to_string),
            status,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            code: self.code.to_string(),
            message: self.message,
            path: self.path,
        });
        (self.status, body).into_response()
    }
}
