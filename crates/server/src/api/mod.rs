//! API 路由模块。
//!
//! 将文件管理能力暴露为 JSON API。

pub mod filesystem;
pub mod state;

use std::sync::Arc;

use axum::{Json, Router, routing::get};
use fileadmin_api_types::HealthResponse;
use tower_http::cors::CorsLayer;

pub use filesystem::create_filesystem_router;
pub use state::AppState;

/// 组装全部路由。
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .merge(create_filesystem_router())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
