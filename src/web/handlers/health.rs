//! 健康检查处理器

use std::sync::Arc;

use axum::{extract::State, response::Json};

use crate::web::types::{AppState, HealthResponse};

/// 健康检查
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        ai_enabled: state.service.ai_enabled(),
        store: state.service.store_backend().to_string(),
    })
}
