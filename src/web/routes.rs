//! Web 路由定义

use std::sync::Arc;

use axum::{
    routing::get,
    Router,
};

use crate::web::{handlers::*, types::AppState};

/// 创建路由结构
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health_check))
        .route("/flashcards", get(list_flashcards).post(create_flashcard))
        // 静态路径优先于 `/:id` 匹配
        .route("/flashcards/random", get(random_flashcard))
        .route(
            "/flashcards/:id",
            get(get_flashcard)
                .put(update_flashcard)
                .delete(delete_flashcard),
        )
}
