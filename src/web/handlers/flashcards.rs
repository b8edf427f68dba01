//! 闪卡 CRUD 处理器
//!
//! 错误统一转换为 `FlashcardError`，由其 `IntoResponse` 实现映射状态码

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Json,
};

use crate::error::FlashcardError;
use crate::models::{
    CreateFlashcardRequest, CreateOutcome, Flashcard, RandomFlashcardResponse,
    UpdateFlashcardRequest,
};
use crate::web::types::{AppState, RandomQuery};

pub const MSG_INVALID_JSON: &str = "Invalid JSON payload";
pub const MSG_INVALID_ID: &str = "Invalid flashcard ID";

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, FlashcardError> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        tracing::debug!("请求体解析失败: {}", rejection);
        FlashcardError::validation(MSG_INVALID_JSON)
    })
}

fn flashcard_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, FlashcardError> {
    path.map(|Path(id)| id).map_err(|rejection| {
        tracing::debug!("路径参数解析失败: {}", rejection);
        FlashcardError::validation(MSG_INVALID_ID)
    })
}

/// 创建闪卡
pub async fn create_flashcard(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateFlashcardRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateOutcome>), FlashcardError> {
    let request = json_body(payload)?;
    let outcome = state.service.create(&request).await?;
    Ok((StatusCode::CREATED, Json(outcome)))
}

/// 获取全部闪卡
pub async fn list_flashcards(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Flashcard>>, FlashcardError> {
    Ok(Json(state.service.get_all().await?))
}

/// 按ID获取闪卡
pub async fn get_flashcard(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Flashcard>, FlashcardError> {
    let id = flashcard_id(path)?;
    Ok(Json(state.service.get_by_id(id).await?))
}

/// 更新闪卡
pub async fn update_flashcard(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateFlashcardRequest>, JsonRejection>,
) -> Result<Json<Flashcard>, FlashcardError> {
    let id = flashcard_id(path)?;
    let request = json_body(payload)?;
    Ok(Json(state.service.update(id, &request).await?))
}

/// 删除闪卡
pub async fn delete_flashcard(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, FlashcardError> {
    let id = flashcard_id(path)?;
    state.service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// 随机获取一张闪卡并附带AI提示
///
/// 提示生成失败不影响响应，只是省略 `ai_hint`
pub async fn random_flashcard(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RandomQuery>,
) -> Result<Json<RandomFlashcardResponse>, FlashcardError> {
    let flashcard = state.service.get_random().await?;
    let ai_hint = state.service.generate_hint(&flashcard, &query.lang).await;

    Ok(Json(RandomFlashcardResponse { flashcard, ai_hint }))
}
