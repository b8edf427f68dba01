//! 统一错误处理
//!
//! 服务层、存储层共用的错误类型，以及到 HTTP 状态码的映射

use thiserror::Error;

use crate::translation::TranslationError;

/// 闪卡服务错误类型
#[derive(Error, Debug, Clone)]
pub enum FlashcardError {
    /// 输入验证错误（字段缺失、语言参数缺失等）
    #[error("{0}")]
    Validation(String),

    /// 指定ID的闪卡不存在
    #[error("flashcard with id {0} not found")]
    NotFound(i64),

    /// 存储中没有任何闪卡（随机获取时）
    #[error("no flashcards found")]
    NoFlashcards,

    /// 部署配置问题，例如需要翻译但未配置AI
    #[error("{0}")]
    Configuration(String),

    /// 翻译调用失败
    #[error("{context}: {source}")]
    Translation {
        context: String,
        #[source]
        source: TranslationError,
    },

    /// 存储后端错误
    #[error("store error: {0}")]
    Store(String),
}

impl FlashcardError {
    pub fn validation<T: std::fmt::Display>(msg: T) -> Self {
        FlashcardError::Validation(msg.to_string())
    }

    pub fn store<T: std::fmt::Display>(msg: T) -> Self {
        FlashcardError::Store(msg.to_string())
    }

    /// 错误类别，用于日志和指标标签
    pub fn kind(&self) -> &'static str {
        match self {
            FlashcardError::Validation(_) => "validation",
            FlashcardError::NotFound(_) | FlashcardError::NoFlashcards => "not_found",
            FlashcardError::Configuration(_) => "configuration",
            FlashcardError::Translation { .. } => "translation",
            FlashcardError::Store(_) => "store",
        }
    }
}

pub type FlashcardResult<T> = Result<T, FlashcardError>;

#[cfg(feature = "web")]
mod response {
    use axum::{
        http::StatusCode,
        response::{IntoResponse, Response},
        Json,
    };

    use super::FlashcardError;
    use crate::web::types::ErrorBody;

    impl FlashcardError {
        pub fn status_code(&self) -> StatusCode {
            match self {
                FlashcardError::Validation(_) | FlashcardError::Configuration(_) => {
                    StatusCode::BAD_REQUEST
                }
                FlashcardError::NotFound(_) | FlashcardError::NoFlashcards => StatusCode::NOT_FOUND,
                FlashcardError::Translation { .. } => StatusCode::BAD_GATEWAY,
                FlashcardError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            }
        }

        /// 返回给客户端的消息；存储错误不暴露内部细节
        pub fn public_message(&self) -> String {
            match self {
                FlashcardError::Store(_) => "Internal storage error".to_string(),
                other => other.to_string(),
            }
        }
    }

    impl IntoResponse for FlashcardError {
        fn into_response(self) -> Response {
            let status = self.status_code();
            let body = ErrorBody::new(self.public_message());

            if status.is_server_error() {
                tracing::error!(request_id = %body.request_id, kind = self.kind(), "请求失败: {}", self);
            } else {
                tracing::debug!(request_id = %body.request_id, kind = self.kind(), "请求被拒绝: {}", self);
            }

            (status, Json(body)).into_response()
        }
    }
}
