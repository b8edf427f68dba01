//! 翻译模块错误处理

use thiserror::Error;

/// 翻译错误类型
///
/// 调用阶段的所有失败（超时、网络、服务端返回异常）统一为 `Failed`，
/// 调用方无需区分具体原因
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslationError {
    /// 翻译调用失败
    #[error("translation failed: {0}")]
    Failed(String),

    /// 客户端配置错误（构造时）
    #[error("translation client misconfigured: {0}")]
    Config(String),
}

impl From<tokio::time::error::Elapsed> for TranslationError {
    fn from(error: tokio::time::error::Elapsed) -> Self {
        TranslationError::Failed(format!("request timed out: {}", error))
    }
}

impl From<reqwest::Error> for TranslationError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            TranslationError::Failed(format!("request timed out: {}", error))
        } else {
            TranslationError::Failed(error.to_string())
        }
    }
}

impl From<serde_json::Error> for TranslationError {
    fn from(error: serde_json::Error) -> Self {
        TranslationError::Failed(format!("invalid response body: {}", error))
    }
}

/// 错误结果类型别名
pub type TranslationResult<T> = Result<T, TranslationError>;
