//! Web 模块的数据类型定义

use serde::{Deserialize, Serialize};

use crate::service::FlashcardService;

/// 应用状态
#[derive(Clone)]
pub struct AppState {
    pub service: FlashcardService,
}

impl AppState {
    pub fn new(service: FlashcardService) -> Self {
        Self { service }
    }
}

/// 错误响应体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub request_id: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            request_id: uuid::Uuid::new_v4().to_string(),
        }
    }
}

/// 随机闪卡查询参数
#[derive(Debug, Default, Deserialize)]
pub struct RandomQuery {
    /// 提示语言，缺省时使用配置的默认目标语言
    #[serde(default)]
    pub lang: String,
}

/// 健康检查响应
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub ai_enabled: bool,
    pub store: String,
}
