//! 翻译模块
//!
//! 把"源语言 -> 目标语言"的文本翻译能力抽象为单一操作：
//! - **error**: 翻译错误类型
//! - **languages**: 语言代码到描述性名称的映射
//! - **openai**: 基于 OpenAI 兼容接口的实现
//!
//! 不内置重试和缓存，需要弹性策略的调用方自行包装。

pub mod error;
pub mod languages;
pub mod openai;

use async_trait::async_trait;

pub use error::{TranslationError, TranslationResult};
pub use languages::language_name;
pub use openai::{OpenAiConfig, OpenAiTranslator};

/// 翻译后端
#[async_trait]
pub trait Translator: Send + Sync {
    /// 后端名称，用于日志
    fn name(&self) -> &'static str;

    /// 将 `text` 从 `source_lang` 翻译为 `target_lang`
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> TranslationResult<String>;
}
