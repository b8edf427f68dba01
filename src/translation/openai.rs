//! OpenAI 兼容接口的翻译实现
//!
//! 通过 chat completions 接口完成翻译，每次调用都受固定超时约束。

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{language_name, TranslationError, TranslationResult, Translator};

/// 默认接口地址
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
/// 默认模型
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
/// 单次翻译调用的默认超时
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// OpenAI 客户端配置
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl OpenAiConfig {
    /// 使用默认地址、模型和超时创建配置
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// 基于 OpenAI chat completions 的翻译器
pub struct OpenAiTranslator {
    http: Client,
    config: OpenAiConfig,
}

impl OpenAiTranslator {
    pub fn new(config: OpenAiConfig) -> TranslationResult<Self> {
        if config.api_key.trim().is_empty() {
            return Err(TranslationError::Config(
                "OpenAI API key is required".to_string(),
            ));
        }
        if config.timeout.is_zero() {
            return Err(TranslationError::Config(
                "timeout must be greater than 0".to_string(),
            ));
        }

        let http = Client::builder()
            .user_agent(concat!("flashcards/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TranslationError::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    async fn complete(&self, prompt: &str) -> TranslationResult<String> {
        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: 0.0,
        };

        let response = self
            .http
            .post(self.config.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(TranslationError::Failed(format!(
                "provider returned {}: {}",
                status,
                detail.chars().take(200).collect::<String>()
            )));
        }

        let bytes = response.bytes().await?;
        let parsed: ChatResponse = serde_json::from_slice(&bytes)?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| TranslationError::Failed("provider returned an empty completion".to_string()))
    }
}

/// 构建翻译提示词
pub fn build_prompt(text: &str, source_lang: &str, target_lang: &str) -> String {
    format!(
        "Translate the following text from {} to {}. Provide ONLY the translation, no explanations or additional text.\n\nText: {}",
        language_name(source_lang),
        language_name(target_lang),
        text,
    )
}

#[async_trait]
impl Translator for OpenAiTranslator {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> TranslationResult<String> {
        let prompt = build_prompt(text, source_lang, target_lang);

        tracing::debug!(
            model = %self.config.model,
            source_lang,
            target_lang,
            "发送翻译请求"
        );

        tokio::time::timeout(self.config.timeout, self.complete(&prompt)).await?
    }
}
