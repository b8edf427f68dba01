//! # 应用配置
//!
//! 配置按以下顺序叠加，后者覆盖前者：
//!
//! 1. 内置默认值
//! 2. 配置文件（`CONFIG_PATHS` 中第一个存在的文件）
//! 3. `FLASHCARDS_` 前缀的环境变量
//! 4. `env` 模块中的类型化环境变量（`DB_URL`、`PORT`、`OPENAI_API_KEY` 等）
//!
//! 启动前还会尝试加载 `.env.local` 或 `.env`。

use std::path::Path;
use std::time::Duration;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::env::EnvError;
use crate::service::{ServiceConfig, DEFAULT_HINT_SOURCE_LANG, DEFAULT_HINT_TARGET_LANG};
use crate::translation::openai::{self, OpenAiConfig};

/// 配置文件查找路径
pub const CONFIG_PATHS: &[&str] = &["./flashcards.toml", "~/.config/flashcards/config.toml"];

/// 环境变量文件，按顺序取第一个存在的
const ENV_FILES: &[&str] = &[".env.local", ".env"];

/// 配置加载错误
#[derive(Error, Debug)]
pub enum AppConfigError {
    #[error("配置构建失败: {0}")]
    Build(#[from] config::ConfigError),

    #[error(transparent)]
    Env(#[from] EnvError),

    #[error("配置无效: {0}")]
    Invalid(String),
}

/// 存储后端
///
/// 配置文件和环境变量中接受与 `FLASHCARDS_STORE` 相同的别名（`mongodb`、`mem`），不区分大小写
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Mongo,
    Memory,
}

impl std::str::FromStr for StoreBackend {
    type Err = AppConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(StoreBackend::Mongo),
            "memory" | "mem" => Ok(StoreBackend::Memory),
            _ => Err(AppConfigError::Invalid(format!("未知的存储后端: {}", s))),
        }
    }
}

impl<'de> Deserialize<'de> for StoreBackend {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    // 存储配置
    pub store: StoreBackend,
    pub database_url: String,
    pub db_name: String,
    pub collection: String,

    // Web配置
    pub bind_address: String,
    pub port: u16,

    // AI配置，`openai_api_key` 为空表示禁用
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub openai_model: String,
    pub translation_timeout_secs: u64,
    pub hint_source_lang: String,
    pub hint_target_lang: String,

    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store: StoreBackend::Mongo,
            database_url: "mongodb://localhost:27017".to_string(),
            db_name: "flashcards".to_string(),
            collection: "flashcards".to_string(),

            bind_address: "0.0.0.0".to_string(),
            port: 8080,

            openai_api_key: String::new(),
            openai_base_url: openai::DEFAULT_BASE_URL.to_string(),
            openai_model: openai::DEFAULT_MODEL.to_string(),
            translation_timeout_secs: openai::DEFAULT_TIMEOUT.as_secs(),
            hint_source_lang: DEFAULT_HINT_SOURCE_LANG.to_string(),
            hint_target_lang: DEFAULT_HINT_TARGET_LANG.to_string(),

            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// 加载完整配置
    pub fn load() -> Result<Self, AppConfigError> {
        Self::load_from(None)
    }

    /// 加载配置，`config_file` 指定时替代默认的查找路径
    pub fn load_from(config_file: Option<&str>) -> Result<Self, AppConfigError> {
        Self::load_dotenv();

        let mut config = Self::from_sources(config_file, Self::environment_source())?;
        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// `FLASHCARDS_` 前缀的环境变量源
    fn environment_source() -> Environment {
        Environment::with_prefix("FLASHCARDS")
            .prefix_separator("_")
            .try_parsing(true)
    }

    /// 叠加默认值、配置文件和环境变量源，不做类型化覆盖和验证
    fn from_sources(config_file: Option<&str>, environment: Environment) -> Result<Self, AppConfigError> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        match config_file {
            Some(path) => {
                let expanded = shellexpand::tilde(path);
                tracing::info!("加载配置文件: {}", expanded);
                builder = builder.add_source(File::with_name(&expanded));
            }
            None => {
                for path in CONFIG_PATHS {
                    let expanded = shellexpand::tilde(path);
                    if Path::new(expanded.as_ref()).exists() {
                        tracing::info!("加载配置文件: {}", expanded);
                        builder = builder.add_source(File::with_name(&expanded));
                        break;
                    }
                }
            }
        }

        Ok(builder.add_source(environment).build()?.try_deserialize()?)
    }

    /// 应用类型化环境变量覆盖
    ///
    /// 只覆盖已设置的变量；设置了但无法解析的变量视为错误
    pub fn apply_env_overrides(&mut self) -> Result<(), AppConfigError> {
        use crate::env::{ai, core, database, web, EnvVar};

        if let Some(store) = core::Store::lookup()? {
            self.store = store.parse()?;
        }
        if let Some(level) = core::LogLevel::lookup()? {
            self.log_level = level;
        }

        if let Some(url) = database::Url::lookup()? {
            self.database_url = url;
        }
        if let Some(name) = database::Name::lookup()? {
            self.db_name = name;
        }
        if let Some(collection) = database::Collection::lookup()? {
            self.collection = collection;
        }

        if let Some(address) = web::BindAddress::lookup()? {
            self.bind_address = address;
        }
        if let Some(port) = web::Port::lookup()? {
            self.port = port;
        }

        if let Some(key) = ai::ApiKey::lookup()? {
            self.openai_api_key = key;
        }
        if let Some(url) = ai::BaseUrl::lookup()? {
            self.openai_base_url = url;
            tracing::info!("环境变量覆盖 API URL: {}", self.openai_base_url);
        }
        if let Some(model) = ai::Model::lookup()? {
            self.openai_model = model;
        }
        if let Some(timeout) = ai::TranslationTimeout::lookup()? {
            self.translation_timeout_secs = timeout.as_secs();
        }
        if let Some(lang) = ai::HintSourceLang::lookup()? {
            self.hint_source_lang = lang;
        }
        if let Some(lang) = ai::HintTargetLang::lookup()? {
            self.hint_target_lang = lang;
        }

        Ok(())
    }

    /// 验证配置
    pub fn validate(&self) -> Result<(), AppConfigError> {
        if self.port == 0 {
            return Err(AppConfigError::Invalid("端口不能为0".to_string()));
        }

        if self.bind_address.trim().is_empty() {
            return Err(AppConfigError::Invalid("绑定地址不能为空".to_string()));
        }

        if self.store == StoreBackend::Mongo {
            if self.database_url.trim().is_empty() {
                return Err(AppConfigError::Invalid("数据库连接字符串不能为空".to_string()));
            }
            if self.db_name.trim().is_empty() || self.collection.trim().is_empty() {
                return Err(AppConfigError::Invalid("数据库名和集合名不能为空".to_string()));
            }
        }

        if self.ai_enabled() && self.translation_timeout_secs == 0 {
            return Err(AppConfigError::Invalid("翻译超时必须大于0".to_string()));
        }

        if self.hint_source_lang.trim().is_empty() || self.hint_target_lang.trim().is_empty() {
            return Err(AppConfigError::Invalid("提示语言不能为空".to_string()));
        }

        Ok(())
    }

    /// 是否配置了AI凭据
    pub fn ai_enabled(&self) -> bool {
        !self.openai_api_key.trim().is_empty()
    }

    /// 日志过滤器：`RUST_LOG` 设置时优先，否则使用 `log_level`
    pub fn env_filter(&self) -> EnvFilter {
        self.env_filter_with(std::env::var("RUST_LOG").ok().as_deref())
    }

    fn env_filter_with(&self, rust_log: Option<&str>) -> EnvFilter {
        rust_log
            .filter(|directives| !directives.trim().is_empty())
            .and_then(|directives| EnvFilter::try_new(directives).ok())
            .unwrap_or_else(|| EnvFilter::new(&self.log_level))
    }

    /// 监听地址，例如 `0.0.0.0:8080`
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    pub fn translation_timeout(&self) -> Duration {
        Duration::from_secs(self.translation_timeout_secs)
    }

    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            hint_source_lang: self.hint_source_lang.clone(),
            hint_target_lang: self.hint_target_lang.clone(),
        }
    }

    /// 翻译客户端配置；未配置API密钥时返回 `None`
    pub fn openai_config(&self) -> Option<OpenAiConfig> {
        if !self.ai_enabled() {
            return None;
        }

        Some(OpenAiConfig {
            api_key: self.openai_api_key.trim().to_string(),
            base_url: self.openai_base_url.clone(),
            model: self.openai_model.clone(),
            timeout: self.translation_timeout(),
        })
    }

    #[cfg(feature = "web")]
    pub fn mongo_config(&self) -> crate::store::MongoStoreConfig {
        crate::store::MongoStoreConfig {
            connection_string: self.database_url.clone(),
            database_name: self.db_name.clone(),
            collection_name: self.collection.clone(),
        }
    }

    /// 打印配置摘要（隐藏敏感信息）
    pub fn log_summary(&self) {
        tracing::info!("配置摘要:");
        tracing::info!("  存储后端: {:?}", self.store);
        if self.store == StoreBackend::Mongo {
            tracing::info!("  数据库: {}/{}", self.db_name, self.collection);
        }
        tracing::info!("  监听地址: {}", self.listen_address());
        if self.ai_enabled() {
            tracing::info!(
                "  AI翻译: 已启用 (模型 {}, 超时 {}s)",
                self.openai_model,
                self.translation_timeout_secs
            );
        } else {
            tracing::info!("  AI翻译: 未配置");
        }
    }

    fn load_dotenv() {
        for env_file in ENV_FILES {
            if Path::new(env_file).exists() {
                if dotenv::from_filename(env_file).is_ok() {
                    tracing::info!("已加载环境变量文件: {}", env_file);
                    break;
                }
            }
        }
    }
}
