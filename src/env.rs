//! 统一的环境变量管理系统
//!
//! 提供类型安全、可验证的环境变量访问，每个变量自带名称、默认值和说明

use std::env;
use std::time::Duration;

use thiserror::Error;

/// 环境变量解析错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Environment variable '{variable}': {message}")]
pub struct EnvError {
    pub variable: String,
    pub message: String,
}

impl EnvError {
    fn new(variable: &str, message: impl Into<String>) -> Self {
        Self {
            variable: variable.to_string(),
            message: message.into(),
        }
    }
}

pub type EnvResult<T> = Result<T, EnvError>;

/// 环境变量访问器特性
pub trait EnvVar<T> {
    const NAME: &'static str;
    const DEFAULT: Option<T>;
    const DESCRIPTION: &'static str;

    fn parse(value: &str) -> EnvResult<T>;

    /// 仅在变量已设置时解析，未设置返回 `None`
    fn lookup() -> EnvResult<Option<T>> {
        match env::var(Self::NAME) {
            Ok(value) => Self::parse(&value).map(Some),
            Err(_) => Ok(None),
        }
    }

    fn get() -> EnvResult<T> {
        match Self::lookup()? {
            Some(value) => Ok(value),
            None => Self::DEFAULT.ok_or_else(|| {
                EnvError::new(Self::NAME, "Required environment variable not set")
            }),
        }
    }

    fn get_or_default(default: T) -> T {
        Self::get().unwrap_or(default)
    }
}

/// 核心环境变量定义
pub mod core {
    use super::*;

    /// 日志级别
    pub struct LogLevel;
    impl EnvVar<String> for LogLevel {
        const NAME: &'static str = "FLASHCARDS_LOG_LEVEL";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Log level: trace, debug, info, warn, error (default: info)";

        fn get() -> EnvResult<String> {
            Ok(Self::lookup()?.unwrap_or_else(|| "info".to_string()))
        }

        fn parse(value: &str) -> EnvResult<String> {
            match value.trim().to_lowercase().as_str() {
                level @ ("trace" | "debug" | "info" | "warn" | "error") => Ok(level.to_string()),
                _ => Err(EnvError::new(
                    Self::NAME,
                    format!("Invalid log level '{}'. Use: trace, debug, info, warn, error", value),
                )),
            }
        }
    }

    /// 存储后端
    pub struct Store;
    impl EnvVar<String> for Store {
        const NAME: &'static str = "FLASHCARDS_STORE";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Storage backend: mongo (alias mongodb), memory (alias mem) (default: mongo)";

        fn get() -> EnvResult<String> {
            Ok(Self::lookup()?.unwrap_or_else(|| "mongo".to_string()))
        }

        fn parse(value: &str) -> EnvResult<String> {
            match value.trim().to_lowercase().as_str() {
                "mongo" | "mongodb" => Ok("mongo".to_string()),
                "memory" | "mem" => Ok("memory".to_string()),
                _ => Err(EnvError::new(
                    Self::NAME,
                    format!("Invalid store '{}'. Use: mongo, memory", value),
                )),
            }
        }
    }
}

/// 数据库相关环境变量
pub mod database {
    use super::*;

    /// MongoDB连接字符串
    pub struct Url;
    impl EnvVar<String> for Url {
        const NAME: &'static str = "DB_URL";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str =
            "MongoDB connection string (default: mongodb://localhost:27017)";

        fn get() -> EnvResult<String> {
            Ok(Self::lookup()?.unwrap_or_else(|| "mongodb://localhost:27017".to_string()))
        }

        fn parse(value: &str) -> EnvResult<String> {
            let url = value.trim();
            if url.starts_with("mongodb://") || url.starts_with("mongodb+srv://") {
                Ok(url.to_string())
            } else {
                Err(EnvError::new(
                    Self::NAME,
                    "MongoDB URL must start with mongodb:// or mongodb+srv://",
                ))
            }
        }
    }

    /// 数据库名称
    pub struct Name;
    impl EnvVar<String> for Name {
        const NAME: &'static str = "FLASHCARDS_DB_NAME";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "MongoDB database name (default: flashcards)";

        fn get() -> EnvResult<String> {
            Ok(Self::lookup()?.unwrap_or_else(|| "flashcards".to_string()))
        }

        fn parse(value: &str) -> EnvResult<String> {
            parse_non_empty(value, Self::NAME, "Database name")
        }
    }

    /// 集合名称
    pub struct Collection;
    impl EnvVar<String> for Collection {
        const NAME: &'static str = "FLASHCARDS_COLLECTION";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "MongoDB collection name (default: flashcards)";

        fn get() -> EnvResult<String> {
            Ok(Self::lookup()?.unwrap_or_else(|| "flashcards".to_string()))
        }

        fn parse(value: &str) -> EnvResult<String> {
            parse_non_empty(value, Self::NAME, "Collection name")
        }
    }
}

/// Web服务器相关环境变量
pub mod web {
    use super::*;

    /// 绑定地址
    pub struct BindAddress;
    impl EnvVar<String> for BindAddress {
        const NAME: &'static str = "FLASHCARDS_BIND_ADDRESS";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Web server bind address (default: 0.0.0.0)";

        fn get() -> EnvResult<String> {
            Ok(Self::lookup()?.unwrap_or_else(|| "0.0.0.0".to_string()))
        }

        fn parse(value: &str) -> EnvResult<String> {
            parse_non_empty(value, Self::NAME, "Address")
        }
    }

    /// 端口
    pub struct Port;
    impl EnvVar<u16> for Port {
        const NAME: &'static str = "PORT";
        const DEFAULT: Option<u16> = Some(8080);
        const DESCRIPTION: &'static str = "Web server port";

        fn parse(value: &str) -> EnvResult<u16> {
            let port: u16 = value
                .trim()
                .parse()
                .map_err(|_| EnvError::new(Self::NAME, "Must be a valid port number (1-65535)"))?;

            if port == 0 {
                return Err(EnvError::new(Self::NAME, "Port must be greater than 0"));
            }

            Ok(port)
        }
    }
}

/// AI翻译相关环境变量
pub mod ai {
    use super::*;

    /// OpenAI API密钥，未设置时禁用AI功能
    pub struct ApiKey;
    impl EnvVar<String> for ApiKey {
        const NAME: &'static str = "OPENAI_API_KEY";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "OpenAI API key; AI translation and hints are disabled when unset";

        fn parse(value: &str) -> EnvResult<String> {
            Ok(value.trim().to_string())
        }
    }

    /// API基础URL
    pub struct BaseUrl;
    impl EnvVar<String> for BaseUrl {
        const NAME: &'static str = "OPENAI_BASE_URL";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str =
            "OpenAI-compatible API base URL (default: https://api.openai.com/v1)";

        fn get() -> EnvResult<String> {
            Ok(Self::lookup()?
                .unwrap_or_else(|| crate::translation::openai::DEFAULT_BASE_URL.to_string()))
        }

        fn parse(value: &str) -> EnvResult<String> {
            let url = value.trim().trim_end_matches('/');
            if url.starts_with("http://") || url.starts_with("https://") {
                Ok(url.to_string())
            } else {
                Err(EnvError::new(
                    Self::NAME,
                    "API URL must start with http:// or https://",
                ))
            }
        }
    }

    /// 模型名称
    pub struct Model;
    impl EnvVar<String> for Model {
        const NAME: &'static str = "OPENAI_MODEL";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Chat model used for translation (default: gpt-4o-mini)";

        fn get() -> EnvResult<String> {
            Ok(Self::lookup()?
                .unwrap_or_else(|| crate::translation::openai::DEFAULT_MODEL.to_string()))
        }

        fn parse(value: &str) -> EnvResult<String> {
            parse_non_empty(value, Self::NAME, "Model name")
        }
    }

    /// 单次翻译超时
    pub struct TranslationTimeout;
    impl EnvVar<Duration> for TranslationTimeout {
        const NAME: &'static str = "FLASHCARDS_TRANSLATION_TIMEOUT";
        const DEFAULT: Option<Duration> = Some(Duration::from_secs(10));
        const DESCRIPTION: &'static str = "Translation request timeout in seconds";

        fn parse(value: &str) -> EnvResult<Duration> {
            parse_positive_u64(value, Self::NAME, 1, 120).map(Duration::from_secs)
        }
    }

    /// 提示源语言
    pub struct HintSourceLang;
    impl EnvVar<String> for HintSourceLang {
        const NAME: &'static str = "FLASHCARDS_HINT_SOURCE_LANG";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Language of flashcard questions for hints (default: en)";

        fn get() -> EnvResult<String> {
            Ok(Self::lookup()?.unwrap_or_else(|| "en".to_string()))
        }

        fn parse(value: &str) -> EnvResult<String> {
            parse_lang_code(value, Self::NAME)
        }
    }

    /// 提示目标语言
    pub struct HintTargetLang;
    impl EnvVar<String> for HintTargetLang {
        const NAME: &'static str = "FLASHCARDS_HINT_TARGET_LANG";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Default hint language when the request has none (default: el)";

        fn get() -> EnvResult<String> {
            Ok(Self::lookup()?.unwrap_or_else(|| "el".to_string()))
        }

        fn parse(value: &str) -> EnvResult<String> {
            parse_lang_code(value, Self::NAME)
        }
    }
}

/// 辅助函数
fn parse_non_empty(value: &str, var_name: &str, what: &str) -> EnvResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(EnvError::new(var_name, format!("{} cannot be empty", what)));
    }
    Ok(value.to_string())
}

fn parse_positive_u64(value: &str, var_name: &str, min: u64, max: u64) -> EnvResult<u64> {
    let num: u64 = value
        .trim()
        .parse()
        .map_err(|_| EnvError::new(var_name, "Must be a valid positive number"))?;

    if num < min {
        return Err(EnvError::new(var_name, format!("Value {} is below minimum {}", num, min)));
    }

    if num > max {
        return Err(EnvError::new(var_name, format!("Value {} exceeds maximum {}", num, max)));
    }

    Ok(num)
}

fn parse_lang_code(value: &str, var_name: &str) -> EnvResult<String> {
    let lang = value.trim().to_lowercase();
    let valid = (2..=8).contains(&lang.len())
        && lang.chars().all(|c| c.is_ascii_alphabetic() || c == '-');
    if !valid {
        return Err(EnvError::new(
            var_name,
            "Language code must be 2-8 letters, e.g. 'en' or 'pt-br'",
        ));
    }
    Ok(lang)
}

/// 环境变量文档生成器
pub fn generate_env_docs() -> String {
    // 字符串变量的默认值写在描述里，`DEFAULT` 为 `None`
    fn entry<T: std::fmt::Debug, V: EnvVar<T>>(docs: &mut String) {
        match V::DEFAULT {
            Some(default) => docs.push_str(&format!(
                "- `{}`: {} (default: {:?})\n",
                V::NAME,
                V::DESCRIPTION,
                default
            )),
            None => docs.push_str(&format!("- `{}`: {}\n", V::NAME, V::DESCRIPTION)),
        }
    }

    let mut docs = String::new();
    docs.push_str("# Environment Variables Documentation\n\n");

    docs.push_str("## Core Configuration\n\n");
    entry::<String, core::LogLevel>(&mut docs);
    entry::<String, core::Store>(&mut docs);

    docs.push_str("\n## Database Configuration\n\n");
    entry::<String, database::Url>(&mut docs);
    entry::<String, database::Name>(&mut docs);
    entry::<String, database::Collection>(&mut docs);

    docs.push_str("\n## Web Server Configuration\n\n");
    entry::<String, web::BindAddress>(&mut docs);
    entry::<u16, web::Port>(&mut docs);

    docs.push_str("\n## AI Configuration\n\n");
    entry::<String, ai::ApiKey>(&mut docs);
    entry::<String, ai::BaseUrl>(&mut docs);
    entry::<String, ai::Model>(&mut docs);
    entry::<Duration, ai::TranslationTimeout>(&mut docs);
    entry::<String, ai::HintSourceLang>(&mut docs);
    entry::<String, ai::HintTargetLang>(&mut docs);

    docs
}
