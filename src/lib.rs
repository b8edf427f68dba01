//! # Flashcards Library
//!
//! 闪卡服务：问答对的增删改查，以及在一侧缺失时通过AI翻译补全。
//!
//! ## 模块组织
//!
//! - `models` - 闪卡及请求/响应数据类型
//! - `error` - 统一错误类型
//! - `service` - 闪卡服务，编排存储和翻译
//! - `store` - 存储抽象及内存、MongoDB 实现
//! - `translation` - 翻译器抽象及 OpenAI 实现
//! - `env` / `config` - 环境变量与分层配置
//! - `web` - HTTP 服务器（可选）

pub mod config;
pub mod env;
pub mod error;
pub mod models;
pub mod service;
pub mod store;
pub mod translation;
#[cfg(feature = "web")]
pub mod web;

pub use error::{FlashcardError, FlashcardResult};
pub use models::*;
pub use service::{CreatePlan, FlashcardService, ServiceConfig};
