//! # 闪卡存储
//!
//! 持久化闪卡记录的抽象。存储负责分配ID和维护时间戳；
//! 服务层不缓存任何记录。
//!
//! ## 实现
//!
//! - `memory` - 进程内存储，用于测试和本地开发
//! - `mongo` - 基于 MongoDB 的生产存储（需要 `web` feature）

pub mod memory;
#[cfg(feature = "web")]
pub mod mongo;

use async_trait::async_trait;

use crate::error::FlashcardResult;
use crate::models::{Flashcard, NewFlashcard, UpdateFlashcardRequest};

pub use memory::MemoryFlashcardStore;
#[cfg(feature = "web")]
pub use mongo::{MongoFlashcardStore, MongoStoreConfig};

#[async_trait]
pub trait FlashcardStore: Send + Sync {
    /// 持久化一张新闪卡，返回带有ID和时间戳的记录
    async fn create(&self, card: NewFlashcard) -> FlashcardResult<Flashcard>;

    /// 按创建时间倒序返回全部闪卡；没有记录时返回空列表
    async fn get_all(&self) -> FlashcardResult<Vec<Flashcard>>;

    /// 不存在时返回 `FlashcardError::NotFound`
    async fn get_by_id(&self, id: i64) -> FlashcardResult<Flashcard>;

    /// 只更新请求中设置的字段并刷新 `updated_at`
    async fn update(&self, id: i64, request: &UpdateFlashcardRequest) -> FlashcardResult<Flashcard>;

    /// 没有删除任何记录时返回 `FlashcardError::NotFound`
    async fn delete(&self, id: i64) -> FlashcardResult<()>;

    /// 均匀随机返回一张闪卡；存储为空时返回 `FlashcardError::NoFlashcards`
    async fn get_random(&self) -> FlashcardResult<Flashcard>;

    /// 后端名称，用于日志和健康检查
    fn backend(&self) -> &'static str;
}
