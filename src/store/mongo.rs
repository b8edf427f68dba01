//! # MongoDB 闪卡存储
//!
//! 闪卡保存在单独的集合中，整数ID通过 `counters` 集合原子递增分配。

use async_trait::async_trait;
use bson::{doc, DateTime, Document};
use futures::stream::TryStreamExt;
use mongodb::{
    options::{IndexOptions, ReturnDocument},
    Client, Collection, Database, IndexModel,
};
use serde::{Deserialize, Serialize};

use super::FlashcardStore;
use crate::error::{FlashcardError, FlashcardResult};
use crate::models::{Flashcard, NewFlashcard, UpdateFlashcardRequest};

/// ID计数器集合名
const COUNTERS_COLLECTION: &str = "counters";

/// MongoDB 连接配置
#[derive(Debug, Clone)]
pub struct MongoStoreConfig {
    /// MongoDB 连接字符串
    pub connection_string: String,
    /// 数据库名称
    pub database_name: String,
    /// 集合名称
    pub collection_name: String,
}

/// MongoDB中存储的闪卡文档
#[derive(Debug, Serialize, Deserialize, Clone)]
struct FlashcardDocument {
    #[serde(rename = "_id")]
    id: i64,
    question: String,
    answer: String,
    created_at: DateTime,
    updated_at: DateTime,
}

impl From<FlashcardDocument> for Flashcard {
    fn from(doc: FlashcardDocument) -> Self {
        Flashcard {
            id: doc.id,
            question: doc.question,
            answer: doc.answer,
            created_at: doc.created_at.to_chrono(),
            updated_at: doc.updated_at.to_chrono(),
        }
    }
}

impl From<mongodb::error::Error> for FlashcardError {
    fn from(error: mongodb::error::Error) -> Self {
        FlashcardError::Store(format!("MongoDB error: {}", error))
    }
}

impl From<bson::de::Error> for FlashcardError {
    fn from(error: bson::de::Error) -> Self {
        FlashcardError::Store(format!("BSON decode error: {}", error))
    }
}

/// 基于 MongoDB 的闪卡存储
pub struct MongoFlashcardStore {
    db: Database,
    collection: Collection<FlashcardDocument>,
    counters: Collection<Document>,
    collection_name: String,
}

impl MongoFlashcardStore {
    /// 连接数据库并创建存储实例
    pub async fn connect(config: &MongoStoreConfig) -> FlashcardResult<Self> {
        let client = Client::with_uri_str(&config.connection_string).await?;
        let db = client.database(&config.database_name);
        Ok(Self::new(db, &config.collection_name))
    }

    pub fn new(db: Database, collection_name: &str) -> Self {
        let collection = db.collection::<FlashcardDocument>(collection_name);
        let counters = db.collection::<Document>(COUNTERS_COLLECTION);
        Self {
            db,
            collection,
            counters,
            collection_name: collection_name.to_string(),
        }
    }

    /// 检查数据库连接
    pub async fn ping(&self) -> FlashcardResult<()> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    /// 创建数据库索引
    pub async fn ensure_indexes(&self) -> FlashcardResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(
                IndexOptions::builder()
                    .name("created_at_desc".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(index).await?;
        Ok(())
    }

    async fn next_id(&self) -> FlashcardResult<i64> {
        let counter = self
            .counters
            .find_one_and_update(
                doc! { "_id": self.collection_name.as_str() },
                doc! { "$inc": { "seq": 1_i64 } },
            )
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await?
            .ok_or_else(|| FlashcardError::store("ID计数器未返回文档"))?;

        counter
            .get_i64("seq")
            .map_err(|e| FlashcardError::store(format!("invalid counter document: {}", e)))
    }
}

#[async_trait]
impl FlashcardStore for MongoFlashcardStore {
    async fn create(&self, card: NewFlashcard) -> FlashcardResult<Flashcard> {
        let now = DateTime::now();
        let document = FlashcardDocument {
            id: self.next_id().await?,
            question: card.question,
            answer: card.answer,
            created_at: now,
            updated_at: now,
        };

        self.collection.insert_one(&document).await?;
        Ok(document.into())
    }

    async fn get_all(&self) -> FlashcardResult<Vec<Flashcard>> {
        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "created_at": -1, "_id": -1 })
            .await?;

        let documents: Vec<FlashcardDocument> = cursor.try_collect().await?;
        Ok(documents.into_iter().map(Flashcard::from).collect())
    }

    async fn get_by_id(&self, id: i64) -> FlashcardResult<Flashcard> {
        self.collection
            .find_one(doc! { "_id": id })
            .await?
            .map(Flashcard::from)
            .ok_or(FlashcardError::NotFound(id))
    }

    async fn update(&self, id: i64, request: &UpdateFlashcardRequest) -> FlashcardResult<Flashcard> {
        let mut set = doc! { "updated_at": DateTime::now() };
        if let Some(ref question) = request.question {
            set.insert("question", question.as_str());
        }
        if let Some(ref answer) = request.answer {
            set.insert("answer", answer.as_str());
        }

        self.collection
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await?
            .map(Flashcard::from)
            .ok_or(FlashcardError::NotFound(id))
    }

    async fn delete(&self, id: i64) -> FlashcardResult<()> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        if result.deleted_count == 0 {
            return Err(FlashcardError::NotFound(id));
        }
        Ok(())
    }

    async fn get_random(&self) -> FlashcardResult<Flashcard> {
        let mut cursor = self
            .collection
            .aggregate(vec![doc! { "$sample": { "size": 1 } }])
            .await?;

        match cursor.try_next().await? {
            Some(document) => {
                let document: FlashcardDocument = bson::from_document(document)?;
                Ok(document.into())
            }
            None => Err(FlashcardError::NoFlashcards),
        }
    }

    fn backend(&self) -> &'static str {
        "mongodb"
    }
}
