//! 进程内闪卡存储

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use tokio::sync::RwLock;

use super::FlashcardStore;
use crate::error::{FlashcardError, FlashcardResult};
use crate::models::{Flashcard, NewFlashcard, UpdateFlashcardRequest};

#[derive(Default)]
struct Inner {
    next_id: i64,
    cards: BTreeMap<i64, Flashcard>,
}

/// 基于 `RwLock<BTreeMap>` 的存储，ID 从 1 开始单调递增且不复用
#[derive(Default)]
pub struct MemoryFlashcardStore {
    inner: RwLock<Inner>,
}

impl MemoryFlashcardStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FlashcardStore for MemoryFlashcardStore {
    async fn create(&self, card: NewFlashcard) -> FlashcardResult<Flashcard> {
        let mut inner = self.inner.write().await;
        inner.next_id += 1;

        let now = Utc::now();
        let flashcard = Flashcard {
            id: inner.next_id,
            question: card.question,
            answer: card.answer,
            created_at: now,
            updated_at: now,
        };
        inner.cards.insert(flashcard.id, flashcard.clone());

        Ok(flashcard)
    }

    async fn get_all(&self) -> FlashcardResult<Vec<Flashcard>> {
        let inner = self.inner.read().await;
        let mut cards: Vec<Flashcard> = inner.cards.values().cloned().collect();
        cards.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(cards)
    }

    async fn get_by_id(&self, id: i64) -> FlashcardResult<Flashcard> {
        self.inner
            .read()
            .await
            .cards
            .get(&id)
            .cloned()
            .ok_or(FlashcardError::NotFound(id))
    }

    async fn update(&self, id: i64, request: &UpdateFlashcardRequest) -> FlashcardResult<Flashcard> {
        let mut inner = self.inner.write().await;
        let card = inner.cards.get_mut(&id).ok_or(FlashcardError::NotFound(id))?;

        if let Some(ref question) = request.question {
            card.question = question.clone();
        }
        if let Some(ref answer) = request.answer {
            card.answer = answer.clone();
        }
        // 保证同一毫秒内的连续更新也能推进 updated_at
        let now = Utc::now();
        card.updated_at = if now > card.updated_at {
            now
        } else {
            card.updated_at + chrono::Duration::microseconds(1)
        };

        Ok(card.clone())
    }

    async fn delete(&self, id: i64) -> FlashcardResult<()> {
        self.inner
            .write()
            .await
            .cards
            .remove(&id)
            .map(|_| ())
            .ok_or(FlashcardError::NotFound(id))
    }

    async fn get_random(&self) -> FlashcardResult<Flashcard> {
        let inner = self.inner.read().await;
        if inner.cards.is_empty() {
            return Err(FlashcardError::NoFlashcards);
        }

        let index = rand::rng().random_range(0..inner.cards.len());
        inner
            .cards
            .values()
            .nth(index)
            .cloned()
            .ok_or(FlashcardError::NoFlashcards)
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
