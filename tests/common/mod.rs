// 集成测试公共模块
//
// 提供翻译器替身、带计数的存储包装以及服务构建辅助函数

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use flashcards::models::{Flashcard, NewFlashcard, UpdateFlashcardRequest};
use flashcards::service::{FlashcardService, ServiceConfig};
use flashcards::store::{FlashcardStore, MemoryFlashcardStore};
use flashcards::translation::{TranslationError, TranslationResult, Translator};
use flashcards::{FlashcardError, FlashcardResult};

/// 记录调用的翻译器替身
///
/// 按 (文本, 源语言, 目标语言) 查表翻译，未命中时返回 `[target] text`
pub struct RecordingTranslator {
    mappings: HashMap<(String, String, String), String>,
    calls: Mutex<Vec<(String, String, String)>>,
    fail: AtomicBool,
    empty: AtomicBool,
}

impl RecordingTranslator {
    pub fn new() -> Self {
        let mut mappings = HashMap::new();
        for (text, source, target, translated) in [
            ("hello", "en", "el", "γεια σας"),
            ("goodbye", "en", "el", "αντίο"),
            ("γεια σας", "el", "en", "hello"),
            ("αντίο", "el", "en", "goodbye"),
        ] {
            mappings.insert(
                (text.to_string(), source.to_string(), target.to_string()),
                translated.to_string(),
            );
        }

        Self {
            mappings,
            calls: Mutex::new(Vec::new()),
            fail: AtomicBool::new(false),
            empty: AtomicBool::new(false),
        }
    }

    /// 之后的调用全部失败
    pub fn failing() -> Self {
        let translator = Self::new();
        translator.fail.store(true, Ordering::SeqCst);
        translator
    }

    /// 之后的调用全部返回空白文本
    pub fn blank() -> Self {
        let translator = Self::new();
        translator.empty.store(true, Ordering::SeqCst);
        translator
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<(String, String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Translator for RecordingTranslator {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> TranslationResult<String> {
        self.calls.lock().unwrap().push((
            text.to_string(),
            source_lang.to_string(),
            target_lang.to_string(),
        ));

        if self.fail.load(Ordering::SeqCst) {
            return Err(TranslationError::Failed("provider unavailable".to_string()));
        }
        if self.empty.load(Ordering::SeqCst) {
            return Ok("   ".to_string());
        }

        let key = (
            text.to_string(),
            source_lang.to_string(),
            target_lang.to_string(),
        );
        Ok(self
            .mappings
            .get(&key)
            .cloned()
            .unwrap_or_else(|| format!("[{}] {}", target_lang, text)))
    }
}

/// 记录写入次数的存储包装
pub struct CountingStore {
    inner: MemoryFlashcardStore,
    creates: AtomicUsize,
    updates: AtomicUsize,
}

impl CountingStore {
    pub fn new() -> Self {
        Self {
            inner: MemoryFlashcardStore::new(),
            creates: AtomicUsize::new(0),
            updates: AtomicUsize::new(0),
        }
    }

    pub fn create_count(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    pub fn update_count(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FlashcardStore for CountingStore {
    async fn create(&self, card: NewFlashcard) -> FlashcardResult<Flashcard> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        self.inner.create(card).await
    }

    async fn get_all(&self) -> FlashcardResult<Vec<Flashcard>> {
        self.inner.get_all().await
    }

    async fn get_by_id(&self, id: i64) -> FlashcardResult<Flashcard> {
        self.inner.get_by_id(id).await
    }

    async fn update(&self, id: i64, request: &UpdateFlashcardRequest) -> FlashcardResult<Flashcard> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        self.inner.update(id, request).await
    }

    async fn delete(&self, id: i64) -> FlashcardResult<()> {
        self.inner.delete(id).await
    }

    async fn get_random(&self) -> FlashcardResult<Flashcard> {
        self.inner.get_random().await
    }

    fn backend(&self) -> &'static str {
        "counting"
    }
}

/// 所有操作都失败的存储，错误信息包含内部地址
pub struct FailingStore;

pub const FAILING_STORE_DETAIL: &str = "connection refused by 10.0.0.5:27017";

#[async_trait]
impl FlashcardStore for FailingStore {
    async fn create(&self, _card: NewFlashcard) -> FlashcardResult<Flashcard> {
        Err(FlashcardError::store(FAILING_STORE_DETAIL))
    }

    async fn get_all(&self) -> FlashcardResult<Vec<Flashcard>> {
        Err(FlashcardError::store(FAILING_STORE_DETAIL))
    }

    async fn get_by_id(&self, _id: i64) -> FlashcardResult<Flashcard> {
        Err(FlashcardError::store(FAILING_STORE_DETAIL))
    }

    async fn update(&self, _id: i64, _request: &UpdateFlashcardRequest) -> FlashcardResult<Flashcard> {
        Err(FlashcardError::store(FAILING_STORE_DETAIL))
    }

    async fn delete(&self, _id: i64) -> FlashcardResult<()> {
        Err(FlashcardError::store(FAILING_STORE_DETAIL))
    }

    async fn get_random(&self) -> FlashcardResult<Flashcard> {
        Err(FlashcardError::store(FAILING_STORE_DETAIL))
    }

    fn backend(&self) -> &'static str {
        "failing"
    }
}

/// 存储不可用时的服务
pub fn failing_store_service() -> FlashcardService {
    FlashcardService::new(
        Arc::new(FailingStore),
        Some(Arc::new(RecordingTranslator::new()) as Arc<dyn Translator>),
        ServiceConfig::default(),
    )
}

/// 测试环境：服务及其依赖的句柄
pub struct TestEnvironment {
    pub service: FlashcardService,
    pub store: Arc<CountingStore>,
    pub translator: Option<Arc<RecordingTranslator>>,
}

impl TestEnvironment {
    /// 带AI翻译的环境
    pub fn with_translator(translator: RecordingTranslator) -> Self {
        let store = Arc::new(CountingStore::new());
        let translator = Arc::new(translator);
        let service = FlashcardService::new(
            store.clone(),
            Some(translator.clone() as Arc<dyn Translator>),
            ServiceConfig::default(),
        );

        Self {
            service,
            store,
            translator: Some(translator),
        }
    }

    /// 未配置AI的环境
    pub fn without_translator() -> Self {
        let store = Arc::new(CountingStore::new());
        let service = FlashcardService::new(store.clone(), None, ServiceConfig::default());

        Self {
            service,
            store,
            translator: None,
        }
    }

    pub fn translator_calls(&self) -> usize {
        self.translator
            .as_ref()
            .map(|t| t.call_count())
            .unwrap_or(0)
    }
}

impl Default for TestEnvironment {
    fn default() -> Self {
        Self::with_translator(RecordingTranslator::new())
    }
}
