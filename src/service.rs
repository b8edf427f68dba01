//! # 闪卡服务层
//!
//! 编排闪卡的创建、查询、更新和删除：
//!
//! - 创建时判断是否需要AI翻译补全缺失的一侧
//! - 更新前校验请求
//! - 为随机闪卡生成尽力而为的AI提示
//!
//! 存储和翻译器都通过 trait 注入；翻译器缺失即表示AI功能关闭。

use std::sync::Arc;

use crate::error::{FlashcardError, FlashcardResult};
use crate::models::{
    CreateFlashcardRequest, CreateOutcome, Flashcard, NewFlashcard, TranslatedField,
    UpdateFlashcardRequest,
};
use crate::store::FlashcardStore;
use crate::translation::Translator;

/// 默认提示源语言
pub const DEFAULT_HINT_SOURCE_LANG: &str = "en";
/// 默认提示目标语言
pub const DEFAULT_HINT_TARGET_LANG: &str = "el";

pub const MSG_BOTH_EMPTY: &str = "Both question and answer cannot be empty";
pub const MSG_LANGS_REQUIRED: &str =
    "Both question_lang and answer_lang are required when translation is needed";
pub const MSG_AI_UNAVAILABLE: &str = "AI translation not available";
pub const MSG_NO_UPDATE_FIELDS: &str = "at least one field must be provided for update";

/// 服务配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// 生成提示时问题所用的语言
    pub hint_source_lang: String,
    /// 请求未指定语言时的提示目标语言
    pub hint_target_lang: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            hint_source_lang: DEFAULT_HINT_SOURCE_LANG.to_string(),
            hint_target_lang: DEFAULT_HINT_TARGET_LANG.to_string(),
        }
    }
}

/// 创建请求的处理方案，由请求一次性分类得到
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreatePlan {
    BothProvided { question: String, answer: String },
    NeedsAnswer { question: String },
    NeedsQuestion { answer: String },
    BothMissing,
}

impl CreatePlan {
    pub fn classify(request: &CreateFlashcardRequest) -> Self {
        let question = request.question.trim();
        let answer = request.answer.trim();

        match (question.is_empty(), answer.is_empty()) {
            (false, false) => CreatePlan::BothProvided {
                question: question.to_string(),
                answer: answer.to_string(),
            },
            (false, true) => CreatePlan::NeedsAnswer {
                question: question.to_string(),
            },
            (true, false) => CreatePlan::NeedsQuestion {
                answer: answer.to_string(),
            },
            (true, true) => CreatePlan::BothMissing,
        }
    }
}

/// 闪卡服务
#[derive(Clone)]
pub struct FlashcardService {
    store: Arc<dyn FlashcardStore>,
    translator: Option<Arc<dyn Translator>>,
    config: ServiceConfig,
}

impl FlashcardService {
    pub fn new(
        store: Arc<dyn FlashcardStore>,
        translator: Option<Arc<dyn Translator>>,
        config: ServiceConfig,
    ) -> Self {
        match translator {
            Some(ref t) => tracing::info!(translator = t.name(), "AI翻译已启用"),
            None => tracing::warn!("AI翻译和提示功能已禁用：未配置翻译器"),
        }

        Self {
            store,
            translator,
            config,
        }
    }

    pub fn ai_enabled(&self) -> bool {
        self.translator.is_some()
    }

    pub fn store_backend(&self) -> &'static str {
        self.store.backend()
    }

    /// 创建闪卡；缺失的一侧在持久化之前通过翻译补全
    pub async fn create(&self, request: &CreateFlashcardRequest) -> FlashcardResult<CreateOutcome> {
        let (card, translated_field) = match CreatePlan::classify(request) {
            CreatePlan::BothMissing => return Err(FlashcardError::validation(MSG_BOTH_EMPTY)),
            CreatePlan::BothProvided { question, answer } => (NewFlashcard { question, answer }, None),
            CreatePlan::NeedsAnswer { question } => {
                let answer = self
                    .translate_missing(request, &question, TranslatedField::Answer)
                    .await?;
                (NewFlashcard { question, answer }, Some(TranslatedField::Answer))
            }
            CreatePlan::NeedsQuestion { answer } => {
                let question = self
                    .translate_missing(request, &answer, TranslatedField::Question)
                    .await?;
                (NewFlashcard { question, answer }, Some(TranslatedField::Question))
            }
        };

        let flashcard = self.store.create(card).await?;
        metrics::counter!("flashcards_created_total").increment(1);

        if let Some(field) = translated_field {
            tracing::info!(id = flashcard.id, field = %field, "闪卡已通过AI翻译补全");
        }

        Ok(CreateOutcome {
            flashcard,
            ai_used: translated_field.is_some(),
            translated_field,
        })
    }

    /// 翻译已有的一侧，返回缺失字段的内容
    async fn translate_missing(
        &self,
        request: &CreateFlashcardRequest,
        text: &str,
        missing: TranslatedField,
    ) -> FlashcardResult<String> {
        let question_lang = request.question_lang.trim();
        let answer_lang = request.answer_lang.trim();
        if question_lang.is_empty() || answer_lang.is_empty() {
            return Err(FlashcardError::validation(MSG_LANGS_REQUIRED));
        }

        let translator = match self.translator {
            Some(ref translator) => translator,
            None => return Err(FlashcardError::Configuration(MSG_AI_UNAVAILABLE.to_string())),
        };

        let (source_lang, target_lang, context) = match missing {
            TranslatedField::Answer => (question_lang, answer_lang, "failed to translate question to answer"),
            TranslatedField::Question => (answer_lang, question_lang, "failed to translate answer to question"),
        };

        let result = translator
            .translate(text, source_lang, target_lang)
            .await
            .and_then(|translated| {
                let translated = translated.trim().to_string();
                if translated.is_empty() {
                    Err(crate::translation::TranslationError::Failed(
                        "empty translation".to_string(),
                    ))
                } else {
                    Ok(translated)
                }
            });

        match result {
            Ok(translated) => {
                metrics::counter!("flashcards_ai_translations_total", "field" => missing.as_str())
                    .increment(1);
                Ok(translated)
            }
            Err(source) => {
                metrics::counter!("flashcards_translation_failures_total").increment(1);
                tracing::warn!(source_lang, target_lang, "翻译失败: {}", source);
                Err(FlashcardError::Translation {
                    context: context.to_string(),
                    source,
                })
            }
        }
    }

    pub async fn get_all(&self) -> FlashcardResult<Vec<Flashcard>> {
        self.store.get_all().await
    }

    pub async fn get_by_id(&self, id: i64) -> FlashcardResult<Flashcard> {
        self.store.get_by_id(id).await
    }

    /// 更新闪卡，至少需要设置一个字段，且设置的字段不能为空
    pub async fn update(&self, id: i64, request: &UpdateFlashcardRequest) -> FlashcardResult<Flashcard> {
        if request.is_empty() {
            return Err(FlashcardError::validation(MSG_NO_UPDATE_FIELDS));
        }

        let normalized = UpdateFlashcardRequest {
            question: normalize_update_field("question", request.question.as_deref())?,
            answer: normalize_update_field("answer", request.answer.as_deref())?,
        };

        self.store.update(id, &normalized).await
    }

    pub async fn delete(&self, id: i64) -> FlashcardResult<()> {
        self.store.delete(id).await
    }

    pub async fn get_random(&self) -> FlashcardResult<Flashcard> {
        self.store.get_random().await
    }

    /// 生成AI提示：把问题翻译为目标语言
    ///
    /// 尽力而为，任何失败都返回 `None`，不会影响外层请求
    pub async fn generate_hint(&self, flashcard: &Flashcard, lang: &str) -> Option<String> {
        let translator = match self.translator {
            Some(ref translator) => translator,
            None => {
                tracing::debug!("AI提示不可用：未配置翻译器");
                metrics::counter!("flashcards_hints_total", "outcome" => "unavailable").increment(1);
                return None;
            }
        };

        let target_lang = match lang.trim() {
            "" => self.config.hint_target_lang.as_str(),
            lang => lang,
        };

        match translator
            .translate(&flashcard.question, &self.config.hint_source_lang, target_lang)
            .await
        {
            Ok(hint) if !hint.trim().is_empty() => {
                metrics::counter!("flashcards_hints_total", "outcome" => "generated").increment(1);
                Some(hint.trim().to_string())
            }
            Ok(_) => {
                tracing::warn!(id = flashcard.id, "AI提示为空，已忽略");
                metrics::counter!("flashcards_hints_total", "outcome" => "failed").increment(1);
                None
            }
            Err(e) => {
                tracing::warn!(id = flashcard.id, target_lang, "AI提示生成失败: {}", e);
                metrics::counter!("flashcards_hints_total", "outcome" => "failed").increment(1);
                None
            }
        }
    }
}

fn normalize_update_field(name: &str, value: Option<&str>) -> FlashcardResult<Option<String>> {
    match value.map(str::trim) {
        None => Ok(None),
        Some("") => Err(FlashcardError::validation(format!("{} cannot be empty", name))),
        Some(value) => Ok(Some(value.to_string())),
    }
}
