//! 闪卡数据类型定义

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 闪卡
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 创建闪卡请求
///
/// `question` 和 `answer` 可以有一个为空，此时需要提供两个语言代码以便翻译补全
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CreateFlashcardRequest {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
    /// 问题语言，例如 "en"
    #[serde(default)]
    pub question_lang: String,
    /// 答案语言，例如 "el"
    #[serde(default)]
    pub answer_lang: String,
}

impl CreateFlashcardRequest {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            ..Default::default()
        }
    }

    pub fn with_langs(mut self, question_lang: impl Into<String>, answer_lang: impl Into<String>) -> Self {
        self.question_lang = question_lang.into();
        self.answer_lang = answer_lang.into();
        self
    }
}

/// 更新闪卡请求，未设置的字段保持原值
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UpdateFlashcardRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
}

impl UpdateFlashcardRequest {
    pub fn is_empty(&self) -> bool {
        self.question.is_none() && self.answer.is_none()
    }
}

/// 已完成校验、可直接持久化的问答对
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFlashcard {
    pub question: String,
    pub answer: String,
}

/// 由AI翻译补全的字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslatedField {
    Question,
    Answer,
}

impl TranslatedField {
    pub fn as_str(&self) -> &'static str {
        match self {
            TranslatedField::Question => "question",
            TranslatedField::Answer => "answer",
        }
    }
}

impl std::fmt::Display for TranslatedField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 创建结果：闪卡本身以及是否使用了AI翻译
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOutcome {
    pub flashcard: Flashcard,
    #[serde(rename = "ai_translation_used")]
    pub ai_used: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translated_field: Option<TranslatedField>,
}

/// 随机闪卡响应，附带可选的AI提示
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomFlashcardResponse {
    pub flashcard: Flashcard,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_hint: Option<String>,
}
