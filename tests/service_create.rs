//! 闪卡创建流程集成测试
//!
//! 覆盖翻译补全的各个分支：直接保存、补全答案、补全问题以及各类失败

use flashcards::models::{CreateFlashcardRequest, TranslatedField};
use flashcards::FlashcardError;

#[allow(dead_code)]
mod common {
    include!("common/mod.rs");
}

use common::{RecordingTranslator, TestEnvironment};

#[tokio::test]
async fn test_both_fields_provided_skips_translation() {
    let env = TestEnvironment::default();

    let outcome = env
        .service
        .create(&CreateFlashcardRequest::new("hello", "γεια σας"))
        .await
        .unwrap();

    assert_eq!(outcome.flashcard.question, "hello");
    assert_eq!(outcome.flashcard.answer, "γεια σας");
    assert!(!outcome.ai_used);
    assert!(outcome.translated_field.is_none());
    assert_eq!(env.translator_calls(), 0);
    assert_eq!(env.store.create_count(), 1);
}

#[tokio::test]
async fn test_both_fields_provided_without_ai() {
    let env = TestEnvironment::without_translator();

    let outcome = env
        .service
        .create(&CreateFlashcardRequest::new("goodbye", "αντίο"))
        .await
        .unwrap();

    assert!(!outcome.ai_used);
    assert_eq!(outcome.flashcard.answer, "αντίο");
}

#[tokio::test]
async fn test_missing_answer_is_translated() {
    let env = TestEnvironment::default();

    let request = CreateFlashcardRequest::new("hello", "").with_langs("en", "el");
    let outcome = env.service.create(&request).await.unwrap();

    assert_eq!(outcome.flashcard.question, "hello");
    assert_eq!(outcome.flashcard.answer, "γεια σας");
    assert!(outcome.ai_used);
    assert_eq!(outcome.translated_field, Some(TranslatedField::Answer));

    let translator = env.translator.as_ref().unwrap();
    assert_eq!(
        translator.calls(),
        vec![("hello".to_string(), "en".to_string(), "el".to_string())]
    );

    // 持久化的是翻译后的记录
    let stored = env.service.get_by_id(outcome.flashcard.id).await.unwrap();
    assert_eq!(stored.answer, "γεια σας");
}

#[tokio::test]
async fn test_missing_question_is_translated_in_reverse() {
    let env = TestEnvironment::default();

    let request = CreateFlashcardRequest::new("", "αντίο").with_langs("en", "el");
    let outcome = env.service.create(&request).await.unwrap();

    assert_eq!(outcome.flashcard.question, "goodbye");
    assert_eq!(outcome.flashcard.answer, "αντίο");
    assert_eq!(outcome.translated_field, Some(TranslatedField::Question));

    let translator = env.translator.as_ref().unwrap();
    assert_eq!(
        translator.calls(),
        vec![("αντίο".to_string(), "el".to_string(), "en".to_string())]
    );
}

#[tokio::test]
async fn test_both_empty_is_rejected_before_any_call() {
    let env = TestEnvironment::default();

    let request = CreateFlashcardRequest::new("  ", "").with_langs("en", "el");
    let err = env.service.create(&request).await.unwrap_err();

    assert!(matches!(err, FlashcardError::Validation(_)));
    assert_eq!(err.to_string(), "Both question and answer cannot be empty");
    assert_eq!(env.translator_calls(), 0);
    assert_eq!(env.store.create_count(), 0);
}

#[tokio::test]
async fn test_missing_language_hints_are_rejected() {
    let env = TestEnvironment::default();

    for request in [
        CreateFlashcardRequest::new("hello", ""),
        CreateFlashcardRequest::new("hello", "").with_langs("en", ""),
        CreateFlashcardRequest::new("", "γεια σας").with_langs("", "el"),
    ] {
        let err = env.service.create(&request).await.unwrap_err();
        assert!(matches!(err, FlashcardError::Validation(_)));
        assert_eq!(
            err.to_string(),
            "Both question_lang and answer_lang are required when translation is needed"
        );
    }

    assert_eq!(env.translator_calls(), 0);
    assert_eq!(env.store.create_count(), 0);
}

#[tokio::test]
async fn test_translation_needed_without_ai_is_configuration_error() {
    let env = TestEnvironment::without_translator();

    let request = CreateFlashcardRequest::new("hello", "").with_langs("en", "el");
    let err = env.service.create(&request).await.unwrap_err();

    assert!(matches!(err, FlashcardError::Configuration(_)));
    assert_eq!(err.to_string(), "AI translation not available");
    assert_eq!(env.store.create_count(), 0);
}

#[tokio::test]
async fn test_language_hints_checked_before_ai_availability() {
    let env = TestEnvironment::without_translator();

    let err = env
        .service
        .create(&CreateFlashcardRequest::new("hello", ""))
        .await
        .unwrap_err();

    assert!(matches!(err, FlashcardError::Validation(_)));
}

#[tokio::test]
async fn test_translation_failure_is_wrapped_and_nothing_is_stored() {
    let env = TestEnvironment::with_translator(RecordingTranslator::failing());

    let request = CreateFlashcardRequest::new("hello", "").with_langs("en", "el");
    let err = env.service.create(&request).await.unwrap_err();

    assert!(matches!(err, FlashcardError::Translation { .. }));
    assert!(err
        .to_string()
        .starts_with("failed to translate question to answer"));
    assert_eq!(env.translator_calls(), 1);
    assert_eq!(env.store.create_count(), 0);

    let reverse = CreateFlashcardRequest::new("", "γεια σας").with_langs("en", "el");
    let err = env.service.create(&reverse).await.unwrap_err();
    assert!(err
        .to_string()
        .starts_with("failed to translate answer to question"));
}

#[tokio::test]
async fn test_blank_translation_counts_as_failure() {
    let env = TestEnvironment::with_translator(RecordingTranslator::blank());

    let request = CreateFlashcardRequest::new("hello", "").with_langs("en", "el");
    let err = env.service.create(&request).await.unwrap_err();

    assert!(matches!(err, FlashcardError::Translation { .. }));
    assert_eq!(env.store.create_count(), 0);
}

#[tokio::test]
async fn test_fields_are_trimmed_before_storing() {
    let env = TestEnvironment::default();

    let request = CreateFlashcardRequest::new("  hello ", "").with_langs(" en ", "el");
    let outcome = env.service.create(&request).await.unwrap();

    assert_eq!(outcome.flashcard.question, "hello");
    assert_eq!(outcome.flashcard.answer, "γεια σας");
}

#[tokio::test]
async fn test_both_provided_stores_trimmed_text() {
    let env = TestEnvironment::default();

    let outcome = env
        .service
        .create(&CreateFlashcardRequest::new("\t good  morning \n", "  καλημέρα "))
        .await
        .unwrap();

    assert_eq!(outcome.flashcard.question, "good  morning");
    assert_eq!(outcome.flashcard.answer, "καλημέρα");
    assert!(!outcome.ai_used);
    assert_eq!(env.translator_calls(), 0);

    let stored = env.service.get_by_id(outcome.flashcard.id).await.unwrap();
    assert_eq!(stored.question, "good  morning");
    assert_eq!(stored.answer, "καλημέρα");
}
