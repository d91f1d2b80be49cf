//! Translation request handler: validate → detect → translate.

use crate::detection::{DetectedLanguage, LanguageDetector};
use crate::error::TranslateError;
use crate::i18n::{Language, TranslationValidator};
use crate::translation::{Translator, AUTO_SOURCE};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// One user submission.
#[derive(Debug, Clone, Deserialize)]
pub struct TranslationRequest {
    pub text: String,
    pub target: String,
    /// Explicit source language; `None` or `"auto"` uses the detected language.
    #[serde(default)]
    pub source: Option<String>,
}

impl TranslationRequest {
    pub fn new(text: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            target: target.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// Everything the presentation layer shows after a successful request.
#[derive(Debug, Clone, Serialize)]
pub struct TranslationOutcome {
    pub detected_language: DetectedLanguage,
    /// Source language code the translation service was asked to use
    pub source_language: String,
    pub target_language: Language,
    pub translated_text: String,
}

/// Orchestrates one detect-then-translate cycle per request.
///
/// Holds no per-request state; a single instance is shared by all requests.
pub struct TranslationHandler {
    detector: Arc<dyn LanguageDetector>,
    translator: Arc<dyn Translator>,
}

impl TranslationHandler {
    pub fn new(detector: Arc<dyn LanguageDetector>, translator: Arc<dyn Translator>) -> Self {
        Self {
            detector,
            translator,
        }
    }

    /// Run the full pipeline for one request.
    ///
    /// Input is validated before any service is called, so empty text and
    /// unsupported languages never reach the detector or the translator.
    pub async fn handle(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslationOutcome, TranslateError> {
        let text = non_empty(&request.text)?;
        let target = parse_language(&request.target)?;
        let explicit_source = match request.source.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(code) if code.eq_ignore_ascii_case(AUTO_SOURCE) => None,
            Some(code) => Some(parse_language(code)?),
        };

        let detected = self.detector.detect(text)?;
        info!(
            "Detected {} ({:.2}, reliable: {}) for {} chars, target {}",
            detected.code,
            detected.confidence,
            detected.reliable,
            text.chars().count(),
            target.code()
        );

        // An unreliable guess is shown to the user but not forced on the service
        let source = match explicit_source {
            Some(language) => language.code().to_string(),
            None if detected.reliable => detected.code.clone(),
            None => AUTO_SOURCE.to_string(),
        };

        if (explicit_source.is_some() || detected.reliable) && source == target.code() {
            info!("Source and target are both {}, skipping translation", source);
            return Ok(TranslationOutcome {
                detected_language: detected,
                source_language: source,
                target_language: target,
                translated_text: request.text.clone(),
            });
        }

        let translated = self
            .translator
            .translate(&request.text, &source, target)
            .await
            .map_err(|e| {
                warn!("Translation {} -> {} failed: {}", source, target.code(), e);
                e
            })?;

        let validation = TranslationValidator::validate(&request.text, &translated);
        if validation.has_warnings() {
            warn!(
                "Translation validation warnings for {}: {:?}",
                target, validation.warnings
            );
        }
        if validation.has_errors() {
            warn!(
                "Translation validation errors for {}: {:?}",
                target, validation.errors
            );
        }

        Ok(TranslationOutcome {
            detected_language: detected,
            source_language: source,
            target_language: target,
            translated_text: translated,
        })
    }

    /// Detect the language of `text` without translating it.
    pub fn detect(&self, text: &str) -> Result<DetectedLanguage, TranslateError> {
        let text = non_empty(text)?;
        Ok(self.detector.detect(text)?)
    }
}

fn non_empty(text: &str) -> Result<&str, TranslateError> {
    if text.trim().is_empty() {
        return Err(TranslateError::EmptyInput);
    }
    Ok(text)
}

fn parse_language(code: &str) -> Result<Language, TranslateError> {
    Language::from_code(code).map_err(|_| TranslateError::UnsupportedLanguage(code.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::LinguaDetector;
    use crate::error::{DetectionError, ServiceError};
    use async_trait::async_trait;
    use proptest::prelude::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    // ==================== Test Doubles ====================

    /// Detector that counts calls and delegates to lingua, or fails on demand.
    struct CountingDetector {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingDetector {
        fn working() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail: false,
            })
        }

        fn unavailable() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail: true,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl LanguageDetector for CountingDetector {
        fn detect(&self, text: &str) -> Result<DetectedLanguage, DetectionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(DetectionError::Unavailable("simulated outage".to_string()));
            }
            LinguaDetector::default().detect(text)
        }
    }

    /// Translator that records the source/target it was called with.
    struct RecordingTranslator {
        calls: Mutex<Vec<(String, String)>>,
        response: Result<String, fn() -> ServiceError>,
    }

    impl RecordingTranslator {
        fn returning(text: &str) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                response: Ok(text.to_string()),
            })
        }

        fn failing(error: fn() -> ServiceError) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                response: Err(error),
            })
        }

        fn calls(&self) -> Vec<(String, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Translator for RecordingTranslator {
        async fn translate(
            &self,
            _text: &str,
            source: &str,
            target: Language,
        ) -> Result<String, ServiceError> {
            self.calls
                .lock()
                .unwrap()
                .push((source.to_string(), target.code().to_string()));
            match &self.response {
                Ok(text) => Ok(text.clone()),
                Err(make_error) => Err(make_error()),
            }
        }
    }

    /// Detector that always reports the same language, with a fixed reliability.
    struct FixedDetector {
        code: &'static str,
        reliable: bool,
    }

    impl LanguageDetector for FixedDetector {
        fn detect(&self, _text: &str) -> Result<DetectedLanguage, DetectionError> {
            Ok(DetectedLanguage {
                code: self.code.to_string(),
                name: self.code.to_string(),
                confidence: if self.reliable { 0.9 } else { 0.05 },
                reliable: self.reliable,
                supported: true,
            })
        }
    }

    fn handler(
        detector: &Arc<CountingDetector>,
        translator: &Arc<RecordingTranslator>,
    ) -> TranslationHandler {
        TranslationHandler::new(detector.clone(), translator.clone())
    }

    // ==================== Scenario Tests ====================

    #[tokio::test]
    async fn test_hello_to_french() {
        let detector = CountingDetector::working();
        let translator = RecordingTranslator::returning("Bonjour, comment allez-vous ?");

        let outcome = handler(&detector, &translator)
            .handle(&TranslationRequest::new("Hello, how are you?", "fr"))
            .await
            .expect("Should succeed");

        assert_eq!(outcome.detected_language.code, "en");
        assert_eq!(outcome.source_language, "en");
        assert_eq!(outcome.target_language, Language::FRENCH);
        assert!(!outcome.translated_text.is_empty());
        assert_ne!(outcome.translated_text, "Hello, how are you?");
        assert_eq!(translator.calls(), vec![("en".to_string(), "fr".to_string())]);
    }

    #[tokio::test]
    async fn test_empty_input_makes_no_calls() {
        let detector = CountingDetector::working();
        let translator = RecordingTranslator::returning("unused");

        let result = handler(&detector, &translator)
            .handle(&TranslationRequest::new("", "fr"))
            .await;

        assert!(matches!(result, Err(TranslateError::EmptyInput)));
        assert_eq!(detector.calls(), 0);
        assert!(translator.calls().is_empty());
    }

    #[tokio::test]
    async fn test_unsupported_target_makes_no_calls() {
        let detector = CountingDetector::working();
        let translator = RecordingTranslator::returning("unused");

        let result = handler(&detector, &translator)
            .handle(&TranslationRequest::new("Hello, how are you?", "xx"))
            .await;

        match result {
            Err(TranslateError::UnsupportedLanguage(code)) => assert_eq!(code, "xx"),
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(detector.calls(), 0);
        assert!(translator.calls().is_empty());
    }

    #[tokio::test]
    async fn test_empty_input_reported_before_unsupported_target() {
        let detector = CountingDetector::working();
        let translator = RecordingTranslator::returning("unused");

        let result = handler(&detector, &translator)
            .handle(&TranslationRequest::new("   ", "xx"))
            .await;

        assert!(matches!(result, Err(TranslateError::EmptyInput)));
    }

    #[tokio::test]
    async fn test_detection_failure_skips_translation() {
        let detector = CountingDetector::unavailable();
        let translator = RecordingTranslator::returning("unused");

        let result = handler(&detector, &translator)
            .handle(&TranslationRequest::new("Hello, how are you?", "fr"))
            .await;

        assert!(matches!(
            result,
            Err(TranslateError::Detection(DetectionError::Unavailable(_)))
        ));
        assert_eq!(detector.calls(), 1);
        assert!(translator.calls().is_empty());
    }

    #[tokio::test]
    async fn test_translation_failure_is_surfaced() {
        let detector = CountingDetector::working();
        let translator = RecordingTranslator::failing(|| ServiceError::Network("connection refused".to_string()));

        let result = handler(&detector, &translator)
            .handle(&TranslationRequest::new("Hello, how are you?", "de"))
            .await;

        let err = result.unwrap_err();
        assert!(matches!(err, TranslateError::TranslationService(ServiceError::Network(_))));
        assert!(err.to_string().contains("connection refused"));
        assert_eq!(translator.calls().len(), 1, "failures are not retried");
    }

    // ==================== Source Language Tests ====================

    #[tokio::test]
    async fn test_explicit_source_overrides_detection() {
        let detector = CountingDetector::working();
        let translator = RecordingTranslator::returning("Hola");

        let outcome = handler(&detector, &translator)
            .handle(&TranslationRequest::new("Hello there, my friend", "es").with_source("FR"))
            .await
            .expect("Should succeed");

        assert_eq!(outcome.source_language, "fr");
        assert_eq!(detector.calls(), 1, "detection still runs for display");
        assert_eq!(translator.calls(), vec![("fr".to_string(), "es".to_string())]);
    }

    #[tokio::test]
    async fn test_auto_source_uses_detection() {
        let detector = CountingDetector::working();
        let translator = RecordingTranslator::returning("Hallo, wie geht es dir?");

        let outcome = handler(&detector, &translator)
            .handle(&TranslationRequest::new("Hello, how are you?", "de").with_source("auto"))
            .await
            .expect("Should succeed");

        assert_eq!(outcome.source_language, "en");
    }

    #[tokio::test]
    async fn test_unsupported_source_is_rejected() {
        let detector = CountingDetector::working();
        let translator = RecordingTranslator::returning("unused");

        let result = handler(&detector, &translator)
            .handle(&TranslationRequest::new("Hello", "fr").with_source("klingon"))
            .await;

        assert!(matches!(result, Err(TranslateError::UnsupportedLanguage(code)) if code == "klingon"));
        assert_eq!(detector.calls(), 0);
    }

    #[tokio::test]
    async fn test_same_language_skips_translation() {
        let detector = CountingDetector::working();
        let translator = RecordingTranslator::returning("unused");
        let text = "This is a longer English sentence to make sure detection is correct.";

        let outcome = handler(&detector, &translator)
            .handle(&TranslationRequest::new(text, "en"))
            .await
            .expect("Should succeed");

        assert_eq!(outcome.translated_text, text);
        assert!(translator.calls().is_empty());
    }

    #[tokio::test]
    async fn test_unreliable_match_with_target_still_translates() {
        let detector = Arc::new(FixedDetector {
            code: "fr",
            reliable: false,
        });
        let translator = RecordingTranslator::returning("Bonjour, comment allez-vous ?");

        let outcome = TranslationHandler::new(detector, translator.clone())
            .handle(&TranslationRequest::new("Hello, how are you?", "fr"))
            .await
            .expect("Should succeed");

        assert_eq!(outcome.detected_language.code, "fr");
        assert_eq!(outcome.source_language, AUTO_SOURCE);
        assert_eq!(outcome.translated_text, "Bonjour, comment allez-vous ?");
        assert_eq!(translator.calls(), vec![(AUTO_SOURCE.to_string(), "fr".to_string())]);
    }

    #[tokio::test]
    async fn test_reliable_match_with_target_skips_translation() {
        let detector = Arc::new(FixedDetector {
            code: "fr",
            reliable: true,
        });
        let translator = RecordingTranslator::returning("unused");

        let outcome = TranslationHandler::new(detector, translator.clone())
            .handle(&TranslationRequest::new("Bonjour tout le monde", "fr"))
            .await
            .expect("Should succeed");

        assert_eq!(outcome.translated_text, "Bonjour tout le monde");
        assert!(translator.calls().is_empty());
    }

    #[tokio::test]
    async fn test_explicit_source_equal_to_target_skips_translation() {
        let detector = Arc::new(FixedDetector {
            code: "de",
            reliable: false,
        });
        let translator = RecordingTranslator::returning("unused");

        let outcome = TranslationHandler::new(detector, translator.clone())
            .handle(&TranslationRequest::new("Salut", "fr").with_source("fr"))
            .await
            .expect("Should succeed");

        assert_eq!(outcome.source_language, "fr");
        assert!(translator.calls().is_empty());
    }

    #[tokio::test]
    async fn test_unreliable_detection_lets_service_detect() {
        let detector = Arc::new(FixedDetector {
            code: "ro",
            reliable: false,
        });
        let translator = RecordingTranslator::returning("Hallo");

        let outcome = TranslationHandler::new(detector, translator.clone())
            .handle(&TranslationRequest::new("Hello", "de"))
            .await
            .expect("Should succeed");

        assert_eq!(outcome.detected_language.code, "ro");
        assert_eq!(outcome.source_language, AUTO_SOURCE);
        assert_eq!(translator.calls(), vec![(AUTO_SOURCE.to_string(), "de".to_string())]);
    }

    #[tokio::test]
    async fn test_short_phrases_use_detected_source() {
        let samples = [
            ("Hello, how are you?", "en", "fr"),
            ("नमस्ते, आप कैसे हैं?", "hi", "en"),
            ("Buenos días, ¿cómo estás?", "es", "en"),
            ("Bonjour, comment allez-vous ?", "fr", "de"),
            ("Guten Morgen, wie geht es dir?", "de", "es"),
        ];

        for (text, expected_source, target) in samples {
            let detector = CountingDetector::working();
            let translator = RecordingTranslator::returning("translated");

            let outcome = handler(&detector, &translator)
                .handle(&TranslationRequest::new(text, target))
                .await
                .expect("Should succeed");

            assert_eq!(outcome.detected_language.code, expected_source, "for {:?}", text);
            assert_eq!(
                translator.calls(),
                vec![(outcome.source_language.clone(), target.to_string())]
            );
        }
    }

    #[tokio::test]
    async fn test_unsupported_detected_language_is_passed_through() {
        let detector = CountingDetector::working();
        let translator = RecordingTranslator::returning("Hello, how are you? I have not seen you in a long time.");

        let outcome = handler(&detector, &translator)
            .handle(&TranslationRequest::new(
                "Привет, как у тебя дела? Я давно тебя не видел, расскажи мне всё.",
                "en",
            ))
            .await
            .expect("Should succeed");

        assert_eq!(outcome.detected_language.code, "ru");
        assert!(!outcome.detected_language.supported);
        assert_eq!(translator.calls(), vec![("ru".to_string(), "en".to_string())]);
    }

    // ==================== Detect-only Tests ====================

    #[test]
    fn test_detect_only() {
        let detector = CountingDetector::working();
        let translator = RecordingTranslator::returning("unused");

        let detected = handler(&detector, &translator)
            .detect("Bonjour, je voudrais réserver une table pour deux personnes ce soir.")
            .expect("Should succeed");

        assert_eq!(detected.code, "fr");
        assert!(translator.calls().is_empty());
    }

    #[test]
    fn test_detect_only_rejects_empty() {
        let detector = CountingDetector::working();
        let translator = RecordingTranslator::returning("unused");

        let result = handler(&detector, &translator).detect(" \n\t ");
        assert!(matches!(result, Err(TranslateError::EmptyInput)));
        assert_eq!(detector.calls(), 0);
    }

    // ==================== Properties ====================

    proptest! {
        #[test]
        fn prop_whitespace_only_is_empty_input(text in "[ \t\r\n\u{00a0}\u{3000}]{0,32}") {
            let detector = CountingDetector::working();
            let translator = RecordingTranslator::returning("unused");
            let handler = handler(&detector, &translator);

            let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
            let result = runtime.block_on(handler.handle(&TranslationRequest::new(text, "fr")));

            prop_assert!(matches!(result, Err(TranslateError::EmptyInput)));
            prop_assert_eq!(detector.calls(), 0);
            prop_assert!(translator.calls().is_empty());
        }

        #[test]
        fn prop_unknown_target_is_rejected(target in "[a-z]{3,6}") {
            let detector = CountingDetector::working();
            let translator = RecordingTranslator::returning("unused");
            let handler = handler(&detector, &translator);

            let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
            let result = runtime.block_on(handler.handle(&TranslationRequest::new("Hello", target)));

            prop_assert!(
                matches!(result, Err(TranslateError::UnsupportedLanguage(_))),
                "three+ letter codes are never in the supported set"
            );
            prop_assert_eq!(detector.calls(), 0);
        }
    }
}
