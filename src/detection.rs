//! Language detection backed by the `lingua` crate.
//!
//! `lingua` combines n-gram models with rule-based filtering on characters,
//! which keeps it accurate on the short phrases people type into the page.

use crate::error::DetectionError;
use crate::i18n::LanguageRegistry;
use lingua::{Language as LinguaLanguage, LanguageDetector as LinguaModel, LanguageDetectorBuilder};
use serde::Serialize;
use tracing::debug;

/// Minimum lead of the best language over the runner-up for a detection to
/// count as reliable.
const MIN_RELATIVE_DISTANCE: f64 = 0.1;

/// Result of language detection on a text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectedLanguage {
    /// ISO 639-1 code (e.g., "en")
    pub code: String,

    /// English name of the language (e.g., "English")
    pub name: String,

    /// Detector confidence from 0.0 to 1.0
    pub confidence: f64,

    /// Whether the best guess clearly beat every other candidate
    pub reliable: bool,

    /// Whether the detected language is also one of the supported targets
    pub supported: bool,
}

/// Anything that can infer the language of a text sample.
pub trait LanguageDetector: Send + Sync {
    fn detect(&self, text: &str) -> Result<DetectedLanguage, DetectionError>;
}

/// Detector over every spoken language `lingua` ships a model for.
pub struct LinguaDetector {
    detector: LinguaModel,
    min_confidence: f64,
}

impl LinguaDetector {
    /// Create a detector that rejects results below `min_confidence`.
    pub fn new(min_confidence: f64) -> Self {
        Self {
            detector: LanguageDetectorBuilder::from_all_spoken_languages().build(),
            min_confidence,
        }
    }
}

impl Default for LinguaDetector {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl LanguageDetector for LinguaDetector {
    fn detect(&self, text: &str) -> Result<DetectedLanguage, DetectionError> {
        // Sorted by descending confidence; all zeros when the text has no letters
        let values = self.detector.compute_language_confidence_values(text);

        let (language, confidence) = match values.first() {
            Some(&(language, confidence)) if confidence > 0.0 => (language, confidence),
            _ => return Err(DetectionError::NoLanguageFound),
        };

        if confidence < self.min_confidence {
            return Err(DetectionError::LowConfidence {
                confidence,
                minimum: self.min_confidence,
            });
        }

        let runner_up = values.get(1).map_or(0.0, |&(_, value)| value);
        let reliable = confidence - runner_up >= MIN_RELATIVE_DISTANCE;

        let detected = describe(language, confidence, reliable);
        debug!(
            "Detected language: {} ({}) with confidence {:.2}, runner-up {:.2}, reliable: {}",
            detected.name, detected.code, confidence, runner_up, reliable
        );

        Ok(detected)
    }
}

fn describe(language: LinguaLanguage, confidence: f64, reliable: bool) -> DetectedLanguage {
    let code = language.iso_code_639_1().to_string();
    let supported = LanguageRegistry::get().is_supported(&code);

    DetectedLanguage {
        code,
        name: language.to_string(),
        confidence,
        reliable,
        supported,
    }
}
