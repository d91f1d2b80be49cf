use thiserror::Error;

/// Why a request to the translation handler failed.
///
/// Every variant is terminal for the request it belongs to; nothing here is
/// retried.
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("Please enter text to translate.")]
    EmptyInput,

    #[error("Unsupported language: '{0}'")]
    UnsupportedLanguage(String),

    #[error("Could not detect the language of the text: {0}")]
    Detection(#[from] DetectionError),

    #[error("Translation failed: {0}")]
    TranslationService(#[from] ServiceError),
}

impl TranslateError {
    /// Stable machine-readable name, used in API error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            TranslateError::EmptyInput => "empty_input",
            TranslateError::UnsupportedLanguage(_) => "unsupported_language",
            TranslateError::Detection(_) => "detection_failed",
            TranslateError::TranslationService(_) => "translation_service",
        }
    }
}

#[derive(Debug, Error)]
pub enum DetectionError {
    #[error("the text contains no recognisable words")]
    NoLanguageFound,

    #[error("confidence {confidence:.2} is below the minimum of {minimum:.2}")]
    LowConfidence { confidence: f64, minimum: f64 },

    #[error("detection service unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("could not reach the translation service: {0}")]
    Network(String),

    #[error("translation quota exhausted or access denied ({status}): {body}")]
    Quota { status: u16, body: String },

    #[error("language pair not supported by the translation service: {0}")]
    UnsupportedPair(String),

    #[error("translation service returned an error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("unusable response from the translation service: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ServiceError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            ServiceError::InvalidResponse(error.to_string())
        } else if error.is_timeout() {
            ServiceError::Network(format!("request timed out: {}", error))
        } else {
            ServiceError::Network(error.to_string())
        }
    }
}
