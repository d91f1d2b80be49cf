//! Language type: a target language validated against the registry.

use crate::i18n::{LanguageConfig, LanguageRegistry};
use anyhow::{bail, Result};
use serde::{Serialize, Serializer};

/// A validated language.
///
/// Only registry codes can be turned into a `Language`, so holding one is
/// proof that the code is in the supported set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    /// ISO 639-1 language code (e.g., "en", "fr")
    code: &'static str,
}

impl Language {
    #[cfg(test)]
    pub const FRENCH: Language = Language { code: "fr" };

    /// Create a Language from a language code string.
    ///
    /// Surrounding whitespace and letter case are ignored, so `" FR "` is
    /// accepted as French.
    ///
    /// # Returns
    /// * `Ok(Language)` if the code is in the supported set
    /// * `Err` otherwise
    pub fn from_code(code: &str) -> Result<Language> {
        let normalized = code.trim().to_ascii_lowercase();

        match LanguageRegistry::get().get_by_code(&normalized) {
            Some(config) => Ok(Language { code: config.code }),
            None => bail!("Unknown language code: '{}'", code),
        }
    }

    /// Get the ISO 639-1 language code.
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Get the full language configuration from the registry.
    ///
    /// # Panics
    /// Panics if the code is not in the registry, which cannot happen for a
    /// `Language` built through `from_code`.
    pub fn config(&self) -> &'static LanguageConfig {
        LanguageRegistry::get()
            .get_by_code(self.code)
            .expect("Language code should always be valid")
    }

    /// Get the English name of the language.
    pub fn name(&self) -> &'static str {
        self.config().name
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name(), self.code)
    }
}

impl Serialize for Language {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.config().serialize(serializer)
    }
}
