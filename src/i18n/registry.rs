//! Language registry: the fixed set of translation targets.
//!
//! The registry is built once on first access behind a `OnceLock` and is
//! immutable afterwards, so it can be read from any request task.

use serde::Serialize;
use std::sync::OnceLock;

/// Configuration for a supported language.
#[derive(Debug, Clone, Serialize)]
pub struct LanguageConfig {
    /// ISO 639-1 language code (e.g., "en", "fr")
    pub code: &'static str,

    /// English name of the language (e.g., "French")
    pub name: &'static str,

    /// Native name of the language (e.g., "Français")
    pub native_name: &'static str,

    /// Whether this is the pre-selected target in the UI (only one should be true)
    pub is_default: bool,
}

/// Global language registry singleton.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Get a language configuration by its code.
    ///
    /// Lookup is exact: codes are stored lowercase and callers are expected
    /// to normalise user input first.
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// Get all supported languages, in display order.
    pub fn list_supported(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().collect()
    }

    /// Get the default target language configuration.
    ///
    /// # Panics
    /// Panics if the registry does not define exactly one default
    /// (this indicates a configuration error).
    pub fn default_target(&self) -> &LanguageConfig {
        let defaults: Vec<_> = self
            .languages
            .iter()
            .filter(|lang| lang.is_default)
            .collect();

        match defaults.len() {
            0 => panic!("No default target language found in registry"),
            1 => defaults[0],
            _ => panic!("Multiple default target languages found in registry"),
        }
    }

    /// Check if a language code is in the supported set.
    pub fn is_supported(&self, code: &str) -> bool {
        self.get_by_code(code).is_some()
    }
}

/// Default language configurations, in the order the UI lists them.
fn default_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            code: "en",
            name: "English",
            native_name: "English",
            is_default: true,
        },
        LanguageConfig {
            code: "hi",
            name: "Hindi",
            native_name: "हिन्दी",
            is_default: false,
        },
        LanguageConfig {
            code: "es",
            name: "Spanish",
            native_name: "Español",
            is_default: false,
        },
        LanguageConfig {
            code: "fr",
            name: "French",
            native_name: "Français",
            is_default: false,
        },
        LanguageConfig {
            code: "de",
            name: "German",
            native_name: "Deutsch",
            is_default: false,
        },
    ]
}
