//! Supported languages and translation quality checks.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for the languages offered as translation targets
//! - `language`: Validated `Language` value that can only hold a registry code
//! - `validator`: Post-translation sanity checks (URLs, numbers, untranslated output)
//!
//! # Example
//!
//! ```rust,ignore
//! use linguistix::i18n::{Language, LanguageRegistry};
//!
//! let french = Language::from_code("fr")?;
//! let languages = LanguageRegistry::get().list_supported();
//! ```

mod language;
mod registry;
mod validator;

pub use language::Language;
pub use registry::{LanguageConfig, LanguageRegistry};
pub use validator::{TranslationValidator, ValidationReport};
