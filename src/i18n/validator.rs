//! Translation quality validation module.
//!
//! Checks that elements which should pass through a translation untouched
//! (URLs, e-mail addresses, digit runs) are still present in the output, and
//! flags output that was returned untranslated. Findings are advisory: the
//! caller logs them but never fails a request because of them.

use regex::Regex;
use std::sync::OnceLock;

/// Validation report containing errors and warnings about a translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Findings that suggest the translation did not happen at all
    pub errors: Vec<String>,

    /// Findings that suggest a detail was lost or altered
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for translation quality.
pub struct TranslationValidator;

static URL_REGEX: OnceLock<Regex> = OnceLock::new();
static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
static DIGITS_REGEX: OnceLock<Regex> = OnceLock::new();

/// Inputs shorter than this (in letters) are often legitimately identical
/// across languages ("OK", "Taxi"), so they are not flagged as untranslated.
const MIN_LETTERS_FOR_UNCHANGED_CHECK: usize = 12;

impl TranslationValidator {
    /// Validate a translation against the text it was produced from.
    ///
    /// Checks that:
    /// - URLs are preserved
    /// - e-mail addresses are preserved
    /// - the same digit runs appear (in any order, since word order changes)
    /// - a reasonably long input did not come back unchanged
    pub fn validate(original: &str, translated: &str) -> ValidationReport {
        let mut report = ValidationReport::new();

        let orig_urls = Self::extract_urls(original);
        let trans_urls = Self::extract_urls(translated);
        if orig_urls != trans_urls {
            report.warnings.push(format!(
                "URL mismatch: original has {} URLs, translation has {} URLs",
                orig_urls.len(),
                trans_urls.len()
            ));
        }

        let orig_emails = Self::extract_emails(original);
        let trans_emails = Self::extract_emails(translated);
        if orig_emails != trans_emails {
            report.warnings.push(format!(
                "E-mail mismatch: original has {:?}, translation has {:?}",
                orig_emails, trans_emails
            ));
        }

        let mut orig_digits = Self::extract_digit_runs(original);
        let mut trans_digits = Self::extract_digit_runs(translated);
        orig_digits.sort();
        trans_digits.sort();
        if orig_digits != trans_digits {
            report.warnings.push(format!(
                "Number mismatch: original has {:?}, translation has {:?}",
                orig_digits, trans_digits
            ));
        }

        let letters = original.chars().filter(|c| c.is_alphabetic()).count();
        if letters >= MIN_LETTERS_FOR_UNCHANGED_CHECK && original.trim() == translated.trim() {
            report
                .errors
                .push("Translation is identical to the original text".to_string());
        }

        report
    }

    fn extract_urls(text: &str) -> Vec<String> {
        let regex = URL_REGEX.get_or_init(|| Regex::new(r"https?://[^\s)\]]+").unwrap());

        regex
            .find_iter(text)
            .map(|m| m.as_str().trim_end_matches(['.', ',', '!', '?']).to_string())
            .collect()
    }

    fn extract_emails(text: &str) -> Vec<String> {
        let regex = EMAIL_REGEX
            .get_or_init(|| Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap());

        regex
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Digit runs only: "3.5" and "3,5" both yield ["3", "5"], so locale
    /// decimal separators do not count as a mismatch.
    fn extract_digit_runs(text: &str) -> Vec<String> {
        let regex = DIGITS_REGEX.get_or_init(|| Regex::new(r"\d+").unwrap());

        regex
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}
