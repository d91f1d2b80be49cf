use crate::config::Config;
use crate::error::ServiceError;
use crate::i18n::Language;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Source language value that asks the service to detect the language itself.
pub const AUTO_SOURCE: &str = "auto";

/// Anything that can translate text into one of the supported languages.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` from `source` (an ISO 639-1 code or [`AUTO_SOURCE`])
    /// into `target`.
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: Language,
    ) -> Result<String, ServiceError>;
}

/// Request body for a LibreTranslate-compatible `/translate` endpoint.
#[derive(Debug, Serialize)]
struct LibreTranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct LibreTranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

/// Error body returned by LibreTranslate on non-2xx responses.
#[derive(Debug, Deserialize)]
struct LibreTranslateError {
    error: String,
}

/// Client for a LibreTranslate-compatible HTTP translation API.
///
/// Each call is a single attempt: failures are reported to the caller, never retried.
pub struct LibreTranslateClient {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
}

impl LibreTranslateClient {
    pub fn new(config: &Config) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.translate_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_url: config.translate_api_url.clone(),
            api_key: config.translate_api_key.clone(),
        })
    }
}

#[async_trait]
impl Translator for LibreTranslateClient {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: Language,
    ) -> Result<String, ServiceError> {
        let request = LibreTranslateRequest {
            q: text,
            source,
            target: target.code(),
            format: "text",
            api_key: self.api_key.as_deref(),
        };

        debug!(
            "Requesting translation {} -> {} ({} chars)",
            source,
            target.code(),
            text.chars().count()
        );

        let response = self.client.post(&self.api_url).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
            warn!("Translation API error: {} - {}", status, body);
            return Err(classify_error(status.as_u16(), body, source, target));
        }

        let parsed: LibreTranslateResponse = response.json().await?;
        if parsed.translated_text.trim().is_empty() {
            return Err(ServiceError::InvalidResponse(
                "translation service returned empty text".to_string(),
            ));
        }

        Ok(parsed.translated_text)
    }
}

/// Map a non-2xx status from the translation API to an error kind.
fn classify_error(status: u16, body: String, source: &str, target: Language) -> ServiceError {
    // LibreTranslate wraps messages as {"error": "..."}; fall back to the raw body
    let message = serde_json::from_str::<LibreTranslateError>(&body)
        .map(|e| e.error)
        .unwrap_or(body);

    match status {
        400 => ServiceError::UnsupportedPair(format!(
            "{} -> {}: {}",
            source,
            target.code(),
            message
        )),
        403 | 429 => ServiceError::Quota {
            status,
            body: message,
        },
        _ => ServiceError::Api {
            status,
            body: message,
        },
    }
}
