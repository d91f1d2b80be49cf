use anyhow::{bail, Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    // Environment
    pub environment: String,

    // Server
    pub bind_address: String,
    pub port: u16,

    // Translation service (LibreTranslate-compatible)
    pub translate_api_url: String,
    pub translate_api_key: Option<String>,
    pub translate_timeout_secs: u64,

    // Detection
    pub detection_min_confidence: f64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let config = Self {
            environment: std::env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),

            // Server
            bind_address: std::env::var("BIND_ADDRESS")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_var("PORT", 8080)?,

            // Translation service
            translate_api_url: std::env::var("TRANSLATE_API_URL")
                .unwrap_or_else(|_| "http://localhost:5000/translate".to_string()),
            translate_api_key: std::env::var("TRANSLATE_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            translate_timeout_secs: parse_var("TRANSLATE_TIMEOUT_SECS", 15)?,

            // Detection
            detection_min_confidence: parse_var("DETECTION_MIN_CONFIDENCE", 0.0)?,
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.detection_min_confidence) {
            bail!(
                "DETECTION_MIN_CONFIDENCE must be between 0.0 and 1.0, got {}",
                self.detection_min_confidence
            );
        }
        if self.translate_timeout_secs == 0 {
            bail!("TRANSLATE_TIMEOUT_SECS must be greater than zero");
        }
        if self.translate_api_url.trim().is_empty() {
            bail!("TRANSLATE_API_URL must not be empty");
        }
        Ok(())
    }

    /// Address the HTTP server binds to, e.g. `0.0.0.0:8080`.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

/// Parse an optional environment variable, falling back to `default` when unset.
/// A value that is set but malformed is an error rather than silently ignored.
fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: '{}'", name, raw)),
        Err(_) => Ok(default),
    }
}
