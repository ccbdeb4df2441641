//! Configuration module
//!
//! Process-wide settings are read once at startup from the environment (and an
//! optional `.env` file) and then passed by reference into the request path.

use std::env;

use anyhow::Context;

const SERVER_PORT: u16 = 3000;
const MAX_UPLOAD_MB: usize = 20;
const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const OPENAI_IMAGE_MODEL: &str = "gpt-image-1";
const REFERENCE_DOC_PATH: &str = "docs/fashion-reference.md";

/// Application configuration.
#[derive(Clone)]
pub struct Config {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    /// Provider credential. `None` is allowed at startup; every request then fails fast.
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_image_model: String,
    pub reference_doc_path: String,
    /// Echo raw provider payloads and internal details back to callers
    pub debug_provider_errors: bool,
    pub max_upload_bytes: usize,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("server_port", &self.server_port)
            .field("cors_origins", &self.cors_origins)
            .field("environment", &self.environment)
            .field(
                "openai_api_key",
                &self.openai_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("openai_base_url", &self.openai_base_url)
            .field("openai_image_model", &self.openai_image_model)
            .field("reference_doc_path", &self.reference_doc_path)
            .field("debug_provider_errors", &self.debug_provider_errors)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: SERVER_PORT,
            cors_origins: vec!["*".to_string()],
            environment: "development".to_string(),
            openai_api_key: None,
            openai_base_url: OPENAI_BASE_URL.to_string(),
            openai_image_model: OPENAI_IMAGE_MODEL.to_string(),
            reference_doc_path: REFERENCE_DOC_PATH.to_string(),
            debug_provider_errors: false,
            max_upload_bytes: MAX_UPLOAD_MB * 1024 * 1024,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let defaults = Config::default();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or(defaults.environment);

        let cors_origins = env::var("CORS_ORIGINS")
            .map(|s| parse_list(&s))
            .unwrap_or(defaults.cors_origins);

        let server_port = match non_empty_var("SERVER_PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("SERVER_PORT must be a port number, got '{}'", raw))?,
            None => defaults.server_port,
        };

        let max_upload_bytes = match non_empty_var("MAX_UPLOAD_BYTES") {
            Some(raw) => raw
                .parse::<usize>()
                .with_context(|| format!("MAX_UPLOAD_BYTES must be a byte count, got '{}'", raw))?,
            None => defaults.max_upload_bytes,
        };

        let config = Config {
            server_port,
            cors_origins,
            environment,
            openai_api_key: non_empty_var("OPENAI_API_KEY"),
            openai_base_url: non_empty_var("OPENAI_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.openai_base_url),
            openai_image_model: non_empty_var("OPENAI_IMAGE_MODEL")
                .unwrap_or(defaults.openai_image_model),
            reference_doc_path: non_empty_var("REFERENCE_DOC_PATH")
                .unwrap_or(defaults.reference_doc_path),
            debug_provider_errors: non_empty_var("DEBUG_PROVIDER_ERRORS")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.debug_provider_errors),
            max_upload_bytes,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.server_port == 0 {
            anyhow::bail!("SERVER_PORT must be greater than zero");
        }
        if self.max_upload_bytes == 0 {
            anyhow::bail!("MAX_UPLOAD_BYTES must be greater than zero");
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        matches!(self.environment.to_lowercase().as_str(), "production" | "prod")
    }

    pub fn provider_configured(&self) -> bool {
        self.openai_api_key.is_some()
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Accepts the usual truthy spellings; anything else is false.
pub fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("1"));
        assert!(parse_flag("TRUE"));
        assert!(parse_flag(" yes "));
        assert!(parse_flag("On"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag("maybe"));
    }

    #[test]
    fn test_parse_list_skips_blanks() {
        assert_eq!(
            parse_list("https://a.test, ,https://b.test,"),
            vec!["https://a.test".to_string(), "https://b.test".to_string()]
        );
    }

    #[test]
    fn test_default_config_validates() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert!(!config.provider_configured());
        assert_eq!(config.max_upload_bytes, 20 * 1024 * 1024);
    }

    #[test]
    fn test_validate_rejects_zero_upload_limit() {
        let config = Config {
            max_upload_bytes: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_output_redacts_key() {
        let config = Config {
            openai_api_key: Some("sk-very-secret".to_string()),
            ..Config::default()
        };
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("sk-very-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
