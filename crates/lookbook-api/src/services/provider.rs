//! Text-to-image provider client
//!
//! One call per generation, no retries and no timeouts beyond the HTTP client
//! defaults. A URL-style response costs a second GET to fetch the bitmap.

use anyhow::Context;
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use lookbook_core::{
    AppError, AssetSource, Config, GeneratedAsset, GenerationRequest, ProviderSize,
};
use lookbook_processing::probe_dimensions;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Provider name for logs.
    fn name(&self) -> &'static str;

    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedAsset, AppError>;
}

#[derive(Debug, Serialize)]
struct ImagesRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    size: ProviderSize,
    n: u8,
}

#[derive(Debug, Deserialize)]
struct ImagesResponse {
    #[serde(default)]
    data: Vec<ImageDatum>,
}

#[derive(Debug, Deserialize)]
struct ImageDatum {
    #[serde(default)]
    b64_json: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

/// Client for an OpenAI-compatible `images/generations` endpoint.
pub struct OpenAiImageProvider {
    http_client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl std::fmt::Debug for OpenAiImageProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiImageProvider")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

impl OpenAiImageProvider {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, anyhow::Error> {
        let http_client = reqwest::Client::builder()
            .build()
            .context("Failed to create HTTP client for image provider")?;

        Ok(Self {
            http_client,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        })
    }

    /// `None` when no credential is configured.
    pub fn from_config(config: &Config) -> Result<Option<Self>, anyhow::Error> {
        match config.openai_api_key.as_deref() {
            Some(key) => Ok(Some(Self::new(
                key,
                config.openai_base_url.as_str(),
                config.openai_image_model.as_str(),
            )?)),
            None => Ok(None),
        }
    }

    async fn fetch_url(&self, url: &str) -> Result<Vec<u8>, AppError> {
        tracing::debug!(url = %url, "Fetching generated image from provider URL");

        let response = self.http_client.get(url).send().await.map_err(|e| {
            AppError::Provider {
                status: None,
                message: "Failed to download the generated image".to_string(),
                details: Some(serde_json::json!({ "error": e.to_string() })),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Provider {
                status: None,
                message: format!("Generated image download failed with status {}", status),
                details: None,
            });
        }

        let bytes = response.bytes().await.map_err(|e| AppError::Provider {
            status: None,
            message: "Failed to read the generated image".to_string(),
            details: Some(serde_json::json!({ "error": e.to_string() })),
        })?;
        Ok(bytes.to_vec())
    }
}

fn generated_asset(data: Vec<u8>, source: AssetSource) -> GeneratedAsset {
    let (width, height) = probe_dimensions(&data);
    GeneratedAsset {
        data,
        source,
        width,
        height,
    }
}

/// The provider's own error message, if the body follows `{error: {message}}`.
fn upstream_message(body: &Value) -> Option<String> {
    body.get("error")
        .and_then(|error| error.get("message").or(Some(error)))
        .and_then(Value::as_str)
        .map(str::to_string)
        .filter(|message| !message.trim().is_empty())
}

#[async_trait]
impl ImageProvider for OpenAiImageProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedAsset, AppError> {
        let body = ImagesRequest {
            model: &self.model,
            prompt: &request.prompt,
            size: request.size,
            n: 1,
        };

        tracing::info!(
            provider = self.name(),
            model = %self.model,
            size = request.size.as_str(),
            prompt_chars = request.prompt.chars().count(),
            "Requesting image generation"
        );

        let response = self
            .http_client
            .post(format!("{}/images/generations", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Provider {
                status: None,
                message: "Failed to reach the image provider".to_string(),
                details: Some(serde_json::json!({ "error": e.to_string() })),
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| AppError::Provider {
            status: Some(status.as_u16()),
            message: "Failed to read the image provider response".to_string(),
            details: Some(serde_json::json!({ "error": e.to_string() })),
        })?;
        let parsed: Option<Value> = serde_json::from_str(&text).ok();

        if !status.is_success() {
            let message = parsed
                .as_ref()
                .and_then(upstream_message)
                .unwrap_or_else(|| format!("Image provider request failed with status {}", status));
            return Err(AppError::Provider {
                status: Some(status.as_u16()),
                message,
                details: parsed.or_else(|| Some(Value::String(text))),
            });
        }

        let Some(raw) = parsed else {
            return Err(AppError::Provider {
                status: Some(status.as_u16()),
                message: "Image provider returned an unreadable response".to_string(),
                details: Some(Value::String(text)),
            });
        };

        let images: ImagesResponse =
            serde_json::from_value(raw.clone()).map_err(|_| AppError::Provider {
                status: Some(status.as_u16()),
                message: "Image provider returned an unreadable response".to_string(),
                details: Some(raw.clone()),
            })?;

        let first = images.data.into_iter().next();
        let inline = first
            .as_ref()
            .and_then(|datum| datum.b64_json.as_deref())
            .filter(|encoded| !encoded.is_empty());
        let url = first
            .as_ref()
            .and_then(|datum| datum.url.as_deref())
            .filter(|url| !url.is_empty());

        match (inline, url) {
            (Some(encoded), _) => {
                let data = general_purpose::STANDARD
                    .decode(encoded)
                    .map_err(|e| AppError::Provider {
                        status: None,
                        message: "Image provider returned undecodable image data".to_string(),
                        details: Some(serde_json::json!({ "error": e.to_string() })),
                    })?;
                tracing::debug!(bytes = data.len(), "Received inline image");
                Ok(generated_asset(data, AssetSource::Inline))
            }
            (None, Some(url)) => {
                let data = self.fetch_url(url).await?;
                tracing::debug!(bytes = data.len(), "Downloaded image from URL");
                Ok(generated_asset(data, AssetSource::Url(url.to_string())))
            }
            (None, None) => Err(AppError::Provider {
                status: Some(status.as_u16()),
                message: "No image returned by the provider".to_string(),
                details: Some(raw),
            }),
        }
    }
}
