//! Talking to the image generation provider.
//!
//! [`ImageBackend`] is the seam between the pipeline and the network;
//! [`OpenAiProvider`] is the real thing, speaking the OpenAI Images API.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::ProviderConfig;
use crate::constants::{IMAGE_COUNT, IMAGE_QUALITY, IMAGE_RESPONSE_FORMAT, IMAGE_SIZE};
use crate::error::GenerationError;
use crate::form::Credential;

/// Boxed future returned by [`ImageBackend`] methods.
pub type BackendFuture<'a, T> =
    Pin<Box<dyn Future<Output = Result<T, GenerationError>> + Send + 'a>>;

/// Something that can turn a prompt into a hosted image and fetch it.
pub trait ImageBackend: Send + Sync {
    /// Submits the prompt, returning the source reference (URL) of the image.
    fn request_image<'a>(
        &'a self,
        credential: &'a Credential,
        prompt: &'a str,
    ) -> BackendFuture<'a, String>;

    /// Downloads the bytes behind a source reference.
    fn download<'a>(&'a self, source_reference: &'a str) -> BackendFuture<'a, Vec<u8>>;
}

/// Request body for POST /images/generations
/// Docs: https://platform.openai.com/docs/api-reference/images
#[derive(Serialize, Debug)]
struct ImagesGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u8,
    size: &'a str,
    quality: &'a str,
    response_format: &'a str,
}

#[derive(Deserialize, Debug)]
struct ImagesGenerateResponse {
    #[serde(default)]
    data: Vec<ImageData>,
}

#[derive(Deserialize, Debug)]
struct ImageData {
    url: Option<String>,
    revised_prompt: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ErrorEnvelope {
    error: ApiError,
}

#[derive(Deserialize, Debug)]
struct ApiError {
    #[serde(default)]
    message: String,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

/// OpenAI Images API client
#[derive(Clone, Debug)]
pub struct OpenAiProvider {
    client: reqwest::Client,
    config: ProviderConfig,
}

impl OpenAiProvider {
    /// Client with reqwest defaults.
    pub fn new(config: ProviderConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Client using a preconfigured [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: ProviderConfig) -> Self {
        Self { client, config }
    }

    async fn generate(
        &self,
        credential: &Credential,
        prompt: &str,
    ) -> Result<String, GenerationError> {
        let endpoint = self
            .config
            .generations_url()
            .map_err(|err| GenerationError::Provider(err.to_string()))?;
        let req_body = ImagesGenerateRequest {
            model: &self.config.image_model,
            prompt,
            n: IMAGE_COUNT,
            size: IMAGE_SIZE,
            quality: IMAGE_QUALITY,
            response_format: IMAGE_RESPONSE_FORMAT,
        };

        info!(model = %self.config.image_model, "Requesting image generation");
        let resp = self
            .client
            .post(endpoint)
            .bearer_auth(credential.expose())
            .json(&req_body)
            .send()
            .await?;

        let status = resp.status();
        let resp_bytes = resp.bytes().await?;
        if !status.is_success() {
            return Err(classify_failure(status, &resp_bytes));
        }

        let parsed: ImagesGenerateResponse = serde_json::from_slice(&resp_bytes)
            .map_err(|err| GenerationError::Provider(format!("Unreadable response: {err}")))?;
        let first = parsed
            .data
            .into_iter()
            .next()
            .ok_or_else(|| GenerationError::Provider("No image data returned".to_string()))?;
        if let Some(revised_prompt) = first.revised_prompt {
            debug!("Revised prompt from provider: {revised_prompt}");
        }
        first
            .url
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| GenerationError::Provider("Image response missing url".to_string()))
    }

    async fn fetch(&self, source_reference: &str) -> Result<Vec<u8>, GenerationError> {
        let resp = self.client.get(source_reference).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(GenerationError::Network(format!(
                "Image download failed with status {status}"
            )));
        }
        let bytes = resp.bytes().await?;
        debug!("Downloaded {} image bytes", bytes.len());
        Ok(bytes.to_vec())
    }
}

impl ImageBackend for OpenAiProvider {
    fn request_image<'a>(
        &'a self,
        credential: &'a Credential,
        prompt: &'a str,
    ) -> BackendFuture<'a, String> {
        Box::pin(async move {
            self.generate(credential, prompt)
                .await
                .map_err(|err| err.redact(credential.expose()))
        })
    }

    fn download<'a>(&'a self, source_reference: &'a str) -> BackendFuture<'a, Vec<u8>> {
        Box::pin(self.fetch(source_reference))
    }
}

/// Works out which kind of failure a non-2xx provider response is.
fn classify_failure(status: reqwest::StatusCode, body: &[u8]) -> GenerationError {
    let api_error = serde_json::from_slice::<ErrorEnvelope>(body)
        .ok()
        .map(|envelope| envelope.error);
    let message = match &api_error {
        Some(err) if !err.message.is_empty() => err.message.clone(),
        _ => format!("{status}: {}", String::from_utf8_lossy(body).trim()),
    };

    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return GenerationError::Authentication(message);
    }
    let policy_refusal = api_error.as_ref().is_some_and(|err| {
        err.code.as_deref() == Some("content_policy_violation")
            || err.kind.as_deref() == Some("image_generation_user_error")
    });
    if status == reqwest::StatusCode::BAD_REQUEST && policy_refusal {
        return GenerationError::ContentPolicy(message);
    }
    GenerationError::Provider(format!("{status}: {message}"))
}
