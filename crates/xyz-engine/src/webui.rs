use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use reqwest::blocking::Client;
use serde::Deserialize;
use xyz_core::errors::{ErrorInfo, XyzError};

use crate::backend::{SynthesisBackend, Txt2ImgRequest};
use crate::config::BackendConfig;

const TXT2IMG_PATH: &str = "/sdapi/v1/txt2img";

fn backend_error(code: &str, message: impl Into<String>) -> XyzError {
    XyzError::Backend(ErrorInfo::new(code, message))
}

/// HTTP client for a web-UI style synthesis server.
///
/// Built once per run and reused for every record.
#[derive(Debug, Clone)]
pub struct WebUiClient {
    client: Client,
    url: String,
}

impl WebUiClient {
    /// Builds a client for the txt2img endpoint described by `config`.
    pub fn new(config: &BackendConfig) -> Result<Self, XyzError> {
        // The blocking client defaults to a 30s timeout; grids can take longer.
        let client = Client::builder()
            .timeout(config.timeout_secs.map(Duration::from_secs))
            .build()
            .map_err(|err| {
                backend_error("backend-client", format!("failed to build http client: {err}"))
            })?;
        Ok(Self {
            client,
            url: format!("{}{TXT2IMG_PATH}", config.base_url()),
        })
    }

    /// Full txt2img endpoint URL.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[derive(Debug, Deserialize)]
struct Txt2ImgResponse {
    #[serde(default)]
    images: Vec<String>,
}

/// Decodes a base64 image, with or without a `data:` URL prefix.
pub fn decode_image(encoded: &str) -> Result<Vec<u8>, XyzError> {
    let payload = match encoded.split_once(',') {
        Some((head, tail)) if head.starts_with("data:") => tail,
        _ => encoded,
    };
    STANDARD
        .decode(payload.trim())
        .map_err(|err| backend_error("backend-image-decode", err.to_string()))
}

/// Extracts the first image from a txt2img response body.
pub fn first_image(body: &str) -> Result<Vec<u8>, XyzError> {
    let response: Txt2ImgResponse = serde_json::from_str(body)
        .map_err(|err| backend_error("backend-response", err.to_string()))?;
    let first = response
        .images
        .first()
        .ok_or_else(|| backend_error("backend-empty", "response contained no images"))?;
    decode_image(first)
}

impl SynthesisBackend for WebUiClient {
    fn txt2img(&mut self, request: &Txt2ImgRequest) -> Result<Vec<u8>, XyzError> {
        let response = self.client.post(&self.url).json(request).send().map_err(|err| {
            XyzError::Backend(
                ErrorInfo::new("backend-unreachable", err.to_string())
                    .with_context("url", self.url.clone())
                    .with_hint("is the backend running with its API enabled?"),
            )
        })?;
        let status = response.status();
        let body = response
            .text()
            .map_err(|err| backend_error("backend-read", err.to_string()))?;
        if !status.is_success() {
            return Err(XyzError::Backend(
                ErrorInfo::new("backend-status", format!("http error {status}"))
                    .with_context("url", self.url.clone())
                    .with_context("body", body.chars().take(512).collect::<String>()),
            ));
        }
        first_image(&body)
    }
}
