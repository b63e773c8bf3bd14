//! HTTP upload gateway client.
//!
//! Uploads are a single `POST` of the raw bytes with their content type. The
//! gateway answers with JSON carrying either a full `uri`/`url` or a
//! transaction `id` that resolves under the read gateway.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, RETRY_AFTER};
use reqwest::Client;
use serde::Deserialize;

use crate::error::{ToolResult, UploadError};
use crate::config::Config;
use crate::storage::retry::{parse_retry_after_ms, RetryPolicy};
use crate::storage::Uploader;

#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    uri: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

/// Uploader talking to an HTTP storage gateway.
#[derive(Debug, Clone)]
pub struct HttpUploader {
    upload_url: String,
    gateway_url: String,
    client: Client,
    retry: RetryPolicy,
}

impl HttpUploader {
    pub fn new(upload_url: &str, gateway_url: &str) -> ToolResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(UploadError::from)?;
        Ok(Self {
            upload_url: upload_url.to_string(),
            gateway_url: gateway_url.trim_end_matches('/').to_string(),
            client,
            retry: RetryPolicy::default(),
        })
    }

    /// Build from the configured upload endpoint and retry count.
    pub fn from_config(config: &Config) -> ToolResult<Self> {
        Ok(Self::new(config.upload_url()?, &config.gateway_url)?
            .with_retry(RetryPolicy::with_max_retries(config.upload_max_retries)))
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn upload_url(&self) -> &str {
        &self.upload_url
    }

    async fn upload_with_retry(&self, bytes: &[u8], content_type: &str) -> Result<String, UploadError> {
        let config = match self.retry.config() {
            None => return self.do_upload(bytes, content_type).await,
            Some(config) => config,
        };

        let mut attempt = 0;
        loop {
            let error = match self.do_upload(bytes, content_type).await {
                Ok(uri) => return Ok(uri),
                Err(e) => e,
            };

            let (retryable, retry_after) = match &error {
                UploadError::ServerError { status, .. } => {
                    (config.is_retryable_status(*status), None)
                }
                UploadError::RateLimited { retry_after_ms } => {
                    (true, retry_after_ms.map(Duration::from_millis))
                }
                UploadError::Reqwest(re) => (re.is_connect() || re.is_timeout() || re.is_request(), None),
                _ => (false, None),
            };
            if !retryable {
                return Err(error);
            }
            if attempt >= config.max_retries {
                return Err(UploadError::MaxRetriesExceeded {
                    attempts: attempt + 1,
                    last_error: error.to_string(),
                });
            }

            let wait = config.wait_before_retry(attempt, retry_after);
            tracing::debug!(
                attempt = attempt + 1,
                max = config.max_retries,
                wait_ms = wait.as_millis() as u64,
                error = %error,
                "Retrying upload to {}",
                self.upload_url
            );
            futures_timer::Delay::new(wait).await;
            attempt += 1;
        }
    }

    async fn do_upload(&self, bytes: &[u8], content_type: &str) -> Result<String, UploadError> {
        let resp = self
            .client
            .post(&self.upload_url)
            .header(CONTENT_TYPE, content_type)
            .body(bytes.to_vec())
            .send()
            .await?;
        let status = resp.status();

        if status.is_success() {
            let parsed = resp.json::<UploadResponse>().await?;
            return resolve_uri(parsed, &self.gateway_url);
        }

        let status_code = status.as_u16();
        let retry_after_ms = resp
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_retry_after_ms);
        let body_text = resp.text().await.unwrap_or_default();

        match status_code {
            429 => Err(UploadError::RateLimited { retry_after_ms }),
            400..=499 => Err(UploadError::BadRequest(body_text)),
            _ => Err(UploadError::ServerError {
                status: status_code,
                body: body_text,
            }),
        }
    }
}

#[async_trait]
impl Uploader for HttpUploader {
    async fn upload(&self, bytes: Vec<u8>, content_type: &str) -> ToolResult<String> {
        tracing::info!(bytes = bytes.len(), content_type, "Uploading");
        let uri = self.upload_with_retry(&bytes, content_type).await?;
        tracing::info!(%uri, "Upload complete");
        Ok(uri)
    }
}

fn resolve_uri(response: UploadResponse, gateway_url: &str) -> Result<String, UploadError> {
    if let Some(uri) = response.uri.or(response.url) {
        return Ok(uri);
    }
    match response.id {
        Some(id) if !id.is_empty() => Ok(format!("{}/{}", gateway_url, id)),
        _ => Err(UploadError::BadResponse(
            "response carried neither a uri nor an id".to_string(),
        )),
    }
}
