//! Remote Capture Provider
//!
//! Uses an external capture service API

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info};

use crate::error::{CaptureError, CaptureResult};
use crate::provider::CaptureProvider;
use crate::request::CaptureRequest;

/// Remote capture provider that calls an external API
pub struct RemoteCaptureProvider {
    /// Base URL of the capture service
    service_url: String,
    /// API key for authentication (if required)
    api_key: Option<String>,
    /// HTTP client
    client: Client,
}

#[derive(Serialize)]
struct RemoteCaptureBody<'a> {
    url: &'a str,
    width: u32,
    height: u32,
    full_page: bool,
    delay_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    selector: Option<&'a str>,
    hide_scrollbars: bool,
}

#[derive(Deserialize)]
struct RemoteCaptureResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    image: Option<String>, // Base64 encoded image
    #[serde(default)]
    error: Option<String>,
}

impl RemoteCaptureProvider {
    /// Create a new remote capture provider
    pub fn new(service_url: String, api_key: Option<String>) -> CaptureResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| {
                error!("Failed to create HTTP client: {}", e);
                CaptureError::HttpRequest(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            service_url,
            api_key,
            client,
        })
    }
}

#[async_trait]
impl CaptureProvider for RemoteCaptureProvider {
    async fn capture(&self, request: &CaptureRequest) -> CaptureResult<Vec<u8>> {
        debug!(
            "Capturing screenshot of {} using remote service at {}",
            request.url, self.service_url
        );

        if url::Url::parse(&request.url).is_err() {
            return Err(CaptureError::InvalidUrl(request.url.clone()));
        }

        let body = RemoteCaptureBody {
            url: &request.url,
            width: request.width,
            height: request.height,
            full_page: request.full_page,
            delay_ms: request.delay_ms,
            selector: request.selector.as_deref(),
            hide_scrollbars: request.hide_scrollbars,
        };

        let mut http_request = self.client.post(&self.service_url).json(&body);

        if let Some(ref api_key) = self.api_key {
            http_request = http_request.header("Authorization", format!("Bearer {}", api_key));
        }

        debug!("Sending capture request to remote service");

        let response = http_request.send().await.map_err(|e| {
            error!("HTTP request to capture service failed: {}", e);
            CaptureError::HttpRequest(format!("Request failed: {}", e))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!("Capture service returned error {}: {}", status, error_text);
            return Err(CaptureError::HttpRequest(format!(
                "Service returned error {}: {}",
                status, error_text
            )));
        }

        let capture_response: RemoteCaptureResponse = response.json().await.map_err(|e| {
            error!("Failed to parse capture service response: {}", e);
            CaptureError::HttpRequest(format!("Failed to parse response: {}", e))
        })?;

        if !capture_response.success {
            let error_msg = capture_response
                .error
                .unwrap_or_else(|| "Unknown error".to_string());
            error!("Capture service reported failure: {}", error_msg);
            return Err(CaptureError::CaptureFailed(error_msg));
        }

        let image_data = capture_response
            .image
            .ok_or_else(|| CaptureError::CaptureFailed("No image data in response".to_string()))?;

        use base64::Engine;
        let image_bytes = base64::engine::general_purpose::STANDARD
            .decode(&image_data)
            .map_err(|e| {
                error!("Failed to decode base64 image: {}", e);
                CaptureError::CaptureFailed(format!("Failed to decode image: {}", e))
            })?;

        info!(
            "Successfully captured screenshot of {} using remote service ({} bytes)",
            request.url,
            image_bytes.len()
        );

        Ok(image_bytes)
    }

    fn provider_name(&self) -> &'static str {
        "remote-api"
    }

    async fn is_available(&self) -> bool {
        // Try a simple health check to the service URL
        let health_url = format!("{}/health", self.service_url.trim_end_matches('/'));
        self.client
            .get(&health_url)
            .timeout(Duration::from_secs(5))
            .send()
            .await
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }
}
