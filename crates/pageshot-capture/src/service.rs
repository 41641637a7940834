//! Capture Service
//!
//! Main service that selects a capture backend and runs the
//! capture-then-encode pipeline.

use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::chrome::ChromeCaptureProvider;
use crate::encoder;
use crate::error::{CaptureError, CaptureResult};
use crate::noop::NoopCaptureProvider;
use crate::provider::CaptureProvider;
use crate::remote::RemoteCaptureProvider;
use crate::request::CaptureRequest;

/// Environment variable selecting the capture backend
pub const PROVIDER_ENV: &str = "PAGESHOT_PROVIDER";
/// Environment variable holding the remote capture service URL
pub const REMOTE_URL_ENV: &str = "PAGESHOT_REMOTE_URL";
/// Environment variable holding the remote capture service API key
pub const REMOTE_API_KEY_ENV: &str = "PAGESHOT_REMOTE_API_KEY";

/// Capture service that manages the selected provider
pub struct CaptureService {
    provider: Arc<dyn CaptureProvider>,
}

impl CaptureService {
    /// Create a capture service from the process environment.
    ///
    /// Provider selection:
    /// 1. `PAGESHOT_PROVIDER` (values: "noop", "local", "remote")
    /// 2. Default to "local" (headless Chrome)
    pub async fn from_env() -> CaptureResult<Self> {
        let provider = Self::provider_from_settings(
            std::env::var(PROVIDER_ENV).ok().as_deref(),
            std::env::var(REMOTE_URL_ENV).ok(),
            std::env::var(REMOTE_API_KEY_ENV).ok(),
        )?;

        if !provider.is_available().await {
            warn!(
                "Capture provider '{}' may not be available",
                provider.provider_name()
            );
        }

        Ok(Self { provider })
    }

    /// Resolve a provider from explicit settings (separated from `from_env`
    /// so tests do not have to mutate process environment variables)
    fn provider_from_settings(
        provider_name: Option<&str>,
        remote_url: Option<String>,
        remote_api_key: Option<String>,
    ) -> CaptureResult<Arc<dyn CaptureProvider>> {
        let provider: Arc<dyn CaptureProvider> = match provider_name {
            Some("noop") | Some("disabled") | Some("none") => {
                info!(
                    "Using noop capture provider ({}={}). Captures are disabled.",
                    PROVIDER_ENV,
                    provider_name.unwrap_or("noop")
                );
                Arc::new(NoopCaptureProvider::new())
            }
            Some("remote") => {
                let service_url = remote_url.filter(|url| !url.is_empty()).ok_or_else(|| {
                    error!(
                        "{}=remote but {} is not configured",
                        PROVIDER_ENV, REMOTE_URL_ENV
                    );
                    CaptureError::ProviderNotConfigured
                })?;
                info!("Using remote capture provider at {}", service_url);
                Arc::new(RemoteCaptureProvider::new(service_url, remote_api_key)?)
            }
            Some("local") | None => {
                info!("Using local headless Chrome capture provider");
                Arc::new(ChromeCaptureProvider::new())
            }
            Some(unknown) => {
                warn!(
                    "Unknown {} value '{}', falling back to local headless Chrome",
                    PROVIDER_ENV, unknown
                );
                Arc::new(ChromeCaptureProvider::new())
            }
        };
        Ok(provider)
    }

    /// Create a capture service with a custom provider (useful for testing)
    pub fn with_provider(provider: Arc<dyn CaptureProvider>) -> Self {
        Self { provider }
    }

    /// Capture a screenshot and write the encoded file to
    /// `{request.output}.{request.format}`.
    ///
    /// The encoder only runs after a successful capture, so a failed
    /// capture never leaves a partial output file behind.
    pub async fn capture_and_save(&self, request: &CaptureRequest) -> CaptureResult<PathBuf> {
        debug!(
            "Capturing screenshot of {} and saving as {}",
            request.url,
            request.output_path().display()
        );

        let image_data = self.provider.capture(request).await?;

        let output = request.output.clone();
        let format = request.format;
        let quality = request.quality;
        let file_path = tokio::task::spawn_blocking(move || {
            encoder::save_screenshot(&image_data, &output, format, quality)
        })
        .await
        .map_err(|e| {
            error!("Encoding task panicked: {}", e);
            CaptureError::CaptureFailed(format!("Task execution failed: {}", e))
        })??;

        Ok(file_path)
    }

    /// Capture a screenshot and return the raw image bytes (without saving)
    pub async fn capture(&self, request: &CaptureRequest) -> CaptureResult<Vec<u8>> {
        debug!("Capturing screenshot of {}", request.url);
        self.provider.capture(request).await
    }

    /// Get the name of the current provider
    pub fn provider_name(&self) -> &'static str {
        self.provider.provider_name()
    }

    /// Check if the provider is available
    pub async fn is_provider_available(&self) -> bool {
        self.provider.is_available().await
    }
}
