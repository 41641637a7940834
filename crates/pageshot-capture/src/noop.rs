//! No-op Capture Provider
//!
//! A provider that does nothing - useful for environments where captures
//! are not possible (e.g., hosts without Chrome, CI/CD environments, etc.)

use async_trait::async_trait;
use tracing::debug;

use crate::error::{CaptureError, CaptureResult};
use crate::provider::CaptureProvider;
use crate::request::CaptureRequest;

/// No-op capture provider that refuses every request
///
/// Enable via environment variable: `PAGESHOT_PROVIDER=noop`
pub struct NoopCaptureProvider;

impl NoopCaptureProvider {
    /// Create a new no-op capture provider
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoopCaptureProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CaptureProvider for NoopCaptureProvider {
    async fn capture(&self, request: &CaptureRequest) -> CaptureResult<Vec<u8>> {
        debug!(
            "NoopCaptureProvider: Skipping capture for {} (noop mode)",
            request.url
        );
        // Refusing is more honest than returning empty data
        Err(CaptureError::CaptureFailed(
            "Capture provider is disabled (noop mode). Set PAGESHOT_PROVIDER to 'local' or 'remote' to enable.".to_string()
        ))
    }

    fn provider_name(&self) -> &'static str {
        "noop"
    }

    async fn is_available(&self) -> bool {
        // Always available since it doesn't do anything
        true
    }
}
