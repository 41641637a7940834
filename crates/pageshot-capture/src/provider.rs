//! Capture Provider Trait
//!
//! Defines the interface for capture backends (local Chrome, remote, etc.)

use crate::error::CaptureResult;
use crate::request::CaptureRequest;
use async_trait::async_trait;

/// Capture provider trait - implement this for different capture backends
#[async_trait]
pub trait CaptureProvider: Send + Sync {
    /// Perform the capture described by the request and return raw PNG bytes
    async fn capture(&self, request: &CaptureRequest) -> CaptureResult<Vec<u8>>;

    /// Get the name of this provider (for logging/debugging)
    fn provider_name(&self) -> &'static str;

    /// Check if the provider is available/configured
    async fn is_available(&self) -> bool;
}
