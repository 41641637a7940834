//! Capture Request
//!
//! The resolved configuration for a single capture operation.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Output image format for the encoded screenshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    Jpeg,
}

impl ImageFormat {
    /// File extension used for the output file
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpeg",
        }
    }
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// The single capture mode that applies to a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureMode<'a> {
    /// Capture the entire scrollable page height
    FullPage,
    /// Capture the bounds of the element matching a CSS selector
    Element(&'a str),
    /// Capture exactly the configured viewport
    Viewport,
}

/// Resolved configuration for one capture operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureRequest {
    /// Page to load
    pub url: String,
    /// Output file path, without extension
    pub output: String,
    /// Encoded output format
    pub format: ImageFormat,
    /// JPEG quality (0-100); ignored for PNG
    pub quality: u8,
    /// Initial viewport width in pixels
    pub width: u32,
    /// Initial viewport height in pixels
    pub height: u32,
    /// Wait this long after navigation before capturing
    pub delay_ms: u64,
    /// CSS selector identifying a target element
    pub selector: Option<String>,
    /// Capture the entire scrollable page
    pub full_page: bool,
    /// Suppress scrollbar rendering before capture
    pub hide_scrollbars: bool,
}

impl Default for CaptureRequest {
    fn default() -> Self {
        Self {
            url: "https://example.com".to_string(),
            output: "screenshot".to_string(),
            format: ImageFormat::Png,
            quality: 80,
            width: 425,
            height: 1080,
            delay_ms: 0,
            selector: None,
            full_page: true,
            hide_scrollbars: false,
        }
    }
}

impl CaptureRequest {
    /// Create a request for a URL with default settings
    pub fn for_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Determine which capture mode applies.
    ///
    /// Exactly one mode executes per request. When both `full_page` and a
    /// selector are set, full-page wins and the selector is ignored,
    /// matching the tool's historical precedence.
    pub fn mode(&self) -> CaptureMode<'_> {
        if self.full_page {
            CaptureMode::FullPage
        } else if let Some(selector) = self.selector.as_deref() {
            CaptureMode::Element(selector)
        } else {
            CaptureMode::Viewport
        }
    }

    /// Full output path: `{output}.{format}`
    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(format!("{}.{}", self.output, self.format.extension()))
    }
}
