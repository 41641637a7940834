//! Page Driver
//!
//! Synchronous seam over a live browser session, and the capture sequence
//! that runs against it. Keeping the sequence behind a trait lets tests
//! script a fake session without Chrome.

use std::time::Duration;
use tracing::{error, info, warn};

use crate::error::{CaptureError, CaptureResult};
use crate::request::{CaptureMode, CaptureRequest};

/// Script used to suppress scrollbar rendering before capture
const HIDE_SCROLLBARS_SCRIPT: &str = "document.body.style.overflow = \"hidden\";";

/// Script returning the full scrollable height of the loaded page
const SCROLL_HEIGHT_SCRIPT: &str = "document.body.scrollHeight";

/// Operations a capture needs from a live browser session.
///
/// Implementations are synchronous; the local Chrome driver runs on the
/// blocking pool (see [`crate::chrome`]).
pub trait PageDriver {
    /// Navigate the session to a URL and wait for the load to settle
    fn navigate(&self, url: &str) -> CaptureResult<()>;

    /// Evaluate a script in the page, returning its JSON value
    fn execute_script(&self, script: &str) -> CaptureResult<serde_json::Value>;

    /// Resize the session window to the given dimensions
    fn set_viewport(&self, width: u32, height: u32) -> CaptureResult<()>;

    /// Capture the visible area as PNG bytes
    fn take_screenshot(&self) -> CaptureResult<Vec<u8>>;

    /// Locate the element matching a CSS selector, scroll it into view,
    /// and capture its rendered bounds as PNG bytes.
    ///
    /// Fails with [`CaptureError::ElementNotFound`] when nothing matches.
    fn capture_element(&self, selector: &str) -> CaptureResult<Vec<u8>>;

    /// Terminate the browser session
    fn close(&self) -> CaptureResult<()>;
}

/// Run the capture sequence against an already-launched session.
///
/// Steps run in strict order and any failure aborts the rest: navigate,
/// optional delay, optional scrollbar suppression, then exactly one capture
/// mode per [`CaptureRequest::mode`]. Session teardown is the caller's
/// responsibility so it happens on every exit path.
pub fn run_capture<D: PageDriver>(driver: &D, request: &CaptureRequest) -> CaptureResult<Vec<u8>> {
    info!("Navigating to URL: {}", request.url);
    driver.navigate(&request.url)?;

    if request.delay_ms > 0 {
        info!("Waiting for {} ms", request.delay_ms);
        std::thread::sleep(Duration::from_millis(request.delay_ms));
    }

    if request.hide_scrollbars {
        info!("Hiding scrollbars");
        driver.execute_script(HIDE_SCROLLBARS_SCRIPT)?;
    }

    match request.mode() {
        CaptureMode::FullPage => {
            info!("Capturing full page screenshot");
            driver.set_viewport(request.width, request.height)?;
            let total_height = measure_scroll_height(driver)?;
            driver.set_viewport(request.width, total_height)?;
            driver.take_screenshot()
        }
        CaptureMode::Element(selector) => {
            info!("Locating element by selector: {}", selector);
            driver.capture_element(selector)
        }
        CaptureMode::Viewport => {
            info!("Capturing viewport screenshot");
            driver.set_viewport(request.width, request.height)?;
            driver.take_screenshot()
        }
    }
}

/// Run the capture sequence, then terminate the session.
///
/// The close call runs exactly once whether the sequence succeeded or
/// failed; failures are logged with their classification before they
/// propagate unchanged.
pub fn capture_and_close<D: PageDriver>(
    driver: &D,
    request: &CaptureRequest,
) -> CaptureResult<Vec<u8>> {
    let result = run_capture(driver, request);

    info!("Quitting browser session");
    if let Err(e) = driver.close() {
        warn!("Browser session did not close cleanly: {}", e);
    }

    if let Err(e) = &result {
        error!("Capture failed ({}): {}", e.category(), e);
    }
    result
}

/// Query the page for its full scrollable height
fn measure_scroll_height<D: PageDriver>(driver: &D) -> CaptureResult<u32> {
    let value = driver.execute_script(SCROLL_HEIGHT_SCRIPT)?;
    value
        .as_u64()
        .or_else(|| value.as_f64().map(|h| h as u64))
        .map(|h| h as u32)
        .ok_or_else(|| {
            CaptureError::Browser(format!("Page returned a non-numeric scroll height: {value}"))
        })
}
