//! Screenshot Encoder
//!
//! Re-encodes raw captured image bytes into the requested output format
//! and writes the result to disk.

use image::codecs::jpeg::JpegEncoder;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{CaptureError, CaptureResult};
use crate::request::ImageFormat;

/// Encode captured image bytes and write `{output}.{format}`.
///
/// JPEG re-encodes at the given quality (0-100, clamped to the codec's
/// 1-100 range); PNG re-encodes losslessly and ignores quality. Fails with
/// [`CaptureError::Encoding`] when the bytes are not a decodable image.
pub fn save_screenshot(
    image_bytes: &[u8],
    output: &str,
    format: ImageFormat,
    quality: u8,
) -> CaptureResult<PathBuf> {
    let img = image::load_from_memory(image_bytes)
        .map_err(|e| CaptureError::Encoding(format!("Captured data is not an image: {}", e)))?;

    let output_path = PathBuf::from(format!("{}.{}", output, format.extension()));
    debug!(
        "Encoding {}x{} capture as {} to {}",
        img.width(),
        img.height(),
        format,
        output_path.display()
    );

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    match format {
        ImageFormat::Jpeg => write_jpeg(&img, &output_path, quality)?,
        ImageFormat::Png => write_png(&img, &output_path)?,
    }

    info!("Screenshot saved to {}", output_path.display());
    Ok(output_path)
}

fn write_jpeg(img: &image::DynamicImage, path: &Path, quality: u8) -> CaptureResult<()> {
    let writer = BufWriter::new(File::create(path)?);
    // JPEG carries no alpha channel
    let rgb = img.to_rgb8();
    let mut encoder = JpegEncoder::new_with_quality(writer, quality.max(1));
    encoder
        .encode_image(&rgb)
        .map_err(|e| CaptureError::Encoding(format!("JPEG encoding failed: {}", e)))
}

fn write_png(img: &image::DynamicImage, path: &Path) -> CaptureResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    img.write_to(&mut writer, image::ImageFormat::Png)
        .map_err(|e| CaptureError::Encoding(format!("PNG encoding failed: {}", e)))
}
