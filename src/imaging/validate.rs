use crate::{Error, Result};
use image::{ImageFormat, ImageReader};
use std::io::Cursor;
use tracing::info;

/// Smallest upload accepted, in bytes.
pub const MIN_IMAGE_SIZE: usize = 1024;
/// Largest upload accepted, in bytes.
pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024;
/// Smallest accepted width or height, in pixels.
pub const MIN_DIMENSION: u32 = 32;
/// Largest accepted width or height, in pixels.
pub const MAX_DIMENSION: u32 = 4096;

const ACCEPTED_FORMATS: [ImageFormat; 5] = [
    ImageFormat::Jpeg,
    ImageFormat::Png,
    ImageFormat::Bmp,
    ImageFormat::Tiff,
    ImageFormat::WebP,
];

/// What validation learned about an upload without fully decoding it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
    pub byte_len: usize,
}

/// Checks an uploaded payload against the size, format and dimension rules.
/// Dimensions come from the image header; pixel data is not decoded here.
pub fn validate(bytes: &[u8]) -> Result<ImageInfo> {
    let byte_len = bytes.len();
    if byte_len < MIN_IMAGE_SIZE {
        return Err(Error::validation(format!(
            "Image file too small: {} bytes (minimum is {} bytes)",
            byte_len, MIN_IMAGE_SIZE
        )));
    }
    if byte_len > MAX_IMAGE_SIZE {
        return Err(Error::validation(format!(
            "Image file too large: {} bytes (maximum is {} bytes)",
            byte_len, MAX_IMAGE_SIZE
        )));
    }

    let format = image::guess_format(bytes)
        .map_err(|e| Error::validation(format!("Invalid or corrupted image file: {}", e)))?;
    if !ACCEPTED_FORMATS.contains(&format) {
        return Err(Error::validation(format!(
            "Unsupported image format: {} (supported: JPEG, PNG, BMP, TIFF, WEBP)",
            format_name(format)
        )));
    }

    let (width, height) = ImageReader::with_format(Cursor::new(bytes), format)
        .into_dimensions()
        .map_err(|e| Error::validation(format!("Invalid or corrupted image file: {}", e)))?;

    if width < MIN_DIMENSION || height < MIN_DIMENSION {
        return Err(Error::validation(format!(
            "Image dimensions too small: {}x{} (minimum is {}x{})",
            width, height, MIN_DIMENSION, MIN_DIMENSION
        )));
    }
    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(Error::validation(format!(
            "Image dimensions too large: {}x{} (maximum is {}x{})",
            width, height, MAX_DIMENSION, MAX_DIMENSION
        )));
    }

    info!(
        "Image validation passed: {}, {}x{}, {} bytes",
        format_name(format),
        width,
        height,
        byte_len
    );

    Ok(ImageInfo {
        format,
        width,
        height,
        byte_len,
    })
}

fn format_name(format: ImageFormat) -> String {
    format!("{:?}", format).to_uppercase()
}
