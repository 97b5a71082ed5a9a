use crate::{Error, Result};
use image::RgbImage;
use image::imageops::FilterType;
use std::io::Cursor;

/// Decodes an upload and shapes it for the classifier: cover-crop to a
/// `target` x `target` square, then force three RGB channels.
pub fn for_inference(bytes: &[u8], target: u32) -> Result<RgbImage> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| Error::processing(format!("Failed to decode image: {}", e)))?;
    Ok(img
        .resize_to_fill(target, target, FilterType::Lanczos3)
        .to_rgb8())
}

/// Shrinks an image so neither edge exceeds `max_edge`, preserving aspect
/// ratio and the source encoding. Images already within bounds pass through
/// untouched.
pub fn preview(bytes: &[u8], max_edge: u32) -> Result<Vec<u8>> {
    let format = image::guess_format(bytes)
        .map_err(|e| Error::processing(format!("Failed to decode image: {}", e)))?;
    let img = image::load_from_memory(bytes)
        .map_err(|e| Error::processing(format!("Failed to decode image: {}", e)))?;

    if img.width() <= max_edge && img.height() <= max_edge {
        return Ok(bytes.to_vec());
    }

    let shrunk = img.resize(max_edge, max_edge, FilterType::Lanczos3);
    let mut out = Cursor::new(Vec::new());
    shrunk
        .write_to(&mut out, format)
        .map_err(|e| Error::processing(format!("Failed to re-encode image: {}", e)))?;
    Ok(out.into_inner())
}
