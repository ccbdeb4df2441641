use std::io::Cursor;

use anyhow::{Context, Result};
use base64::{engine::general_purpose, Engine as _};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageReader};

/// Quality of the lossy round-trip inside the pipeline.
pub const INTERMEDIATE_JPEG_QUALITY: u8 = 95;
/// Quality of the delivered image.
pub const OUTPUT_JPEG_QUALITY: u8 = 92;

pub const JPEG_MIME: &str = "image/jpeg";

/// Encode as baseline JPEG. Alpha is dropped since JPEG cannot carry it.
pub fn encode_jpeg(img: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    let rgb8 = img.to_rgb8();
    let mut buffer = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100));
    encoder
        .encode_image(&rgb8)
        .context("Failed to encode JPEG")?;
    Ok(buffer)
}

/// Decode any supported format, sniffing it from the bytes.
pub fn decode(data: &[u8]) -> Result<DynamicImage> {
    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .context("Failed to read image header")?;
    reader.decode().context("Failed to decode image")
}

/// `data:{mime};base64,{payload}`
pub fn to_data_url(mime: &str, data: &[u8]) -> String {
    format!("data:{};base64,{}", mime, general_purpose::STANDARD.encode(data))
}
