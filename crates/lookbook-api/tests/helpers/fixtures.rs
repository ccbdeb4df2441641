//! Test fixtures: provider bitmaps and response bodies.

use std::io::Cursor;

use base64::{engine::general_purpose, Engine as _};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use serde_json::json;

/// PNG with a soft gradient so the crop has something to look at.
pub fn create_test_png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
            140,
            255,
        ])
    });
    let mut out = Vec::new();
    DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
        .expect("Failed to encode test PNG");
    out
}

/// `images/generations` success body with the bitmap inline.
pub fn inline_image_body(width: u32, height: u32) -> String {
    let encoded = general_purpose::STANDARD.encode(create_test_png(width, height));
    json!({ "created": 1_700_000_000, "data": [{ "b64_json": encoded }] }).to_string()
}

/// `images/generations` success body pointing at a downloadable URL.
pub fn url_image_body(url: &str) -> String {
    json!({ "created": 1_700_000_000, "data": [{ "url": url }] }).to_string()
}
