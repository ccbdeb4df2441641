//! Post-processing pipeline for generated shoot images
//!
//! Decode, cover-crop to the requested aspect, then run a fixed list of
//! bitmap -> bitmap finishing steps and encode the result as JPEG.

use std::io::Cursor;

use anyhow::{Context, Result};
use bytes::Bytes;
use image::{DynamicImage, GenericImageView, ImageReader};
use lookbook_core::AspectRatio;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::compression::{
    decode, encode_jpeg, to_data_url, INTERMEDIATE_JPEG_QUALITY, JPEG_MIME, OUTPUT_JPEG_QUALITY,
};
use crate::image::grain::GRAIN_OPACITY;
use crate::image::{GrainOverlay, ImageFilters, SmartCrop};

/// Side length assumed when the header cannot be read.
pub const FALLBACK_DIMENSION: u32 = 1024;
pub const BRIGHTNESS_MULTIPLIER: f32 = 1.02;
pub const SATURATION_MULTIPLIER: f32 = 1.02;

/// Width and height from the image header without decoding pixels.
/// Unreadable headers fall back to 1024 x 1024.
pub fn probe_dimensions(data: &[u8]) -> (u32, u32) {
    ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .ok()
        .and_then(|reader| reader.into_dimensions().ok())
        .unwrap_or((FALLBACK_DIMENSION, FALLBACK_DIMENSION))
}

/// One finishing step, applied after the crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostProcessStep {
    Sharpen,
    JpegRoundTrip,
    Brightness,
    Saturation,
    Grain,
}

impl PostProcessStep {
    /// Fixed application order.
    pub const ORDER: [PostProcessStep; 5] = [
        PostProcessStep::Sharpen,
        PostProcessStep::JpegRoundTrip,
        PostProcessStep::Brightness,
        PostProcessStep::Saturation,
        PostProcessStep::Grain,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PostProcessStep::Sharpen => "sharpen",
            PostProcessStep::JpegRoundTrip => "jpeg_round_trip",
            PostProcessStep::Brightness => "brightness",
            PostProcessStep::Saturation => "saturation",
            PostProcessStep::Grain => "grain",
        }
    }
}

/// Final encoded image.
#[derive(Debug, Clone)]
pub struct ProcessedAsset {
    pub encoded: Bytes,
    pub width: u32,
    pub height: u32,
}

impl ProcessedAsset {
    /// Self-contained `data:image/jpeg;base64,...` URL.
    pub fn data_url(&self) -> String {
        to_data_url(JPEG_MIME, &self.encoded)
    }
}

/// Applies the finishing chain to one provider bitmap.
#[derive(Debug, Clone, Default)]
pub struct ShootPostProcessor {
    grain_seed: Option<u64>,
}

impl ShootPostProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fix the grain seed so output is reproducible.
    pub fn with_grain_seed(seed: u64) -> Self {
        Self {
            grain_seed: Some(seed),
        }
    }

    /// Run the whole chain on raw provider bytes.
    pub fn process(&self, data: &[u8], aspect: AspectRatio) -> Result<ProcessedAsset> {
        let (natural_width, natural_height) = probe_dimensions(data);
        let img = decode(data)?;

        let cropped = Self::cover_crop(img, natural_width, natural_height, aspect)?;
        let (width, height) = cropped.dimensions();
        tracing::debug!(
            natural_width,
            natural_height,
            width,
            height,
            aspect = aspect.code(),
            "Cover crop applied"
        );

        let mut rng = match self.grain_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };

        let mut current = cropped;
        for step in PostProcessStep::ORDER {
            current = Self::apply_step(step, current, &mut rng)
                .with_context(|| format!("Post-processing step '{}' failed", step.name()))?;
        }

        let encoded = encode_jpeg(&current, OUTPUT_JPEG_QUALITY)?;
        tracing::debug!(bytes = encoded.len(), width, height, "Encoded final JPEG");

        Ok(ProcessedAsset {
            encoded: Bytes::from(encoded),
            width,
            height,
        })
    }

    /// Crop to `aspect` using targets computed from the probed dimensions,
    /// clamped to what was actually decoded.
    pub fn cover_crop(
        img: DynamicImage,
        natural_width: u32,
        natural_height: u32,
        aspect: AspectRatio,
    ) -> Result<DynamicImage> {
        let (decoded_width, decoded_height) = img.dimensions();
        let (target_width, target_height) =
            SmartCrop::cover_dimensions(natural_width, natural_height, aspect.ratio());
        SmartCrop::crop(
            img,
            target_width.min(decoded_width),
            target_height.min(decoded_height),
        )
    }

    /// Apply a single finishing step.
    pub fn apply_step(
        step: PostProcessStep,
        img: DynamicImage,
        rng: &mut StdRng,
    ) -> Result<DynamicImage> {
        match step {
            PostProcessStep::Sharpen => Ok(ImageFilters::sharpen(img)),
            PostProcessStep::JpegRoundTrip => {
                let jpeg = encode_jpeg(&img, INTERMEDIATE_JPEG_QUALITY)?;
                decode(&jpeg)
            }
            PostProcessStep::Brightness => {
                Ok(ImageFilters::brightness(img, BRIGHTNESS_MULTIPLIER))
            }
            PostProcessStep::Saturation => {
                Ok(ImageFilters::saturation(img, SATURATION_MULTIPLIER))
            }
            PostProcessStep::Grain => {
                let (width, height) = img.dimensions();
                let noise = GrainOverlay::noise_plane(width, height, rng);
                GrainOverlay::composite(img, &noise, GRAIN_OPACITY)
            }
        }
    }
}
