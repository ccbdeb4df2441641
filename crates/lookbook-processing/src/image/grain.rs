//! Synthetic film grain
//!
//! A single-channel plane of mid-grey noise is composited over the image with
//! an overlay blend. The noise is a narrow uniform draw, not true Gaussian.

use std::ops::Range;

use image::{DynamicImage, GrayImage, Luma, Rgba};
use rand::Rng;

/// Byte range each grain sample is drawn from.
pub const GRAIN_RANGE: Range<u8> = 112..144;
/// Opacity of the grain layer.
pub const GRAIN_OPACITY: f32 = 0.12;

pub struct GrainOverlay;

impl GrainOverlay {
    /// `width` x `height` plane, each byte independent and uniform in
    /// [`GRAIN_RANGE`].
    pub fn noise_plane<R: Rng>(width: u32, height: u32, rng: &mut R) -> GrayImage {
        GrayImage::from_fn(width, height, |_, _| Luma([rng.random_range(GRAIN_RANGE)]))
    }

    /// Overlay-blend `noise` onto `img` at `opacity`. Alpha is preserved.
    pub fn composite(
        img: DynamicImage,
        noise: &GrayImage,
        opacity: f32,
    ) -> Result<DynamicImage, anyhow::Error> {
        let mut rgba8 = img.to_rgba8();
        if rgba8.dimensions() != noise.dimensions() {
            return Err(anyhow::anyhow!(
                "Grain plane {:?} does not match image {:?}",
                noise.dimensions(),
                rgba8.dimensions()
            ));
        }

        let opacity = opacity.clamp(0.0, 1.0);
        for (x, y, pixel) in rgba8.enumerate_pixels_mut() {
            let grain = noise.get_pixel(x, y)[0] as f32 / 255.0;
            let Rgba([r, g, b, a]) = *pixel;
            *pixel = Rgba([
                overlay_channel(r, grain, opacity),
                overlay_channel(g, grain, opacity),
                overlay_channel(b, grain, opacity),
                a,
            ]);
        }

        Ok(DynamicImage::ImageRgba8(rgba8))
    }
}

fn overlay_channel(base: u8, grain: f32, opacity: f32) -> u8 {
    let b = base as f32 / 255.0;
    let blended = if b < 0.5 {
        2.0 * b * grain
    } else {
        1.0 - 2.0 * (1.0 - b) * (1.0 - grain)
    };
    let out = blended * opacity + b * (1.0 - opacity);
    (out * 255.0).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_noise_plane_range_and_size() {
        let mut rng = StdRng::seed_from_u64(7);
        let plane = GrainOverlay::noise_plane(64, 48, &mut rng);
        assert_eq!(plane.dimensions(), (64, 48));
        assert!(plane.pixels().all(|p| GRAIN_RANGE.contains(&p[0])));

        let distinct: std::collections::HashSet<u8> = plane.pixels().map(|p| p[0]).collect();
        assert!(distinct.len() > 16, "uniform draw should cover most of the range");
    }

    #[test]
    fn test_noise_plane_is_reproducible_with_seed() {
        let a = GrainOverlay::noise_plane(16, 16, &mut StdRng::seed_from_u64(42));
        let b = GrainOverlay::noise_plane(16, 16, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_mid_grey_grain_is_near_identity() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(8, 8, Rgba([40, 128, 220, 200])));
        let noise = GrayImage::from_pixel(8, 8, Luma([128]));
        let out = GrainOverlay::composite(img, &noise, GRAIN_OPACITY).unwrap();
        let pixel = out.to_rgba8().get_pixel(0, 0).0;
        assert!((pixel[0] as i32 - 40).abs() <= 1);
        assert!((pixel[1] as i32 - 128).abs() <= 1);
        assert!((pixel[2] as i32 - 220).abs() <= 1);
        assert_eq!(pixel[3], 200);
    }

    #[test]
    fn test_grain_shifts_are_small() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, Rgba([100, 100, 100, 255])));
        let dark = GrayImage::from_pixel(4, 4, Luma([112]));
        let out = GrainOverlay::composite(img, &dark, GRAIN_OPACITY).unwrap();
        let value = out.to_rgba8().get_pixel(0, 0)[0];
        assert!(value < 100 && value >= 97);
    }

    #[test]
    fn test_zero_opacity_is_noop() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, Rgba([10, 20, 30, 255])));
        let noise = GrayImage::from_pixel(4, 4, Luma([143]));
        let out = GrainOverlay::composite(img, &noise, 0.0).unwrap();
        assert_eq!(*out.to_rgba8().get_pixel(1, 1), Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn test_mismatched_plane_is_rejected() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255])));
        let noise = GrayImage::from_pixel(5, 4, Luma([128]));
        assert!(GrainOverlay::composite(img, &noise, GRAIN_OPACITY).is_err());
    }
}
