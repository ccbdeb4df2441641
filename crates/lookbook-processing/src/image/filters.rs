use image::{DynamicImage, Rgba, RgbaImage};

/// Gaussian sigma for the finishing sharpen.
pub const SHARPEN_SIGMA: f32 = 0.8;
/// Minimum brightness difference the sharpen acts on.
pub const SHARPEN_THRESHOLD: i32 = 2;

pub struct ImageFilters;

impl ImageFilters {
    /// Mild unsharp mask.
    pub fn sharpen(img: DynamicImage) -> DynamicImage {
        let rgba8 = img.to_rgba8();
        let sharpened = image::imageops::unsharpen(&rgba8, SHARPEN_SIGMA, SHARPEN_THRESHOLD);
        DynamicImage::ImageRgba8(sharpened)
    }

    /// Scale every colour channel by `multiplier`; alpha is untouched.
    pub fn brightness(img: DynamicImage, multiplier: f32) -> DynamicImage {
        let rgba8 = img.to_rgba8();
        let mut adjusted = RgbaImage::new(rgba8.width(), rgba8.height());

        for (x, y, pixel) in rgba8.enumerate_pixels() {
            let Rgba([r, g, b, a]) = *pixel;
            adjusted.put_pixel(
                x,
                y,
                Rgba([
                    scale_channel(r, multiplier),
                    scale_channel(g, multiplier),
                    scale_channel(b, multiplier),
                    a,
                ]),
            );
        }

        DynamicImage::ImageRgba8(adjusted)
    }

    /// Push each channel away from (factor > 1) or toward (factor < 1) the
    /// pixel's luma. Greys are left as they are.
    pub fn saturation(img: DynamicImage, factor: f32) -> DynamicImage {
        let rgba8 = img.to_rgba8();
        let mut adjusted = RgbaImage::new(rgba8.width(), rgba8.height());

        for (x, y, pixel) in rgba8.enumerate_pixels() {
            let Rgba([r, g, b, a]) = *pixel;
            let gray = 0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32;
            let mix = |c: u8| (gray + (c as f32 - gray) * factor).round().clamp(0.0, 255.0) as u8;
            adjusted.put_pixel(x, y, Rgba([mix(r), mix(g), mix(b), a]));
        }

        DynamicImage::ImageRgba8(adjusted)
    }
}

fn scale_channel(value: u8, multiplier: f32) -> u8 {
    (value as f32 * multiplier).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GenericImageView;

    fn solid(color: [u8; 4]) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(10, 10, Rgba(color)))
    }

    #[test]
    fn test_brightness_multiplier() {
        let brighter = ImageFilters::brightness(solid([100, 200, 250, 255]), 1.02);
        let pixel = *brighter.to_rgba8().get_pixel(0, 0);
        assert_eq!(pixel, Rgba([102, 204, 255, 255]));
    }

    #[test]
    fn test_brightness_keeps_alpha() {
        let out = ImageFilters::brightness(solid([100, 100, 100, 40]), 1.5);
        assert_eq!(out.to_rgba8().get_pixel(3, 3)[3], 40);
    }

    #[test]
    fn test_saturation_increase_spreads_channels() {
        let original = [100u8, 150, 200, 255];
        let out = ImageFilters::saturation(solid(original), 1.5);
        let pixel = out.to_rgba8().get_pixel(0, 0).0;
        let spread_before = original[2] as i32 - original[0] as i32;
        let spread_after = pixel[2] as i32 - pixel[0] as i32;
        assert!(spread_after > spread_before);
    }

    #[test]
    fn test_saturation_leaves_grey_alone() {
        let out = ImageFilters::saturation(solid([90, 90, 90, 255]), 1.02);
        assert_eq!(*out.to_rgba8().get_pixel(5, 5), Rgba([90, 90, 90, 255]));
    }

    #[test]
    fn test_saturation_zero_is_greyscale() {
        let out = ImageFilters::saturation(solid([100, 150, 200, 255]), 0.0);
        let pixel = out.to_rgba8().get_pixel(0, 0).0;
        assert_eq!(pixel[0], pixel[1]);
        assert_eq!(pixel[1], pixel[2]);
    }

    #[test]
    fn test_sharpen_keeps_flat_regions_and_size() {
        let out = ImageFilters::sharpen(solid([128, 128, 128, 255]));
        assert_eq!(out.dimensions(), (10, 10));
        assert_eq!(*out.to_rgba8().get_pixel(5, 5), Rgba([128, 128, 128, 255]));
    }

    #[test]
    fn test_sharpen_boosts_edges() {
        let mut img = RgbaImage::from_pixel(20, 20, Rgba([80, 80, 80, 255]));
        for y in 0..20 {
            for x in 10..20 {
                img.put_pixel(x, y, Rgba([180, 180, 180, 255]));
            }
        }
        let out = ImageFilters::sharpen(DynamicImage::ImageRgba8(img)).to_rgba8();
        assert!(out.get_pixel(10, 10)[0] >= 180);
        assert!(out.get_pixel(9, 10)[0] <= 80);
    }
}
