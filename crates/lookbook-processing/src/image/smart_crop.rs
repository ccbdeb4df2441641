use image::{imageops, DynamicImage, GenericImageView, GrayImage};
use imageproc::gradients::sobel_gradients;

/// Longest side of the luma copy used for saliency.
const SALIENCY_MAX_SIDE: u32 = 256;

pub struct SmartCrop;

impl SmartCrop {
    /// Cover-crop dimensions for `ratio` (width / height).
    ///
    /// Only the longer dimension relative to the ratio is trimmed; the result
    /// never exceeds the source and is never zero.
    pub fn cover_dimensions(width: u32, height: u32, ratio: f64) -> (u32, u32) {
        let target_width = ((height as f64 * ratio).round() as u32).min(width).max(1);
        let target_height = ((width as f64 / ratio).round() as u32).min(height).max(1);
        (target_width, target_height)
    }

    /// Crop `img` to `target_width` x `target_height`, placing the window over
    /// the region with the most edge energy.
    pub fn crop(
        img: DynamicImage,
        target_width: u32,
        target_height: u32,
    ) -> Result<DynamicImage, anyhow::Error> {
        let (orig_width, orig_height) = img.dimensions();

        if target_width == 0 || target_height == 0 {
            return Err(anyhow::anyhow!(
                "Crop dimensions ({}, {}) must be non-zero",
                target_width,
                target_height
            ));
        }

        if target_width > orig_width || target_height > orig_height {
            return Err(anyhow::anyhow!(
                "Crop dimensions ({}, {}) exceed image dimensions ({}, {})",
                target_width,
                target_height,
                orig_width,
                orig_height
            ));
        }

        if target_width == orig_width && target_height == orig_height {
            return Ok(img);
        }

        let (x, y) = Self::find_anchor(&img, target_width, target_height);
        tracing::debug!(x, y, target_width, target_height, "Saliency crop anchor");

        Ok(img.crop_imm(x, y, target_width, target_height))
    }

    /// Top-left corner of the most salient window of the given size.
    pub fn find_anchor(img: &DynamicImage, target_width: u32, target_height: u32) -> (u32, u32) {
        let (width, height) = img.dimensions();
        let slack_x = width.saturating_sub(target_width);
        let slack_y = height.saturating_sub(target_height);

        if slack_x == 0 && slack_y == 0 {
            return (0, 0);
        }

        let (small, scale) = Self::saliency_map(img);
        let x = if slack_x > 0 {
            Self::best_offset(&Self::column_profile(&small), width, target_width, scale)
        } else {
            0
        };
        let y = if slack_y > 0 {
            Self::best_offset(&Self::row_profile(&small), height, target_height, scale)
        } else {
            0
        };
        (x, y)
    }

    /// Sobel gradient magnitude on a downscaled luma copy, plus the
    /// downscale factor (small / full).
    fn saliency_map(img: &DynamicImage) -> (GrayImage, f64) {
        let (width, height) = img.dimensions();
        let longest = width.max(height).max(1);
        let scale = (SALIENCY_MAX_SIDE as f64 / longest as f64).min(1.0);
        let small_width = ((width as f64 * scale).round() as u32).max(1);
        let small_height = ((height as f64 * scale).round() as u32).max(1);

        let luma = img.to_luma8();
        let small = if scale < 1.0 {
            imageops::resize(&luma, small_width, small_height, imageops::FilterType::Triangle)
        } else {
            luma
        };

        let gradients = sobel_gradients(&small);
        let magnitude = GrayImage::from_fn(small.width(), small.height(), |x, y| {
            // Sobel magnitudes top out around 1443; fold into a byte
            let value = gradients.get_pixel(x, y)[0] / 6;
            image::Luma([value.min(255) as u8])
        });

        (magnitude, scale)
    }

    fn column_profile(map: &GrayImage) -> Vec<u64> {
        let mut profile = vec![0u64; map.width() as usize];
        for (x, _, pixel) in map.enumerate_pixels() {
            profile[x as usize] += pixel[0] as u64;
        }
        profile
    }

    fn row_profile(map: &GrayImage) -> Vec<u64> {
        let mut profile = vec![0u64; map.height() as usize];
        for (_, y, pixel) in map.enumerate_pixels() {
            profile[y as usize] += pixel[0] as u64;
        }
        profile
    }

    /// Offset along one axis of the window with the highest summed saliency.
    ///
    /// Ties go to the window nearest the centre, and a centred winner maps to
    /// the exact full-resolution centre.
    fn best_offset(profile: &[u64], full_len: u32, window_len: u32, scale: f64) -> u32 {
        let slack = full_len.saturating_sub(window_len);
        let centre = slack / 2;

        let n = profile.len();
        let window = ((window_len as f64 * scale).round() as usize).clamp(1, n.max(1));
        if n == 0 || window >= n {
            return centre;
        }

        let mut prefix = Vec::with_capacity(n + 1);
        prefix.push(0u64);
        for value in profile {
            let last = prefix[prefix.len() - 1];
            prefix.push(last + value);
        }

        let small_centre = (n - window) / 2;
        let mut best_start = small_centre;
        let mut best_score = prefix[small_centre + window] - prefix[small_centre];

        for start in 0..=(n - window) {
            let score = prefix[start + window] - prefix[start];
            let closer = start.abs_diff(small_centre) < best_start.abs_diff(small_centre);
            if score > best_score || (score == best_score && closer) {
                best_score = score;
                best_start = start;
            }
        }

        if best_start == small_centre {
            return centre;
        }

        ((best_start as f64 / scale).round() as u32).min(slack)
    }
}
