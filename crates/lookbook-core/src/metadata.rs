//! Cosmetic metadata for a finished shoot: filename, caption and an
//! EXIF-style block of documentation text.
//!
//! Nothing here is embedded in the image. The shell commands are for the user
//! to run locally with exiftool if they want the tags stamped into the file.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::ShootSettings;

const TOKEN_MAX_CHARS: usize = 20;
const TOKEN_FALLBACK: &str = "Generic";
pub const COLOR_PROFILE: &str = "sRGB IEC61966-2.1";

static NON_ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9]+").expect("static regex is valid"));

/// Keep only ASCII letters and digits, cap at 20 characters, never empty.
pub fn sanitize_token(raw: &str) -> String {
    let cleaned: String = NON_ALPHANUMERIC
        .replace_all(raw, "")
        .chars()
        .take(TOKEN_MAX_CHARS)
        .collect();
    if cleaned.is_empty() {
        TOKEN_FALLBACK.to_string()
    } else {
        cleaned
    }
}

/// `FASHION_{film}_{lighting}_{angle}_{aspect}_{YYYY-MM-DD}.jpg`
pub fn build_filename(settings: &ShootSettings, date: NaiveDate) -> String {
    format!(
        "FASHION_{}_{}_{}_{}_{}.jpg",
        sanitize_token(&settings.film_stock),
        sanitize_token(&settings.lighting_preset),
        sanitize_token(&settings.angle),
        settings.aspect.code(),
        date.format("%Y-%m-%d")
    )
}

fn lighting_phrase(preset: &str) -> &'static str {
    match preset {
        "Soft Pearl Light" => "Luminous pearl-soft light wraps the skin",
        "Studio Edge Light" => "Crisp studio edge light sculpts the silhouette",
        "Golden Hour Glow" => "Warm golden-hour glow drifts across the frame",
        "Rembrandt Drama" => "Rembrandt shadows carve a dramatic profile",
        "High-Key Beauty" => "Bright high-key beauty light keeps every tone clean",
        "Neon Noir" => "Neon noir spill paints the scene in electric colour",
        _ => "Considered editorial lighting shapes the frame",
    }
}

fn film_phrase(stock: &str) -> &'static str {
    match stock {
        "Kodak Portra 400" => "rendered with Portra's creamy skin tones",
        "Fujifilm Pro 400H" => "finished with Pro 400H's airy pastel palette",
        "Kodak Ektar 100" => "saturated with Ektar's vivid fine grain",
        "Ilford HP5 Plus" => "printed in HP5's gritty monochrome",
        "CineStill 800T" => "washed in CineStill's tungsten halation",
        _ => "finished with a timeless film palette",
    }
}

/// `"{lighting phrase}, {film phrase}."`
pub fn build_caption(settings: &ShootSettings) -> String {
    format!(
        "{}, {}.",
        lighting_phrase(&settings.lighting_preset),
        film_phrase(&settings.film_stock)
    )
}

/// Flat camera record returned next to the image.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExifSummary {
    pub camera: String,
    pub lens: String,
    pub aperture: String,
    pub iso: u32,
    pub white_balance: String,
    pub film_stock: String,
    pub lighting_preset: String,
    pub date_taken: String,
}

/// Descriptive metadata payload with ready-to-run exiftool commands.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExifBlock {
    pub filename_hint: String,
    pub color_profile: String,
    pub posix_command: String,
    pub windows_command: String,
    pub notes: String,
}

/// Filename, caption and EXIF text for one finished shoot.
#[derive(Debug, Clone, PartialEq)]
pub struct ShootMetadata {
    pub filename: String,
    pub caption: String,
    pub exif: ExifSummary,
    pub exif_block: ExifBlock,
}

/// "f/2.0" -> "2.0"; values without the prefix pass through.
fn f_number(aperture: &str) -> &str {
    let trimmed = aperture.trim();
    trimmed
        .strip_prefix("f/")
        .or_else(|| trimmed.strip_prefix("F/"))
        .unwrap_or(trimmed)
}

fn posix_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

fn windows_quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', ""))
}

fn exiftool_command(
    program: &str,
    quote: fn(&str) -> String,
    settings: &ShootSettings,
    caption: &str,
    date_taken: &str,
    filename: &str,
) -> String {
    let args = [
        "-overwrite_original".to_string(),
        format!("-Model={}", quote(&settings.camera_model)),
        format!("-LensModel={}", quote(&settings.lens)),
        format!("-FNumber={}", quote(f_number(&settings.aperture))),
        format!("-ISO={}", settings.iso),
        format!("-WhiteBalance={}", quote(&settings.white_balance)),
        format!("-DateTimeOriginal={}", quote(date_taken)),
        format!("-ImageDescription={}", quote(caption)),
        format!("-ICC_Profile:ProfileDescription={}", quote(COLOR_PROFILE)),
        quote(filename),
    ];
    format!("{} {}", program, args.join(" "))
}

/// Build every cosmetic output for a finished shoot.
pub fn synthesize(settings: &ShootSettings, date: NaiveDate) -> ShootMetadata {
    let filename = build_filename(settings, date);
    let caption = build_caption(settings);
    let date_taken = date.format("%Y:%m:%d 12:00:00").to_string();

    let exif_block = ExifBlock {
        filename_hint: filename.clone(),
        color_profile: COLOR_PROFILE.to_string(),
        posix_command: exiftool_command(
            "exiftool",
            posix_quote,
            settings,
            &caption,
            &date_taken,
            &filename,
        ),
        windows_command: exiftool_command(
            "exiftool.exe",
            windows_quote,
            settings,
            &caption,
            &date_taken,
            &filename,
        ),
        notes: format!(
            "Tags are not embedded in the download. Save the image as {} and run one of the \
             commands above with exiftool to stamp camera, lens and film details. Film look: {}.",
            filename, settings.film_stock
        ),
    };

    let exif = ExifSummary {
        camera: settings.camera_model.clone(),
        lens: settings.lens.clone(),
        aperture: settings.aperture.clone(),
        iso: settings.iso,
        white_balance: settings.white_balance.clone(),
        film_stock: settings.film_stock.clone(),
        lighting_preset: settings.lighting_preset.clone(),
        date_taken,
    };

    ShootMetadata {
        filename,
        caption,
        exif,
        exif_block,
    }
}
