use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Requested output aspect ratio, serialized as its short aspect code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum AspectRatio {
    #[default]
    #[serde(rename = "11")]
    Square,
    #[serde(rename = "34")]
    Portrait34,
    #[serde(rename = "45")]
    Portrait45,
    #[serde(rename = "169")]
    Landscape169,
    #[serde(rename = "916")]
    Vertical916,
}

impl AspectRatio {
    /// Parse a free-text aspect label by case-insensitive substring match.
    ///
    /// Precedence is 9:16, 16:9, 4:5, 3:4; anything else (including an absent
    /// or empty label) is square.
    pub fn from_label(label: Option<&str>) -> Self {
        let Some(label) = label.map(str::trim).filter(|l| !l.is_empty()) else {
            return AspectRatio::Square;
        };
        let label = label.to_lowercase();
        if label.contains("9:16") {
            AspectRatio::Vertical916
        } else if label.contains("16:9") {
            AspectRatio::Landscape169
        } else if label.contains("4:5") {
            AspectRatio::Portrait45
        } else if label.contains("3:4") {
            AspectRatio::Portrait34
        } else {
            AspectRatio::Square
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            AspectRatio::Square => "11",
            AspectRatio::Portrait34 => "34",
            AspectRatio::Portrait45 => "45",
            AspectRatio::Landscape169 => "169",
            AspectRatio::Vertical916 => "916",
        }
    }

    /// Width divided by height.
    pub fn ratio(self) -> f64 {
        match self {
            AspectRatio::Square => 1.0,
            AspectRatio::Portrait34 => 3.0 / 4.0,
            AspectRatio::Portrait45 => 4.0 / 5.0,
            AspectRatio::Landscape169 => 16.0 / 9.0,
            AspectRatio::Vertical916 => 9.0 / 16.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Portrait34 => "3:4",
            AspectRatio::Portrait45 => "4:5",
            AspectRatio::Landscape169 => "16:9",
            AspectRatio::Vertical916 => "9:16",
        }
    }
}

/// Output size requested from the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ProviderSize {
    #[default]
    #[serde(rename = "1024x1024")]
    Square,
    #[serde(rename = "1024x1536")]
    Portrait,
    #[serde(rename = "1536x1024")]
    Landscape,
    /// Provider picks; the result is cover-cropped locally afterwards
    #[serde(rename = "auto")]
    Auto,
}

impl ProviderSize {
    /// Map an aspect label to the nearest size the provider accepts.
    pub fn from_label(label: Option<&str>) -> Self {
        let label = label.unwrap_or_default().to_lowercase();
        if label.contains("9:16") || label.contains("vertical") {
            ProviderSize::Auto
        } else if label.contains("16:9") || label.contains("landscape") {
            ProviderSize::Landscape
        } else if label.contains("3:4") || label.contains("portrait") {
            ProviderSize::Portrait
        } else if label.contains("4:5") {
            ProviderSize::Auto
        } else {
            ProviderSize::Square
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProviderSize::Square => "1024x1024",
            ProviderSize::Portrait => "1024x1536",
            ProviderSize::Landscape => "1536x1024",
            ProviderSize::Auto => "auto",
        }
    }
}

/// Normalised camera, lighting and film configuration for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShootSettings {
    pub skincare_mode: bool,
    pub film_stock: String,
    pub lighting_preset: String,
    pub camera_model: String,
    pub lens: String,
    pub aperture: String,
    pub iso: u32,
    pub white_balance: String,
    pub angle: String,
    #[serde(rename = "aspectCode")]
    pub aspect: AspectRatio,
}

/// Which optional reference attachments came with the submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceFlags {
    pub pose_provided: bool,
    pub wardrobe_provided: bool,
}

/// Everything sent to the provider for one generation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub settings: ShootSettings,
    pub prompt: String,
    #[serde(rename = "providerSizeHint")]
    pub size: ProviderSize,
    pub reference_flags: ReferenceFlags,
}

/// Where the provider put the bitmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetSource {
    Inline,
    Url(String),
}

/// Raw bitmap returned by the provider, before post-processing.
#[derive(Debug, Clone)]
pub struct GeneratedAsset {
    pub data: Vec<u8>,
    pub source: AssetSource,
    /// Probed from the header; 1024 when it cannot be read
    pub width: u32,
    pub height: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_labels() {
        let cases = [
            ("1:1 (Square)", AspectRatio::Square, "11", 1.0),
            ("4:5", AspectRatio::Portrait45, "45", 0.8),
            ("3:4 (Portrait)", AspectRatio::Portrait34, "34", 0.75),
            ("9:16 (Vertical)", AspectRatio::Vertical916, "916", 0.5625),
            ("16:9 (Landscape)", AspectRatio::Landscape169, "169", 16.0 / 9.0),
        ];
        for (label, expected, code, ratio) in cases {
            let aspect = AspectRatio::from_label(Some(label));
            assert_eq!(aspect, expected, "label {label}");
            assert_eq!(aspect.code(), code);
            assert!((aspect.ratio() - ratio).abs() < 1e-9);
        }
    }

    #[test]
    fn test_aspect_empty_or_unknown_is_square() {
        for label in [None, Some(""), Some("   "), Some("2:3"), Some("cinemascope")] {
            let aspect = AspectRatio::from_label(label);
            assert_eq!(aspect, AspectRatio::Square);
            assert_eq!(aspect.code(), "11");
            assert_eq!(aspect.ratio(), 1.0);
        }
    }

    #[test]
    fn test_aspect_match_is_case_insensitive_substring() {
        assert_eq!(
            AspectRatio::from_label(Some("Story 9:16 VERTICAL")),
            AspectRatio::Vertical916
        );
    }

    #[test]
    fn test_provider_size_mapping() {
        assert_eq!(ProviderSize::from_label(Some("9:16 (Vertical)")), ProviderSize::Auto);
        assert_eq!(ProviderSize::from_label(Some("Vertical story")), ProviderSize::Auto);
        assert_eq!(
            ProviderSize::from_label(Some("16:9 (Landscape)")),
            ProviderSize::Landscape
        );
        assert_eq!(ProviderSize::from_label(Some("LANDSCAPE")), ProviderSize::Landscape);
        assert_eq!(
            ProviderSize::from_label(Some("3:4 (Portrait)")),
            ProviderSize::Portrait
        );
        assert_eq!(ProviderSize::from_label(Some("4:5")), ProviderSize::Auto);
        assert_eq!(ProviderSize::from_label(Some("1:1 (Square)")), ProviderSize::Square);
        assert_eq!(ProviderSize::from_label(None), ProviderSize::Square);
    }

    #[test]
    fn test_provider_size_serializes_as_wire_value() {
        assert_eq!(
            serde_json::to_value(ProviderSize::Portrait).unwrap(),
            serde_json::json!("1024x1536")
        );
        assert_eq!(ProviderSize::Auto.as_str(), "auto");
    }

    #[test]
    fn test_aspect_serializes_as_code() {
        assert_eq!(
            serde_json::to_value(AspectRatio::Landscape169).unwrap(),
            serde_json::json!("169")
        );
    }
}
