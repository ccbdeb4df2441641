//! Shoot-plan derivation
//!
//! Turns a [`SelectionMap`] into normalised [`ShootSettings`] plus the
//! human-readable shoot sheet shown before generation is confirmed.

use crate::models::{AspectRatio, ReferenceFlags, SelectionMap, ShootSettings};

const DEFAULT_CAMERA: &str = "Canon EOS R5";
const DEFAULT_ANGLE: &str = "Eye Level";
const DEFAULT_ISO: u32 = 200;
const DEFAULT_ASPECT_LABEL: &str = "1:1 (Square)";

/// Field defaults that depend on whether skincare mode is on.
struct BranchDefaults {
    film_stock: &'static str,
    lens: &'static str,
    aperture: &'static str,
    white_balance: &'static str,
}

const SKINCARE: BranchDefaults = BranchDefaults {
    film_stock: "Fujifilm Pro 400H",
    lens: "100mm Macro f/2.8",
    aperture: "f/4",
    white_balance: "5200K",
};

const EDITORIAL: BranchDefaults = BranchDefaults {
    film_stock: "Kodak Portra 400",
    lens: "85mm f/1.4",
    aperture: "f/2.0",
    white_balance: "5300K",
};

const SKINCARE_LIGHTING: &str = "Soft Pearl Light";
const EDITORIAL_LIGHTING: &str = "Studio Edge Light";

/// Free-text selections with their per-field fallbacks applied.
///
/// Shared by the shoot sheet and the prompt so both describe the same shoot.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedSelection<'a> {
    pub models: &'a str,
    pub ethnicity: &'a str,
    pub age: &'a str,
    pub body_type: &'a str,
    pub makeup: &'a str,
    pub lip_color: &'a str,
    pub hair_style: &'a str,
    pub hair_color: &'a str,
    pub hair_length: &'a str,
    pub hair_texture: &'a str,
    pub wardrobe: &'a str,
    pub accessories: &'a str,
    pub backdrop: &'a str,
    pub framing: &'a str,
    pub pose: &'a str,
    pub environment: &'a str,
    pub aspect_label: &'a str,
}

impl SelectionMap {
    pub fn resolved(&self) -> ResolvedSelection<'_> {
        let hair = self.hair.as_ref();
        ResolvedSelection {
            models: or(&self.models, "1 female"),
            ethnicity: or(&self.ethnicity, "any"),
            age: or(&self.age, "25–30"),
            body_type: or(&self.body_type, "editorial standard"),
            makeup: or(&self.makeup, "natural editorial"),
            lip_color: or(&self.lip_color, "nude satin"),
            hair_style: hair.and_then(|h| h.style.as_deref()).unwrap_or("loose waves"),
            hair_color: hair.and_then(|h| h.color.as_deref()).unwrap_or("natural"),
            hair_length: hair
                .and_then(|h| h.length.as_deref())
                .unwrap_or("shoulder-length"),
            hair_texture: hair.and_then(|h| h.texture.as_deref()).unwrap_or("natural"),
            wardrobe: or(&self.wardrobe, "minimal neutral tailoring"),
            accessories: or(&self.accessories, "none"),
            backdrop: or(&self.backdrop, "seamless light grey"),
            framing: or(&self.framing, "three-quarter length"),
            pose: or(&self.pose, "relaxed editorial stance"),
            environment: or(&self.environment, "studio"),
            aspect_label: or(&self.aspect_ratio, DEFAULT_ASPECT_LABEL),
        }
    }
}

fn or<'a>(value: &'a Option<String>, fallback: &'static str) -> &'a str {
    value.as_deref().unwrap_or(fallback)
}

impl ShootSettings {
    /// Apply the defaulting rules. Only `skincare_mode` influences other fields.
    pub fn from_selection(selection: &SelectionMap) -> Self {
        let skincare_mode = selection.skincare_mode;
        let branch = if skincare_mode { &SKINCARE } else { &EDITORIAL };

        let lighting_preset = match (&selection.lighting_preset, skincare_mode) {
            (Some(explicit), _) => explicit.clone(),
            (None, true) => SKINCARE_LIGHTING.to_string(),
            (None, false) => selection
                .lighting_mood
                .clone()
                .unwrap_or_else(|| EDITORIAL_LIGHTING.to_string()),
        };

        ShootSettings {
            skincare_mode,
            film_stock: or(&selection.film_stock, branch.film_stock).to_string(),
            lighting_preset,
            camera_model: or(&selection.camera_model, DEFAULT_CAMERA).to_string(),
            lens: or(&selection.lens, branch.lens).to_string(),
            aperture: or(&selection.aperture, branch.aperture).to_string(),
            iso: selection.iso.unwrap_or(DEFAULT_ISO),
            white_balance: or(&selection.white_balance, branch.white_balance).to_string(),
            angle: or(&selection.angle, DEFAULT_ANGLE).to_string(),
            aspect: AspectRatio::from_label(selection.aspect_ratio.as_deref()),
        }
    }
}

/// Derived settings plus the shoot sheet text.
#[derive(Debug, Clone)]
pub struct ShootPlan {
    pub settings: ShootSettings,
    pub summary: String,
}

impl ShootPlan {
    pub fn build(selection: &SelectionMap, references: ReferenceFlags) -> Self {
        let settings = ShootSettings::from_selection(selection);
        let summary = render_summary(&settings, &selection.resolved(), references);
        Self { settings, summary }
    }
}

fn provided(flag: bool) -> &'static str {
    if flag {
        "provided"
    } else {
        "none"
    }
}

fn render_summary(
    settings: &ShootSettings,
    sel: &ResolvedSelection<'_>,
    references: ReferenceFlags,
) -> String {
    let lines = [
        "SHOOT SHEET".to_string(),
        format!(
            "Models: {} | Ethnicity: {} | Age: {} | Body: {}",
            sel.models, sel.ethnicity, sel.age, sel.body_type
        ),
        format!("Makeup: {} | Lips: {}", sel.makeup, sel.lip_color),
        format!(
            "Hair: {}, {}, {}, {} texture",
            sel.hair_style, sel.hair_color, sel.hair_length, sel.hair_texture
        ),
        format!(
            "Camera: {} | Lens: {} | Aperture: {} | ISO {} | WB {}",
            settings.camera_model,
            settings.lens,
            settings.aperture,
            settings.iso,
            settings.white_balance
        ),
        format!(
            "Backdrop: {} | Framing: {} | Angle: {}",
            sel.backdrop, sel.framing, settings.angle
        ),
        format!(
            "Lighting: {} | Pose: {}",
            settings.lighting_preset, sel.pose
        ),
        format!(
            "Environment: {} | Wardrobe: {} | Accessories: {}",
            sel.environment, sel.wardrobe, sel.accessories
        ),
        format!(
            "Skincare mode: {} | Film: {}",
            if settings.skincare_mode { "on" } else { "off" },
            settings.film_stock
        ),
        format!(
            "Aspect: {} (code {})",
            sel.aspect_label,
            settings.aspect.code()
        ),
        format!(
            "References: pose {}, wardrobe {}",
            provided(references.pose_provided),
            provided(references.wardrobe_provided)
        ),
        "Review the sheet above, then confirm to generate the shoot.".to_string(),
    ];
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HairSelection;

    fn skincare(on: bool) -> SelectionMap {
        SelectionMap {
            skincare_mode: on,
            ..SelectionMap::default()
        }
    }

    #[test]
    fn test_skincare_branch_defaults() {
        let settings = ShootSettings::from_selection(&skincare(true));
        assert!(settings.skincare_mode);
        assert_eq!(settings.film_stock, "Fujifilm Pro 400H");
        assert_eq!(settings.lighting_preset, "Soft Pearl Light");
        assert_eq!(settings.lens, "100mm Macro f/2.8");
        assert_eq!(settings.aperture, "f/4");
        assert_eq!(settings.white_balance, "5200K");
        assert_eq!(settings.iso, 200);
    }

    #[test]
    fn test_editorial_branch_defaults() {
        let settings = ShootSettings::from_selection(&skincare(false));
        assert!(!settings.skincare_mode);
        assert_eq!(settings.film_stock, "Kodak Portra 400");
        assert_eq!(settings.lighting_preset, "Studio Edge Light");
        assert_eq!(settings.lens, "85mm f/1.4");
        assert_eq!(settings.aperture, "f/2.0");
        assert_eq!(settings.white_balance, "5300K");
        assert_eq!(settings.iso, 200);
        assert_eq!(settings.camera_model, "Canon EOS R5");
        assert_eq!(settings.angle, "Eye Level");
        assert_eq!(settings.aspect, AspectRatio::Square);
    }

    #[test]
    fn test_explicit_values_win_in_both_branches() {
        for mode in [true, false] {
            let selection = SelectionMap {
                skincare_mode: mode,
                film_stock: Some("Kodak Ektar 100".to_string()),
                lighting_preset: Some("Neon Noir".to_string()),
                lens: Some("50mm f/1.2".to_string()),
                aperture: Some("f/8".to_string()),
                iso: Some(800),
                white_balance: Some("3200K".to_string()),
                ..SelectionMap::default()
            };
            let settings = ShootSettings::from_selection(&selection);
            assert_eq!(settings.film_stock, "Kodak Ektar 100");
            assert_eq!(settings.lighting_preset, "Neon Noir");
            assert_eq!(settings.lens, "50mm f/1.2");
            assert_eq!(settings.aperture, "f/8");
            assert_eq!(settings.iso, 800);
            assert_eq!(settings.white_balance, "3200K");
        }
    }

    #[test]
    fn test_lighting_mood_only_used_outside_skincare() {
        let mut selection = SelectionMap {
            lighting_mood: Some("Golden Hour Glow".to_string()),
            ..SelectionMap::default()
        };
        assert_eq!(
            ShootSettings::from_selection(&selection).lighting_preset,
            "Golden Hour Glow"
        );

        selection.skincare_mode = true;
        assert_eq!(
            ShootSettings::from_selection(&selection).lighting_preset,
            "Soft Pearl Light"
        );
    }

    #[test]
    fn test_summary_uses_fallback_literals() {
        let plan = ShootPlan::build(&SelectionMap::default(), ReferenceFlags::default());
        assert!(plan.summary.starts_with("SHOOT SHEET"));
        assert!(plan.summary.contains("Models: 1 female"));
        assert!(plan.summary.contains("Ethnicity: any"));
        assert!(plan.summary.contains("Age: 25–30"));
        assert!(plan.summary.contains("Aspect: 1:1 (Square) (code 11)"));
        assert!(plan.summary.contains("References: pose none, wardrobe none"));
        assert!(plan.summary.ends_with("confirm to generate the shoot."));
    }

    #[test]
    fn test_summary_section_order() {
        let plan = ShootPlan::build(&SelectionMap::default(), ReferenceFlags::default());
        let order = [
            "Models:",
            "Makeup:",
            "Hair:",
            "Camera:",
            "Backdrop:",
            "Lighting:",
            "Environment:",
            "Skincare mode:",
            "Aspect:",
            "References:",
            "Review the sheet",
        ];
        let positions: Vec<usize> = order
            .iter()
            .map(|marker| plan.summary.find(marker).expect(marker))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_summary_reflects_selection_and_references() {
        let selection = SelectionMap {
            models: Some("2 male".to_string()),
            hair: Some(HairSelection {
                style: Some("slicked back".to_string()),
                ..HairSelection::default()
            }),
            aspect_ratio: Some("9:16 (Vertical)".to_string()),
            ..SelectionMap::default()
        };
        let plan = ShootPlan::build(
            &selection,
            ReferenceFlags {
                pose_provided: true,
                wardrobe_provided: false,
            },
        );
        assert!(plan.summary.contains("Models: 2 male"));
        assert!(plan.summary.contains("Hair: slicked back, natural"));
        assert!(plan.summary.contains("Aspect: 9:16 (Vertical) (code 916)"));
        assert!(plan.summary.contains("References: pose provided, wardrobe none"));
        assert_eq!(plan.settings.aspect, AspectRatio::Vertical916);
    }
}
