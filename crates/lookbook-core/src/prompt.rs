//! Prompt composition for the image provider.

use crate::models::{ReferenceFlags, SelectionMap, ShootSettings};
use crate::reference::ReferenceDocument;

const SYSTEM_STANDARDS: &str = "\
SYSTEM STANDARDS
You are producing a single high-end fashion editorial photograph for a print campaign.
Follow professional studio practice: one coherent light plan, intentional styling, clean retouching that keeps real skin texture.
Never add text, logos, watermarks, borders or collage layouts. Show exactly the people described, fully inside the frame.";

const REALISM_DIRECTIVES: &str = "\
REALISM DIRECTIVES
Render as a genuine photograph captured on the stated camera and lens, not an illustration or 3D render.
Keep pores, fine hair, fabric weave and natural asymmetry visible; avoid plastic skin, waxy highlights and over-smoothing.
Respect the stated aperture for depth of field, the white balance for colour temperature and the film stock for tonal response.
Hands must have five fingers with believable anatomy; eyes must share a single catchlight direction.";

/// Extra direction derived from which reference attachments were supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualGuidance {
    PoseAndWardrobe,
    PoseOnly,
    WardrobeOnly,
    None,
}

impl From<ReferenceFlags> for VisualGuidance {
    fn from(flags: ReferenceFlags) -> Self {
        match (flags.pose_provided, flags.wardrobe_provided) {
            (true, true) => VisualGuidance::PoseAndWardrobe,
            (true, false) => VisualGuidance::PoseOnly,
            (false, true) => VisualGuidance::WardrobeOnly,
            (false, false) => VisualGuidance::None,
        }
    }
}

impl VisualGuidance {
    pub fn sentence(self) -> &'static str {
        match self {
            VisualGuidance::PoseAndWardrobe => {
                "Follow the supplied pose reference for body posture and limb placement, \
                 and the supplied wardrobe reference for garment cut, fabric and styling."
            }
            VisualGuidance::PoseOnly => {
                "Follow the supplied pose reference for body posture, weight distribution and limb placement."
            }
            VisualGuidance::WardrobeOnly => {
                "Follow the supplied wardrobe reference for garment cut, fabric, colour and styling."
            }
            VisualGuidance::None => "",
        }
    }
}

/// Render the single prompt string sent to the provider.
///
/// Sections appear in a fixed order; empty sections (no reference excerpt,
/// no visual guidance) are left out entirely.
pub fn compose_prompt(
    settings: &ShootSettings,
    selection: &SelectionMap,
    reference: &ReferenceDocument,
    references: ReferenceFlags,
) -> String {
    let sel = selection.resolved();

    let reference_section = if reference.is_empty() {
        String::new()
    } else {
        format!("REFERENCE STANDARDS (excerpt)\n{}", reference.excerpt())
    };

    let settings_section = format!(
        "CAMERA & FILM\n\
         Camera: {}. Lens: {}. Aperture: {}. ISO {}. White balance {}.\n\
         Lighting preset: {}. Film stock: {}. Camera angle: {}.\n\
         Aspect ratio: {}.{}",
        settings.camera_model,
        settings.lens,
        settings.aperture,
        settings.iso,
        settings.white_balance,
        settings.lighting_preset,
        settings.film_stock,
        settings.angle,
        settings.aspect.label(),
        if settings.skincare_mode {
            "\nSkincare campaign: beauty close-up, dewy hydrated skin, minimal makeup, macro-level skin detail."
        } else {
            ""
        }
    );

    let subject_section = format!(
        "SUBJECT & STYLING\n\
         Models: {}; ethnicity {}; age {}; body type {}.\n\
         Makeup: {}, lips {}.\n\
         Hair: {} style, {} colour, {}, {} texture.\n\
         Wardrobe: {}. Accessories: {}.\n\
         Pose: {}. Framing: {}.\n\
         Backdrop: {}. Environment: {}.",
        sel.models,
        sel.ethnicity,
        sel.age,
        sel.body_type,
        sel.makeup,
        sel.lip_color,
        sel.hair_style,
        sel.hair_color,
        sel.hair_length,
        sel.hair_texture,
        sel.wardrobe,
        sel.accessories,
        sel.pose,
        sel.framing,
        sel.backdrop,
        sel.environment,
    );

    let guidance = VisualGuidance::from(references).sentence();

    [
        SYSTEM_STANDARDS,
        REALISM_DIRECTIVES,
        reference_section.as_str(),
        settings_section.as_str(),
        subject_section.as_str(),
        guidance,
    ]
    .into_iter()
    .filter(|section| !section.is_empty())
    .collect::<Vec<_>>()
    .join("\n\n")
}
