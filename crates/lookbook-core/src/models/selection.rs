use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Option values picked in the shoot form, keyed by category.
///
/// Every field is optional. Blank strings are normalised to `None` at
/// deserialization so downstream defaulting only ever sees "set" or "unset".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SelectionMap {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub models: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub ethnicity: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub age: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub body_type: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub makeup: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub lip_color: Option<String>,
    #[serde(default)]
    pub hair: Option<HairSelection>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub wardrobe: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub accessories: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub camera_model: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub lens: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub aperture: Option<String>,
    #[serde(default, deserialize_with = "iso_value")]
    pub iso: Option<u32>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub white_balance: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub backdrop: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub framing: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub angle: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub lighting_preset: Option<String>,
    /// Free-text mood, used as the lighting preset when none was picked
    #[serde(default, deserialize_with = "blank_as_none")]
    pub lighting_mood: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub pose: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub environment: Option<String>,
    #[serde(default, deserialize_with = "flag")]
    pub skincare_mode: bool,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub film_stock: Option<String>,
    /// Free-text aspect label such as "4:5" or "9:16 (Vertical)"
    #[serde(default, deserialize_with = "blank_as_none")]
    pub aspect_ratio: Option<String>,
}

/// Nested hair attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HairSelection {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub style: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub color: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub length: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub texture: Option<String>,
}

/// What the caller asked for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ShootAction {
    #[default]
    Plan,
    Generate,
}

/// Where a submission goes after planning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShootIntent {
    /// Return the shoot sheet without contacting the provider
    PlanOnly,
    /// Confirmed generation
    Generate,
}

/// The JSON `payload` part of a shoot submission.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShootPayload {
    #[serde(default)]
    pub action: ShootAction,
    #[serde(default, deserialize_with = "flag")]
    pub confirm: bool,
    #[serde(flatten)]
    pub selection: SelectionMap,
}

impl ShootPayload {
    /// Generation needs both the generate action and an explicit confirmation.
    pub fn intent(&self) -> ShootIntent {
        match (self.action, self.confirm) {
            (ShootAction::Generate, true) => ShootIntent::Generate,
            (ShootAction::Generate, false) | (ShootAction::Plan, _) => ShootIntent::PlanOnly,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Scalar>::deserialize(deserializer)?;
    Ok(match value {
        Some(Scalar::Text(s)) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Some(Scalar::Number(n)) => Some(n.to_string()),
        Some(Scalar::Bool(b)) => Some(b.to_string()),
        None => None,
    })
}

fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Scalar>::deserialize(deserializer)?;
    Ok(match value {
        Some(Scalar::Bool(b)) => b,
        Some(Scalar::Text(s)) => crate::config::parse_flag(&s),
        Some(Scalar::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
        None => false,
    })
}

/// ISO arrives as `400`, `"400"` or `"ISO 400"`.
fn iso_value<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Scalar>::deserialize(deserializer)?;
    Ok(match value {
        Some(Scalar::Number(n)) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        Some(Scalar::Text(s)) => {
            let digits: String = s.chars().filter(|c| c.is_ascii_digit()).collect();
            digits.parse::<u32>().ok()
        }
        Some(Scalar::Bool(_)) | None => None,
    })
}
