//! Generation orchestrator
//!
//! Received -> Planning -> PlanOnly, or
//! Planning -> AwaitingProvider -> ProcessingImage -> Done.
//! Every failure is terminal for the request; nothing is retried.

use chrono::Utc;
use lookbook_core::{
    compose_prompt, synthesize, AppError, ExifBlock, ExifSummary, GenerationRequest,
    ProviderSize, ReferenceDocument, ReferenceFlags, ShootIntent, ShootPayload, ShootPlan,
    ShootSettings,
};
use lookbook_processing::ShootPostProcessor;
use serde::Serialize;
use utoipa::ToSchema;

use super::provider::ImageProvider;

pub const SHOOT_SHEET_STATUS: &str = "shoot-sheet";
const SHOOT_SHEET_MESSAGE: &str =
    "Shoot sheet ready. Resubmit with action \"generate\" and confirm=true to render it.";

/// A parsed multipart submission.
#[derive(Debug, Clone, Default)]
pub struct ShootSubmission {
    pub payload: ShootPayload,
    pub references: ReferenceFlags,
}

/// Plan-phase answer: the derived settings and the sheet to review.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShootSheetResponse {
    /// Always `"shoot-sheet"`
    pub status: String,
    pub shoot_sheet: String,
    pub settings: ShootSettings,
    pub message: String,
}

impl From<ShootPlan> for ShootSheetResponse {
    fn from(plan: ShootPlan) -> Self {
        Self {
            status: SHOOT_SHEET_STATUS.to_string(),
            shoot_sheet: plan.summary,
            settings: plan.settings,
            message: SHOOT_SHEET_MESSAGE.to_string(),
        }
    }
}

/// Generate-phase answer: the finished image and its metadata.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedShootResponse {
    /// `data:image/jpeg;base64,...`
    pub image_url: String,
    pub filename: String,
    pub caption: String,
    pub exif: ExifSummary,
    pub exif_block: ExifBlock,
    pub settings: ShootSettings,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(untagged)]
pub enum ShootOutcome {
    ShootSheet(ShootSheetResponse),
    Generated(GeneratedShootResponse),
}

/// Runs one submission through the plan/generate flow.
pub struct ShootOrchestrator<'a> {
    provider: &'a dyn ImageProvider,
    reference: &'a ReferenceDocument,
    post_processor: &'a ShootPostProcessor,
}

impl<'a> ShootOrchestrator<'a> {
    pub fn new(
        provider: &'a dyn ImageProvider,
        reference: &'a ReferenceDocument,
        post_processor: &'a ShootPostProcessor,
    ) -> Self {
        Self {
            provider,
            reference,
            post_processor,
        }
    }

    pub async fn run(&self, submission: ShootSubmission) -> Result<ShootOutcome, AppError> {
        let ShootSubmission {
            payload,
            references,
        } = submission;

        tracing::debug!(state = "planning", action = ?payload.action, confirm = payload.confirm);
        let plan = ShootPlan::build(&payload.selection, references);

        match payload.intent() {
            ShootIntent::PlanOnly => {
                tracing::debug!(state = "plan_only", "Returning shoot sheet");
                Ok(ShootOutcome::ShootSheet(plan.into()))
            }
            ShootIntent::Generate => self
                .generate(plan, &payload, references)
                .await
                .map(ShootOutcome::Generated),
        }
    }

    async fn generate(
        &self,
        plan: ShootPlan,
        payload: &ShootPayload,
        references: ReferenceFlags,
    ) -> Result<GeneratedShootResponse, AppError> {
        let selection = &payload.selection;
        let prompt = compose_prompt(&plan.settings, selection, self.reference, references);
        let request = GenerationRequest {
            settings: plan.settings,
            prompt,
            size: ProviderSize::from_label(selection.aspect_ratio.as_deref()),
            reference_flags: references,
        };

        if references.pose_provided || references.wardrobe_provided {
            // Attachments only shape the guidance sentence; their bytes are not uploaded.
            tracing::debug!(
                pose = references.pose_provided,
                wardrobe = references.wardrobe_provided,
                "Reference attachments present"
            );
        }

        tracing::debug!(
            state = "awaiting_provider",
            size = request.size.as_str(),
            aspect = request.settings.aspect.code()
        );
        let asset = self.provider.generate(&request).await?;

        tracing::debug!(
            state = "processing_image",
            source = ?asset.source,
            bytes = asset.data.len(),
            width = asset.width,
            height = asset.height
        );
        let processor = self.post_processor.clone();
        let aspect = request.settings.aspect;
        let processed = tokio::task::spawn_blocking(move || processor.process(&asset.data, aspect))
            .await
            .map_err(|e| AppError::ImageProcessing(format!("Processing task failed: {}", e)))?
            .map_err(|e| AppError::ImageProcessing(format!("{:#}", e)))?;

        let metadata = synthesize(&request.settings, Utc::now().date_naive());
        tracing::info!(
            state = "done",
            filename = %metadata.filename,
            width = processed.width,
            height = processed.height,
            "Shoot generated"
        );

        Ok(GeneratedShootResponse {
            image_url: processed.data_url(),
            filename: metadata.filename,
            caption: metadata.caption,
            exif: metadata.exif,
            exif_block: metadata.exif_block,
            settings: request.settings,
            width: processed.width,
            height: processed.height,
        })
    }
}
