//! Lookbook Image Processing Library
//!
//! Post-processing applied to every generated shoot image: cover crop with a
//! saliency anchor, sharpening, colour modulation, film grain and JPEG output.

pub mod compression;
pub mod image;
pub mod pipeline;

// Re-export commonly used types
pub use compression::{decode, encode_jpeg, to_data_url};
pub use crate::image::{GrainOverlay, ImageFilters, SmartCrop};
pub use pipeline::{probe_dimensions, PostProcessStep, ProcessedAsset, ShootPostProcessor};
