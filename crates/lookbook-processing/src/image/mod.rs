//! Bitmap operations used by the post-processing pipeline
//!
//! - Cover crop anchored on edge saliency (smart_crop)
//! - Sharpen and colour modulation (filters)
//! - Synthetic film grain composited with an overlay blend (grain)

pub mod filters;
pub mod grain;
pub mod smart_crop;

pub use filters::ImageFilters;
pub use grain::GrainOverlay;
pub use smart_crop::SmartCrop;
