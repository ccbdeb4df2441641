//! Data models for a shoot request
//!
//! `selection` holds what arrives from the form, `shoot` what the server
//! derives from it.

mod selection;
mod shoot;

pub use selection::*;
pub use shoot::*;
