//! Image processing — focus-aware cover crop.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Sniff** | ordered magic-byte table ([`sniff_mimetype`]) |
//! | **Plan** | [`plan_scale`] + [`compute_crop_offset`] (pure geometry) |
//! | **Resample** | `resize_exact` + optional `unsharpen` |
//! | **Encode** | JPEG or PNG, matching the input format |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for scale and offset math (unit testable)
//! - **Format**: Magic-byte detection into [`ImageMime`]
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
mod calculations;
mod format;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, ImageBackend};
pub use calculations::{
    Axis, CropOffset, FocusPoint, GeometryError, ScalePlan, Size, bound_percentage,
    compute_crop_offset, plan_scale, plan_scaled_size,
};
pub use format::{ImageMime, sniff_mimetype};
pub use operations::{
    CropPlan, CroppedImage, FocusCropError, FocusCropParams, focus_crop, focus_crop_sizes,
    plan_focus_crop,
};
pub use params::{EncodeParams, Quality, ResampleParams, ResampleQuality, Sharpening};
pub use rust_backend::RustBackend;
