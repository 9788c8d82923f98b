//! # Focal Crop
//!
//! Focus-aware cover cropping for JPEG and PNG images. Given a source image,
//! a target size, and a focus point expressed as percentages of the image's
//! width and height, produce an image of exactly the target size that fills
//! the frame (no letterboxing) and keeps the focus point as close to the
//! center as the image edges allow.
//!
//! # Architecture: Plan, Then Pixels
//!
//! Every crop runs the same fixed pipeline:
//!
//! ```text
//! sniff → decode → plan scale → resample → plan offset → crop → encode
//! ```
//!
//! The two planning steps are pure functions in
//! [`imaging::calculations`](imaging) and never touch pixel data:
//!
//! - **Scale** ([`imaging::plan_scale`]): the aspect-preserving size that
//!   covers the target on both axes, and the ratio down to the minimal cover.
//! - **Offset** ([`imaging::compute_crop_offset`]): how far to shift the
//!   resampled image so the target window is centered on the focus point,
//!   pinned to an edge when centering would leave the image.
//!
//! Pixel work goes through the [`imaging::ImageBackend`] trait so the
//! pipeline can be tested with a recording mock.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | Geometry, format sniffing, backend trait, `image`-crate backend, pipeline |
//! | [`config`] | TOML config loading, merging, and validation |
//! | [`naming`] | `WxH` size parsing and output filename templating |
//! | [`output`] | CLI report formatting |
//! | [`staging`] | All-or-nothing output file writing |
//!
//! # Design Decisions
//!
//! ## Real-Valued Geometry
//!
//! Sizes and offsets are `f64` until the last moment. Scale factors are
//! applied to un-rounded values, and only the resample size and crop origin
//! are rounded, each with a clamp that keeps the crop window inside the image.
//!
//! ## Fail Whole
//!
//! Unsupported formats are rejected before decoding. Any error in any stage
//! aborts the request, and when several sizes are requested at once a single
//! failure discards them all. The CLI writes files only after every size
//! succeeded, staging each in a temporary file and renaming them into place
//! together, so a run never leaves half its outputs on disk.

pub mod config;
pub mod imaging;
pub mod naming;
pub mod output;
pub mod staging;

#[cfg(test)]
pub(crate) mod test_helpers;
