//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the three pixel operations the crop
//! pipeline delegates: decode, resample, and encode. Everything geometric
//! stays in [`calculations`](super::calculations); a backend never decides
//! sizes or offsets, it only executes them.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image` crate.

use super::format::ImageMime;
use super::params::{EncodeParams, ResampleParams};
use image::DynamicImage;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Decode failed: {0}")]
    Decode(String),
    #[error("Resample failed: {0}")]
    Resample(String),
    #[error("Encode failed: {0}")]
    Encode(String),
}

/// Trait for image processing backends.
///
/// Backends must be `Sync` so one instance can serve several target sizes
/// in parallel.
pub trait ImageBackend: Sync {
    /// Decode encoded bytes already identified as `mime`.
    fn decode(&self, bytes: &[u8], mime: ImageMime) -> Result<DynamicImage, BackendError>;

    /// Resample to exactly `params.width` x `params.height`.
    fn resample(
        &self,
        image: &DynamicImage,
        params: &ResampleParams,
    ) -> Result<DynamicImage, BackendError>;

    /// Encode into `params.mime`.
    fn encode(&self, image: &DynamicImage, params: &EncodeParams)
    -> Result<Vec<u8>, BackendError>;
}
