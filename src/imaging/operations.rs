//! High-level focus crop operations.
//!
//! These functions combine calculations with backend execution:
//!
//! ```text
//! sniff → decode → plan_scale → resample → compute_crop_offset → crop → encode
//! ```
//!
//! Every stage either succeeds or aborts the whole request. Nothing partial
//! is ever returned: [`focus_crop_sizes`] discards all sizes if one fails.

use super::backend::{BackendError, ImageBackend};
use super::calculations::{
    CropOffset, FocusPoint, GeometryError, ScalePlan, Size, compute_crop_offset, plan_scale,
};
use super::format::{ImageMime, sniff_mimetype};
use super::params::{EncodeParams, Quality, ResampleParams, ResampleQuality, Sharpening};
use image::DynamicImage;
use rayon::prelude::*;
use serde::Serialize;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum FocusCropError {
    #[error("File not supported ({})", describe_mime(.0))]
    UnsupportedFormat(Option<ImageMime>),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error(transparent)]
    Backend(#[from] BackendError),
}

fn describe_mime(mime: &Option<ImageMime>) -> &'static str {
    mime.map(ImageMime::mime_type).unwrap_or("unknown")
}

/// Result type for focus crop operations.
pub type Result<T> = std::result::Result<T, FocusCropError>;

/// Per-request options shared by every target size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocusCropParams {
    pub focus: FocusPoint,
    pub resample: ResampleQuality,
    pub alpha: bool,
    pub sharpening: Option<Sharpening>,
    /// JPEG quality. PNG output ignores it.
    pub quality: Quality,
}

impl Default for FocusCropParams {
    fn default() -> Self {
        Self {
            focus: FocusPoint::CENTER,
            resample: ResampleQuality::default(),
            alpha: false,
            sharpening: None,
            quality: Quality::default(),
        }
    }
}

/// Geometry for one crop, computed before any pixel work.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CropPlan {
    pub original: (u32, u32),
    pub target: (u32, u32),
    pub scale: ScalePlan,
    /// Size the resampler must produce: the minimal cover in whole pixels.
    pub resample_to: (u32, u32),
    pub offset: CropOffset,
    /// Top-left corner of the target window inside the resampled image.
    pub crop_origin: (u32, u32),
}

/// One finished crop.
#[derive(Debug, Clone)]
pub struct CroppedImage {
    pub bytes: Vec<u8>,
    pub mime: ImageMime,
    pub plan: CropPlan,
    pub elapsed: Duration,
}

impl CroppedImage {
    pub fn target(&self) -> (u32, u32) {
        self.plan.target
    }
}

/// Plan a focus crop without touching pixels.
///
/// Useful for dry runs and for testing the geometry in isolation.
pub fn plan_focus_crop(
    original: (u32, u32),
    target: (u32, u32),
    focus: FocusPoint,
) -> std::result::Result<CropPlan, GeometryError> {
    let target_size = Size::from_pixels(target.0, target.1);
    let scale = plan_scale(Size::from_pixels(original.0, original.1), target_size)?;
    let resample_to = scale.cover_size().to_pixels_covering(target)?;
    let offset = compute_crop_offset(
        Size::from_pixels(resample_to.0, resample_to.1),
        target_size,
        focus,
    )?;

    Ok(CropPlan {
        original,
        target,
        scale,
        resample_to,
        offset,
        crop_origin: offset.crop_origin(resample_to, target),
    })
}

/// Sniff the format and reject anything the pipeline cannot round-trip.
fn supported_mime(bytes: &[u8]) -> Result<ImageMime> {
    match sniff_mimetype(bytes) {
        Some(mime) if mime.is_supported() => Ok(mime),
        other => Err(FocusCropError::UnsupportedFormat(other)),
    }
}

fn validate_target(target: (u32, u32)) -> Result<()> {
    if target.0 == 0 || target.1 == 0 {
        return Err(GeometryError::InvalidSize {
            role: "target",
            width: target.0 as f64,
            height: target.1 as f64,
        }
        .into());
    }
    Ok(())
}

/// Crop a decoded image to one target size.
fn crop_decoded(
    backend: &impl ImageBackend,
    image: &DynamicImage,
    mime: ImageMime,
    target: (u32, u32),
    params: &FocusCropParams,
    started: Instant,
) -> Result<CroppedImage> {
    let plan = plan_focus_crop((image.width(), image.height()), target, params.focus)?;
    debug!(
        original = ?plan.original,
        target = ?plan.target,
        ratio = plan.scale.ratio,
        resample_to = ?plan.resample_to,
        "Planned cover scale"
    );

    let resampled = backend.resample(
        image,
        &ResampleParams {
            width: plan.resample_to.0,
            height: plan.resample_to.1,
            quality: params.resample,
            alpha: params.alpha,
            sharpening: params.sharpening,
        },
    )?;
    let actual = (resampled.width(), resampled.height());
    if actual != plan.resample_to {
        return Err(BackendError::Resample(format!(
            "Backend produced {}x{}, expected {}x{}",
            actual.0, actual.1, plan.resample_to.0, plan.resample_to.1
        ))
        .into());
    }

    let (x, y) = plan.crop_origin;
    debug!(x, y, offset = ?plan.offset, "Cropping to focus window");
    let cropped = resampled.crop_imm(x, y, target.0, target.1);

    let bytes = backend.encode(
        &cropped,
        &EncodeParams {
            mime,
            quality: params.quality,
        },
    )?;
    debug!(bytes = bytes.len(), %mime, "Encoded crop");

    Ok(CroppedImage {
        bytes,
        mime,
        plan,
        elapsed: started.elapsed(),
    })
}

/// Focus-crop encoded image bytes to a single target size.
///
/// With no `target`, the image's own size is used (a re-encode that still
/// honours resampling and sharpening options). Output uses the input format.
pub fn focus_crop(
    backend: &impl ImageBackend,
    bytes: &[u8],
    target: Option<(u32, u32)>,
    params: &FocusCropParams,
) -> Result<CroppedImage> {
    let started = Instant::now();
    let mime = supported_mime(bytes)?;
    if let Some(target) = target {
        validate_target(target)?;
    }

    let image = backend.decode(bytes, mime)?;
    debug!(%mime, width = image.width(), height = image.height(), "Decoded source");

    let target = target.unwrap_or((image.width(), image.height()));
    crop_decoded(backend, &image, mime, target, params, started)
}

/// Focus-crop encoded image bytes to several target sizes.
///
/// The source is decoded once; sizes are processed in parallel on the
/// rayon pool. Results keep the order of `targets`. An empty `targets`
/// behaves like [`focus_crop`] with no target.
pub fn focus_crop_sizes(
    backend: &impl ImageBackend,
    bytes: &[u8],
    targets: &[(u32, u32)],
    params: &FocusCropParams,
) -> Result<Vec<CroppedImage>> {
    let mime = supported_mime(bytes)?;
    for &target in targets {
        validate_target(target)?;
    }

    let image = backend.decode(bytes, mime)?;
    debug!(%mime, width = image.width(), height = image.height(), sizes = targets.len(), "Decoded source");

    if targets.is_empty() {
        let own = (image.width(), image.height());
        return crop_decoded(backend, &image, mime, own, params, Instant::now()).map(|c| vec![c]);
    }

    targets
        .par_iter()
        .map(|&target| crop_decoded(backend, &image, mime, target, params, Instant::now()))
        .collect()
}
