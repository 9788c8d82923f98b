//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the high-level [`operations`](super::operations) module
//! (which plans the crop geometry) and the [`backend`](super::backend)
//! (which does the actual pixel work). This separation allows swapping backends
//! (e.g. for testing with a mock) without changing operation logic.
//!
//! ## Types
//!
//! - [`Quality`] — Lossy encoding quality (1–100, default 100). Clamped on construction.
//! - [`ResampleQuality`] — Filter tier 0–3, from nearest-neighbour to Lanczos3.
//! - [`Sharpening`] — Unsharp-mask amount (0–500) and threshold (0–100).
//! - [`ResampleParams`] — Exact output size plus filter, alpha, and sharpening.
//! - [`EncodeParams`] — Output format and quality.

use super::format::ImageMime;
use image::imageops::FilterType;

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(100)
    }
}

/// Resampling filter tier (0-3). Higher is slower and sharper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResampleQuality(u8);

impl ResampleQuality {
    pub const MAX: u8 = 3;

    pub fn new(value: u8) -> Self {
        Self(value.min(Self::MAX))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn filter(self) -> FilterType {
        match self.0 {
            0 => FilterType::Nearest,
            1 => FilterType::Triangle,
            2 => FilterType::CatmullRom,
            _ => FilterType::Lanczos3,
        }
    }
}

impl Default for ResampleQuality {
    fn default() -> Self {
        Self(Self::MAX)
    }
}

/// Unsharp-mask parameters applied after resampling.
///
/// - `amount`: strength, 0–500 (0 disables sharpening)
/// - `threshold`: minimum brightness difference to sharpen, 0–100 percent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sharpening {
    pub amount: u32,
    pub threshold: u32,
}

impl Sharpening {
    /// Build from raw config values. Returns `None` when the amount is zero.
    pub fn from_amount(amount: u32, threshold: u32) -> Option<Self> {
        (amount > 0).then(|| Self {
            amount: amount.min(500),
            threshold: threshold.min(100),
        })
    }

    /// Gaussian sigma for `unsharpen`: an amount of 100 maps to sigma 1.0.
    ///
    /// This approximates a strength setting. `image::imageops::unsharpen`
    /// takes only a blur radius and a threshold, with no separate amount, so
    /// a larger amount widens the blur instead of scaling its contribution.
    pub fn sigma(self) -> f32 {
        self.amount as f32 / 100.0
    }

    /// Threshold scaled from percent to 8-bit brightness levels.
    pub fn brightness_threshold(self) -> i32 {
        (self.threshold * 255 / 100) as i32
    }
}

/// Parameters for a resample operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResampleParams {
    pub width: u32,
    pub height: u32,
    pub quality: ResampleQuality,
    /// Keep the alpha channel; otherwise the image is flattened to RGB first.
    pub alpha: bool,
    pub sharpening: Option<Sharpening>,
}

/// Parameters for an encode operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EncodeParams {
    pub mime: ImageMime,
    /// Only used by lossy formats.
    pub quality: Quality,
}
