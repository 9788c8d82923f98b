//! Pure calculation functions for focus-aware cover cropping.
//!
//! All functions here are pure and testable without any I/O or images.
//! Sizes are real-valued so intermediate scale factors are not rounded away;
//! [`Size::to_pixels_covering`] and [`CropOffset::crop_origin`] are the only
//! places that convert back to whole pixels.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("Invalid {role} size {width}x{height}: both dimensions must be positive")]
    InvalidSize {
        role: &'static str,
        width: f64,
        height: f64,
    },
    #[error(
        "Crop window {target_width}x{target_height} does not fit inside scaled image {scaled_width}x{scaled_height}"
    )]
    CropWindowTooLarge {
        scaled_width: f64,
        scaled_height: f64,
        target_width: f64,
        target_height: f64,
    },
    #[error("Scaled image {width}x{height} exceeds the maximum pixel dimension {max}")]
    TooLarge { width: f64, height: f64, max: u32 },
}

/// One of the two image axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Width,
    Height,
}

impl Axis {
    pub fn other(self) -> Self {
        match self {
            Axis::Width => Axis::Height,
            Axis::Height => Axis::Width,
        }
    }
}

/// A width/height pair in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn from_pixels(width: u32, height: u32) -> Self {
        Self::new(width as f64, height as f64)
    }

    pub fn get(self, axis: Axis) -> f64 {
        match axis {
            Axis::Width => self.width,
            Axis::Height => self.height,
        }
    }

    fn set(&mut self, axis: Axis, value: f64) {
        match axis {
            Axis::Width => self.width = value,
            Axis::Height => self.height = value,
        }
    }

    /// A size is degenerate when either side is zero, negative, or not finite.
    pub fn is_degenerate(self) -> bool {
        !(self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0)
    }

    /// Whether this size is at least as large as `other` on both axes.
    pub fn covers(self, other: Size) -> bool {
        self.width >= other.width && self.height >= other.height
    }

    pub fn aspect_ratio(self) -> f64 {
        self.width / self.height
    }

    fn validate(self, role: &'static str) -> Result<Self, GeometryError> {
        if self.is_degenerate() {
            return Err(GeometryError::InvalidSize {
                role,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }

    /// Round to whole pixels without dropping below `target` on either axis.
    ///
    /// Division by a scale ratio can land a hair under the target
    /// (e.g. `999.9999`); the clamp keeps the crop window inside the image.
    /// Fails with [`GeometryError::TooLarge`] when either rounded side does
    /// not fit in a `u32`, since a saturated side would distort the aspect.
    pub fn to_pixels_covering(self, target: (u32, u32)) -> Result<(u32, u32), GeometryError> {
        let width = self.width.round();
        let height = self.height.round();
        let max = f64::from(u32::MAX);
        if !(width <= max && height <= max) {
            return Err(GeometryError::TooLarge {
                width: self.width,
                height: self.height,
                max: u32::MAX,
            });
        }
        Ok(((width as u32).max(target.0), (height as u32).max(target.1)))
    }
}

/// Subject position as percentages of the image's width and height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FocusPoint {
    pub x: f64,
    pub y: f64,
}

impl FocusPoint {
    pub const CENTER: FocusPoint = FocusPoint { x: 50.0, y: 50.0 };

    /// Build a focus point, clamping both coordinates to `0..=100`.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: bound_percentage(x),
            y: bound_percentage(y),
        }
    }
}

impl Default for FocusPoint {
    fn default() -> Self {
        Self::CENTER
    }
}

/// Result of planning the cover scale for a target box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScalePlan {
    /// Aspect-preserving size covering the target, grown only where needed.
    pub scaled_size: Size,
    /// How far `scaled_size` exceeds the target on its binding axis (always >= 1).
    pub ratio: f64,
}

impl ScalePlan {
    /// The minimal covering size: one axis matches the target exactly.
    ///
    /// This is what the resampler is asked to produce.
    pub fn cover_size(&self) -> Size {
        Size::new(
            self.scaled_size.width / self.ratio,
            self.scaled_size.height / self.ratio,
        )
    }
}

/// Translation applied to the scaled image when placing it in the target frame.
///
/// Both shifts are `<= 0`: the scaled image moves left/up so the crop window
/// lands on the focus point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropOffset {
    pub shift_x: f64,
    pub shift_y: f64,
}

impl CropOffset {
    /// Top-left corner of the crop window in whole pixels of the scaled image.
    ///
    /// Rounded, then clamped so `origin + target <= scaled` on both axes.
    pub fn crop_origin(&self, scaled: (u32, u32), target: (u32, u32)) -> (u32, u32) {
        let origin = |shift: f64, scaled: u32, target: u32| {
            let max = scaled.saturating_sub(target);
            ((-shift).round().max(0.0) as u32).min(max)
        };
        (
            origin(self.shift_x, scaled.0, target.0),
            origin(self.shift_y, scaled.1, target.1),
        )
    }
}

/// Clamp a percentage to `0..=100`. NaN maps to 0.
///
/// # Examples
/// ```
/// # use focal_crop::imaging::bound_percentage;
/// assert_eq!(bound_percentage(-10.0), 0.0);
/// assert_eq!(bound_percentage(150.0), 100.0);
/// assert_eq!(bound_percentage(42.0), 42.0);
/// ```
pub fn bound_percentage(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}

/// Calculate the aspect-preserving size that covers `target` on both axes.
///
/// The target's larger axis is satisfied first (width wins ties), then the
/// other axis is re-checked, which matters for extreme aspect ratios. An
/// original that already covers the target is returned unchanged; shrinking
/// down to the minimal cover is expressed by [`ScalePlan::ratio`].
///
/// # Examples
/// ```
/// # use focal_crop::imaging::{Size, plan_scaled_size};
/// // 400x300 into 800x800: grow width to 800 (height 600), then height to 800.
/// let scaled = plan_scaled_size(Size::new(400.0, 300.0), Size::new(800.0, 800.0)).unwrap();
/// assert_eq!(scaled.height, 800.0);
/// assert!(scaled.width >= 800.0);
/// ```
pub fn plan_scaled_size(original: Size, target: Size) -> Result<Size, GeometryError> {
    let mut size = original.validate("original")?;
    let target = target.validate("target")?;

    let bigger = if target.height > target.width {
        Axis::Height
    } else {
        Axis::Width
    };
    let smaller = bigger.other();

    if target.get(bigger) > size.get(bigger) {
        let factor = target.get(bigger) / size.get(bigger);
        size.set(smaller, size.get(smaller) * factor);
        size.set(bigger, target.get(bigger));
    }

    if target.get(smaller) > size.get(smaller) {
        let factor = target.get(smaller) / size.get(smaller);
        size.set(bigger, size.get(bigger) * factor);
        size.set(smaller, target.get(smaller));
    }

    Ok(size)
}

/// Plan the cover scale: the grown size plus the ratio down to the minimal cover.
///
/// When the scaled size exceeds the target on both axes, the ratio is the
/// smaller of the two per-axis ratios, so dividing by it makes the binding
/// axis match the target exactly. Otherwise one axis already matches and the
/// ratio is 1.
pub fn plan_scale(original: Size, target: Size) -> Result<ScalePlan, GeometryError> {
    let scaled_size = plan_scaled_size(original, target)?;

    let width_ratio = scaled_size.width / target.width;
    let height_ratio = scaled_size.height / target.height;
    let ratio = if scaled_size.width > target.width && scaled_size.height > target.height {
        width_ratio.min(height_ratio)
    } else {
        1.0
    };

    Ok(ScalePlan { scaled_size, ratio })
}

/// Shift along one axis. See [`compute_crop_offset`].
fn axis_shift(scaled: f64, target: f64, focus_percent: f64) -> f64 {
    let focus_px = (scaled / 100.0) * bound_percentage(focus_percent);
    let half_target = target / 2.0;

    if scaled == target || focus_px <= half_target {
        // Nothing to crop, or the focus is already inside the left/top-anchored window.
        0.0
    } else if focus_px > scaled - half_target {
        -(scaled - target)
    } else {
        -(focus_px - half_target)
    }
}

/// Calculate how far to shift the scaled image so the focus is centered in the frame.
///
/// Each axis is handled independently: the window is centered on the focus
/// when possible and otherwise pinned to the nearest edge, so
/// `0 <= -shift <= scaled - target` always holds.
///
/// # Examples
/// ```
/// # use focal_crop::imaging::{FocusPoint, Size, compute_crop_offset};
/// let offset = compute_crop_offset(
///     Size::new(2000.0, 1000.0),
///     Size::new(1000.0, 500.0),
///     FocusPoint::new(90.0, 50.0),
/// )
/// .unwrap();
/// assert_eq!(offset.shift_x, -1000.0);
/// ```
pub fn compute_crop_offset(
    scaled: Size,
    target: Size,
    focus: FocusPoint,
) -> Result<CropOffset, GeometryError> {
    let scaled = scaled.validate("scaled")?;
    let target = target.validate("target")?;

    if !scaled.covers(target) {
        return Err(GeometryError::CropWindowTooLarge {
            scaled_width: scaled.width,
            scaled_height: scaled.height,
            target_width: target.width,
            target_height: target.height,
        });
    }

    Ok(CropOffset {
        shift_x: axis_shift(scaled.width, target.width, focus.x),
        shift_y: axis_shift(scaled.height, target.height, focus.y),
    })
}
