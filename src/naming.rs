//! Target size parsing and output filename templating.
//!
//! Sizes are written `WIDTHxHEIGHT` (`400x300`), both on the command line and
//! in output filenames. Output files are named
//! `{prefix}{stem}{suffix}.{ext}`, where every `[size]` in the suffix is
//! replaced by the size string:
//!
//! - `photo.jpg`, suffix `-[size]-focused`, 400x300 → `photo-400x300-focused.jpg`
//! - `photo.png`, prefix `crop-`, suffix `` → `crop-photo.png`

use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Placeholder replaced by `WxH` in filename suffixes.
pub const SIZE_PLACEHOLDER: &str = "[size]";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SizeParseError {
    #[error("expected WIDTHxHEIGHT, got '{0}'")]
    Format(String),
    #[error("invalid dimension '{0}' in size")]
    Dimension(String),
    #[error("size dimensions must be positive, got '{0}'")]
    Zero(String),
}

/// A requested output size in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetSize {
    pub width: u32,
    pub height: u32,
}

impl TargetSize {
    pub fn as_tuple(self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl From<(u32, u32)> for TargetSize {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for TargetSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Parse `WIDTHxHEIGHT`. The separator may be `x` or `X`; surrounding
/// whitespace is ignored.
///
/// - `"400x300"` → 400x300
/// - `" 1920X1080 "` → 1920x1080
/// - `"400"`, `"x300"`, `"0x10"` → error
pub fn parse_size(input: &str) -> Result<TargetSize, SizeParseError> {
    let trimmed = input.trim();
    let (w, h) = trimmed
        .split_once(['x', 'X'])
        .ok_or_else(|| SizeParseError::Format(input.to_string()))?;

    let dimension = |part: &str| {
        part.trim()
            .parse::<u32>()
            .map_err(|_| SizeParseError::Dimension(part.to_string()))
    };
    let size = TargetSize {
        width: dimension(w)?,
        height: dimension(h)?,
    };

    if size.width == 0 || size.height == 0 {
        return Err(SizeParseError::Zero(input.to_string()));
    }
    Ok(size)
}

impl std::str::FromStr for TargetSize {
    type Err = SizeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_size(s)
    }
}

/// Build the output filename for one cropped size.
pub fn output_file_name(
    source: &Path,
    prefix: &str,
    suffix: &str,
    size: TargetSize,
    extension: &str,
) -> String {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    let suffix = suffix.replace(SIZE_PLACEHOLDER, &size.to_string());
    format!("{prefix}{stem}{suffix}.{extension}")
}
