//! Image format detection from magic bytes.
//!
//! Detection walks [`SIGNATURES`] in order and returns the first match, so
//! more specific prefixes must come before shorter ones that could overlap.
//! Only JPEG and PNG can be cropped; the other formats are recognized so the
//! error message can name what was rejected.

use image::ImageFormat;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Image formats recognized by [`sniff_mimetype`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageMime {
    Gif,
    Tiff,
    Jpeg,
    Bmp,
    Ico,
    Png,
    Svg,
}

/// Ordered `(prefix, format)` rules. First match wins.
const SIGNATURES: &[(&[u8], ImageMime)] = &[
    (b"GIF8", ImageMime::Gif),
    (&[0x49, 0x49, 0x2a, 0x00], ImageMime::Tiff),
    (&[0xff, 0xd8, 0xff], ImageMime::Jpeg),
    (b"BM", ImageMime::Bmp),
    (&[0x00, 0x00, 0x01, 0x00], ImageMime::Ico),
    (&[0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a], ImageMime::Png),
    (b"<?xml", ImageMime::Svg),
    (b"<svg", ImageMime::Svg),
];

impl ImageMime {
    pub fn mime_type(self) -> &'static str {
        match self {
            ImageMime::Gif => "image/gif",
            ImageMime::Tiff => "image/tiff",
            ImageMime::Jpeg => "image/jpeg",
            ImageMime::Bmp => "image/bmp",
            ImageMime::Ico => "image/ico",
            ImageMime::Png => "image/png",
            ImageMime::Svg => "image/svg",
        }
    }

    /// File extension used for cropped output.
    pub fn extension(self) -> &'static str {
        match self {
            ImageMime::Gif => "gif",
            ImageMime::Tiff => "tiff",
            ImageMime::Jpeg => "jpg",
            ImageMime::Bmp => "bmp",
            ImageMime::Ico => "ico",
            ImageMime::Png => "png",
            ImageMime::Svg => "svg",
        }
    }

    /// Whether the crop pipeline can decode and re-encode this format.
    pub fn is_supported(self) -> bool {
        matches!(self, ImageMime::Jpeg | ImageMime::Png)
    }

    /// The `image` crate format for supported mimetypes.
    pub fn image_format(self) -> Option<ImageFormat> {
        match self {
            ImageMime::Jpeg => Some(ImageFormat::Jpeg),
            ImageMime::Png => Some(ImageFormat::Png),
            _ => None,
        }
    }
}

impl fmt::Display for ImageMime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime_type())
    }
}

/// Detect the image format from the leading bytes. `None` when nothing matches.
pub fn sniff_mimetype(bytes: &[u8]) -> Option<ImageMime> {
    SIGNATURES
        .iter()
        .find(|(prefix, _)| bytes.starts_with(prefix))
        .map(|(_, mime)| *mime)
}
