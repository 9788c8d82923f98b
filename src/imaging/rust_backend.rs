//! Pure Rust image processing backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG) | `image::load_from_memory_with_format` |
//! | Resample | `DynamicImage::resize_exact` with the filter from [`ResampleQuality`](super::params::ResampleQuality) |
//! | Sharpening | `DynamicImage::unsharpen` |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` (RGB8, configurable quality) |
//! | Encode → PNG | `image::codecs::png::PngEncoder` (lossless, alpha preserved) |

use super::backend::{BackendError, ImageBackend};
use super::format::ImageMime;
use super::params::{EncodeParams, ResampleParams};
use image::DynamicImage;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageBackend for RustBackend {
    fn decode(&self, bytes: &[u8], mime: ImageMime) -> Result<DynamicImage, BackendError> {
        let format = mime
            .image_format()
            .ok_or_else(|| BackendError::Decode(format!("No decoder for {mime}")))?;
        image::load_from_memory_with_format(bytes, format)
            .map_err(|e| BackendError::Decode(format!("Failed to decode {mime}: {e}")))
    }

    fn resample(
        &self,
        image: &DynamicImage,
        params: &ResampleParams,
    ) -> Result<DynamicImage, BackendError> {
        if params.width == 0 || params.height == 0 {
            return Err(BackendError::Resample(format!(
                "Cannot resample to {}x{}",
                params.width, params.height
            )));
        }

        let flattened;
        let source = if params.alpha || !image.color().has_alpha() {
            image
        } else {
            flattened = DynamicImage::ImageRgb8(image.to_rgb8());
            &flattened
        };

        let resized = source.resize_exact(params.width, params.height, params.quality.filter());

        Ok(match params.sharpening {
            Some(sharpening) => {
                resized.unsharpen(sharpening.sigma(), sharpening.brightness_threshold())
            }
            None => resized,
        })
    }

    fn encode(
        &self,
        image: &DynamicImage,
        params: &EncodeParams,
    ) -> Result<Vec<u8>, BackendError> {
        let mut out = Vec::new();
        match params.mime {
            ImageMime::Jpeg => {
                // JPEG has no alpha channel
                let rgb = DynamicImage::ImageRgb8(image.to_rgb8());
                let encoder = JpegEncoder::new_with_quality(&mut out, params.quality.value() as u8);
                rgb.write_with_encoder(encoder)
                    .map_err(|e| BackendError::Encode(format!("JPEG encode failed: {e}")))?;
            }
            ImageMime::Png => {
                image
                    .write_with_encoder(PngEncoder::new(&mut out))
                    .map_err(|e| BackendError::Encode(format!("PNG encode failed: {e}")))?;
            }
            other => {
                return Err(BackendError::Encode(format!(
                    "Unsupported output format: {other}"
                )));
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::params::{Quality, ResampleQuality, Sharpening};
    use crate::test_helpers::{gradient_jpeg, gradient_png, transparent_png};

    fn resample_params(width: u32, height: u32) -> ResampleParams {
        ResampleParams {
            width,
            height,
            quality: ResampleQuality::default(),
            alpha: false,
            sharpening: None,
        }
    }

    #[test]
    fn decode_synthetic_jpeg() {
        let bytes = gradient_jpeg(200, 150);
        let image = RustBackend::new().decode(&bytes, ImageMime::Jpeg).unwrap();
        assert_eq!((image.width(), image.height()), (200, 150));
    }

    #[test]
    fn decode_synthetic_png() {
        let bytes = gradient_png(64, 32);
        let image = RustBackend::new().decode(&bytes, ImageMime::Png).unwrap();
        assert_eq!((image.width(), image.height()), (64, 32));
    }

    #[test]
    fn decode_corrupt_data_errors() {
        let mut bytes = gradient_png(16, 16);
        bytes.truncate(20);
        let result = RustBackend::new().decode(&bytes, ImageMime::Png);
        assert!(matches!(result, Err(BackendError::Decode(_))));
    }

    #[test]
    fn decode_unsupported_mime_errors() {
        let result = RustBackend::new().decode(b"GIF89a", ImageMime::Gif);
        assert!(matches!(result, Err(BackendError::Decode(_))));
    }

    #[test]
    fn resample_to_exact_dimensions() {
        let image = RustBackend::new()
            .decode(&gradient_jpeg(400, 300), ImageMime::Jpeg)
            .unwrap();
        let resized = RustBackend::new()
            .resample(&image, &resample_params(123, 45))
            .unwrap();
        assert_eq!((resized.width(), resized.height()), (123, 45));
    }

    #[test]
    fn resample_flattens_alpha_unless_requested() {
        let backend = RustBackend::new();
        let image = backend.decode(&transparent_png(20, 20), ImageMime::Png).unwrap();
        assert!(image.color().has_alpha());

        let flat = backend.resample(&image, &resample_params(10, 10)).unwrap();
        assert!(!flat.color().has_alpha());

        let kept = backend
            .resample(
                &image,
                &ResampleParams {
                    alpha: true,
                    ..resample_params(10, 10)
                },
            )
            .unwrap();
        assert!(kept.color().has_alpha());
    }

    #[test]
    fn resample_with_sharpening_keeps_size() {
        let backend = RustBackend::new();
        let image = backend.decode(&gradient_png(50, 50), ImageMime::Png).unwrap();
        let sharpened = backend
            .resample(
                &image,
                &ResampleParams {
                    sharpening: Sharpening::from_amount(80, 0),
                    ..resample_params(25, 25)
                },
            )
            .unwrap();
        assert_eq!((sharpened.width(), sharpened.height()), (25, 25));
    }

    #[test]
    fn resample_zero_size_errors() {
        let image = DynamicImage::new_rgb8(10, 10);
        let result = RustBackend::new().resample(&image, &resample_params(0, 10));
        assert!(matches!(result, Err(BackendError::Resample(_))));
    }

    #[test]
    fn encode_jpeg_roundtrips_dimensions() {
        let backend = RustBackend::new();
        let bytes = backend
            .encode(
                &DynamicImage::new_rgba8(30, 20),
                &EncodeParams {
                    mime: ImageMime::Jpeg,
                    quality: Quality::new(85),
                },
            )
            .unwrap();
        assert_eq!(crate::imaging::sniff_mimetype(&bytes), Some(ImageMime::Jpeg));
        let decoded = backend.decode(&bytes, ImageMime::Jpeg).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (30, 20));
    }

    #[test]
    fn encode_png_produces_png() {
        let bytes = RustBackend::new()
            .encode(
                &DynamicImage::new_rgba8(8, 8),
                &EncodeParams {
                    mime: ImageMime::Png,
                    quality: Quality::default(),
                },
            )
            .unwrap();
        assert_eq!(crate::imaging::sniff_mimetype(&bytes), Some(ImageMime::Png));
    }

    #[test]
    fn encode_unsupported_format_errors() {
        let result = RustBackend::new().encode(
            &DynamicImage::new_rgb8(8, 8),
            &EncodeParams {
                mime: ImageMime::Bmp,
                quality: Quality::default(),
            },
        );
        assert!(matches!(result, Err(BackendError::Encode(_))));
    }
}
