//! Shared test utilities for the focal-crop test suite.
//!
//! Builds small synthetic images in memory so backend and pipeline tests
//! never depend on fixture files.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_helpers::*;
//!
//! let bytes = gradient_jpeg(400, 300);
//! let output = focus_crop(&RustBackend::new(), &bytes, Some((100, 100)), &params).unwrap();
//! assert_encoded_size(&output.bytes, (100, 100));
//! ```

use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use std::io::Cursor;

/// Encode `image` into `format` in memory.
fn encode(image: DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    image.write_to(&mut out, format).unwrap();
    out.into_inner()
}

fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 128]))
}

/// A JPEG whose red channel tracks x and green channel tracks y.
pub fn gradient_jpeg(width: u32, height: u32) -> Vec<u8> {
    encode(DynamicImage::ImageRgb8(gradient(width, height)), ImageFormat::Jpeg)
}

/// A PNG whose red channel tracks x and green channel tracks y.
pub fn gradient_png(width: u32, height: u32) -> Vec<u8> {
    encode(DynamicImage::ImageRgb8(gradient(width, height)), ImageFormat::Png)
}

/// A half-transparent RGBA PNG.
pub fn transparent_png(width: u32, height: u32) -> Vec<u8> {
    let image = RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 128]));
    encode(DynamicImage::ImageRgba8(image), ImageFormat::Png)
}

/// A PNG that is black except for a white `marker`-sized square whose
/// top-left corner sits at `at`. Used to check where a crop window landed.
pub fn marker_png(width: u32, height: u32, at: (u32, u32), marker: u32) -> Vec<u8> {
    let image = RgbImage::from_fn(width, height, |x, y| {
        let inside = x >= at.0 && x < at.0 + marker && y >= at.1 && y < at.1 + marker;
        if inside { Rgb([255, 255, 255]) } else { Rgb([0, 0, 0]) }
    });
    encode(DynamicImage::ImageRgb8(image), ImageFormat::Png)
}

/// Decode encoded bytes and assert their pixel dimensions.
pub fn assert_encoded_size(bytes: &[u8], expected: (u32, u32)) {
    let image = image::load_from_memory(bytes).unwrap();
    assert_eq!(
        (image.width(), image.height()),
        expected,
        "encoded image has wrong dimensions"
    );
}
