//! End-to-end tests of the public crop pipeline with the real backend.
//!
//! Images are synthesized in memory; output files go to a temp directory.

use focal_crop::config::{self, FocusConfig};
use focal_crop::imaging::{
    FocusCropError, FocusCropParams, FocusPoint, ImageMime, RustBackend, focus_crop,
    focus_crop_sizes, plan_focus_crop,
};
use focal_crop::naming::{TargetSize, output_file_name};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::io::Cursor;
use std::path::Path;

/// Encode an image whose left half is red and right half is blue.
fn split_image(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let image = RgbImage::from_fn(width, height, |x, _| {
        if x < width / 2 {
            Rgb([255, 0, 0])
        } else {
            Rgb([0, 0, 255])
        }
    });
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(image)
        .write_to(&mut out, format)
        .unwrap();
    out.into_inner()
}

fn decode(bytes: &[u8]) -> RgbImage {
    image::load_from_memory(bytes).unwrap().to_rgb8()
}

#[test]
fn jpeg_in_jpeg_out_with_exact_size() {
    let bytes = split_image(640, 480, ImageFormat::Jpeg);
    let result = focus_crop(
        &RustBackend::new(),
        &bytes,
        Some((200, 300)),
        &FocusCropParams::default(),
    )
    .unwrap();

    assert_eq!(result.mime, ImageMime::Jpeg);
    let decoded = decode(&result.bytes);
    assert_eq!(decoded.dimensions(), (200, 300));
}

#[test]
fn focus_picks_side_of_wide_image() {
    let bytes = split_image(400, 100, ImageFormat::Png);
    let nearest = FocusCropParams {
        resample: focal_crop::imaging::ResampleQuality::new(0),
        ..FocusCropParams::default()
    };

    let left = focus_crop(
        &RustBackend::new(),
        &bytes,
        Some((100, 100)),
        &FocusCropParams {
            focus: FocusPoint::new(10.0, 50.0),
            ..nearest
        },
    )
    .unwrap();
    let right = focus_crop(
        &RustBackend::new(),
        &bytes,
        Some((100, 100)),
        &FocusCropParams {
            focus: FocusPoint::new(95.0, 50.0),
            ..nearest
        },
    )
    .unwrap();

    assert!(decode(&left.bytes).pixels().all(|p| p.0 == [255, 0, 0]));
    assert!(decode(&right.bytes).pixels().all(|p| p.0 == [0, 0, 255]));
}

#[test]
fn several_sizes_keep_request_order() {
    let bytes = split_image(300, 200, ImageFormat::Png);
    let targets = [(50, 50), (300, 100), (120, 240)];

    let results =
        focus_crop_sizes(&RustBackend::new(), &bytes, &targets, &FocusCropParams::default())
            .unwrap();

    for (result, &target) in results.iter().zip(&targets) {
        assert_eq!(result.mime, ImageMime::Png);
        assert_eq!(decode(&result.bytes).dimensions(), target);
    }
}

#[test]
fn unsupported_format_is_rejected() {
    let err = focus_crop(
        &RustBackend::new(),
        b"GIF89a\x01\x00\x01\x00",
        Some((1, 1)),
        &FocusCropParams::default(),
    )
    .unwrap_err();
    assert!(matches!(err, FocusCropError::UnsupportedFormat(Some(ImageMime::Gif))));
}

#[test]
fn corrupt_jpeg_is_a_decode_failure() {
    let mut bytes = split_image(64, 64, ImageFormat::Jpeg);
    bytes.truncate(40);
    let err = focus_crop(
        &RustBackend::new(),
        &bytes,
        Some((10, 10)),
        &FocusCropParams::default(),
    )
    .unwrap_err();
    assert!(matches!(err, FocusCropError::Backend(_)));
}

#[test]
fn dry_run_plan_matches_pipeline() {
    let bytes = split_image(500, 250, ImageFormat::Png);
    let focus = FocusPoint::new(70.0, 30.0);
    let params = FocusCropParams {
        focus,
        ..FocusCropParams::default()
    };

    let result = focus_crop(&RustBackend::new(), &bytes, Some((120, 120)), &params).unwrap();
    let plan = plan_focus_crop((500, 250), (120, 120), focus).unwrap();
    assert_eq!(result.plan, plan);
}

#[test]
fn config_file_drives_crop_and_naming() {
    let tmp = tempfile::TempDir::new().unwrap();
    let config_path = tmp.path().join("focal-crop.toml");
    std::fs::write(
        &config_path,
        "[focus]\nx = 100.0\n\n[output]\nprefix = \"c-\"\nsuffix = \"@[size]\"\n",
    )
    .unwrap();

    let config: FocusConfig = config::load_config(Some(&config_path)).unwrap();
    let bytes = split_image(400, 100, ImageFormat::Png);
    let result = focus_crop(&RustBackend::new(), &bytes, Some((100, 100)), &config.crop_params())
        .unwrap();
    assert_eq!(result.plan.crop_origin, (300, 0));

    let name = output_file_name(
        Path::new("in/photo.png"),
        &config.output.prefix,
        &config.output.suffix,
        TargetSize::from(result.target()),
        result.mime.extension(),
    );
    assert_eq!(name, "c-photo@100x100.png");
}
