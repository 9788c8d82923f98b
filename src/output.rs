//! CLI output formatting for crop runs.
//!
//! # Output Format
//!
//! ```text
//! - 400x300 in 12 ms
//!     Resampled: 533x300, window at (67, 0)
//!     Output: out/dawn-400x300-focused.jpg
//! - 100x100 in 9 ms
//!     Resampled: 178x100, window at (39, 0)
//!     Output: out/dawn-100x100-focused.jpg
//! -------------------
//! Done in 31 ms
//! ```
//!
//! Each report has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects. Quiet mode is decided by
//! the caller.

use crate::imaging::CroppedImage;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Width of the separator printed before the total.
const SEPARATOR_WIDTH: usize = 19;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn millis(duration: Duration) -> u128 {
    duration.as_millis()
}

/// Format one cropped size: timing header plus geometry and output path.
fn crop_lines(result: &CroppedImage, path: &Path) -> Vec<String> {
    let (tw, th) = result.target();
    let (rw, rh) = result.plan.resample_to;
    let (x, y) = result.plan.crop_origin;
    vec![
        format!("- {}x{} in {} ms", tw, th, millis(result.elapsed)),
        format!("{}Resampled: {}x{}, window at ({}, {})", indent(1), rw, rh, x, y),
        format!("{}Output: {}", indent(1), path.display()),
    ]
}

/// Format the report for a finished crop run.
pub fn format_crop_output(results: &[(CroppedImage, PathBuf)], total: Duration) -> Vec<String> {
    let mut lines: Vec<String> = results
        .iter()
        .flat_map(|(result, path)| crop_lines(result, path))
        .collect();
    lines.push("-".repeat(SEPARATOR_WIDTH));
    lines.push(format!("Done in {} ms", millis(total)));
    lines
}

/// Print the crop report to stdout.
pub fn print_crop_output(results: &[(CroppedImage, PathBuf)], total: Duration) {
    for line in format_crop_output(results, total) {
        println!("{}", line);
    }
}
