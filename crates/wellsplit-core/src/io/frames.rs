use std::fs;
use std::path::Path;

use crate::error::{Result, WellSplitError};
use crate::naming::InputPattern;

/// Names of the raw frames in `dir` matching `pattern`, sorted.
pub fn list_input_frames(dir: &Path, pattern: &InputPattern) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if pattern.matches(name) {
                names.push(name.to_string());
            }
        }
    }
    names.sort();
    Ok(names)
}

/// Zero-padded width of frame numbers, read from `sample` or from the first
/// matching frame in `dir`.
pub fn infer_digit_width(
    dir: &Path,
    pattern: &InputPattern,
    sample: Option<&str>,
) -> Result<usize> {
    if let Some(sample) = sample {
        return pattern.digit_width(sample);
    }
    let frames = list_input_frames(dir, pattern)?;
    match frames.first() {
        Some(first) => pattern.digit_width(first),
        None => Err(WellSplitError::FilenamePatternMismatch {
            filename: format!("<no frames in {}>", dir.display()),
            pattern: pattern.as_str().to_string(),
        }),
    }
}

/// Fields per well implied by the number of raw frames present.
///
/// Refuses to guess when the count does not divide evenly, which happens
/// with partial scans.
pub fn infer_fields_per_well(frame_count: usize, wells: usize, channels: u32) -> Result<u32> {
    let per_field = wells * channels as usize;
    if frame_count == 0 {
        return Err(WellSplitError::AmbiguousFieldCount(
            "no input frames found".into(),
        ));
    }
    if per_field == 0 || frame_count % per_field != 0 {
        return Err(WellSplitError::AmbiguousFieldCount(format!(
            "{frame_count} frames is not a multiple of {wells} wells x {channels} channels"
        )));
    }
    Ok((frame_count / per_field) as u32)
}
