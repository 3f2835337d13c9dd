//! Black bar detection with ffmpeg's cropdetect filter.
//!
//! A single pass over the start of the file collects every `crop=W:H:X:Y`
//! suggestion ffmpeg prints. The suggestions are handed to
//! [`decide_from_scan`](super::crop::decide_from_scan) to pick a consensus.

use std::path::Path;

use ffmpeg_sidecar::event::FfmpegEvent;

use crate::external::{FfmpegCommandBuilder, FfmpegProcess, FfmpegSpawner};
use crate::processing::crop::CropSpec;

/// cropdetect arguments: black limit 24, round to 16, never reset.
pub const CROPDETECT_FILTER: &str = "cropdetect=24:16:0";

/// The `round` value in [`CROPDETECT_FILTER`]. Suggested width and height
/// are multiples of it, so a frame without bars can come back up to this
/// many pixels short in each dimension.
pub const CROPDETECT_ROUND: u32 = 16;

/// Runs cropdetect over the first `scan_secs` seconds and returns every
/// suggestion in the order ffmpeg printed them.
///
/// The scan's exit status is ignored. When ffmpeg cannot be started or its
/// output cannot be read, a warning is logged and no samples are returned.
pub fn detect_crop<S: FfmpegSpawner>(spawner: &S, input_file: &Path, scan_secs: u32) -> Vec<CropSpec> {
    log::debug!(
        "Running cropdetect over the first {}s of {}",
        scan_secs,
        input_file.display()
    );

    let mut cmd = FfmpegCommandBuilder::new().build();
    cmd.args(["-ss", "0", "-t", &scan_secs.to_string()]);
    cmd.input(input_file);
    cmd.args(["-vf", CROPDETECT_FILTER, "-f", "null", "-"]);

    let mut child = match spawner.spawn(cmd) {
        Ok(child) => child,
        Err(e) => {
            log::warn!("Crop detection could not start for {}: {}", input_file.display(), e);
            return Vec::new();
        }
    };

    let mut samples = Vec::new();
    let collected = child.handle_events(|event| {
        match event {
            FfmpegEvent::Log(_, line) | FfmpegEvent::Error(line) => {
                samples.extend(parse_crop_suggestions(&line));
            }
            FfmpegEvent::OutputChunk(chunk) => {
                samples.extend(parse_crop_suggestions(&String::from_utf8_lossy(&chunk)));
            }
            _ => {}
        }
        Ok(())
    });
    if let Err(e) = collected {
        log::warn!("Crop detection output unreadable for {}: {}", input_file.display(), e);
    }

    match child.wait() {
        Ok(Some(0)) => {}
        Ok(code) => log::debug!("cropdetect scan exited with {code:?}; keeping parsed samples"),
        Err(e) => log::debug!("cropdetect scan wait failed: {e}"),
    }

    log::debug!("cropdetect produced {} suggestion(s)", samples.len());
    samples
}

/// Extracts every valid `crop=W:H:X:Y` token from ffmpeg output text.
///
/// Tokens with fewer or more than four fields, negative or non-numeric
/// values, or a width/height below two pixels are skipped.
#[must_use]
pub fn parse_crop_suggestions(output: &str) -> Vec<CropSpec> {
    let mut crops = Vec::new();
    for line in output.lines() {
        let mut rest = line;
        while let Some(pos) = rest.find("crop=") {
            let value = &rest[pos + 5..];
            let end = value
                .find(|c: char| c.is_whitespace())
                .unwrap_or(value.len());
            if let Some(crop) = parse_crop_value(&value[..end]) {
                crops.push(crop);
            }
            rest = &value[end..];
        }
    }
    crops
}

fn parse_crop_value(value: &str) -> Option<CropSpec> {
    let parts: Vec<u32> = value
        .split(':')
        .map(str::parse::<u32>)
        .collect::<Result<_, _>>()
        .ok()?;

    match parts.as_slice() {
        &[width, height, x, y] if width >= 2 && height >= 2 => Some(CropSpec::new(width, height, x, y)),
        _ => None,
    }
}
