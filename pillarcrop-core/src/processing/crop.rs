// ============================================================================
// pillarcrop-core/src/processing/crop.rs
// ============================================================================
//
// CROP DECISION: Geometry of the 4:3 Crop Rectangle
//
// This module turns source dimensions (and optionally cropdetect samples)
// into a crop rectangle that encoders accept: every value is even and the
// rectangle always lies inside the source frame.
//
// KEY COMPONENTS:
// - CropSpec: the rectangle itself, rendered as an ffmpeg `crop=` filter
// - centered_4x3_crop / decide_analytic: crop computed from dimensions alone
// - consensus_crop / refine_detected_crop / decide_from_scan: crop derived
//   from cropdetect samples, snapped to exact 4:3 when close
//
// All functions here are pure; the scan itself lives in crop_detection.rs.

use std::fmt;

use serde::Serialize;

use crate::processing::crop_detection::CROPDETECT_ROUND;

/// Target display aspect ratio.
pub const TARGET_ASPECT: f64 = 4.0 / 3.0;

/// A source must be wider than 4:3 by more than this to be cropped analytically.
pub const ANALYTIC_ASPECT_TOLERANCE: f64 = 0.005;

/// Detected crops within this distance of 4:3 are snapped to exact 4:3.
pub const SNAP_ASPECT_TOLERANCE: f64 = 0.01;

/// Rounds down to the nearest even number.
#[must_use]
pub fn even(n: u32) -> u32 {
    n - (n % 2)
}

/// Width of an exact 4:3 frame of the given height, rounded to nearest.
fn width_for_4x3(height: u32) -> u32 {
    (f64::from(height) * TARGET_ASPECT).round() as u32
}

// ============================================================================
// CROP SPEC
// ============================================================================

/// Crop rectangle in source pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CropSpec {
    pub width: u32,
    pub height: u32,
    pub x: u32,
    pub y: u32,
}

impl CropSpec {
    #[must_use]
    pub fn new(width: u32, height: u32, x: u32, y: u32) -> Self {
        Self { width, height, x, y }
    }

    /// ffmpeg filter expression, e.g. `crop=1440:1080:240:0`.
    #[must_use]
    pub fn to_filter(&self) -> String {
        format!("crop={}:{}:{}:{}", self.width, self.height, self.x, self.y)
    }

    #[must_use]
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }

    /// All four values are even.
    #[must_use]
    pub fn is_even(&self) -> bool {
        [self.width, self.height, self.x, self.y]
            .iter()
            .all(|v| v % 2 == 0)
    }

    /// The rectangle lies inside a `source_width` x `source_height` frame.
    #[must_use]
    pub fn fits_within(&self, source_width: u32, source_height: u32) -> bool {
        u64::from(self.x) + u64::from(self.width) <= u64::from(source_width)
            && u64::from(self.y) + u64::from(self.height) <= u64::from(source_height)
    }

    /// Keeps the whole source frame up to `slack` pixels of rounding: each
    /// dimension is less than `slack` short of the source and the offsets
    /// stay within the leftover margin.
    #[must_use]
    pub fn is_full_frame(&self, source_width: u32, source_height: u32, slack: u32) -> bool {
        let spare_width = source_width.saturating_sub(self.width);
        let spare_height = source_height.saturating_sub(self.height);
        spare_width < slack && spare_height < slack && self.x <= spare_width && self.y <= spare_height
    }

    fn evenized(self) -> Self {
        Self::new(even(self.width), even(self.height), even(self.x), even(self.y))
    }

    /// Shrinks the rectangle into the source frame, keeping every value even.
    fn clamp_to(self, source_width: u32, source_height: u32) -> Self {
        let width = self.width.min(even(source_width));
        let height = self.height.min(even(source_height));
        let x = even(self.x.min(source_width - width));
        let y = even(self.y.min(source_height - height));
        Self::new(width, height, x, y)
    }
}

impl fmt::Display for CropSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

/// Outcome of the crop decision for one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum CropDecision {
    Crop(CropSpec),
    /// Source is already about 4:3; the file is stream-copied.
    NoCropNeeded,
}

// ============================================================================
// ANALYTIC CROP
// ============================================================================

/// Centered 4:3 crop for an `iw` x `ih` frame.
#[must_use]
pub fn centered_4x3_crop(iw: u32, ih: u32) -> CropSpec {
    let width = even(iw.min(width_for_4x3(ih)));
    let height = even(ih);
    let x = even((iw - width) / 2);
    let y = even((ih - height) / 2);
    CropSpec::new(width, height, x, y)
}

/// Crops to centered 4:3 when the source is meaningfully wider than 4:3.
#[must_use]
pub fn decide_analytic(iw: u32, ih: u32) -> CropDecision {
    if ih == 0 || iw == 0 {
        return CropDecision::NoCropNeeded;
    }
    let aspect = f64::from(iw) / f64::from(ih);
    if aspect > TARGET_ASPECT + ANALYTIC_ASPECT_TOLERANCE {
        CropDecision::Crop(centered_4x3_crop(iw, ih))
    } else {
        CropDecision::NoCropNeeded
    }
}

// ============================================================================
// DETECTED CROP
// ============================================================================

/// Most frequent exact rectangle among `samples`.
///
/// Ties go to the rectangle that appeared first.
#[must_use]
pub fn consensus_crop(samples: &[CropSpec]) -> Option<CropSpec> {
    let mut tally: Vec<(CropSpec, usize)> = Vec::new();
    for sample in samples {
        match tally.iter_mut().find(|(crop, _)| crop == sample) {
            Some((_, count)) => *count += 1,
            None => tally.push((*sample, 1)),
        }
    }

    let mut best: Option<(CropSpec, usize)> = None;
    for (crop, count) in tally {
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((crop, count));
        }
    }
    best.map(|(crop, _)| crop)
}

/// Evenizes a detected rectangle, snaps near-4:3 results to exact 4:3
/// (recentering horizontally) and clamps it into the source frame.
#[must_use]
pub fn refine_detected_crop(sample: CropSpec, iw: u32, ih: u32) -> CropSpec {
    let mut crop = sample.evenized();

    if crop.height > 0 && (crop.aspect_ratio() - TARGET_ASPECT).abs() < SNAP_ASPECT_TOLERANCE {
        let width = even(width_for_4x3(crop.height)).min(even(iw));
        crop.width = width;
        crop.x = even((iw - width) / 2);
    }

    crop.clamp_to(iw, ih)
}

/// Crop decision from a cropdetect sample set.
///
/// Without samples, or when the consensus keeps the whole frame apart from
/// cropdetect's rounding (no bars found), the analytic decision is used
/// instead.
#[must_use]
pub fn decide_from_scan(samples: &[CropSpec], iw: u32, ih: u32) -> CropDecision {
    match consensus_crop(samples) {
        Some(consensus) if !consensus.is_full_frame(iw, ih, CROPDETECT_ROUND) => {
            let refined = refine_detected_crop(consensus, iw, ih);
            log::debug!("Consensus crop {consensus} refined to {refined}");
            CropDecision::Crop(refined)
        }
        Some(_) => {
            log::debug!("cropdetect found no bars; using analytic crop");
            decide_analytic(iw, ih)
        }
        None => {
            log::debug!("cropdetect produced no suggestions; using analytic crop");
            decide_analytic(iw, ih)
        }
    }
}
