// ============================================================================
// pillarcrop-core/src/processing/plan.rs
// ============================================================================
//
// ENCODE PLAN: The ffmpeg Invocation for One File
//
// A plan is either a stream copy (the source is already 4:3) or a video
// re-encode through a crop filter. In both cases every stream, all global
// metadata and all chapters are carried over and the output is written
// with faststart.
//
// KEY COMPONENTS:
// - VideoTreatment: copy vs. crop + re-encode
// - EncodePlan: source, destination and treatment; renders ffmpeg arguments
// - build_plan: turns a crop decision into a plan

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::external::VideoFilterChain;
use crate::processing::crop::{CropDecision, CropSpec};
use crate::processing::quality::QualityMode;

/// Program every plan is executed with.
pub const FFMPEG_PROGRAM: &str = "ffmpeg";

const MOVFLAGS: &str = "use_metadata_tags+faststart";

/// What happens to the video stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "treatment", rename_all = "snake_case")]
pub enum VideoTreatment {
    /// All streams are copied untouched.
    Copy,
    /// Video is cropped and re-encoded; other streams are copied.
    Reencode {
        crop: CropSpec,
        encoder: String,
        quality: QualityMode,
        preset: String,
    },
}

/// A complete ffmpeg invocation for one input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodePlan {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub video: VideoTreatment,
}

impl EncodePlan {
    /// Encoder used for the video stream, if it is re-encoded.
    #[must_use]
    pub fn encoder(&self) -> Option<&str> {
        match &self.video {
            VideoTreatment::Reencode { encoder, .. } => Some(encoder),
            VideoTreatment::Copy => None,
        }
    }

    #[must_use]
    pub fn is_copy(&self) -> bool {
        self.video == VideoTreatment::Copy
    }

    /// Arguments passed to ffmpeg, in order.
    #[must_use]
    pub fn ffmpeg_args(&self) -> Vec<String> {
        let mut args: Vec<String> = ["-stats", "-loglevel", "level+info", "-y", "-i"]
            .into_iter()
            .map(String::from)
            .collect();
        args.push(self.source.to_string_lossy().into_owned());
        args.extend(
            ["-map", "0", "-map_metadata", "0", "-map_chapters", "0"]
                .into_iter()
                .map(String::from),
        );

        match &self.video {
            VideoTreatment::Copy => {
                args.extend(["-c".to_string(), "copy".to_string()]);
            }
            VideoTreatment::Reencode {
                crop,
                encoder,
                quality,
                preset,
            } => {
                for kind in ["a", "s", "d", "t"] {
                    args.push(format!("-c:{kind}"));
                    args.push("copy".to_string());
                }
                args.extend(["-c:v".to_string(), encoder.clone()]);
                if let Some(filters) = VideoFilterChain::new().add_crop(&crop.to_filter()).build() {
                    args.extend(["-vf".to_string(), filters]);
                }
                args.extend(["-preset".to_string(), preset.clone()]);
                args.extend(quality.args());
            }
        }

        args.extend(["-movflags".to_string(), MOVFLAGS.to_string()]);
        args.push(self.destination.to_string_lossy().into_owned());
        args
    }
}

/// Builds the plan for `decision`.
///
/// `encoder`, `quality` and `preset` only matter when the decision is a crop;
/// a file that needs no crop is stream-copied.
#[must_use]
pub fn build_plan(
    source: &Path,
    destination: &Path,
    decision: CropDecision,
    encoder: &str,
    quality: QualityMode,
    preset: &str,
) -> EncodePlan {
    let video = match decision {
        CropDecision::Crop(crop) => VideoTreatment::Reencode {
            crop,
            encoder: encoder.to_string(),
            quality,
            preset: preset.to_string(),
        },
        CropDecision::NoCropNeeded => VideoTreatment::Copy,
    };

    EncodePlan {
        source: source.to_path_buf(),
        destination: destination.to_path_buf(),
        video,
    }
}
