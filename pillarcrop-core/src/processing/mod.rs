//! Crop decision, encode planning and batch orchestration.
//!
//! The submodules are layered bottom-up: `crop` and `crop_detection` decide
//! the rectangle, `encoder` and `quality` choose how to re-encode, `plan`
//! assembles the ffmpeg invocation and `batch` runs it for every input.

/// Crop geometry and the decision rules
pub mod crop;

/// cropdetect scan and output parsing
pub mod crop_detection;

/// Source codec to encoder mapping
pub mod encoder;

/// Bitrate / CRF selection
pub mod quality;

/// ffmpeg invocation for one file
pub mod plan;

/// Batch loop over the input files
pub mod batch;

pub use batch::{BatchSummary, FileOutcome, FileReport, PlannedFile, plan_file, process_files, process_files_with};
pub use crop::{CropDecision, CropSpec};
pub use crop_detection::detect_crop;
pub use plan::{EncodePlan, VideoTreatment};
pub use quality::QualityMode;
