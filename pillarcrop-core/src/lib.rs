//! Core library for cropping pillarboxed 16:9 video back to 4:3.
//!
//! For each input file the library probes the streams with ffprobe, decides
//! a 4:3 crop rectangle (from the source dimensions or from an ffmpeg
//! cropdetect scan), picks an encoder and rate control matching the source,
//! and runs a single ffmpeg invocation that re-encodes only the video while
//! copying every other stream, all metadata and all chapters. Sources that
//! are already 4:3 are stream-copied.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use pillarcrop_core::{CoreConfig, process_files};
//! use pillarcrop_core::external::{FfprobeProber, LiveCaptureRunner, SidecarSpawner};
//! use std::path::PathBuf;
//!
//! let mut config = CoreConfig::new(Some(PathBuf::from("/path/to/output")));
//! config.dry_run = true;
//!
//! let files = vec![PathBuf::from("/path/to/episode.mkv")];
//! let summary = process_files(
//!     &FfprobeProber::new(),
//!     &SidecarSpawner,
//!     &LiveCaptureRunner,
//!     &config,
//!     &files,
//! ).unwrap();
//! println!("{} previewed, {} skipped", summary.previewed(), summary.skipped());
//! ```

pub mod config;
pub mod error;
pub mod external;
pub mod media;
pub mod processing;
pub mod utils;

// Re-exports for public API
pub use config::{CoreConfig, CropMode};
pub use error::{CoreError, CoreResult};
pub use external::{check_dependencies, REQUIRED_TOOLS};
pub use media::{MediaInfo, VideoStreamSummary};
pub use processing::{
    BatchSummary, CropDecision, CropSpec, EncodePlan, FileOutcome, FileReport, PlannedFile,
    QualityMode, VideoTreatment, plan_file, process_files, process_files_with,
};
pub use utils::{output_path_for, render_command_line};
