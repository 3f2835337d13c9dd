// ============================================================================
// pillarcrop-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with ffprobe and ffmpeg
//
// Every call pillarcrop makes to an external program goes through a trait in
// this module so the planning and batch logic can be driven by fakes in tests.
//
// KEY COMPONENTS:
// - MediaProber: ffprobe metadata extraction
// - FfmpegSpawner / FfmpegProcess: event-driven ffmpeg runs (cropdetect scan)
// - CommandRunner: the re-encode/remux run with live output and captured stderr
// - Dependency checking functions

use crate::error::{CoreError, CoreResult};

use std::io;
use std::process::{Command, Stdio};

// ============================================================================
// SUBMODULES
// ============================================================================

/// Builders for ffmpeg commands and filter chains
pub mod ffmpeg_builder;

/// Traits and implementations for executing ffmpeg with parsed events
pub mod ffmpeg_executor;

/// Traits and implementations for executing ffprobe
pub mod ffprobe_executor;

/// Running a tool with live output while capturing what it prints
pub mod command;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use command::{CapturedOutput, CommandRunner, LiveCaptureRunner};
pub use ffmpeg_builder::{FfmpegCommandBuilder, VideoFilterChain};
pub use ffmpeg_executor::{FfmpegProcess, FfmpegSpawner, SidecarProcess, SidecarSpawner};
pub use ffprobe_executor::{FfprobeProber, MediaProber};

/// The programs a batch run needs on the PATH.
pub const REQUIRED_TOOLS: [&str; 2] = ["ffprobe", "ffmpeg"];

// ============================================================================
// DEPENDENCY CHECKING
// ============================================================================

/// Checks that `cmd_name` can be launched by running it with `-version`.
///
/// The exit status of the version query is not inspected; only whether the
/// program could be started.
pub fn check_dependency(cmd_name: &str) -> CoreResult<()> {
    let result = Command::new(cmd_name)
        .arg("-version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(_) => {
            log::debug!("Found dependency: {}", cmd_name);
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("Dependency '{}' not found.", cmd_name);
            Err(CoreError::DependencyNotFound(cmd_name.to_string()))
        }
        Err(e) => {
            log::error!("Failed to start dependency check command '{}': {}", cmd_name, e);
            Err(CoreError::CommandStart(cmd_name.to_string(), e))
        }
    }
}

/// Checks every tool in `names`, stopping at the first one that is missing.
pub fn check_dependencies(names: &[&str]) -> CoreResult<()> {
    names.iter().try_for_each(|name| check_dependency(name))
}
