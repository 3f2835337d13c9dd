//! Command implementations for the CLI.
//!
//! Each submodule contains the implementation of a specific command.

/// `crop`: plans and runs (or previews) the crop for every input.
pub mod crop;

/// `info`: probe summary and plan preview per input.
pub mod info;

use crate::error::CliResult;
use pillarcrop_core::external::{REQUIRED_TOOLS, check_dependencies, check_dependency};

/// Verifies the tools a command needs before any input is touched.
pub(crate) fn check_tools(needs_ffmpeg: bool) -> CliResult<()> {
    if needs_ffmpeg {
        check_dependencies(&REQUIRED_TOOLS)?;
    } else {
        check_dependency("ffprobe")?;
    }
    log::debug!("External dependency check passed.");
    Ok(())
}
