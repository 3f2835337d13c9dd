//! ffprobe integration for stream metadata.
//!
//! [`FfprobeProber`] runs `ffprobe` once per file with JSON output and hands
//! the document to [`parse_probe_json`](crate::media::parse_probe_json).

use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::{CoreError, CoreResult, command_start_error};
use crate::media::MediaInfo;
use crate::media::probe::{FFPROBE_ARGS, parse_probe_json};

/// Trait for anything that can describe the streams of a media file.
pub trait MediaProber {
    /// Returns the stream and container metadata of `path`.
    fn probe(&self, path: &Path) -> CoreResult<MediaInfo>;
}

/// [`MediaProber`] backed by the `ffprobe` binary on the PATH.
#[derive(Debug, Clone, Default)]
pub struct FfprobeProber;

impl FfprobeProber {
    pub fn new() -> Self {
        Self
    }
}

impl MediaProber for FfprobeProber {
    fn probe(&self, path: &Path) -> CoreResult<MediaInfo> {
        log::debug!("Running ffprobe on: {}", path.display());

        let output = Command::new("ffprobe")
            .args(FFPROBE_ARGS)
            .arg(path)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| {
                if e.kind() == io::ErrorKind::NotFound {
                    CoreError::DependencyNotFound("ffprobe".to_string())
                } else {
                    command_start_error("ffprobe", e)
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            log::error!("ffprobe failed for {}: {}", path.display(), stderr);
            return Err(CoreError::Probe {
                path: path.to_path_buf(),
                message: if stderr.is_empty() {
                    format!("ffprobe exited with status {}", output.status)
                } else {
                    stderr
                },
            });
        }

        parse_probe_json(path, &String::from_utf8_lossy(&output.stdout))
    }
}
