// ============================================================================
// pillarcrop-core/src/config.rs
// ============================================================================
//
// CONFIGURATION: Core Configuration Structures and Constants
//
// This module defines the configuration used to drive a batch: where outputs
// go, how the crop is decided, which quality mode to force, which encoder
// preset to pass and whether ffmpeg is actually run.
//
// USAGE:
// Instances of CoreConfig are created by consumers of the library (like
// pillarcrop-cli) and passed to `process_files`.

use std::path::PathBuf;

use crate::error::{CoreError, CoreResult};

// ============================================================================
// DEFAULT CONSTANTS
// ============================================================================

/// Seconds of video sampled by the cropdetect scan.
pub const DEFAULT_SCAN_SECONDS: u32 = 15;

/// Encoder preset passed to ffmpeg when none is given.
pub const DEFAULT_PRESET: &str = "medium";

/// Marker inserted between the file stem and extension of every output.
pub const OUTPUT_MARKER: &str = "4x3";

/// Highest CRF accepted by any of the mapped encoders (libaom-av1, libvpx-vp9).
pub const MAX_CRF: u8 = 63;

// ============================================================================
// CROP MODE
// ============================================================================

/// How the crop rectangle is decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CropMode {
    /// Centered 4:3 crop computed from the source dimensions.
    #[default]
    Centered,
    /// Run a cropdetect scan over the first `scan_seconds` of the file.
    Detect { scan_seconds: u32 },
}

// ============================================================================
// CORE CONFIGURATION
// ============================================================================

/// Configuration for a batch run.
///
/// # Examples
///
/// ```rust
/// use pillarcrop_core::config::{CoreConfig, CropMode};
///
/// let mut config = CoreConfig::new(None);
/// config.crop_mode = CropMode::Detect { scan_seconds: 20 };
/// config.crf = Some(20);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Directory for outputs; `None` writes next to each input.
    pub output_dir: Option<PathBuf>,
    pub crop_mode: CropMode,
    /// Forces constant-quality mode with this CRF.
    pub crf: Option<u8>,
    pub preset: String,
    /// Render the ffmpeg invocations without running them.
    pub dry_run: bool,
}

impl CoreConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new(output_dir: Option<PathBuf>) -> Self {
        Self {
            output_dir,
            crop_mode: CropMode::default(),
            crf: None,
            preset: DEFAULT_PRESET.to_string(),
            dry_run: false,
        }
    }

    /// Checks the configuration for values ffmpeg would reject.
    pub fn validate(&self) -> CoreResult<()> {
        if let CropMode::Detect { scan_seconds: 0 } = self.crop_mode {
            return Err(CoreError::Config(
                "scan duration must be at least one second".to_string(),
            ));
        }

        if let Some(crf) = self.crf {
            if crf > MAX_CRF {
                return Err(CoreError::Config(format!(
                    "CRF {crf} is out of range (0-{MAX_CRF})"
                )));
            }
        }

        if self.preset.trim().is_empty() {
            return Err(CoreError::Config("encoder preset must not be empty".to_string()));
        }

        if let Some(dir) = &self.output_dir {
            if dir.exists() && !dir.is_dir() {
                return Err(CoreError::Config(format!(
                    "output path '{}' is not a directory",
                    dir.display()
                )));
            }
        }

        Ok(())
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self::new(None)
    }
}
