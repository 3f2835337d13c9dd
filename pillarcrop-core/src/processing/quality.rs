// ============================================================================
// pillarcrop-core/src/processing/quality.rs
// ============================================================================
//
// QUALITY SELECTION: Rate Control for the Re-encode
//
// The re-encode tries to stay close to the source bitrate. When the bitrate
// is unknown or implausibly low, or when the user asks for a CRF, a constant
// quality mode is used instead.

use serde::Serialize;

use super::encoder::{X26X_ENCODERS, ZERO_BITRATE_CRF_ENCODERS};

/// Bitrates below this (bits per second) are treated as unknown.
pub const MIN_USABLE_BITRATE: u64 = 100_000;

/// Fallback CRF for libx264/libx265.
pub const DEFAULT_X26X_CRF: u8 = 18;

/// Fallback CRF for every other encoder.
pub const DEFAULT_OTHER_CRF: u8 = 28;

/// Rate control passed to the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum QualityMode {
    /// Average bitrate with a VBV cap; buffer is twice the target.
    Bitrate {
        target: u64,
        max_rate: u64,
        buffer_size: u64,
    },
    /// Constant quality. `zero_bitrate` adds `-b:v 0`.
    Crf { value: u8, zero_bitrate: bool },
}

impl QualityMode {
    /// Bitrate mode matching `bitrate`.
    #[must_use]
    pub fn matching_bitrate(bitrate: u64) -> Self {
        QualityMode::Bitrate {
            target: bitrate,
            max_rate: bitrate,
            buffer_size: bitrate.saturating_mul(2),
        }
    }

    /// ffmpeg arguments for this mode.
    #[must_use]
    pub fn args(&self) -> Vec<String> {
        match *self {
            QualityMode::Bitrate {
                target,
                max_rate,
                buffer_size,
            } => vec![
                "-b:v".to_string(),
                target.to_string(),
                "-maxrate".to_string(),
                max_rate.to_string(),
                "-bufsize".to_string(),
                buffer_size.to_string(),
            ],
            QualityMode::Crf { value, zero_bitrate } => {
                let mut args = vec!["-crf".to_string(), value.to_string()];
                if zero_bitrate {
                    args.extend(["-b:v".to_string(), "0".to_string()]);
                }
                args
            }
        }
    }
}

/// Picks the bitrate to match: the stream's own, else the container's.
///
/// A value below [`MIN_USABLE_BITRATE`] counts as unknown and does not fall
/// through to the container value.
#[must_use]
pub fn usable_bitrate(stream: Option<u64>, container: Option<u64>) -> Option<u64> {
    stream
        .or(container)
        .filter(|&rate| rate >= MIN_USABLE_BITRATE)
}

/// Chooses the rate control for `encoder`.
#[must_use]
pub fn select_quality(requested_crf: Option<u8>, bitrate: Option<u64>, encoder: &str) -> QualityMode {
    let zero_bitrate = ZERO_BITRATE_CRF_ENCODERS.contains(&encoder);

    if let Some(value) = requested_crf {
        return QualityMode::Crf { value, zero_bitrate };
    }

    match bitrate.filter(|&rate| rate >= MIN_USABLE_BITRATE) {
        Some(rate) => QualityMode::matching_bitrate(rate),
        None => {
            let value = if X26X_ENCODERS.contains(&encoder) {
                DEFAULT_X26X_CRF
            } else {
                DEFAULT_OTHER_CRF
            };
            QualityMode::Crf { value, zero_bitrate }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usable_bitrate_prefers_stream() {
        assert_eq!(usable_bitrate(Some(4_000_000), Some(5_000_000)), Some(4_000_000));
        assert_eq!(usable_bitrate(None, Some(5_000_000)), Some(5_000_000));
        assert_eq!(usable_bitrate(None, None), None);
    }

    #[test]
    fn test_usable_bitrate_discards_low_values() {
        assert_eq!(usable_bitrate(Some(99_999), None), None);
        assert_eq!(usable_bitrate(Some(50_000), Some(5_000_000)), None);
        assert_eq!(usable_bitrate(None, Some(1_000)), None);
        assert_eq!(usable_bitrate(Some(100_000), None), Some(100_000));
    }

    #[test]
    fn test_known_bitrate_selects_bitrate_mode() {
        assert_eq!(
            select_quality(None, Some(4_000_000), "libx264"),
            QualityMode::Bitrate {
                target: 4_000_000,
                max_rate: 4_000_000,
                buffer_size: 8_000_000,
            }
        );
    }

    #[test]
    fn test_explicit_crf_overrides_bitrate() {
        assert_eq!(
            select_quality(Some(22), Some(4_000_000), "libx264"),
            QualityMode::Crf { value: 22, zero_bitrate: false }
        );
        assert_eq!(
            select_quality(Some(30), Some(4_000_000), "libaom-av1"),
            QualityMode::Crf { value: 30, zero_bitrate: true }
        );
    }

    #[test]
    fn test_fallback_crf_per_encoder() {
        assert_eq!(
            select_quality(None, None, "libx265"),
            QualityMode::Crf { value: 18, zero_bitrate: false }
        );
        assert_eq!(
            select_quality(None, Some(50_000), "libvpx-vp9"),
            QualityMode::Crf { value: 28, zero_bitrate: true }
        );
        assert_eq!(
            select_quality(None, None, "mpeg2video"),
            QualityMode::Crf { value: 28, zero_bitrate: false }
        );
    }

    #[test]
    fn test_quality_args() {
        assert_eq!(
            QualityMode::matching_bitrate(4_000_000).args(),
            ["-b:v", "4000000", "-maxrate", "4000000", "-bufsize", "8000000"]
        );
        assert_eq!(
            QualityMode::Crf { value: 28, zero_bitrate: true }.args(),
            ["-crf", "28", "-b:v", "0"]
        );
        assert_eq!(QualityMode::Crf { value: 18, zero_bitrate: false }.args(), ["-crf", "18"]);
    }
}
