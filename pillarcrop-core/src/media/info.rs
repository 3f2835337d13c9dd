//! Typed summary of an ffprobe result.
//!
//! `MediaInfo` is built once per input and never mutated afterwards. Numeric
//! fields stay `None` when ffprobe omitted them or printed something that is
//! not a number, so "unknown" is never confused with zero.

use std::path::Path;

use serde::Serialize;

use crate::error::{CoreError, CoreResult};

/// Media stream types as reported by ffprobe's `codec_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamKind {
    Video,
    Audio,
    Subtitle,
    Data,
    Attachment,
    Unknown,
}

impl From<&str> for StreamKind {
    fn from(s: &str) -> Self {
        match s {
            "video" => StreamKind::Video,
            "audio" => StreamKind::Audio,
            "subtitle" => StreamKind::Subtitle,
            "data" => StreamKind::Data,
            "attachment" => StreamKind::Attachment,
            _ => StreamKind::Unknown,
        }
    }
}

/// One stream of the probed container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreamSummary {
    pub index: Option<u32>,
    pub kind: StreamKind,
    pub codec_name: Option<String>,
    pub pix_fmt: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Stream bitrate in bits per second.
    pub bit_rate: Option<u64>,
}

/// Probe result for one input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaInfo {
    /// Container-level bitrate in bits per second.
    pub format_bit_rate: Option<u64>,
    pub streams: Vec<StreamSummary>,
}

/// The primary video stream with usable geometry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoStreamSummary {
    pub width: u32,
    pub height: u32,
    pub codec_name: String,
    pub pix_fmt: String,
    pub bit_rate: Option<u64>,
}

impl VideoStreamSummary {
    /// Display aspect ratio of the coded frame (width / height).
    #[must_use]
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

impl MediaInfo {
    /// First stream whose type is video.
    #[must_use]
    pub fn primary_video(&self) -> Option<&StreamSummary> {
        self.streams.iter().find(|s| s.kind == StreamKind::Video)
    }

    /// Extracts the primary video stream, failing when there is none or its
    /// dimensions are missing or zero. `path` only labels the error.
    pub fn video_summary(&self, path: &Path) -> CoreResult<VideoStreamSummary> {
        let stream = self
            .primary_video()
            .ok_or_else(|| CoreError::NoVideoStream(path.to_path_buf()))?;

        let (width, height) = match (stream.width, stream.height) {
            (Some(w), Some(h)) if w > 0 && h > 0 => (w, h),
            _ => return Err(CoreError::MissingDimensions(path.to_path_buf())),
        };

        Ok(VideoStreamSummary {
            width,
            height,
            codec_name: stream.codec_name.clone().unwrap_or_default(),
            pix_fmt: stream.pix_fmt.clone().unwrap_or_default(),
            bit_rate: stream.bit_rate,
        })
    }

    /// Number of streams of the given kind.
    #[must_use]
    pub fn count(&self, kind: StreamKind) -> usize {
        self.streams.iter().filter(|s| s.kind == kind).count()
    }
}
