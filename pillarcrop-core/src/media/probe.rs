//! Parsing of `ffprobe -print_format json -show_streams -show_format` output.

use std::path::Path;

use serde_json::Value;

use crate::error::{CoreError, CoreResult};
use crate::media::info::{MediaInfo, StreamKind, StreamSummary};

/// Arguments passed to ffprobe ahead of the input path.
pub const FFPROBE_ARGS: [&str; 6] = [
    "-v",
    "error",
    "-print_format",
    "json",
    "-show_streams",
    "-show_format",
];

/// Parses ffprobe's JSON document into a `MediaInfo`.
///
/// `path` is only used to label errors.
pub fn parse_probe_json(path: &Path, json: &str) -> CoreResult<MediaInfo> {
    let root: Value = serde_json::from_str(json).map_err(|e| CoreError::Probe {
        path: path.to_path_buf(),
        message: format!("unparsable ffprobe output: {e}"),
    })?;

    if !root.is_object() {
        return Err(CoreError::Probe {
            path: path.to_path_buf(),
            message: "ffprobe output is not a JSON object".to_string(),
        });
    }

    let streams = root["streams"]
        .as_array()
        .map(|streams| streams.iter().map(parse_stream).collect())
        .unwrap_or_default();

    Ok(MediaInfo {
        format_bit_rate: numeric(&root["format"]["bit_rate"]),
        streams,
    })
}

fn parse_stream(stream: &Value) -> StreamSummary {
    StreamSummary {
        index: numeric(&stream["index"]).and_then(|i| u32::try_from(i).ok()),
        kind: stream["codec_type"]
            .as_str()
            .map(StreamKind::from)
            .unwrap_or(StreamKind::Unknown),
        codec_name: text(&stream["codec_name"]),
        pix_fmt: text(&stream["pix_fmt"]),
        width: numeric(&stream["width"]).and_then(|w| u32::try_from(w).ok()),
        height: numeric(&stream["height"]).and_then(|h| u32::try_from(h).ok()),
        bit_rate: numeric(&stream["bit_rate"]),
    }
}

/// Reads a non-negative integer that ffprobe may print as a number or a string.
/// Missing, negative or non-numeric values (e.g. "N/A") yield `None`.
fn numeric(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
}

fn text(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "streams": [
            {
                "index": 0,
                "codec_name": "h264",
                "codec_type": "video",
                "width": 1920,
                "height": 1080,
                "pix_fmt": "yuv420p",
                "bit_rate": "4000000"
            },
            {
                "index": 1,
                "codec_name": "aac",
                "codec_type": "audio",
                "bit_rate": "128000"
            },
            {
                "index": 2,
                "codec_name": "subrip",
                "codec_type": "subtitle"
            }
        ],
        "format": {
            "filename": "show.mkv",
            "bit_rate": "4200000"
        }
    }"#;

    #[test]
    fn test_parse_sample() {
        let info = parse_probe_json(Path::new("show.mkv"), SAMPLE).unwrap();
        assert_eq!(info.format_bit_rate, Some(4_200_000));
        assert_eq!(info.streams.len(), 3);

        let video = info.primary_video().unwrap();
        assert_eq!(video.index, Some(0));
        assert_eq!(video.codec_name.as_deref(), Some("h264"));
        assert_eq!(video.width, Some(1920));
        assert_eq!(video.height, Some(1080));
        assert_eq!(video.pix_fmt.as_deref(), Some("yuv420p"));
        assert_eq!(video.bit_rate, Some(4_000_000));

        assert_eq!(info.count(StreamKind::Audio), 1);
        assert_eq!(info.count(StreamKind::Subtitle), 1);
    }

    #[test]
    fn test_non_numeric_fields_are_unknown() {
        let json = r#"{
            "streams": [
                {"codec_type": "video", "codec_name": "hevc", "width": "wide", "height": 1080, "bit_rate": "N/A"}
            ],
            "format": {"bit_rate": "N/A"}
        }"#;
        let info = parse_probe_json(Path::new("a.mkv"), json).unwrap();
        let video = info.primary_video().unwrap();
        assert_eq!(video.width, None);
        assert_eq!(video.height, Some(1080));
        assert_eq!(video.bit_rate, None);
        assert_eq!(video.pix_fmt, None);
        assert_eq!(info.format_bit_rate, None);
    }

    #[test]
    fn test_zero_is_kept_distinct_from_missing() {
        let json = r#"{"streams": [{"codec_type": "video", "width": 0, "height": 0, "bit_rate": "0"}], "format": {}}"#;
        let info = parse_probe_json(Path::new("a.mkv"), json).unwrap();
        let video = info.primary_video().unwrap();
        assert_eq!(video.width, Some(0));
        assert_eq!(video.bit_rate, Some(0));
        assert_eq!(info.format_bit_rate, None);
    }

    #[test]
    fn test_missing_sections() {
        let info = parse_probe_json(Path::new("a.mkv"), "{}").unwrap();
        assert!(info.streams.is_empty());
        assert_eq!(info.format_bit_rate, None);
        assert!(info.primary_video().is_none());
    }

    #[test]
    fn test_unparsable_output() {
        let err = parse_probe_json(Path::new("a.mkv"), "not json").unwrap_err();
        assert!(matches!(err, CoreError::Probe { .. }));

        let err = parse_probe_json(Path::new("a.mkv"), "[1, 2]").unwrap_err();
        assert!(matches!(err, CoreError::Probe { .. }));
    }
}
