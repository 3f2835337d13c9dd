//! Media metadata: the probe result model and its ffprobe parser.

pub mod info;
pub mod probe;

pub use info::{MediaInfo, StreamKind, StreamSummary, VideoStreamSummary};
pub use probe::parse_probe_json;
