//! Encoder selection for re-encoded video.
//!
//! The cropped stream is re-encoded with the encoder matching the source
//! codec so the output keeps the same format family.

/// Source codec name (ffprobe `codec_name`) to ffmpeg encoder name.
const ENCODER_MAP: &[(&str, &str)] = &[
    ("h264", "libx264"),
    ("hevc", "libx265"),
    ("mpeg4", "mpeg4"),
    ("mpeg2video", "mpeg2video"),
    ("vp9", "libvpx-vp9"),
    ("av1", "libaom-av1"),
    ("theora", "libtheora"),
    ("prores", "prores_ks"),
    ("h263", "h263"),
];

/// Encoders that take `-crf` together with `-b:v 0` for constant quality.
pub const ZERO_BITRATE_CRF_ENCODERS: [&str; 2] = ["libvpx-vp9", "libaom-av1"];

/// The x264/x265 family, which gets a lower default CRF.
pub const X26X_ENCODERS: [&str; 2] = ["libx264", "libx265"];

/// Maps a source codec to the encoder used for the re-encode.
///
/// Codecs without an entry are passed through unchanged, on the assumption
/// that ffmpeg has an encoder of the same name.
#[must_use]
pub fn resolve_encoder(codec: &str) -> String {
    ENCODER_MAP
        .iter()
        .find(|(source, _)| *source == codec)
        .map_or(codec, |&(_, encoder)| encoder)
        .to_string()
}

/// Whether re-encoding with `encoder` may lose 10-bit depth.
///
/// Some x264/x265 builds are 8-bit only; the caller should warn the user.
#[must_use]
pub fn ten_bit_advisory(encoder: &str, pix_fmt: &str) -> bool {
    X26X_ENCODERS.contains(&encoder) && (pix_fmt.ends_with("10le") || pix_fmt.ends_with("10be"))
}
