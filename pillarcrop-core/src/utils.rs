//! Utility functions for output naming and command rendering.
//!
//! These helpers are shared by the batch orchestrator and the CLI. They never
//! touch the filesystem.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::config::OUTPUT_MARKER;

/// Output path for `input`: `<stem>.4x3<.ext>`, placed in `output_dir` when
/// given and next to the input otherwise.
///
/// ```rust
/// use pillarcrop_core::utils::output_path_for;
/// use std::path::{Path, PathBuf};
///
/// assert_eq!(
///     output_path_for(Path::new("/videos/show.mkv"), Some(Path::new("/out"))),
///     PathBuf::from("/out/show.4x3.mkv")
/// );
/// ```
#[must_use]
pub fn output_path_for(input: &Path, output_dir: Option<&Path>) -> PathBuf {
    let mut name: OsString = input.file_stem().unwrap_or(input.as_os_str()).to_os_string();
    name.push(".");
    name.push(OUTPUT_MARKER);
    if let Some(ext) = input.extension() {
        name.push(".");
        name.push(ext);
    }

    match output_dir {
        Some(dir) => dir.join(name),
        None => input.with_file_name(name),
    }
}

/// Renders a program and its arguments as a single shell-safe line.
#[must_use]
pub fn render_command_line(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .map(shell_quote)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Quotes `arg` for a POSIX shell when it contains anything but safe characters.
fn shell_quote(arg: &str) -> String {
    let safe = |c: char| c.is_ascii_alphanumeric() || "_@%+=:,./-".contains(c);
    if !arg.is_empty() && arg.chars().all(safe) {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r#"'"'"'"#))
    }
}

/// Formats seconds as HH:MM:SS (e.g., 3725.0 -> "01:02:05"). Returns "??:??:??" for invalid inputs.
#[must_use]
pub fn format_duration(seconds: f64) -> String {
    if seconds < 0.0 || !seconds.is_finite() {
        return "??:??:??".to_string();
    }

    let total_seconds = seconds as u64;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}
