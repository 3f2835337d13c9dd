// ============================================================================
// pillarcrop-cli/src/error.rs
// ============================================================================
//
// CLI ERROR HANDLING: Result alias and error reporting
//
// The CLI reuses CoreError. This module decides how an error is shown to the
// user and which exit code the process ends with.

use pillarcrop_core::{CoreError, CoreResult};

/// Type alias for CLI results using CoreError.
pub type CliResult<T> = CoreResult<T>;

/// Lines of the tool's diagnostics shown when execution fails.
const DIAGNOSTIC_TAIL_LINES: usize = 20;

/// Logs `err` (with the tail of the tool's stderr for failed runs) and
/// returns the process exit code. The whole capture is logged at debug level.
pub fn report(err: &CoreError) -> i32 {
    log::error!("{}", err);
    if let Some(stderr) = captured_stderr(err) {
        log::debug!("Full {} output:\n{}", tool_name(err), stderr);
        let tail = diagnostic_tail(stderr, DIAGNOSTIC_TAIL_LINES);
        if !tail.is_empty() {
            eprintln!("{tail}");
        }
    }
    err.exit_code()
}

/// The tool's captured stderr, when `err` is a failed run that has some.
fn captured_stderr(err: &CoreError) -> Option<&str> {
    match err {
        CoreError::ExecutionFailed { stderr, .. } if !stderr.trim().is_empty() => Some(stderr.as_str()),
        _ => None,
    }
}

fn tool_name(err: &CoreError) -> &str {
    match err {
        CoreError::ExecutionFailed { tool, .. } => tool.as_str(),
        _ => "tool",
    }
}

/// Last `max_lines` non-empty lines of `text`. Progress updates separated by
/// carriage returns collapse to the final one.
fn diagnostic_tail(text: &str, max_lines: usize) -> String {
    let lines: Vec<&str> = text
        .lines()
        .filter_map(|line| line.rsplit('\r').find(|part| !part.trim().is_empty()))
        .collect();
    let start = lines.len().saturating_sub(max_lines);
    lines[start..].join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_tail_keeps_last_lines() {
        let text = "a\nb\n\nc\nd\n";
        assert_eq!(diagnostic_tail(text, 2), "c\nd");
        assert_eq!(diagnostic_tail(text, 10), "a\nb\nc\nd");
    }

    #[test]
    fn test_diagnostic_tail_collapses_progress() {
        let text = "frame=1\rframe=2\rframe=3\nConversion failed!\n";
        assert_eq!(diagnostic_tail(text, 5), "frame=3\nConversion failed!");
    }

    #[test]
    fn test_report_uses_tool_exit_code() {
        let err = CoreError::ExecutionFailed {
            tool: "ffmpeg".to_string(),
            code: Some(187),
            stderr: "Conversion failed!".to_string(),
        };
        assert_eq!(report(&err), 187);
        assert_eq!(report(&CoreError::DependencyNotFound("ffmpeg".to_string())), 1);
    }

    #[test]
    fn test_captured_stderr_is_kept_whole() {
        let stderr: String = (1..=30).map(|n| format!("line {n}\n")).collect();
        let err = CoreError::ExecutionFailed {
            tool: "ffmpeg".to_string(),
            code: Some(1),
            stderr: stderr.clone(),
        };
        assert_eq!(captured_stderr(&err), Some(stderr.as_str()));
        assert_eq!(tool_name(&err), "ffmpeg");
        assert!(!diagnostic_tail(&stderr, DIAGNOSTIC_TAIL_LINES).contains("line 10\n"));

        let quiet = CoreError::ExecutionFailed { tool: "ffmpeg".to_string(), code: Some(1), stderr: "  \n".to_string() };
        assert_eq!(captured_stderr(&quiet), None);
        assert_eq!(captured_stderr(&CoreError::DependencyNotFound("ffmpeg".to_string())), None);
    }
}
