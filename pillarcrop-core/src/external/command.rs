//! Running an external tool while its output streams to the terminal.
//!
//! The encode step must show ffmpeg's progress live and still report the
//! tool's stderr when it fails. Both pipes are drained on their own thread;
//! every chunk is echoed to our own stdout/stderr as it arrives and kept in
//! memory.

use std::io::{self, Read, Write};
use std::process::{Command, Stdio};
use std::thread;

use crate::error::{CoreError, CoreResult, command_start_error};

const RELAY_CHUNK: usize = 8192;

/// What a finished command printed, plus its exit code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedOutput {
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CapturedOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Trait for running a program to completion.
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[String]) -> CoreResult<CapturedOutput>;
}

/// [`CommandRunner`] that relays output live and captures it.
#[derive(Debug, Clone, Default)]
pub struct LiveCaptureRunner;

impl CommandRunner for LiveCaptureRunner {
    fn run(&self, program: &str, args: &[String]) -> CoreResult<CapturedOutput> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                if e.kind() == io::ErrorKind::NotFound {
                    CoreError::DependencyNotFound(program.to_string())
                } else {
                    command_start_error(program, e)
                }
            })?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| io::Error::other("child stdout was not piped"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| io::Error::other("child stderr was not piped"))?;

        let stdout_handle = thread::spawn(move || relay(stdout, io::stdout()));
        let stderr_handle = thread::spawn(move || relay(stderr, io::stderr()));

        let status = child.wait()?;
        let stdout = join_relay(stdout_handle)?;
        let stderr = join_relay(stderr_handle)?;

        Ok(CapturedOutput {
            exit_code: status.code(),
            stdout: String::from_utf8_lossy(&stdout).into_owned(),
            stderr: String::from_utf8_lossy(&stderr).into_owned(),
        })
    }
}

fn join_relay(handle: thread::JoinHandle<io::Result<Vec<u8>>>) -> CoreResult<Vec<u8>> {
    let bytes = handle
        .join()
        .map_err(|_| io::Error::other("output relay thread panicked"))??;
    Ok(bytes)
}

/// Copies `source` into `sink` chunk by chunk and returns everything read.
///
/// Write failures on the sink are ignored so a closed terminal never stops
/// the capture.
fn relay<R: Read, W: Write>(mut source: R, mut sink: W) -> io::Result<Vec<u8>> {
    let mut captured = Vec::new();
    let mut buf = [0u8; RELAY_CHUNK];
    loop {
        let n = match source.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        let _ = sink.write_all(&buf[..n]).and_then(|()| sink.flush());
        captured.extend_from_slice(&buf[..n]);
    }
    Ok(captured)
}
