// pillarcrop-core/tests/common/mod.rs
//
// Hand-written fakes for the external tool traits, shared by the
// integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::{FfmpegEvent, LogLevel};
use pillarcrop_core::error::{CoreError, CoreResult};
use pillarcrop_core::external::{CapturedOutput, CommandRunner, FfmpegProcess, FfmpegSpawner, MediaProber};
use pillarcrop_core::media::{MediaInfo, StreamKind, StreamSummary};

pub fn create_dummy_file(dir: &Path, filename: &str) -> PathBuf {
    let file_path = dir.join(filename);
    let mut file = File::create(&file_path).expect("Failed to create dummy file");
    file.write_all(b"dummy content").expect("Failed to write dummy content");
    file_path
}

pub fn video_stream(codec: &str, pix_fmt: &str, width: u32, height: u32, bit_rate: Option<u64>) -> StreamSummary {
    StreamSummary {
        index: Some(0),
        kind: StreamKind::Video,
        codec_name: Some(codec.to_string()),
        pix_fmt: Some(pix_fmt.to_string()),
        width: Some(width),
        height: Some(height),
        bit_rate,
    }
}

pub fn audio_stream(index: u32) -> StreamSummary {
    StreamSummary {
        index: Some(index),
        kind: StreamKind::Audio,
        codec_name: Some("aac".to_string()),
        pix_fmt: None,
        width: None,
        height: None,
        bit_rate: Some(128_000),
    }
}

pub fn media(streams: Vec<StreamSummary>, format_bit_rate: Option<u64>) -> MediaInfo {
    MediaInfo { format_bit_rate, streams }
}

// ---- Prober ----

enum ProbeResult {
    Info(MediaInfo),
    Fail(String),
}

/// Answers probes from a table keyed by path.
#[derive(Default)]
pub struct FakeProber {
    results: HashMap<PathBuf, ProbeResult>,
    calls: RefCell<Vec<PathBuf>>,
}

impl FakeProber {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_info(mut self, path: &Path, info: MediaInfo) -> Self {
        self.results.insert(path.to_path_buf(), ProbeResult::Info(info));
        self
    }

    pub fn with_failure(mut self, path: &Path, message: &str) -> Self {
        self.results.insert(path.to_path_buf(), ProbeResult::Fail(message.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<PathBuf> {
        self.calls.borrow().clone()
    }
}

impl MediaProber for FakeProber {
    fn probe(&self, path: &Path) -> CoreResult<MediaInfo> {
        self.calls.borrow_mut().push(path.to_path_buf());
        match self.results.get(path) {
            Some(ProbeResult::Info(info)) => Ok(info.clone()),
            Some(ProbeResult::Fail(message)) => Err(CoreError::Probe {
                path: path.to_path_buf(),
                message: message.clone(),
            }),
            None => Err(CoreError::Probe {
                path: path.to_path_buf(),
                message: "no fake probe result".to_string(),
            }),
        }
    }
}

// ---- Scan spawner ----

pub struct FakeFfmpegProcess {
    events: Vec<FfmpegEvent>,
    exit_code: Option<i32>,
}

impl FfmpegProcess for FakeFfmpegProcess {
    fn handle_events<F>(&mut self, mut handler: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>,
    {
        for event in self.events.drain(..) {
            handler(event)?;
        }
        Ok(())
    }

    fn wait(&mut self) -> CoreResult<Option<i32>> {
        Ok(self.exit_code)
    }
}

/// Emits the same cropdetect log lines for every scan.
#[derive(Default)]
pub struct FakeSpawner {
    lines: Vec<String>,
    exit_code: Option<i32>,
    fail_spawn: bool,
    received_calls: RefCell<Vec<Vec<String>>>,
}

impl FakeSpawner {
    pub fn new() -> Self {
        Self { exit_code: Some(0), ..Self::default() }
    }

    pub fn with_crop_lines(mut self, crops: &[&str]) -> Self {
        self.lines = crops
            .iter()
            .map(|crop| format!("[Parsed_cropdetect_0 @ 0x55d0] x1:0 x2:0 y1:0 y2:0 w:0 h:0 x:0 y:0 pts:0 t:0.0 limit:0.09 crop={crop}"))
            .collect();
        self
    }

    pub fn with_exit_code(mut self, code: i32) -> Self {
        self.exit_code = Some(code);
        self
    }

    pub fn failing() -> Self {
        Self { fail_spawn: true, ..Self::new() }
    }

    pub fn received_calls(&self) -> Vec<Vec<String>> {
        self.received_calls.borrow().clone()
    }
}

impl FfmpegSpawner for FakeSpawner {
    type Process = FakeFfmpegProcess;

    #[allow(unused_mut)]
    fn spawn(&self, mut cmd: FfmpegCommand) -> CoreResult<Self::Process> {
        let args: Vec<String> = cmd
            .as_inner()
            .get_args()
            .map(|s| s.to_string_lossy().into_owned())
            .collect();
        self.received_calls.borrow_mut().push(args);

        if self.fail_spawn {
            return Err(CoreError::CommandStart(
                "ffmpeg".to_string(),
                std::io::Error::other("spawn refused"),
            ));
        }
        Ok(FakeFfmpegProcess {
            events: self
                .lines
                .iter()
                .map(|line| FfmpegEvent::Log(LogLevel::Info, line.clone()))
                .collect(),
            exit_code: self.exit_code,
        })
    }
}

// ---- Command runner ----

/// Records every run and answers with a fixed output.
pub struct FakeRunner {
    output: CapturedOutput,
    calls: RefCell<Vec<(String, Vec<String>)>>,
}

impl FakeRunner {
    pub fn succeeding() -> Self {
        Self::with_output(CapturedOutput {
            exit_code: Some(0),
            stdout: String::new(),
            stderr: "frame=  100 fps=50\n".to_string(),
        })
    }

    pub fn failing(code: i32, stderr: &str) -> Self {
        Self::with_output(CapturedOutput {
            exit_code: Some(code),
            stdout: String::new(),
            stderr: stderr.to_string(),
        })
    }

    fn with_output(output: CapturedOutput) -> Self {
        Self {
            output,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.borrow().clone()
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, program: &str, args: &[String]) -> CoreResult<CapturedOutput> {
        self.calls.borrow_mut().push((program.to_string(), args.to_vec()));
        Ok(self.output.clone())
    }
}
