// ============================================================================
// pillarcrop-core/src/processing/batch.rs
// ============================================================================
//
// BATCH PROCESSING: Planning and Running Every Input File
//
// This module drives a batch from start to finish. Each input is planned on
// its own and then either previewed (dry run) or executed with ffmpeg.
//
// KEY COMPONENTS:
// - plan_file: probe, crop decision, encoder/quality choice and output naming
//   for one input
// - process_files / process_files_with: sequential loop over the inputs with
//   skip/abort handling, optionally reporting each file as it finishes
// - BatchSummary / FileReport: what happened to each input
//
// WORKFLOW:
// 1. Validate the configuration
// 2. For each input file, in order:
//    a. Plan it; per-file problems (missing file, unreadable probe, no video
//       stream, no dimensions) are logged and the file is skipped
//    b. Dry run: record the rendered ffmpeg command line
//    c. Otherwise run ffmpeg; a non-zero exit aborts the whole batch

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use log::{debug, error, info, warn};
use serde::Serialize;

use crate::config::{CoreConfig, CropMode};
use crate::error::{CoreError, CoreResult, command_failed_error};
use crate::external::{CommandRunner, FfmpegSpawner, MediaProber};
use crate::media::{MediaInfo, VideoStreamSummary};
use crate::processing::crop::{CropDecision, decide_analytic, decide_from_scan};
use crate::processing::crop_detection::detect_crop;
use crate::processing::encoder::{resolve_encoder, ten_bit_advisory};
use crate::processing::plan::{EncodePlan, FFMPEG_PROGRAM, build_plan};
use crate::processing::quality::{select_quality, usable_bitrate};
use crate::utils::{format_duration, output_path_for, render_command_line};

// ============================================================================
// RESULT TYPES
// ============================================================================

/// Everything decided about one input before ffmpeg runs.
#[derive(Debug, Clone, Serialize)]
pub struct PlannedFile {
    pub input: PathBuf,
    pub media: MediaInfo,
    pub video: VideoStreamSummary,
    pub decision: CropDecision,
    pub plan: EncodePlan,
    /// The re-encode may drop a 10-bit source to 8 bits.
    pub ten_bit_advisory: bool,
}

/// What happened to one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// ffmpeg ran and exited successfully.
    Executed,
    /// Dry run; the command that would have run.
    Previewed { command_line: String },
    /// Per-file problem; the batch continued.
    Skipped { reason: String },
}

#[derive(Debug, Clone)]
pub struct FileReport {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub outcome: FileOutcome,
    pub elapsed: Duration,
}

/// Per-file reports of a batch, in input order.
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    pub reports: Vec<FileReport>,
}

impl BatchSummary {
    #[must_use]
    pub fn executed(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Executed))
    }

    #[must_use]
    pub fn previewed(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Previewed { .. }))
    }

    #[must_use]
    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Skipped { .. }))
    }

    fn count(&self, pred: impl Fn(&FileOutcome) -> bool) -> usize {
        self.reports.iter().filter(|r| pred(&r.outcome)).count()
    }
}

// ============================================================================
// PLANNING
// ============================================================================

/// Plans one input file.
///
/// Returns `InputNotFound`, `Probe`, `NoVideoStream` or `MissingDimensions`
/// for problems specific to this file.
pub fn plan_file<P: MediaProber, S: FfmpegSpawner>(
    prober: &P,
    spawner: &S,
    config: &CoreConfig,
    path: &Path,
) -> CoreResult<PlannedFile> {
    if !path.is_file() {
        return Err(CoreError::InputNotFound(path.to_path_buf()));
    }

    let media = prober.probe(path)?;
    let video = media.video_summary(path)?;
    debug!(
        "{}: {}x{} {} {} (aspect {:.3})",
        path.display(),
        video.width,
        video.height,
        video.codec_name,
        video.pix_fmt,
        video.aspect_ratio()
    );

    let decision = match config.crop_mode {
        CropMode::Centered => decide_analytic(video.width, video.height),
        CropMode::Detect { scan_seconds } => {
            let samples = detect_crop(spawner, path, scan_seconds);
            decide_from_scan(&samples, video.width, video.height)
        }
    };

    let encoder = resolve_encoder(&video.codec_name);
    let bitrate = usable_bitrate(video.bit_rate, media.format_bit_rate);
    let quality = select_quality(config.crf, bitrate, &encoder);
    let destination = output_path_for(path, config.output_dir.as_deref());
    let plan = build_plan(path, &destination, decision, &encoder, quality, &config.preset);

    let advisory = !plan.is_copy() && ten_bit_advisory(&encoder, &video.pix_fmt);

    Ok(PlannedFile {
        input: path.to_path_buf(),
        media,
        video,
        decision,
        plan,
        ten_bit_advisory: advisory,
    })
}

// ============================================================================
// BATCH LOOP
// ============================================================================

/// Plans and runs every file in `files`, in order.
///
/// Per-file problems are logged and recorded as skipped. The first ffmpeg
/// failure stops the batch and is returned as `ExecutionFailed` carrying the
/// tool's exit code and stderr.
pub fn process_files<P: MediaProber, S: FfmpegSpawner, R: CommandRunner>(
    prober: &P,
    spawner: &S,
    runner: &R,
    config: &CoreConfig,
    files: &[PathBuf],
) -> CoreResult<BatchSummary> {
    process_files_with(prober, spawner, runner, config, files, |_| {})
}

/// Like [`process_files`], but hands each file's report to `on_report` as
/// soon as that file is finished, before the next one is planned.
pub fn process_files_with<P, S, R, F>(
    prober: &P,
    spawner: &S,
    runner: &R,
    config: &CoreConfig,
    files: &[PathBuf],
    mut on_report: F,
) -> CoreResult<BatchSummary>
where
    P: MediaProber,
    S: FfmpegSpawner,
    R: CommandRunner,
    F: FnMut(&FileReport),
{
    config.validate()?;

    let mut summary = BatchSummary::default();

    for input in files {
        let started = Instant::now();
        info!("Processing {}", input.display());

        let planned = match plan_file(prober, spawner, config, input) {
            Ok(planned) => planned,
            Err(e) if e.is_skippable() => {
                warn!("Skipping {}: {}", input.display(), e);
                let report = FileReport {
                    input: input.clone(),
                    output: None,
                    outcome: FileOutcome::Skipped { reason: e.to_string() },
                    elapsed: started.elapsed(),
                };
                on_report(&report);
                summary.reports.push(report);
                continue;
            }
            Err(e) => return Err(e),
        };

        match planned.decision {
            CropDecision::Crop(crop) => info!(
                "Cropping {}x{} -> {} ({})",
                planned.video.width,
                planned.video.height,
                crop,
                planned.plan.encoder().unwrap_or_default()
            ),
            CropDecision::NoCropNeeded => info!(
                "{}x{} is already about 4:3; copying streams",
                planned.video.width, planned.video.height
            ),
        }
        if planned.ten_bit_advisory {
            warn!(
                "{} is {}; {} may re-encode it at 8 bits",
                input.display(),
                planned.video.pix_fmt,
                planned.plan.encoder().unwrap_or_default()
            );
        }

        let args = planned.plan.ffmpeg_args();
        let command_line = render_command_line(FFMPEG_PROGRAM, &args);

        let outcome = if config.dry_run {
            debug!("Dry run: {}", command_line);
            FileOutcome::Previewed { command_line }
        } else {
            info!("Command: {}", command_line);
            let output = runner.run(FFMPEG_PROGRAM, &args)?;
            if !output.success() {
                error!("ffmpeg failed for {}", input.display());
                return Err(command_failed_error(FFMPEG_PROGRAM, output.exit_code, output.stderr));
            }
            info!(
                "Wrote {} in {}",
                planned.plan.destination.display(),
                format_duration(started.elapsed().as_secs_f64())
            );
            FileOutcome::Executed
        };

        let report = FileReport {
            input: input.clone(),
            output: Some(planned.plan.destination.clone()),
            outcome,
            elapsed: started.elapsed(),
        };
        on_report(&report);
        summary.reports.push(report);
    }

    Ok(summary)
}
