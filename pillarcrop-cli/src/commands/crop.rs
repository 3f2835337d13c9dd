// ============================================================================
// pillarcrop-cli/src/commands/crop.rs
// ============================================================================
//
// CROP COMMAND: Crop Every Input to 4:3
//
// Checks that ffmpeg and ffprobe are available, prepares the output
// directory, and hands the inputs to pillarcrop-core. Dry-run command lines
// are printed to stdout as each file is planned, so they can be piped into a
// shell.

use std::fs;
use std::time::Instant;

use log::info;
use pillarcrop_core::external::{FfprobeProber, LiveCaptureRunner, SidecarSpawner};
use pillarcrop_core::utils::format_duration;
use pillarcrop_core::{BatchSummary, FileOutcome, process_files_with};

use crate::cli::CropArgs;
use crate::commands::check_tools;
use crate::error::CliResult;
use crate::logging::get_timestamp;

/// Runs the `crop` command.
pub fn run_crop(args: CropArgs) -> CliResult<BatchSummary> {
    let config = args.core_config();
    config.validate()?;
    check_tools(true)?;

    if let Some(dir) = &config.output_dir {
        if !config.dry_run {
            fs::create_dir_all(dir)?;
        }
    }

    info!(
        "pillarcrop run started {} ({} file(s){})",
        get_timestamp(),
        args.inputs.len(),
        if config.dry_run { ", dry run" } else { "" }
    );
    let started = Instant::now();

    let summary = process_files_with(
        &FfprobeProber::new(),
        &SidecarSpawner,
        &LiveCaptureRunner,
        &config,
        &args.inputs,
        |report| {
            if let FileOutcome::Previewed { command_line } = &report.outcome {
                println!("{command_line}");
            }
        },
    )?;

    info!(
        "Done in {}: {} cropped, {} previewed, {} skipped",
        format_duration(started.elapsed().as_secs_f64()),
        summary.executed(),
        summary.previewed(),
        summary.skipped()
    );

    Ok(summary)
}
