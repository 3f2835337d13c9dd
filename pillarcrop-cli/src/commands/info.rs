//! The `info` command: what `crop` would do, without encoding.
//!
//! Each input is probed and planned exactly as `crop` would plan it. The
//! optional cropdetect scan still runs; the final ffmpeg command does not.

use console::style;
use log::warn;
use pillarcrop_core::external::{FfprobeProber, SidecarSpawner};
use pillarcrop_core::media::StreamKind;
use pillarcrop_core::plan_file;
use pillarcrop_core::processing::plan::FFMPEG_PROGRAM;
use pillarcrop_core::{CropDecision, CropMode, PlannedFile, QualityMode, VideoTreatment, render_command_line};

use crate::cli::InfoArgs;
use crate::commands::check_tools;
use crate::error::CliResult;

/// Runs the `info` command. Inputs that cannot be planned are reported and
/// skipped; the command still succeeds.
pub fn run_info(args: InfoArgs) -> CliResult<()> {
    let config = args.core_config();
    config.validate()?;
    check_tools(matches!(config.crop_mode, CropMode::Detect { .. }))?;

    let prober = FfprobeProber::new();
    let mut planned = Vec::new();
    for input in &args.inputs {
        match plan_file(&prober, &SidecarSpawner, &config, input) {
            Ok(file) => planned.push(file),
            Err(e) if e.is_skippable() => warn!("Skipping {}: {}", input.display(), e),
            Err(e) => return Err(e),
        }
    }

    if args.json {
        let entries: Vec<serde_json::Value> = planned.iter().map(json_entry).collect::<Result<_, _>>()?;
        let text = serde_json::to_string_pretty(&entries).map_err(std::io::Error::from)?;
        println!("{text}");
    } else {
        for file in &planned {
            print_planned(file);
        }
    }
    Ok(())
}

fn command_line(file: &PlannedFile) -> String {
    render_command_line(FFMPEG_PROGRAM, &file.plan.ffmpeg_args())
}

fn json_entry(file: &PlannedFile) -> CliResult<serde_json::Value> {
    let mut value = serde_json::to_value(file).map_err(std::io::Error::from)?;
    if let Some(object) = value.as_object_mut() {
        object.insert("command_line".to_string(), serde_json::Value::String(command_line(file)));
    }
    Ok(value)
}

fn print_planned(file: &PlannedFile) {
    let video = &file.video;
    println!("{}", style(file.input.display()).bold());
    println!(
        "  {:<10} {} video, {} audio, {} subtitle",
        style("Streams").cyan(),
        file.media.count(StreamKind::Video),
        file.media.count(StreamKind::Audio),
        file.media.count(StreamKind::Subtitle)
    );
    println!(
        "  {:<10} {}x{} {} {} ({:.3}:1)",
        style("Video").cyan(),
        video.width,
        video.height,
        video.codec_name,
        video.pix_fmt,
        video.aspect_ratio()
    );
    let decision = match file.decision {
        CropDecision::Crop(crop) => format!("crop to {crop}"),
        CropDecision::NoCropNeeded => "already 4:3, stream copy".to_string(),
    };
    println!("  {:<10} {}", style("Decision").cyan(), decision);
    if let VideoTreatment::Reencode { encoder, quality, preset, .. } = &file.plan.video {
        println!(
            "  {:<10} {} (preset {}, {})",
            style("Encoder").cyan(),
            encoder,
            preset,
            describe_quality(quality)
        );
    }
    if file.ten_bit_advisory {
        println!("  {}", style("10-bit source; the encoder may produce 8-bit output").yellow());
    }
    println!("  {:<10} {}", style("Output").cyan(), file.plan.destination.display());
    println!("  {:<10} {}", style("Command").cyan(), command_line(file));
    println!();
}

fn describe_quality(quality: &QualityMode) -> String {
    match *quality {
        QualityMode::Bitrate { target, max_rate, buffer_size } => format!(
            "{:.0} kb/s, max {:.0} kb/s, buffer {:.0} kb",
            target as f64 / 1000.0,
            max_rate as f64 / 1000.0,
            buffer_size as f64 / 1000.0
        ),
        QualityMode::Crf { value, zero_bitrate: true } => format!("CRF {value}, -b:v 0"),
        QualityMode::Crf { value, .. } => format!("CRF {value}"),
    }
}
