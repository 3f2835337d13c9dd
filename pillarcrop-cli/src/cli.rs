// pillarcrop-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::{Args, Parser, Subcommand, value_parser};
use pillarcrop_core::config::{CoreConfig, CropMode, DEFAULT_PRESET, DEFAULT_SCAN_SECONDS, MAX_CRF};
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "pillarcrop: crop pillarboxed 16:9 video back to 4:3",
    long_about = "Detects 4:3 content inside 16:9 frames, crops the black bars away with \
                  ffmpeg and re-encodes only the video, copying every other stream, \
                  all metadata and all chapters."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crops each input to 4:3 and writes <name>.4x3.<ext>
    Crop(CropArgs),
    /// Shows the probe summary and the plan `crop` would run, without encoding
    Info(InfoArgs),
}

/// How the crop rectangle is chosen.
#[derive(Args, Debug, Clone)]
pub struct DetectionArgs {
    /// Detect the bars with ffmpeg's cropdetect instead of a centered 4:3 crop
    #[arg(long)]
    pub use_cropdetect: bool,

    /// Seconds from the start of the file sampled by cropdetect
    #[arg(
        long,
        value_name = "SECONDS",
        default_value_t = DEFAULT_SCAN_SECONDS,
        value_parser = value_parser!(u32).range(1..)
    )]
    pub scan_seconds: u32,
}

impl DetectionArgs {
    pub fn crop_mode(&self) -> CropMode {
        if self.use_cropdetect {
            CropMode::Detect {
                scan_seconds: self.scan_seconds,
            }
        } else {
            CropMode::Centered
        }
    }
}

/// Encoder settings shared by `crop` and `info`.
#[derive(Args, Debug, Clone)]
pub struct EncodeSettingsArgs {
    /// Constant quality instead of matching the source bitrate
    #[arg(long, value_name = "CRF", value_parser = value_parser!(u8).range(0..=i64::from(MAX_CRF)))]
    pub crf: Option<u8>,

    /// Encoder preset passed to ffmpeg
    #[arg(long, value_name = "NAME", default_value = DEFAULT_PRESET)]
    pub preset: String,
}

#[derive(Args, Debug)]
pub struct CropArgs {
    /// Video files to crop
    #[arg(required = true, value_name = "INPUT")]
    pub inputs: Vec<PathBuf>,

    /// Directory for the outputs (defaults to next to each input)
    #[arg(short = 'o', long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    #[command(flatten)]
    pub detection: DetectionArgs,

    #[command(flatten)]
    pub encode: EncodeSettingsArgs,

    /// Print the ffmpeg commands instead of running them
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Video files to inspect
    #[arg(required = true, value_name = "INPUT")]
    pub inputs: Vec<PathBuf>,

    /// Directory the outputs would be written to
    #[arg(short = 'o', long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    #[command(flatten)]
    pub detection: DetectionArgs,

    #[command(flatten)]
    pub encode: EncodeSettingsArgs,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

impl CropArgs {
    pub fn core_config(&self) -> CoreConfig {
        let mut config = CoreConfig::new(self.output_dir.clone());
        config.crop_mode = self.detection.crop_mode();
        config.crf = self.encode.crf;
        config.preset = self.encode.preset.clone();
        config.dry_run = self.dry_run;
        config
    }
}

impl InfoArgs {
    pub fn core_config(&self) -> CoreConfig {
        let mut config = CoreConfig::new(self.output_dir.clone());
        config.crop_mode = self.detection.crop_mode();
        config.crf = self.encode.crf;
        config.preset = self.encode.preset.clone();
        config.dry_run = true;
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_crop_defaults() {
        let cli = Cli::try_parse_from(["pillarcrop", "crop", "a.mp4", "b.mkv"]).unwrap();
        let Commands::Crop(args) = cli.command else {
            panic!("expected crop");
        };
        assert_eq!(args.inputs, vec![PathBuf::from("a.mp4"), PathBuf::from("b.mkv")]);
        let config = args.core_config();
        assert_eq!(config.crop_mode, CropMode::Centered);
        assert_eq!(config.crf, None);
        assert_eq!(config.preset, "medium");
        assert_eq!(config.output_dir, None);
        assert!(!config.dry_run);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_crop_with_all_options() {
        let cli = Cli::try_parse_from([
            "pillarcrop", "-v", "crop", "a.mp4", "-o", "out", "--use-cropdetect",
            "--scan-seconds", "30", "--crf", "20", "--preset", "slow", "--dry-run",
        ])
        .unwrap();
        assert!(cli.verbose);
        let Commands::Crop(args) = cli.command else {
            panic!("expected crop");
        };
        let config = args.core_config();
        assert_eq!(config.crop_mode, CropMode::Detect { scan_seconds: 30 });
        assert_eq!(config.crf, Some(20));
        assert_eq!(config.preset, "slow");
        assert_eq!(config.output_dir, Some(PathBuf::from("out")));
        assert!(config.dry_run);
    }

    #[test]
    fn test_scan_seconds_ignored_without_cropdetect() {
        let cli = Cli::try_parse_from(["pillarcrop", "crop", "a.mp4", "--scan-seconds", "30"]).unwrap();
        let Commands::Crop(args) = cli.command else {
            panic!("expected crop");
        };
        assert_eq!(args.core_config().crop_mode, CropMode::Centered);
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        assert!(Cli::try_parse_from(["pillarcrop", "crop", "a.mp4", "--crf", "64"]).is_err());
        assert!(Cli::try_parse_from(["pillarcrop", "crop", "a.mp4", "--scan-seconds", "0"]).is_err());
        assert!(Cli::try_parse_from(["pillarcrop", "crop"]).is_err());
    }

    #[test]
    fn test_info_is_always_a_dry_run() {
        let cli = Cli::try_parse_from(["pillarcrop", "info", "a.mp4", "--json", "--crf", "0"]).unwrap();
        let Commands::Info(args) = cli.command else {
            panic!("expected info");
        };
        assert!(args.json);
        let config = args.core_config();
        assert!(config.dry_run);
        assert_eq!(config.crf, Some(0));
    }
}
