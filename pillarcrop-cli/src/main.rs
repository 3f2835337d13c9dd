// pillarcrop-cli/src/main.rs
//
// Entry point of the pillarcrop binary: parses arguments, sets up logging,
// dispatches to the command and turns the result into an exit code.
//
// Exit codes:
// - 0: success (including help/version output)
// - 1: invalid arguments, invalid configuration or missing ffmpeg/ffprobe
// - otherwise: the exit code of the ffmpeg run that failed

use clap::Parser;
use pillarcrop_cli::{Cli, Commands, error, logging, run_crop, run_info};
use std::process;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            process::exit(if e.use_stderr() { 1 } else { 0 });
        }
    };

    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Crop(args) => run_crop(args).map(|_| ()),
        Commands::Info(args) => run_info(args),
    };

    if let Err(e) = result {
        process::exit(error::report(&e));
    }
}
