// pillarcrop-cli/src/lib.rs
//
// Library portion of the pillarcrop CLI application.
// Contains argument definitions and command logic.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;

// Re-export items needed by the binary or integration tests
pub use cli::{Cli, Commands, CropArgs, InfoArgs};
pub use commands::crop::run_crop;
pub use commands::info::run_info;
