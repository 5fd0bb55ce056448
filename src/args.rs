pub mod types;
pub mod validation;

use clap::Parser;

pub use types::{Args, CleanArgs, Command};

/// Parse the command line and resolve it into [`CleanArgs`].
///
/// # Errors
///
/// Will return `Err` if the snapshot or the previous leaderboard file does not
/// deserialize into the engine's types.
pub fn args_checks() -> Result<CleanArgs, String> {
    CleanArgs::new(Args::parse())
}
