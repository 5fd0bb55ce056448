use clap::{Parser, Subcommand};
use serde_json::Value;

use crate::score::LeaderboardOptions;
use crate::storage::Snapshot;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// JSON snapshot holding tours, matches and Ryder Cups.
    #[arg(
        short = 's',
        long,
        value_name = "SNAPSHOT_JSON",
        value_parser = crate::args::validation::check_readable_file_and_json
    )]
    pub snapshot: Value,
    /// Rank by net score instead of gross.
    #[arg(long, default_value_t = false)]
    pub handicapped: bool,
    /// Count rounds that are still in progress on tour-wide boards.
    #[arg(long, default_value_t = false)]
    pub include_in_progress: bool,
    /// An earlier leaderboard (as printed by this tool) used to fill in position changes.
    #[arg(
        short = 'p',
        long,
        value_name = "PREVIOUS_JSON",
        value_parser = crate::args::validation::check_readable_leaderboard_json
    )]
    pub previous: Option<Value>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Individual leaderboard for a round, or across a whole tour.
    Leaderboard {
        #[arg(long, conflicts_with = "round", required_unless_present = "round")]
        tour: Option<String>,
        #[arg(long)]
        round: Option<String>,
    },
    /// Team standings for a tour, optionally limited to one round.
    Teams {
        #[arg(long)]
        tour: String,
        #[arg(long)]
        round: Option<String>,
    },
    /// Status of a single match.
    Match {
        #[arg(long)]
        id: String,
    },
    /// Ryder Cup standing for a tour.
    Tournament {
        #[arg(long)]
        tour: String,
    },
    Stats {
        #[arg(long)]
        round: String,
        #[arg(long)]
        player: String,
    },
    Skins {
        #[arg(long)]
        round: String,
    },
    /// Record one hole score. Omit `--strokes` to clear the hole.
    Score {
        #[arg(long)]
        round: String,
        #[arg(long)]
        player: String,
        #[arg(long, allow_negative_numbers = true)]
        hole: i32,
        #[arg(long, allow_negative_numbers = true)]
        strokes: Option<i32>,
        #[arg(long, default_value = "cli")]
        principal: String,
        /// Write the updated snapshot here.
        #[arg(long, value_name = "OUTPUT_JSON")]
        save: Option<String>,
    },
}

#[derive(Debug, Clone)]
pub struct CleanArgs {
    pub snapshot: Snapshot,
    pub options: LeaderboardOptions,
    pub previous: Option<Value>,
    pub command: Command,
}

impl CleanArgs {
    /// # Errors
    ///
    /// Will return `Err` if the snapshot JSON does not match the engine's model
    /// or its tours and cups reference things that do not exist
    pub fn new(args: Args) -> Result<Self, String> {
        let snapshot: Snapshot = serde_json::from_value(args.snapshot)
            .map_err(|e| format!("The snapshot json could not be read: {e}"))?;
        snapshot.validate().map_err(|e| e.to_string())?;
        Ok(Self {
            snapshot,
            options: LeaderboardOptions {
                handicapped: args.handicapped,
                include_in_progress: args.include_in_progress,
            },
            previous: args.previous,
            command: args.command,
        })
    }
}
