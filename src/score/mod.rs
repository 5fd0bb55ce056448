pub mod context;
pub mod entry;
pub mod handicap;
pub mod leaderboard;
pub mod skins;
pub mod sort_utils;
pub mod stats;
pub mod team_leaderboard;

pub use context::*;
pub use entry::*;
pub use handicap::*;
pub use leaderboard::*;
pub use skins::*;
pub use sort_utils::*;
pub use stats::*;
pub use team_leaderboard::*;
