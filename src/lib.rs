pub mod args;
pub mod error;
pub mod logging;
pub mod match_play;
pub mod model;
pub mod score;
pub mod storage;

pub use error::{CoreError, ScoringError};
