pub mod match_play;
pub mod ryder_cup;
pub mod score;
pub mod types;

pub use match_play::*;
pub use ryder_cup::*;
pub use score::*;
pub use types::*;
