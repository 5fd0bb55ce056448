pub mod engine;
pub mod session;

pub use engine::*;
pub use session::*;
