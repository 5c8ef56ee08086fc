//! Daily boundary handling: settling the day's penalties and rewards and
//! resetting daily quests and goal tracks.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
