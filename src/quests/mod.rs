//! Quest lifecycle: user-defined goals with a numeric target.
//!
//! Normal quests disappear once completed. Daily quests stay and are reset by
//! the daily scheduler at the next calendar day.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
