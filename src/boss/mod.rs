//! Boss battles: timed challenges whose target and reward grow with every
//! prior defeat of the same boss.

pub mod data;
pub mod logic;
pub mod types;

pub use data::ALL_BOSSES;
pub use logic::*;
pub use types::*;
