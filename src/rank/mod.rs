//! Hunter ranks E through S and the requirements for reaching each one.

pub mod data;
pub mod logic;
pub mod types;

pub use data::RANK_REQUIREMENTS;
pub use logic::{evaluate, try_advance};
pub use types::{MetricProgress, Rank, RankMetric, RankProgress, RankRequirement};
