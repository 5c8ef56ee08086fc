//! Core progression state and rules: the experience curve, leveling and the
//! player profile every other module reads and writes.

pub mod constants;
pub mod experience;
pub mod leveling;
pub mod profile;

pub use constants::*;
pub use experience::*;
pub use leveling::*;
pub use profile::*;
