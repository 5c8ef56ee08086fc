//! Utility modules: JSON persistence helpers for ~/.hunter/.

pub mod persistence;

pub use persistence::*;
