//! Configuration module for the zigzag engine.

mod debug;
mod zigzag;

pub use debug::{DF, LogFlags};
pub use zigzag::{MAX_FOLD_LEVELS, ZIGZAG, ZigzagConfig};

/// Version stamped into engine snapshot files.
pub const SNAPSHOT_VERSION: f64 = 1.0;
