// Zigzag pivot detection and multi-level folding
pub mod aggregator;
mod engine;
pub mod folder;
mod window;

pub use aggregator::{DirectionMismatch, append, append_component};
pub use engine::{ZigzagEngine, calculate};
pub use folder::{fold_level, fold_levels};
pub use window::{ChannelSample, Extreme, WindowExtremeEvaluator, WindowSample};
