//! Zigzag engine configuration

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

/// Upper bound on how many higher levels `fold_levels` will derive.
pub const MAX_FOLD_LEVELS: usize = 4;

/// Configuration for one zigzag instance (one level).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZigzagConfig {
    /// Lookback window in bars, including the evaluation bar.
    pub length: usize,
    /// History capacity. Oldest pivots are evicted silently beyond this.
    pub number_of_pivots: usize,
    /// Bars of delay applied before evaluation (0 = current bar).
    pub offset: usize,
}

impl ZigzagConfig {
    pub const fn new(length: usize, number_of_pivots: usize, offset: usize) -> Self {
        Self {
            length,
            number_of_pivots,
            offset,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.length == 0 {
            bail!("Zigzag length must be at least 1 bar");
        }
        if self.number_of_pivots == 0 {
            bail!("Zigzag history must hold at least 1 pivot");
        }
        Ok(())
    }

    /// Bars the engine must retain: the evaluation window, the delay, and
    /// a second window for re-evaluating as of an older bar on overflow.
    pub fn bar_capacity(&self) -> usize {
        2 * self.length + self.offset
    }
}

impl Default for ZigzagConfig {
    fn default() -> Self {
        ZIGZAG
    }
}

pub const ZIGZAG: ZigzagConfig = ZigzagConfig {
    length: 5,
    number_of_pivots: 20,
    offset: 0,
};
