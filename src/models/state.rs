use {
    crate::{
        config::ZigzagConfig,
        models::PivotHistory,
    },
    anyhow::Result,
    serde::{Deserialize, Serialize},
};

/// Outcome of the most recent `calculate` call. Not an accumulating log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZigzagFlags {
    pub new_pivot: bool,
    pub double_pivot: bool,
    pub update_last_pivot: bool,
}

impl ZigzagFlags {
    /// Drawn segments a renderer must drop before drawing: the last one when it was replaced.
    pub fn segments_to_remove(&self) -> usize {
        usize::from(self.update_last_pivot)
    }

    /// Segments to draw: the re-finalized prior pivot plus the new one on a double pivot.
    pub fn segments_to_add(&self) -> usize {
        if self.double_pivot {
            2
        } else if self.new_pivot {
            1
        } else {
            0
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZigzagState {
    pub length: usize,
    pub number_of_pivots: usize,
    pub offset: usize,
    pub level: usize,
    pub history: PivotHistory,
    pub flags: ZigzagFlags,
}

impl ZigzagState {
    pub fn new(config: ZigzagConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            length: config.length,
            number_of_pivots: config.number_of_pivots,
            offset: config.offset,
            level: 0,
            history: PivotHistory::new(config.number_of_pivots),
            flags: ZigzagFlags::default(),
        })
    }

    pub fn config(&self) -> ZigzagConfig {
        ZigzagConfig::new(self.length, self.number_of_pivots, self.offset)
    }

    /// Empty state one level up: same window and capacity, no delay.
    pub(crate) fn next_level_shell(&self) -> Self {
        Self {
            length: self.length,
            number_of_pivots: self.number_of_pivots,
            offset: 0,
            level: self.level + 1,
            history: PivotHistory::new(self.number_of_pivots),
            flags: ZigzagFlags::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_contract() {
        let replaced = ZigzagFlags {
            new_pivot: true,
            double_pivot: false,
            update_last_pivot: true,
        };
        assert_eq!((replaced.segments_to_remove(), replaced.segments_to_add()), (1, 1));

        let double = ZigzagFlags {
            new_pivot: true,
            double_pivot: true,
            update_last_pivot: true,
        };
        assert_eq!((double.segments_to_remove(), double.segments_to_add()), (1, 2));

        let idle = ZigzagFlags::default();
        assert_eq!((idle.segments_to_remove(), idle.segments_to_add()), (0, 0));
    }

    #[test]
    fn test_next_level_shell() {
        let state = ZigzagState::new(ZigzagConfig::new(7, 12, 3)).unwrap();
        let next = state.next_level_shell();
        assert_eq!(next.level, 1);
        assert_eq!(next.offset, 0);
        assert_eq!((next.length, next.number_of_pivots), (7, 12));
        assert!(next.history.is_empty());
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(ZigzagState::new(ZigzagConfig::new(0, 10, 0)).is_err());
    }
}
