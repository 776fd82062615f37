use {
    crate::{
        analysis::{
            Extreme, WindowExtremeEvaluator, WindowSample, aggregator::append, folder,
        },
        config::{DF, ZigzagConfig},
        domain::Bar,
        models::{BarWindow, Pivot, PivotDir, PivotHistory, ZigzagFlags, ZigzagState},
    },
    anyhow::{Context, Result},
    serde::{Deserialize, Serialize},
};

fn pivot_at(extreme: &Extreme, dir: PivotDir, sample: &WindowSample) -> Pivot {
    Pivot::new(extreme.point(), dir)
        .with_indicators(sample.channel_names(), sample.channel_values(dir.sign()))
}

/// Applies one evaluated window to the zigzag state.
///
/// In order: the last pivot is replaced when the current bar extends it (ties go to the newer
/// bar); an opposite pivot is appended when the current bar holds the opposite extreme, which may
/// follow a replace on the same bar only if it also breaks the pivot before; and if neither fired
/// and the last pivot has dropped out of the window, the opposite extreme is forced in.
///
/// `bars` must be the buffer `sample` was evaluated from. Flags are reset on every call.
pub fn calculate(
    state: &mut ZigzagState,
    sample: &WindowSample,
    bars: &BarWindow,
) -> Result<ZigzagFlags> {
    state.flags = ZigzagFlags::default();
    let mut flags = ZigzagFlags::default();

    // No history yet: behave as if the last pivot was a high.
    let p_dir = state
        .history
        .latest()
        .map(|p| p.dir.normal())
        .unwrap_or(PivotDir::HIGH);
    let same = sample.extreme(p_dir.sign());
    let opposite = sample.extreme(-p_dir.sign());

    let extends_last = state
        .history
        .latest()
        .is_some_and(|last| same.offset == 0 && p_dir.at_or_beyond(same.price, last.price()));
    if extends_last {
        state.history.pop_front();
        append(&mut state.history, pivot_at(same, p_dir, sample))?;
        flags.update_last_pivot = true;
        flags.new_pivot = true;
    }

    if opposite.offset == 0 {
        let breaks_prior = state
            .history
            .get(1)
            .is_some_and(|prior| p_dir.opposite().beyond(opposite.price, prior.price()));
        if !flags.new_pivot || breaks_prior {
            flags.double_pivot = flags.new_pivot;
            append(
                &mut state.history,
                pivot_at(opposite, p_dir.opposite(), sample),
            )?;
            flags.new_pivot = true;
        }
    }

    if !flags.new_pivot {
        if let Some(last) = state.history.latest() {
            // Counted in buffered bars, not host indices, to match the window.
            let distance = bars.bars_since(last.index(), state.offset);
            let stale = distance.is_none_or(|d| d >= state.length);
            if stale && opposite.index > last.index() {
                let shifted =
                    WindowExtremeEvaluator::evaluate(bars, state.length, state.offset + opposite.offset)
                        .with_context(|| {
                            format!("Overflow bar {} is no longer buffered", opposite.index)
                        })?;
                debug_assert_eq!(shifted.index, opposite.index);

                let pivot = pivot_at(opposite, p_dir.opposite(), &shifted);
                if DF.log_pivots {
                    log::debug!(
                        "Overflow after {:?} bars: forcing {} at bar {}",
                        distance,
                        pivot.dir,
                        opposite.index
                    );
                }
                append(&mut state.history, pivot)?;
                flags.new_pivot = true;
            }
        }
    }

    state.flags = flags;
    Ok(flags)
}

/// Base-level zigzag fed one bar at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZigzagEngine {
    state: ZigzagState,
    bars: BarWindow,
}

impl ZigzagEngine {
    pub fn new(config: ZigzagConfig) -> Result<Self> {
        Self::with_channels(config, Vec::new())
    }

    /// `channel_names` fixes the indicator table; every bar must carry one value per channel.
    pub fn with_channels(config: ZigzagConfig, channel_names: Vec<String>) -> Result<Self> {
        let state = ZigzagState::new(config)?;
        Ok(Self {
            state,
            bars: BarWindow::new(config.bar_capacity(), channel_names),
        })
    }

    /// Feeds the next bar. Bar indices must be strictly increasing.
    pub fn update(&mut self, bar: Bar) -> Result<ZigzagFlags> {
        self.bars.push(bar)?;

        let Some(sample) =
            WindowExtremeEvaluator::evaluate(&self.bars, self.state.length, self.state.offset)
        else {
            // Still inside the initial delay.
            self.state.flags = ZigzagFlags::default();
            return Ok(self.state.flags);
        };

        crate::trace_time!("Zigzag Calculate", 500, {
            calculate(&mut self.state, &sample, &self.bars)
        })
    }

    pub fn replay(&mut self, bars: impl IntoIterator<Item = Bar>) -> Result<()> {
        for bar in bars {
            let index = bar.index;
            self.update(bar)
                .with_context(|| format!("Zigzag update failed at bar {}", index))?;
        }
        Ok(())
    }

    pub fn state(&self) -> &ZigzagState {
        &self.state
    }

    pub fn pivots(&self) -> &PivotHistory {
        &self.state.history
    }

    pub fn flags(&self) -> ZigzagFlags {
        self.state.flags
    }

    pub fn channel_names(&self) -> &[String] {
        self.bars.channel_names()
    }

    pub fn last_bar_index(&self) -> Option<usize> {
        self.bars.newest().map(|b| b.index)
    }

    pub fn next_level(&self) -> Result<ZigzagState> {
        folder::fold_level(&self.state)
    }

    /// Every non-empty level above this one, lowest first, up to `max_levels`.
    pub fn levels(&self, max_levels: usize) -> Result<Vec<ZigzagState>> {
        folder::fold_levels(&self.state, max_levels)
    }
}
