//! Appends pivots to a bounded history, deriving ratios against the retained pivots.

use {
    crate::{
        config::DF,
        models::{Pivot, PivotDir, PivotHistory},
        utils::safe_ratio,
    },
    anyhow::Result,
    itertools::{Itertools, izip},
};

/// Two same-polarity pivots would sit adjacent in a history. Raised only on corrupted state.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionMismatch {
    pub last_dir: PivotDir,
    pub new_dir: PivotDir,
    pub index: usize,
}

impl std::fmt::Display for DirectionMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Direction mismatch: pivot at bar {} has dir {} but the last retained pivot has dir {}",
            self.index, self.new_dir, self.last_dir
        )
    }
}

impl std::error::Error for DirectionMismatch {}

/// Pushes `pivot` to the front of `history`, evicting the oldest entry past capacity.
///
/// With two or more retained pivots the new pivot is classified (escalated when it extends past
/// the previous same-polarity pivot) and gets its ratio, bar ratio and indicator ratios; a third
/// retained pivot adds the size ratio. Fails without touching `history` if the new pivot has the
/// same polarity as the most recent one.
pub fn append(history: &mut PivotHistory, mut pivot: Pivot) -> Result<()> {
    pivot.dir = pivot.dir.normal();

    if let Some(last) = history.latest() {
        if last.dir.sign() == pivot.dir.sign() {
            return Err(DirectionMismatch {
                last_dir: last.dir,
                new_dir: pivot.dir,
                index: pivot.index(),
            }
            .into());
        }
        if let Some(second) = history.get(1) {
            derive_ratios(&mut pivot, last, second, history.get(2));
        }
    }

    if DF.log_pivots {
        log::debug!(
            "Level {} append {} (ratio {:?}, bar ratio {:?})",
            pivot.level,
            pivot,
            pivot.ratio,
            pivot.bar_ratio
        );
    }

    history.push_front(pivot);
    Ok(())
}

/// Folding variant of `append`: also records how many `components` (the level below, most recent
/// first) the new pivot subsumes since the last retained pivot, and owns a copy of them.
pub fn append_component(
    history: &mut PivotHistory,
    mut pivot: Pivot,
    components: &PivotHistory,
) -> Result<()> {
    let start = pivot.component_index;
    let end = history
        .latest()
        .map(|last| last.component_index)
        .unwrap_or(start + 1)
        .max(start);

    pivot.sub_pivots = components.slice(start..end);
    pivot.sub_components = end - start;
    pivot.micro_components = pivot.sub_pivots.iter().map(|p| p.micro_components).sum();

    append(history, pivot)
}

fn derive_ratios(pivot: &mut Pivot, last: &Pivot, second: &Pivot, third: Option<&Pivot>) {
    if pivot.dir.beyond(pivot.price(), second.price()) {
        pivot.dir = pivot.dir.escalated();
    }

    let swing = last.price() - pivot.price();
    pivot.ratio = safe_ratio(swing, second.price() - last.price());
    pivot.bar_ratio = safe_ratio(
        last.index() as f64 - pivot.index() as f64,
        second.index() as f64 - last.index() as f64,
    );
    pivot.size_ratio = third.and_then(|third| safe_ratio(swing, third.price() - second.price()));

    let channels = pivot.indicator_values.len();
    pivot.indicator_ratios = izip!(
        &pivot.indicator_values,
        &last.indicator_values,
        &second.indicator_values
    )
    .map(|(value, last, second)| safe_ratio(last - value, second - last))
    .pad_using(channels, |_| None)
    .collect();
}
