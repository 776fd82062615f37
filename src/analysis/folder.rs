//! Derives the next zigzag level by folding a finalized pivot history.

use {
    crate::{
        analysis::aggregator::append_component,
        config::DF,
        models::{Pivot, PivotHistory, ZigzagState},
    },
    anyhow::Result,
};

/// Builds the level above `source` without touching it.
///
/// Escalated pivots become higher-level pivots; between them only the most extreme normal pivot
/// of each polarity is kept as a candidate. If the result is not shorter than the source, nothing
/// was compressed and the returned history is empty.
pub fn fold_level(source: &ZigzagState) -> Result<ZigzagState> {
    let mut next = source.next_level_shell();
    let components = &source.history;

    let mut bullish: Option<Pivot> = None;
    let mut bearish: Option<Pivot> = None;

    for (i, source_pivot) in components.iter().enumerate().rev() {
        let pivot = source_pivot.promote(i);

        if pivot.dir.is_escalated() {
            let candidate = if pivot.dir.is_high() {
                bearish.take()
            } else {
                bullish.take()
            };
            emit_escalated(&mut next.history, pivot, candidate, components)?;
            bullish = None;
            bearish = None;
        } else {
            let slot = if pivot.dir.is_high() {
                &mut bullish
            } else {
                &mut bearish
            };
            // Later pivot wins ties.
            let replace = slot
                .as_ref()
                .is_none_or(|held| pivot.dir.at_or_beyond(pivot.price(), held.price()));
            if replace {
                *slot = Some(pivot);
            }
        }
    }

    if next.history.len() >= components.len() {
        if DF.log_folding {
            log::info!(
                "Level {} folds to {} of {} pivots: no compression, discarding",
                next.level,
                next.history.len(),
                components.len()
            );
        }
        next.history.clear();
    }

    Ok(next)
}

/// Appends an escalated pivot. The buffered opposite candidate goes in first only when the
/// output's last pivot shares the escalated pivot's polarity, so the output keeps alternating.
/// Otherwise the candidate is dropped.
fn emit_escalated(
    output: &mut PivotHistory,
    pivot: Pivot,
    candidate: Option<Pivot>,
    components: &PivotHistory,
) -> Result<()> {
    let bridges = output
        .latest()
        .is_some_and(|last| last.dir.sign() == pivot.dir.sign());

    if let Some(candidate) = candidate {
        if bridges {
            append_component(output, candidate, components)?;
        } else if DF.log_folding {
            log::debug!("Dropping candidate {} before {}", candidate, pivot);
        }
    }

    append_component(output, pivot, components)
}

/// Folds repeatedly, lowest level first, stopping at the first empty level or after `max_levels`.
pub fn fold_levels(base: &ZigzagState, max_levels: usize) -> Result<Vec<ZigzagState>> {
    let mut levels: Vec<ZigzagState> = Vec::new();

    for _ in 0..max_levels {
        let source = levels.last().unwrap_or(base);
        let next = fold_level(source)?;
        if next.history.is_empty() {
            break;
        }
        levels.push(next);
    }

    Ok(levels)
}
