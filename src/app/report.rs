use {
    crate::{
        Cli,
        analysis::ZigzagEngine,
        config::{MAX_FOLD_LEVELS, ZigzagConfig},
        data::{load_bars, load_engine, save_engine},
        models::{KeyOrder, Pivot, PivotField, ZigzagState, view::sequence_to_json},
        utils::epoch_ms_to_utc,
    },
    anyhow::{Result, bail},
    tabled::{Table, Tabled, settings::Style},
};

/// One table line per pivot, most recent first.
#[derive(Tabled)]
pub struct PivotRow {
    #[tabled(rename = "Bar")]
    pub index: usize,
    #[tabled(rename = "Time (UTC)")]
    pub time: String,
    #[tabled(rename = "Price")]
    pub price: String,
    #[tabled(rename = "Dir")]
    pub dir: String,
    #[tabled(rename = "Ratio")]
    pub ratio: String,
    #[tabled(rename = "Size")]
    pub size_ratio: String,
    #[tabled(rename = "Bar Ratio")]
    pub bar_ratio: String,
    #[tabled(rename = "Subs")]
    pub sub_components: usize,
    #[tabled(rename = "Micro")]
    pub micro_components: usize,
}

fn fmt_ratio(ratio: Option<f64>) -> String {
    ratio.map_or_else(|| "-".to_string(), |r| format!("{:.3}", r))
}

impl From<&Pivot> for PivotRow {
    fn from(pivot: &Pivot) -> Self {
        PivotRow {
            index: pivot.index(),
            time: epoch_ms_to_utc(pivot.point.time),
            price: format!("{:.4}", pivot.price()),
            dir: pivot.dir.to_string(),
            ratio: fmt_ratio(pivot.ratio),
            size_ratio: fmt_ratio(pivot.size_ratio),
            bar_ratio: fmt_ratio(pivot.bar_ratio),
            sub_components: pivot.sub_components,
            micro_components: pivot.micro_components,
        }
    }
}

pub fn level_table(state: &ZigzagState) -> String {
    let rows: Vec<PivotRow> = state.history.iter().map(PivotRow::from).collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!(
        "Level {} ({} pivots, length {}, offset {})\n{}",
        state.level,
        state.history.len(),
        state.length,
        state.offset,
        table
    )
}

pub fn level_json(
    state: &ZigzagState,
    keys: Option<&[PivotField]>,
    order: Option<KeyOrder>,
) -> Result<String> {
    Ok(format!(
        "{{\"level\":{},\"pivots\":{}}}",
        state.level,
        sequence_to_json(&state.history, keys, order)?
    ))
}

fn open_engine(args: &Cli, channels: &[String]) -> Result<ZigzagEngine> {
    let config = ZigzagConfig::new(args.length, args.pivots, args.offset);

    let Some(path) = args.resume.as_deref().filter(|p| p.exists()) else {
        return ZigzagEngine::with_channels(config, channels.to_vec());
    };

    let engine = load_engine(path)?;
    if engine.channel_names() != channels {
        bail!(
            "Snapshot channels {:?} do not match input channels {:?}",
            engine.channel_names(),
            channels
        );
    }
    if engine.state().config() != config {
        log::warn!(
            "Resuming with the snapshot's settings {:?}; command line settings ignored",
            engine.state().config()
        );
    }
    Ok(engine)
}

/// Replays the input series, optionally from a snapshot, then prints every requested level.
pub fn run_app(args: Cli) -> Result<()> {
    let series = load_bars(&args.input)?;
    let mut engine = open_engine(&args, &series.channels)?;

    let pending: Vec<_> = series
        .bars_after(engine.last_bar_index())
        .cloned()
        .collect();
    log::info!(
        "Replaying {} bars (resuming after {:?})",
        pending.len(),
        engine.last_bar_index()
    );
    engine.replay(pending)?;

    if let Some(path) = &args.save_state {
        save_engine(path, &engine)?;
    }

    let max_levels = args.levels.min(MAX_FOLD_LEVELS);
    if args.levels > MAX_FOLD_LEVELS {
        log::warn!("Folding capped at {} levels", MAX_FOLD_LEVELS);
    }
    let mut levels = vec![engine.state().clone()];
    levels.extend(engine.levels(max_levels)?);

    let keys = (!args.keys.is_empty()).then_some(args.keys.as_slice());
    for level in &levels {
        if args.json {
            println!("{}", level_json(level, keys, args.order)?);
        } else {
            println!("{}\n", level_table(level));
        }
    }

    Ok(())
}
