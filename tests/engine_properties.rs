use zigzag_pivots::{
    Bar, ChannelValue, ZigzagConfig, ZigzagEngine, ZigzagState,
    data::{load_engine, save_engine},
    models::view::sequence_to_json,
};

fn wave_bar(i: usize) -> Bar {
    let t = i as f64;
    let mid = 50.0 + 8.0 * (t / 60.0).sin() + 3.0 * (t / 13.0).sin() + (t / 3.0).sin();
    Bar::new(i, i as i64 * 60_000, mid + 0.5, mid - 0.5)
        .with_indicators(vec![ChannelValue::new(mid * 2.0, mid * 0.5)])
}

fn wave_series(count: usize) -> Vec<Bar> {
    (0..count).map(wave_bar).collect()
}

fn replayed(config: ZigzagConfig, bars: Vec<Bar>) -> ZigzagEngine {
    let mut engine = ZigzagEngine::with_channels(config, vec!["demo".to_string()]).unwrap();
    engine.replay(bars).unwrap();
    engine
}

fn assert_well_formed(state: &ZigzagState) {
    assert!(state.history.len() <= state.number_of_pivots);
    let pivots: Vec<_> = state.history.iter().collect();
    for pair in pivots.windows(2) {
        assert_ne!(
            pair[0].dir.sign(),
            pair[1].dir.sign(),
            "adjacent pivots share polarity at level {}",
            state.level
        );
        assert!(pair[0].index() >= pair[1].index());
    }
    for pivot in &pivots {
        assert_eq!(pivot.level, state.level);
        assert_eq!(pivot.indicator_values.len(), pivot.indicator_ratios.len());
    }
}

#[test]
fn test_long_series_alternates_and_stays_bounded() {
    for (length, pivots, offset) in [(3, 10, 0), (5, 20, 0), (8, 15, 2), (13, 50, 1)] {
        let engine = replayed(ZigzagConfig::new(length, pivots, offset), wave_series(1_500));
        let state = engine.state();
        assert!(!state.history.is_empty());
        assert_well_formed(state);
        assert_eq!(engine.last_bar_index(), Some(1_499));
    }
}

#[test]
fn test_small_history_is_full_after_long_replay() {
    let engine = replayed(ZigzagConfig::new(5, 8, 0), wave_series(1_500));
    assert_eq!(engine.pivots().len(), 8);
}

#[test]
fn test_replay_is_deterministic() {
    let config = ZigzagConfig::new(6, 30, 0);
    let first = replayed(config, wave_series(800));
    let second = replayed(config, wave_series(800));
    assert_eq!(first, second);

    let json_a = sequence_to_json(first.pivots().iter(), None, None).unwrap();
    let json_b = sequence_to_json(second.pivots().iter(), None, None).unwrap();
    assert_eq!(json_a, json_b);
}

#[test]
fn test_snapshot_round_trip_then_resume() {
    let path = std::env::temp_dir()
        .join(format!("zigzag_it_{}", std::process::id()))
        .join("engine.bin");
    let config = ZigzagConfig::new(5, 20, 0);
    let bars = wave_series(600);

    let whole = replayed(config, bars.clone());

    let half = replayed(config, bars[..300].to_vec());
    save_engine(&path, &half).unwrap();
    let mut resumed = load_engine(&path).unwrap();
    assert_eq!(resumed, half);

    resumed.replay(bars[300..].to_vec()).unwrap();
    assert_eq!(resumed, whole);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_levels_fold_and_shrink() {
    let engine = replayed(ZigzagConfig::new(3, 60, 0), wave_series(2_000));
    let levels = engine.levels(4).unwrap();
    assert!(!levels.is_empty());

    let mut below = engine.state();
    for (n, level) in levels.iter().enumerate() {
        assert_eq!(level.level, n + 1);
        assert!(level.history.len() < below.history.len());
        assert_well_formed(level);
        for pivot in level.history.iter() {
            assert!(pivot.micro_components >= pivot.sub_components);
            assert_eq!(pivot.sub_pivots.len(), pivot.sub_components);
        }
        below = level;
    }

    // Folding never mutates the base level.
    let again = engine.levels(4).unwrap();
    assert_eq!(again, levels);
}

#[test]
fn test_outside_bar_records_two_pivots_on_one_bar() {
    let mut engine = ZigzagEngine::new(ZigzagConfig::new(5, 20, 0)).unwrap();
    engine.update(Bar::new(0, 0, 85.0, 80.0)).unwrap();
    engine.update(Bar::new(1, 60_000, 100.0, 90.0)).unwrap();
    let flags = engine.update(Bar::new(2, 120_000, 105.0, 70.0)).unwrap();

    assert!(flags.double_pivot);
    assert_eq!(flags.segments_to_remove(), 1);
    assert_eq!(flags.segments_to_add(), 2);

    let newest: Vec<(usize, f64)> = engine
        .pivots()
        .iter()
        .take(2)
        .map(|p| (p.index(), p.price()))
        .collect();
    assert_eq!(newest, vec![(2, 70.0), (2, 105.0)]);
}
