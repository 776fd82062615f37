use {
    anyhow::Result,
    clap::Parser,
    std::path::PathBuf,
    zigzag_pivots::{Bar, BarSeries, ChannelValue, save_bars, utils::TimeUtils},
};

#[derive(Parser, Debug)]
#[command(about = "Write a synthetic bar series for trying the zigzag CLI")]
struct Args {
    #[arg(long, default_value = "demo_bars.json")]
    output: PathBuf,

    #[arg(long, default_value_t = 2_000)]
    count: usize,
}

// 2024-01-01 00:00 UTC
const START_MS: i64 = 1_704_067_200_000;

/// Layered waves so the base zigzag sees swings of several sizes and higher levels have
/// something to fold. Deterministic: the same count always gives the same file.
fn demo_bar(i: usize) -> Bar {
    let t = i as f64;
    let mid = 100.0
        + 12.0 * (t / 180.0).sin()
        + 4.0 * (t / 37.0).sin()
        + 1.5 * (t / 7.0).sin()
        + 0.02 * t;
    let spread = 0.4 + 0.3 * (t / 11.0).cos().abs();

    // Smoothed copy of the price as the demo channel.
    let close = mid - 1.5 * (t / 7.0).sin() * 0.5;

    Bar::new(i, START_MS + i as i64 * TimeUtils::MS_IN_5_MIN, mid + spread, mid - spread)
        .with_indicators(vec![ChannelValue::new(close + spread * 0.5, close - spread * 0.5)])
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let bars: Vec<Bar> = (0..args.count).map(demo_bar).collect();
    let series = BarSeries::new(vec!["close".to_string()], bars);

    save_bars(&args.output, &series)?;
    log::info!("Wrote {} demo bars to {}", args.count, args.output.display());
    Ok(())
}
