use {
    crate::domain::Bar,
    anyhow::{Context, Result, bail},
    std::{
        fs::{self, File},
        io::{BufReader, BufWriter},
        path::Path,
    },
};

/// Bar series file: channel names plus bars, oldest first.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BarSeries {
    #[serde(default)]
    pub channels: Vec<String>,
    pub bars: Vec<Bar>,
}

impl BarSeries {
    pub fn new(channels: Vec<String>, bars: Vec<Bar>) -> Self {
        Self { channels, bars }
    }

    /// Bars after `last_index`, or all of them when nothing has been consumed yet.
    pub fn bars_after(&self, last_index: Option<usize>) -> impl Iterator<Item = &Bar> {
        self.bars
            .iter()
            .filter(move |bar| last_index.is_none_or(|last| bar.index > last))
    }
}

// Create a new file and any missing parent directories.
pub(crate) fn create_file_with_parents(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    File::create(path).with_context(|| format!("Failed to create file: {}", path.display()))
}

pub fn load_bars(path: &Path) -> Result<BarSeries> {
    let file =
        File::open(path).with_context(|| format!("Failed to open bars: {}", path.display()))?;
    let series: BarSeries = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse bars from: {}", path.display()))?;

    let channels = series.channels.len();
    if let Some(bad) = series.bars.iter().find(|b| b.indicators.len() != channels) {
        bail!(
            "Bar {} carries {} indicator values but {} channels are declared",
            bad.index,
            bad.indicators.len(),
            channels
        );
    }

    log::info!(
        "Loaded {} bars ({} channels) from {}",
        series.bars.len(),
        channels,
        path.display()
    );
    Ok(series)
}

pub fn save_bars(path: &Path, series: &BarSeries) -> Result<()> {
    let writer = BufWriter::new(create_file_with_parents(path)?);
    serde_json::to_writer_pretty(writer, series)
        .with_context(|| format!("Failed to write bars to: {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ChannelValue;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir()
            .join(format!("zigzag_bars_io_{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("series.json");
        let bars = vec![
            Bar::new(0, 1_000, 11.0, 9.0).with_indicators(vec![ChannelValue::new(10.5, 9.5)]),
            Bar::new(1, 2_000, 12.0, 10.0).with_indicators(vec![ChannelValue::new(11.5, 10.5)]),
        ];
        let series = BarSeries::new(vec!["close".to_string()], bars);
        save_bars(&path, &series).unwrap();

        let loaded = load_bars(&path).unwrap();
        assert_eq!(loaded, series);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_rejects_channel_count_mismatch() {
        let path = temp_path("bad.json");
        let series = BarSeries::new(vec!["close".to_string()], vec![Bar::new(0, 0, 2.0, 1.0)]);
        save_bars(&path, &series).unwrap();

        let err = load_bars(&path).unwrap_err();
        assert!(err.to_string().contains("channels"));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(load_bars(&temp_path("does_not_exist.json")).is_err());
    }

    #[test]
    fn test_bars_after() {
        let bars = (0..5).map(|i| Bar::new(i, i as i64, 2.0, 1.0)).collect();
        let series = BarSeries::new(Vec::new(), bars);
        assert_eq!(series.bars_after(None).count(), 5);
        let rest: Vec<usize> = series.bars_after(Some(2)).map(|b| b.index).collect();
        assert_eq!(rest, vec![3, 4]);
    }
}
