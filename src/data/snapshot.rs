use {
    crate::{
        analysis::ZigzagEngine,
        config::{DF, SNAPSHOT_VERSION},
        data::bars_io::create_file_with_parents,
        utils::now_timestamp_ms,
    },
    anyhow::{Context, Result, bail},
    serde::{Deserialize, Serialize},
    std::{
        fs::File,
        io::{BufReader, BufWriter},
        path::Path,
    },
};

/// Binary engine snapshot with metadata
#[derive(Serialize, Deserialize, Debug)]
struct SnapshotFile {
    pub version: f64,
    pub created_ms: i64,
    pub engine: ZigzagEngine,
}

/// Writes the full engine (pivot history plus the bar buffer) so a later run can resume it.
pub fn save_engine(path: &Path, engine: &ZigzagEngine) -> Result<()> {
    let start_time = std::time::Instant::now();
    let writer = BufWriter::new(create_file_with_parents(path)?);

    let snapshot = SnapshotFile {
        version: SNAPSHOT_VERSION,
        created_ms: now_timestamp_ms(),
        engine: engine.clone(),
    };

    bincode::serialize_into(writer, &snapshot)
        .with_context(|| format!("Failed to serialize snapshot to: {}", path.display()))?;

    if DF.log_snapshots {
        log::info!(
            "Saved snapshot v{} ({} pivots) to {} in {:?}",
            SNAPSHOT_VERSION,
            engine.pivots().len(),
            path.display(),
            start_time.elapsed()
        );
    }
    Ok(())
}

pub fn load_engine(path: &Path) -> Result<ZigzagEngine> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open snapshot: {}", path.display()))?;
    let snapshot: SnapshotFile = bincode::deserialize_from(BufReader::new(file))
        .with_context(|| format!("Failed to deserialize snapshot from: {}", path.display()))?;

    if snapshot.version != SNAPSHOT_VERSION {
        bail!(
            "Snapshot version mismatch: file v{} vs required v{}",
            snapshot.version,
            SNAPSHOT_VERSION
        );
    }

    if DF.log_snapshots {
        log::info!(
            "Loaded snapshot v{} created at {} ({} pivots, last bar {:?})",
            snapshot.version,
            snapshot.created_ms,
            snapshot.engine.pivots().len(),
            snapshot.engine.last_bar_index()
        );
    }
    Ok(snapshot.engine)
}
