// Bar series files and engine snapshots
pub mod bars_io;
pub mod snapshot;

pub use bars_io::{BarSeries, load_bars, save_bars};
pub use snapshot::{load_engine, save_engine};
