mod report;

pub use report::{PivotRow, level_json, level_table, run_app};
