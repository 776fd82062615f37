mod maths_utils;
mod perf;
mod time_utils;

pub use maths_utils::{RATIO_PRECISION, round_to, safe_ratio};
pub use time_utils::{TimeUtils, epoch_ms_to_utc, now_timestamp_ms};
