use chrono::{DateTime, Utc};

pub struct TimeUtils;

impl TimeUtils {
    pub const MS_IN_S: i64 = 1000;
    pub const MS_IN_MIN: i64 = Self::MS_IN_S * 60;
    pub const MS_IN_5_MIN: i64 = Self::MS_IN_MIN * 5;
    pub const MS_IN_H: i64 = Self::MS_IN_MIN * 60;
    pub const STANDARD_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";
}

/// Formats epoch milliseconds for display. Out-of-range values fall back to the raw number.
pub fn epoch_ms_to_utc(epoch_ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(epoch_ms)
        .map(|dt| dt.format(TimeUtils::STANDARD_TIME_FORMAT).to_string())
        .unwrap_or_else(|| format!("{}ms", epoch_ms))
}

pub fn now_timestamp_ms() -> i64 {
    Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_formatting() {
        assert_eq!(epoch_ms_to_utc(0), "1970-01-01 00:00");
        assert_eq!(epoch_ms_to_utc(TimeUtils::MS_IN_H * 25), "1970-01-02 01:00");
    }
}
