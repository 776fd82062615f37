use serde::{Deserialize, Serialize};

/// One indicator channel evaluated at a bar: the value to use when the bar
/// forms a high pivot and the value to use when it forms a low pivot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelValue {
    pub high: f64,
    pub low: f64,
}

impl ChannelValue {
    pub fn new(high: f64, low: f64) -> Self {
        ChannelValue { high, low }
    }
}

// A single bar as supplied by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub index: usize,
    pub time: i64,

    pub high: f64,
    pub low: f64,

    /// Parallel to the engine's channel table.
    #[serde(default)]
    pub indicators: Vec<ChannelValue>,
}

impl Bar {
    pub fn new(index: usize, time: i64, high: f64, low: f64) -> Self {
        Bar {
            index,
            time,
            high,
            low,
            indicators: Vec::new(),
        }
    }

    /// Generic single-valued series: high and low are the same value.
    pub fn from_value(index: usize, time: i64, value: f64) -> Self {
        Self::new(index, time, value, value)
    }

    pub fn with_indicators(mut self, indicators: Vec<ChannelValue>) -> Self {
        self.indicators = indicators;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_value_collapses_range() {
        let bar = Bar::from_value(3, 1_000, 42.5);
        assert_eq!(bar.high, 42.5);
        assert_eq!(bar.low, 42.5);
        assert!(bar.indicators.is_empty());
    }

    #[test]
    fn test_deserialize_without_indicators() {
        let bar: Bar =
            serde_json::from_str(r#"{"index":1,"time":60000,"high":10.0,"low":9.0}"#).unwrap();
        assert_eq!(bar, Bar::new(1, 60_000, 10.0, 9.0));
    }
}
