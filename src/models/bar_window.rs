use {
    crate::domain::Bar,
    anyhow::{Result, bail},
    serde::{Deserialize, Serialize},
    std::collections::VecDeque,
};

/// Trailing buffer of host bars (oldest first) plus the indicator channel table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarWindow {
    bars: VecDeque<Bar>,
    capacity: usize,
    channel_names: Vec<String>,
}

impl BarWindow {
    pub fn new(capacity: usize, channel_names: Vec<String>) -> Self {
        Self {
            bars: VecDeque::with_capacity(capacity + 1),
            capacity: capacity.max(1),
            channel_names,
        }
    }

    /// Appends the next bar. Bars must arrive in strictly increasing index order
    /// and carry one value per configured channel.
    pub fn push(&mut self, bar: Bar) -> Result<()> {
        if let Some(newest) = self.bars.back() {
            if bar.index <= newest.index {
                bail!(
                    "Bar {} arrived out of order (last buffered bar is {})",
                    bar.index,
                    newest.index
                );
            }
        }
        if bar.indicators.len() != self.channel_names.len() {
            bail!(
                "Bar {} carries {} indicator values but {} channels are configured",
                bar.index,
                bar.indicators.len(),
                self.channel_names.len()
            );
        }

        self.bars.push_back(bar);
        if self.bars.len() > self.capacity {
            self.bars.pop_front();
        }
        Ok(())
    }

    pub fn newest(&self) -> Option<&Bar> {
        self.bars.back()
    }

    /// The bar `shift` bars back from the newest (0 = newest).
    pub fn bar_back(&self, shift: usize) -> Option<&Bar> {
        self.bars.iter().rev().nth(shift)
    }

    /// Newest-first walk starting `shift` bars back.
    pub fn iter_back(&self, shift: usize) -> impl Iterator<Item = &Bar> {
        self.bars.iter().rev().skip(shift)
    }

    /// Buffered bars from the one with `index` to the bar `shift` back, counted by position so
    /// gaps in host indices do not count. None once that bar has been evicted.
    pub fn bars_since(&self, index: usize, shift: usize) -> Option<usize> {
        self.iter_back(shift).position(|b| b.index == index)
    }

    pub fn channel_names(&self) -> &[String] {
        &self.channel_names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ChannelValue;

    #[test]
    fn test_keeps_only_capacity_bars() {
        let mut window = BarWindow::new(3, vec![]);
        for i in 0..5 {
            window.push(Bar::from_value(i, i as i64, i as f64)).unwrap();
        }
        assert_eq!(window.iter_back(0).count(), 3);
        assert_eq!(window.newest().map(|b| b.index), Some(4));
        assert_eq!(window.bar_back(2).map(|b| b.index), Some(2));
        assert!(window.bar_back(3).is_none());
        let walked: Vec<usize> = window.iter_back(1).map(|b| b.index).collect();
        assert_eq!(walked, vec![3, 2]);
    }

    #[test]
    fn test_rejects_out_of_order_bars() {
        let mut window = BarWindow::new(4, vec![]);
        window.push(Bar::from_value(5, 0, 1.0)).unwrap();
        assert!(window.push(Bar::from_value(5, 0, 1.0)).is_err());
        assert!(window.push(Bar::from_value(4, 0, 1.0)).is_err());
        assert_eq!(window.iter_back(0).count(), 1);
    }

    #[test]
    fn test_bars_since_counts_positions() {
        let mut window = BarWindow::new(3, vec![]);
        for index in [0, 10, 20, 30] {
            window.push(Bar::from_value(index, 0, 1.0)).unwrap();
        }
        assert_eq!(window.bars_since(30, 0), Some(0));
        assert_eq!(window.bars_since(10, 0), Some(2));
        assert_eq!(window.bars_since(10, 1), Some(1));
        assert_eq!(window.bars_since(0, 0), None);
    }

    #[test]
    fn test_rejects_channel_count_mismatch() {
        let mut window = BarWindow::new(4, vec!["rsi".to_string()]);
        assert!(window.push(Bar::from_value(0, 0, 1.0)).is_err());
        let bar = Bar::from_value(0, 0, 1.0).with_indicators(vec![ChannelValue::new(60.0, 40.0)]);
        assert!(window.push(bar).is_ok());
    }
}
