use {
    crate::models::{BarWindow, Point},
    argminmax::ArgMinMax,
};

/// One side of the trailing window: the extreme value and where it sits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extreme {
    pub price: f64,
    /// Bars back from the evaluation bar (0 = the evaluation bar itself).
    pub offset: usize,
    pub index: usize,
    pub time: i64,
}

impl Extreme {
    pub fn point(&self) -> Point {
        Point::new(self.index, self.time, self.price)
    }
}

/// An indicator channel read at the evaluation bar.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelSample {
    pub name: String,
    pub high: f64,
    pub low: f64,
}

/// Transient per-call view of the trailing window.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSample {
    pub index: usize,
    pub time: i64,
    pub high: Extreme,
    pub low: Extreme,
    pub channels: Vec<ChannelSample>,
}

impl WindowSample {
    pub fn extreme(&self, polarity: i8) -> &Extreme {
        if polarity > 0 { &self.high } else { &self.low }
    }

    pub fn channel_names(&self) -> Vec<String> {
        self.channels.iter().map(|c| c.name.clone()).collect()
    }

    /// Channel values for a pivot of the given polarity: high transforms for highs, low transforms for lows.
    pub fn channel_values(&self, polarity: i8) -> Vec<f64> {
        self.channels
            .iter()
            .map(|c| if polarity > 0 { c.high } else { c.low })
            .collect()
    }
}

pub struct WindowExtremeEvaluator;

impl WindowExtremeEvaluator {
    /// Evaluates the `length`-bar window ending `shift` bars back from the newest buffered bar.
    /// The window is truncated when fewer bars are buffered. Equal extremes resolve to the most
    /// recent bar. Returns None when the evaluation bar itself is not buffered.
    pub fn evaluate(bars: &BarWindow, length: usize, shift: usize) -> Option<WindowSample> {
        let eval_bar = bars.bar_back(shift)?;
        let window: Vec<_> = bars.iter_back(shift).take(length.max(1)).collect();

        // Newest first, so the first occurrence of an extreme is the most recent one.
        let highs: Vec<f64> = window.iter().map(|b| b.high).collect();
        let lows: Vec<f64> = window.iter().map(|b| b.low).collect();
        let high_offset = highs.as_slice().argmax();
        let low_offset = lows.as_slice().argmin();

        let extreme_at = |offset: usize, price: f64| Extreme {
            price,
            offset,
            index: window[offset].index,
            time: window[offset].time,
        };

        let channels = bars
            .channel_names()
            .iter()
            .zip(&eval_bar.indicators)
            .map(|(name, value)| ChannelSample {
                name: name.clone(),
                high: value.high,
                low: value.low,
            })
            .collect();

        Some(WindowSample {
            index: eval_bar.index,
            time: eval_bar.time,
            high: extreme_at(high_offset, highs[high_offset]),
            low: extreme_at(low_offset, lows[low_offset]),
            channels,
        })
    }
}
