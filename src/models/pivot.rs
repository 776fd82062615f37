use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub index: usize,
    pub time: i64,
    pub price: f64,
}

impl Point {
    pub fn new(index: usize, time: i64, price: f64) -> Self {
        Point { index, time, price }
    }
}

/// Signed pivot code: the sign is the polarity (positive = high, negative = low),
/// the magnitude is the kind (1 = normal alternating, 2 = escalated).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PivotDir(i8);

impl PivotDir {
    pub const HIGH: Self = Self(1);
    pub const LOW: Self = Self(-1);

    pub const fn from_polarity(polarity: i8) -> Self {
        if polarity >= 0 { Self::HIGH } else { Self::LOW }
    }

    #[inline]
    pub fn value(self) -> i8 {
        self.0
    }

    #[inline]
    pub fn sign(self) -> i8 {
        self.0.signum()
    }

    pub fn is_high(self) -> bool {
        self.0 > 0
    }

    pub fn is_escalated(self) -> bool {
        self.0.abs() == 2
    }

    pub fn escalated(self) -> Self {
        Self(self.sign() * 2)
    }

    pub fn normal(self) -> Self {
        Self(self.sign())
    }

    pub fn opposite(self) -> Self {
        Self::from_polarity(-self.sign())
    }

    /// `a` lies strictly beyond `b` in this direction (higher for highs, lower for lows).
    #[inline]
    pub fn beyond(self, a: f64, b: f64) -> bool {
        let p = self.sign() as f64;
        p * a > p * b
    }

    #[inline]
    pub fn at_or_beyond(self, a: f64, b: f64) -> bool {
        let p = self.sign() as f64;
        p * a >= p * b
    }
}

impl std::fmt::Display for PivotDir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:+}", self.0)
    }
}

/// A recorded swing extreme.
///
/// `sub_pivots` is an owned copy of the lower-level records this pivot subsumes;
/// it never refers back into a live lower-level history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pivot {
    pub point: Point,
    pub dir: PivotDir,
    pub level: usize,

    // Folding bookkeeping
    pub component_index: usize,
    pub sub_components: usize,
    pub micro_components: usize,

    // Derived against the previously retained pivots. None = undefined.
    pub ratio: Option<f64>,
    pub size_ratio: Option<f64>,
    pub bar_ratio: Option<f64>,

    pub sub_pivots: Vec<Pivot>,

    pub indicator_names: Vec<String>,
    pub indicator_values: Vec<f64>,
    pub indicator_ratios: Vec<Option<f64>>,
}

impl Pivot {
    /// A base-level pivot. It counts itself as one micro component.
    pub fn new(point: Point, dir: PivotDir) -> Self {
        Pivot {
            point,
            dir,
            level: 0,
            component_index: 0,
            sub_components: 0,
            micro_components: 1,
            ratio: None,
            size_ratio: None,
            bar_ratio: None,
            sub_pivots: Vec::new(),
            indicator_names: Vec::new(),
            indicator_values: Vec::new(),
            indicator_ratios: Vec::new(),
        }
    }

    pub fn with_indicators(mut self, names: Vec<String>, values: Vec<f64>) -> Self {
        self.indicator_ratios = vec![None; values.len()];
        self.indicator_names = names;
        self.indicator_values = values;
        self
    }

    #[inline]
    pub fn price(&self) -> f64 {
        self.point.price
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.point.index
    }

    /// Copy of this pivot for the next level up, with every derived field reset.
    pub(crate) fn promote(&self, component_index: usize) -> Pivot {
        Pivot {
            point: self.point,
            dir: self.dir,
            level: self.level + 1,
            component_index,
            sub_components: 0,
            micro_components: 0,
            ratio: None,
            size_ratio: None,
            bar_ratio: None,
            sub_pivots: Vec::new(),
            indicator_names: self.indicator_names.clone(),
            indicator_values: self.indicator_values.clone(),
            indicator_ratios: vec![None; self.indicator_values.len()],
        }
    }
}

impl std::fmt::Display for Pivot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = if self.dir.is_high() { "H" } else { "L" };
        write!(
            f,
            "{}{} {:.4} @ bar {} (level {})",
            kind,
            if self.dir.is_escalated() { "*" } else { "" },
            self.point.price,
            self.point.index,
            self.level
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dir_codes() {
        let high = PivotDir::HIGH;
        assert_eq!(high.escalated().value(), 2);
        assert_eq!(high.escalated().normal(), high);
        assert_eq!(high.opposite(), PivotDir::LOW);
        assert_eq!(PivotDir::LOW.escalated().value(), -2);
        assert_eq!(PivotDir::LOW.escalated().sign(), -1);
        assert!(PivotDir::LOW.escalated().is_escalated());
        assert_eq!(PivotDir::from_polarity(-1), PivotDir::LOW);
    }

    #[test]
    fn test_beyond_follows_polarity() {
        assert!(PivotDir::HIGH.beyond(101.0, 100.0));
        assert!(!PivotDir::HIGH.beyond(100.0, 100.0));
        assert!(PivotDir::HIGH.at_or_beyond(100.0, 100.0));
        assert!(PivotDir::LOW.beyond(99.0, 100.0));
        assert!(!PivotDir::LOW.beyond(101.0, 100.0));
    }

    #[test]
    fn test_promote_resets_derived_fields() {
        let mut pivot = Pivot::new(Point::new(7, 700, 12.0), PivotDir::HIGH.escalated())
            .with_indicators(vec!["rsi".to_string()], vec![65.0]);
        pivot.ratio = Some(0.5);
        pivot.indicator_ratios = vec![Some(1.2)];

        let promoted = pivot.promote(3);
        assert_eq!(promoted.level, 1);
        assert_eq!(promoted.component_index, 3);
        assert_eq!(promoted.dir, PivotDir::HIGH.escalated());
        assert_eq!(promoted.ratio, None);
        assert_eq!(promoted.indicator_values, vec![65.0]);
        assert_eq!(promoted.indicator_ratios, vec![None]);
        // The source is untouched.
        assert_eq!(pivot.ratio, Some(0.5));
    }

    #[test]
    fn test_display() {
        let pivot = Pivot::new(Point::new(4, 0, 10.5), PivotDir::LOW.escalated());
        assert_eq!(pivot.to_string(), "L* 10.5000 @ bar 4 (level 0)");
    }
}
