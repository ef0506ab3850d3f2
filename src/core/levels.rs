use serde::{Deserialize, Serialize};

/// An ordered support/resistance pair. Only built through [`normalize`], so
/// `lower < upper` holds and both bounds are finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelPair {
    pub lower: f64,
    pub upper: f64,
}

impl LevelPair {
    pub fn range(&self) -> f64 {
        self.upper - self.lower
    }

    /// Closed interval check.
    pub fn contains(&self, price: f64) -> bool {
        price >= self.lower && price <= self.upper
    }
}

/// Orders two user levels into a support/resistance pair.
///
/// Returns `None` when either level is missing or non-finite, or when the
/// two levels are equal.
pub fn normalize(level_a: Option<f64>, level_b: Option<f64>) -> Option<LevelPair> {
    let a = level_a.filter(|v| v.is_finite())?;
    let b = level_b.filter(|v| v.is_finite())?;

    if a == b {
        return None;
    }

    Some(LevelPair {
        lower: a.min(b),
        upper: a.max(b),
    })
}
