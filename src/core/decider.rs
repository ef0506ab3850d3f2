use crate::core::levels::{normalize, LevelPair};
use crate::models::{Basis, Mode, Signal, Verdict};

/// Fraction of the zone width that counts as "near" a level.
pub const NEAR_THRESHOLD_RATIO: f64 = 0.15;

/// Turns the current price and two user levels into a verdict.
///
/// Pure: the same inputs always give the same verdict. A missing or
/// non-finite price, an invalid level pair, and a price outside the zone all
/// produce `WAIT` with their own [`Basis`].
pub fn decide(
    mode: Mode,
    price_now: Option<f64>,
    level_a: Option<f64>,
    level_b: Option<f64>,
) -> Verdict {
    let price = match price_now.filter(|p| p.is_finite()) {
        Some(p) => p,
        None => {
            return wait(
                Basis::PriceUnavailable,
                "Current price unavailable (API or input).".to_string(),
                None,
            )
        }
    };

    let levels = match normalize(level_a, level_b) {
        Some(l) => l,
        None => {
            return wait(
                Basis::InvalidLevels,
                "Two distinct price levels are required.".to_string(),
                None,
            )
        }
    };

    let support = levels.lower;
    let resistance = levels.upper;

    if !levels.contains(price) {
        return wait(
            Basis::OutOfZone,
            format!(
                "Price ({:.2}) is outside the level range ({:.2} - {:.2}). \
                 Wait for price to approach the support/resistance zone.",
                price, support, resistance
            ),
            Some(levels),
        );
    }

    let range = levels.range();
    let near_threshold = range * NEAR_THRESHOLD_RATIO;
    let dist_to_support = price - support;
    let dist_to_resistance = resistance - price;

    // BUY is checked before SELL; the first match wins.
    if dist_to_support <= near_threshold && price > support {
        return verdict(
            Signal::Buy,
            Basis::NearSupport,
            format!("Price near support ({:.2}), potential bounce up.", support),
            levels,
        );
    }
    if dist_to_resistance <= near_threshold && price < resistance {
        return verdict(
            Signal::Sell,
            Basis::NearResistance,
            format!(
                "Price near resistance ({:.2}), potential rejection down.",
                resistance
            ),
            levels,
        );
    }

    if mode == Mode::Aggressive {
        if dist_to_support < dist_to_resistance {
            return verdict(
                Signal::Buy,
                Basis::AggressiveBuy,
                format!(
                    "Aggressive mode: leaning BUY (closer to support {:.2}).",
                    support
                ),
                levels,
            );
        }
        if dist_to_resistance < dist_to_support {
            return verdict(
                Signal::Sell,
                Basis::AggressiveSell,
                format!(
                    "Aggressive mode: leaning SELL (closer to resistance {:.2}).",
                    resistance
                ),
                levels,
            );
        }
    }

    verdict(
        Signal::Wait,
        Basis::MidRange,
        format!(
            "Price is mid-range ({:.2} - {:.2}), safer to wait.",
            support, resistance
        ),
        levels,
    )
}

fn wait(basis: Basis, reason: String, levels: Option<LevelPair>) -> Verdict {
    Verdict {
        signal: Signal::Wait,
        basis,
        reason,
        levels,
    }
}

fn verdict(signal: Signal, basis: Basis, reason: String, levels: LevelPair) -> Verdict {
    Verdict {
        signal,
        basis,
        reason,
        levels: Some(levels),
    }
}
