use crate::models::{Signal, TradePlan};

const STOP_BUFFER_RATIO: f64 = 0.1;
const TP1_RATIO: f64 = 0.5;
const TP2_RATIO: f64 = 0.8;

/// Entry, stop and two targets for a directional signal.
///
/// `None` for `WAIT` or when any price input is missing or non-finite. A zero
/// width zone is treated as a range of 1.
pub fn build_plan(
    signal: Signal,
    price_now: Option<f64>,
    support: Option<f64>,
    resistance: Option<f64>,
) -> Option<TradePlan> {
    if !signal.is_directional() {
        return None;
    }

    let entry = price_now.filter(|v| v.is_finite())?;
    let support = support.filter(|v| v.is_finite())?;
    let resistance = resistance.filter(|v| v.is_finite())?;

    let mut range = (resistance - support).abs();
    if range == 0.0 {
        range = 1.0;
    }

    let plan = match signal {
        Signal::Buy => TradePlan {
            entry,
            stop_loss: support - range * STOP_BUFFER_RATIO,
            take_profit_1: entry + range * TP1_RATIO,
            take_profit_2: entry + range * TP2_RATIO,
        },
        Signal::Sell => TradePlan {
            entry,
            stop_loss: resistance + range * STOP_BUFFER_RATIO,
            take_profit_1: entry - range * TP1_RATIO,
            take_profit_2: entry - range * TP2_RATIO,
        },
        Signal::Wait => return None,
    };

    Some(plan)
}
