use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::core::levels::LevelPair;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Signal {
    Wait,
    Buy,
    Sell,
}

impl Signal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::Wait => "WAIT",
            Signal::Buy => "BUY",
            Signal::Sell => "SELL",
        }
    }

    pub fn is_directional(&self) -> bool {
        !matches!(self, Signal::Wait)
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Decision mode. Aggressive mode breaks a mid-range WAIT towards the closer level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Normal,
    Aggressive,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Normal => "normal",
            Mode::Aggressive => "aggressive",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown mode '{0}', expected 'normal' or 'aggressive'")]
pub struct ParseModeError(pub String);

impl FromStr for Mode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "normal" => Ok(Mode::Normal),
            "aggressive" => Ok(Mode::Aggressive),
            _ => Err(ParseModeError(s.to_string())),
        }
    }
}

/// Why the decider reached its verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Basis {
    PriceUnavailable,
    InvalidLevels,
    OutOfZone,
    NearSupport,
    NearResistance,
    MidRange,
    AggressiveBuy,
    AggressiveSell,
}

impl Basis {
    pub fn as_str(&self) -> &'static str {
        match self {
            Basis::PriceUnavailable => "price_unavailable",
            Basis::InvalidLevels => "invalid_levels",
            Basis::OutOfZone => "out_of_zone",
            Basis::NearSupport => "near_support",
            Basis::NearResistance => "near_resistance",
            Basis::MidRange => "mid_range",
            Basis::AggressiveBuy => "aggressive_buy",
            Basis::AggressiveSell => "aggressive_sell",
        }
    }

    /// Mode-driven rather than proximity-driven.
    pub fn is_aggressive(&self) -> bool {
        matches!(self, Basis::AggressiveBuy | Basis::AggressiveSell)
    }
}

impl fmt::Display for Basis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub signal: Signal,
    pub basis: Basis,
    pub reason: String,
    pub levels: Option<LevelPair>,
}

impl Verdict {
    pub fn support(&self) -> Option<f64> {
        self.levels.map(|l| l.lower)
    }

    pub fn resistance(&self) -> Option<f64> {
        self.levels.map(|l| l.upper)
    }

    pub fn valid_levels(&self) -> bool {
        self.levels.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradePlan {
    pub entry: f64,
    pub stop_loss: f64,
    pub take_profit_1: f64,
    pub take_profit_2: f64,
}

impl TradePlan {
    pub fn risk(&self) -> f64 {
        (self.entry - self.stop_loss).abs()
    }

    /// Reward-to-risk multiple for a target, `None` when the stop sits on the entry.
    pub fn reward_ratio(&self, take_profit: f64) -> Option<f64> {
        let risk = self.risk();
        if risk > 0.0 {
            Some((take_profit - self.entry).abs() / risk)
        } else {
            None
        }
    }
}
