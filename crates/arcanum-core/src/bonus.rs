//! Rank bonus curves
//!
//! Repeating an action earns a multiplicative output bonus once the
//! execution count crosses a curve threshold. The bonus from the highest
//! crossed threshold applies; thresholds do not stack.

use serde::{Deserialize, Serialize};

/// A single threshold on a custom rank curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankThreshold {
    /// Execution count at which the bonus takes effect
    pub executions: u64,
    /// Fractional output bonus (0.2 = +20%)
    pub bonus: f64,
}

/// How an action's output scales with its lifetime execution count
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum RankCurve {
    /// +10% at 10 executions, +20% at 100
    Standard,
    /// Shallower curve for actions that fire on a timer: +5% at 10, +15% at 50
    Timed,
    /// No rank bonus
    #[default]
    None,
    /// Explicit thresholds supplied by content
    Custom(Vec<RankThreshold>),
}

impl RankCurve {
    /// Fractional output bonus for an action executed `executions` times
    ///
    /// Returns 0.0 when no threshold has been crossed. For [`RankCurve::Custom`]
    /// the thresholds may appear in any order; the highest crossed one wins.
    pub fn bonus_for(&self, executions: u64) -> f64 {
        match self {
            RankCurve::Standard => stepped(executions, &[(100, 0.2), (10, 0.1)]),
            RankCurve::Timed => stepped(executions, &[(50, 0.15), (10, 0.05)]),
            RankCurve::None => 0.0,
            RankCurve::Custom(thresholds) => thresholds
                .iter()
                .filter(|t| executions >= t.executions)
                .max_by_key(|t| t.executions)
                .map(|t| t.bonus)
                .unwrap_or(0.0),
        }
    }
}

fn stepped(executions: u64, thresholds: &[(u64, f64)]) -> f64 {
    // Thresholds listed highest first
    for &(at, bonus) in thresholds {
        if executions >= at {
            return bonus;
        }
    }
    0.0
}
