//! Tier classification
//!
//! Continuous scores are bucketed into three ordered tiers for display. The
//! classifiers are pure functions; the thresholds are the single source of
//! truth for the map layer's coloring.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Volume at or above which a street rates [`Tier::High`].
pub const VOLUME_HIGH_THRESHOLD: u32 = 1000;

/// Volume at or above which a street rates at least [`Tier::Medium`].
pub const VOLUME_MEDIUM_THRESHOLD: u32 = 500;

/// Transit-importance score at or above which a street rates [`Tier::High`].
pub const IMPORTANCE_HIGH_THRESHOLD: f64 = 0.70;

/// Transit-importance score at or above which a street rates at least
/// [`Tier::Medium`]. The bound is non-strict: exactly 0.50 is Medium.
pub const IMPORTANCE_MEDIUM_THRESHOLD: f64 = 0.50;

/// Categorical importance level, ordered `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Low,
    Medium,
    High,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Low => "Low",
            Tier::Medium => "Medium",
            Tier::High => "High",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a pedestrian or vehicle volume (per hour).
pub fn volume_tier(volume: u32) -> Tier {
    if volume >= VOLUME_HIGH_THRESHOLD {
        Tier::High
    } else if volume >= VOLUME_MEDIUM_THRESHOLD {
        Tier::Medium
    } else {
        Tier::Low
    }
}

/// Classify a transit-importance score (0–10 scale, thresholds near the low
/// end because most streets sit well under capacity).
pub fn importance_tier(score: f64) -> Tier {
    if score >= IMPORTANCE_HIGH_THRESHOLD {
        Tier::High
    } else if score >= IMPORTANCE_MEDIUM_THRESHOLD {
        Tier::Medium
    } else {
        Tier::Low
    }
}
