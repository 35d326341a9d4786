//! Street reports
//!
//! A [`StreetReport`] is the read-only snapshot the external map layer
//! consumes: every scoring query for one street at one time, with the
//! categorical tiers already applied. Reports serialize to JSON.

use crate::error::ModelError;
use crate::street::Street;
use crate::tier::{importance_tier, volume_tier, Tier};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// All scoring queries for one street at one point in time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreetReport {
    /// Street name as registered.
    pub street: String,
    /// Time of day the report was taken for.
    pub time: NaiveTime,
    /// Fraction of sampled busy time at `time`, in [0, 1].
    pub percent_busy: f64,
    /// Estimated pedestrians per hour.
    pub pedestrian_volume: u32,
    pub pedestrian_tier: Tier,
    /// Estimated vehicles per hour.
    pub vehicle_volume: u32,
    pub vehicle_tier: Tier,
    /// Transit-stop density relative to vehicle load, [0, 1].
    pub accessibility: f64,
    /// Accessibility as a 0–5 star rating.
    pub accessibility_stars: u8,
    /// Combined load relative to capacity, 0–10 scale.
    pub transit_importance: f64,
    pub transit_importance_tier: Tier,
    /// Current transit stops on the street.
    pub transit_stops: u32,
}

impl StreetReport {
    /// Take a snapshot of `street` at `time`.
    pub fn build(name: &str, street: &Street, time: NaiveTime) -> Self {
        let pedestrian_volume = street.pedestrian_volume(time);
        let vehicle_volume = street.vehicle_volume(time);
        let transit_importance = street.transit_importance(time);
        Self {
            street: name.to_string(),
            time,
            percent_busy: street.percent_busy(time),
            pedestrian_volume,
            pedestrian_tier: volume_tier(pedestrian_volume),
            vehicle_volume,
            vehicle_tier: volume_tier(vehicle_volume),
            accessibility: street.accessibility(time),
            accessibility_stars: street.accessibility_stars(time),
            transit_importance,
            transit_importance_tier: importance_tier(transit_importance),
            transit_stops: street.transit_stops(),
        }
    }

    /// Encode to pretty JSON.
    pub fn to_json(&self) -> Result<String, ModelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for StreetReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} at {}: {} transit importance ({:.2})",
            self.street,
            self.time.format("%H:%M"),
            self.transit_importance_tier,
            self.transit_importance
        )?;
        writeln!(
            f,
            "  People per hour: {} ({})",
            self.pedestrian_volume, self.pedestrian_tier
        )?;
        writeln!(
            f,
            "  Cars per hour:   {} ({})",
            self.vehicle_volume, self.vehicle_tier
        )?;
        write!(
            f,
            "  Accessibility:   {} ({:.2}, {} stops)",
            "*".repeat(usize::from(self.accessibility_stars)),
            self.accessibility,
            self.transit_stops
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::StreetRegistry;

    fn sample_report() -> StreetReport {
        let registry = StreetRegistry::mountain_view(42).unwrap();
        let street = registry.get("El Camino").unwrap();
        let time = NaiveTime::from_hms_opt(8, 0, 0).unwrap();
        StreetReport::build("El Camino", street, time)
    }

    #[test]
    fn report_tiers_match_scores() {
        let report = sample_report();
        assert_eq!(report.pedestrian_tier, volume_tier(report.pedestrian_volume));
        assert_eq!(report.vehicle_tier, volume_tier(report.vehicle_volume));
        assert_eq!(
            report.transit_importance_tier,
            importance_tier(report.transit_importance)
        );
    }

    #[test]
    fn report_matches_street_queries() {
        let registry = StreetRegistry::mountain_view(42).unwrap();
        let street = registry.get("El Camino").unwrap();
        let time = NaiveTime::from_hms_opt(8, 0, 0).unwrap();
        let report = StreetReport::build("El Camino", street, time);
        assert_eq!(report.pedestrian_volume, street.pedestrian_volume(time));
        assert_eq!(report.vehicle_volume, street.vehicle_volume(time));
        assert_eq!(report.accessibility_stars, street.accessibility_stars(time));
        assert_eq!(report.transit_stops, 0);
    }

    #[test]
    fn report_json_round_trip() {
        let report = sample_report();
        let json = report.to_json().unwrap();
        let back: StreetReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.street, report.street);
        assert_eq!(back.time, report.time);
        assert_eq!(back.pedestrian_volume, report.pedestrian_volume);
        assert_eq!(back.transit_importance_tier, report.transit_importance_tier);
    }

    #[test]
    fn display_names_the_street_and_tiers() {
        let report = sample_report();
        let text = report.to_string();
        assert!(text.contains("El Camino at 08:00"));
        assert!(text.contains("People per hour"));
        assert!(text.contains("Cars per hour"));
        assert!(text.contains("Accessibility"));
    }
}
