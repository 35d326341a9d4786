//! Street model
//!
//! A [`Street`] owns its static attributes, the frozen busy histogram built at
//! construction, and a transit-stop counter. Every query is a pure function of
//! those plus the supplied wall-clock time; only the transit-stop counter
//! mutates after construction, and only through `&mut self`, so concurrent
//! readers need no coordination and writers are serialized by the borrow
//! checker.

use crate::error::ModelError;
use crate::histogram::BusyHistogram;
use crate::sampler::{RushSampler, DEFAULT_SPREAD_HOURS};
use crate::types::{decimal_hour, StreetConfig};
use chrono::NaiveTime;

/// Baseline volume multiplier shared by the pedestrian and vehicle formulas.
const VOLUME_SCALE: f64 = 3.0;

/// A modeled street segment.
#[derive(Debug, Clone)]
pub struct Street {
    config: StreetConfig,
    histogram: BusyHistogram,
    transit_stops: u32,
}

impl Street {
    /// Build a street from a validated configuration.
    ///
    /// Runs the Monte-Carlo histogram build exactly once; the `seed` makes it
    /// reproducible. Production callers should supply a fresh seed per street,
    /// tests a fixed one.
    pub fn from_config(config: StreetConfig, seed: u64) -> Result<Self, ModelError> {
        config.validate()?;
        let mut sampler = RushSampler::new(&config.busy_peak_hours, DEFAULT_SPREAD_HOURS, seed)?;
        let histogram = BusyHistogram::build(&mut sampler);
        Ok(Self {
            config,
            histogram,
            transit_stops: 0,
        })
    }

    /// Fraction of the day's sampled busy time falling at `time`, in [0, 1].
    pub fn percent_busy(&self, time: NaiveTime) -> f64 {
        self.histogram.fraction_at(decimal_hour(time))
    }

    /// Estimated pedestrians per hour at `time`.
    ///
    /// High speed limits and many lanes suppress foot traffic; one-way
    /// operation, sidewalks, and bike lanes encourage it.
    pub fn pedestrian_volume(&self, time: NaiveTime) -> u32 {
        let c = &self.config;
        let speed_penalty = 30.0 / c.speed_limit;
        let lanes_penalty = 3.0 / c.num_lanes;
        let one_way_bonus = if c.one_way { 1.05 } else { 0.95 };
        let sidewalks_bonus =
            c.num_sidewalks / 1.5 * if c.sidewalks_separated { 1.05 } else { 0.95 };
        let bike_lanes_bonus =
            c.num_bike_lanes / 1.5 * if c.bike_lanes_protected { 1.05 } else { 0.95 };

        let penalties = speed_penalty * lanes_penalty;
        let bonuses = one_way_bonus * sidewalks_bonus * bike_lanes_bonus;
        let volume =
            VOLUME_SCALE * c.max_pedestrian_capacity * self.percent_busy(time) * penalties * bonuses;
        volume.round() as u32
    }

    /// Estimated vehicles per hour at `time`.
    ///
    /// Mirrors the pedestrian formula with the roles inverted: speed and lane
    /// count boost vehicle throughput while pedestrian- and bike-friendly
    /// features suppress it.
    pub fn vehicle_volume(&self, time: NaiveTime) -> u32 {
        let c = &self.config;
        let speed_bonus = c.speed_limit / 30.0;
        let lanes_bonus = c.num_lanes / 3.0;
        let one_way_penalty = if c.one_way { 0.95 } else { 1.05 };
        let sidewalks_penalty =
            1.5 / c.num_sidewalks * if c.sidewalks_separated { 0.95 } else { 1.05 };
        let bike_lanes_penalty =
            1.5 / c.num_bike_lanes * if c.bike_lanes_protected { 0.95 } else { 1.05 };

        let penalties = one_way_penalty * sidewalks_penalty * bike_lanes_penalty;
        let bonuses = speed_bonus * lanes_bonus;
        let volume =
            VOLUME_SCALE * c.max_vehicle_capacity * self.percent_busy(time) * penalties * bonuses;
        volume.round() as u32
    }

    /// Transit-stop density relative to vehicle load, nominally in [0, 1].
    ///
    /// Returns 0.0 when the street carries no vehicles at `time`; the division
    /// is undefined there and the quietest reading is the honest one.
    pub fn accessibility(&self, time: NaiveTime) -> f64 {
        let vehicles = self.vehicle_volume(time);
        if vehicles == 0 {
            return 0.0;
        }
        0.1 + 100.0 * f64::from(self.transit_stops) / f64::from(vehicles)
    }

    /// Accessibility rendered as a 0–5 star rating.
    ///
    /// Ties round to even so the 0.1 floor of a stop-less street reads as
    /// zero stars rather than one.
    pub fn accessibility_stars(&self, time: NaiveTime) -> u8 {
        let clamped = self.accessibility(time).clamp(0.0, 1.0);
        (5.0 * clamped).round_ties_even() as u8
    }

    /// Combined vehicle and pedestrian load relative to capacity, 0–10 scale.
    pub fn transit_importance(&self, time: NaiveTime) -> f64 {
        let total = f64::from(self.vehicle_volume(time)) + f64::from(self.pedestrian_volume(time));
        let capacity = self.config.max_vehicle_capacity + self.config.max_pedestrian_capacity;
        10.0 * total / capacity
    }

    /// Record a transit stop placed along this street.
    pub fn add_transit_stop(&mut self) {
        self.transit_stops += 1;
    }

    /// Record a transit stop removed from this street. The count floors at 0.
    pub fn remove_transit_stop(&mut self) {
        self.transit_stops = self.transit_stops.saturating_sub(1);
    }

    /// Current number of transit stops.
    pub fn transit_stops(&self) -> u32 {
        self.transit_stops
    }

    /// The street's static attributes.
    pub fn config(&self) -> &StreetConfig {
        &self.config
    }

    /// The frozen busy histogram.
    pub fn histogram(&self) -> &BusyHistogram {
        &self.histogram
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn scenario_config() -> StreetConfig {
        StreetConfig {
            speed_limit: 35.0,
            num_lanes: 6.0,
            one_way: false,
            num_sidewalks: 1.75,
            sidewalks_separated: false,
            num_bike_lanes: 2.0,
            bike_lanes_protected: false,
            max_pedestrian_capacity: 1250.0,
            max_vehicle_capacity: 10000.0,
            busy_peak_hours: vec![
                6.0, 7.0, 8.0, 9.0, 11.0, 12.0, 13.0, 17.0, 18.0, 19.0, 20.0, 21.0, 22.0,
            ],
        }
    }

    fn scenario_street(seed: u64) -> Street {
        Street::from_config(scenario_config(), seed).unwrap()
    }

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn histogram_invariant_holds_after_construction() {
        let street = scenario_street(1);
        assert_eq!(
            street.histogram().total_count(),
            street.histogram().sample_count()
        );
    }

    #[test]
    fn percent_busy_in_unit_interval_all_day() {
        let street = scenario_street(2);
        for h in 0..24 {
            for m in [0, 15, 30, 45] {
                let p = street.percent_busy(at(h, m));
                assert!((0.0..=1.0).contains(&p));
            }
        }
    }

    #[test]
    fn percent_busy_idempotent() {
        let street = scenario_street(3);
        let t = at(8, 0);
        assert_eq!(street.percent_busy(t), street.percent_busy(t));
    }

    #[test]
    fn peak_hour_busier_than_quiet_hour() {
        // Statistical property, checked across several constructions.
        for seed in 0..5 {
            let street = scenario_street(seed);
            assert!(
                street.percent_busy(at(8, 0)) > street.percent_busy(at(3, 0)),
                "seed {seed}: 08:00 not busier than 03:00"
            );
        }
    }

    #[test]
    fn volumes_track_busyness() {
        let street = scenario_street(4);
        let rush = at(8, 0);
        let quiet = at(3, 0);
        assert!(street.pedestrian_volume(rush) > street.pedestrian_volume(quiet));
        assert!(street.vehicle_volume(rush) > street.vehicle_volume(quiet));
    }

    #[test]
    fn fresh_street_has_no_stops_and_zero_stars() {
        let street = scenario_street(5);
        assert_eq!(street.transit_stops(), 0);
        for h in 0..24 {
            assert_eq!(street.accessibility_stars(at(h, 0)), 0, "hour {h}");
        }
    }

    #[test]
    fn transit_stop_round_trip() {
        let mut street = scenario_street(6);
        street.add_transit_stop();
        assert_eq!(street.transit_stops(), 1);
        street.remove_transit_stop();
        assert_eq!(street.transit_stops(), 0);
        street.remove_transit_stop();
        assert_eq!(street.transit_stops(), 0);
    }

    #[test]
    fn accessibility_monotone_in_stops() {
        let mut street = scenario_street(7);
        let t = at(8, 0);
        assert!(street.vehicle_volume(t) > 0);
        let mut previous = street.accessibility(t);
        for _ in 0..5 {
            street.add_transit_stop();
            let current = street.accessibility(t);
            assert!(current >= previous);
            previous = current;
        }
        assert!(previous > 0.1);
    }

    #[test]
    fn five_stops_strictly_raise_accessibility() {
        let mut street = scenario_street(8);
        let t = at(12, 0);
        assert!(street.vehicle_volume(t) > 0);
        let zero_stops = street.accessibility(t);
        for _ in 0..5 {
            street.add_transit_stop();
        }
        assert!(street.accessibility(t) > zero_stops);
    }

    #[test]
    fn accessibility_guarded_when_no_vehicles() {
        // A tiny-capacity street at a dead hour rounds its vehicle volume to 0.
        let config = StreetConfig {
            max_vehicle_capacity: 1.0,
            max_pedestrian_capacity: 1.0,
            ..scenario_config()
        };
        let mut street = Street::from_config(config, 9).unwrap();
        street.add_transit_stop();
        let t = at(3, 0);
        assert_eq!(street.vehicle_volume(t), 0);
        assert_eq!(street.accessibility(t), 0.0);
        assert_eq!(street.accessibility_stars(t), 0);
    }

    #[test]
    fn stars_stay_in_range() {
        let mut street = scenario_street(10);
        for stops in 0..50 {
            for h in [0, 3, 8, 12, 18, 23] {
                let stars = street.accessibility_stars(at(h, 0));
                assert!(stars <= 5, "{stops} stops at {h}:00 gave {stars} stars");
            }
            street.add_transit_stop();
        }
    }

    #[test]
    fn transit_importance_bounded_by_scale() {
        let street = scenario_street(11);
        for h in 0..24 {
            let importance = street.transit_importance(at(h, 0));
            assert!(importance >= 0.0);
            assert!(importance.is_finite());
        }
    }

    #[test]
    fn same_seed_gives_identical_streets() {
        let a = scenario_street(42);
        let b = scenario_street(42);
        for h in 0..24 {
            let t = at(h, 0);
            assert_eq!(a.percent_busy(t), b.percent_busy(t));
            assert_eq!(a.pedestrian_volume(t), b.pedestrian_volume(t));
            assert_eq!(a.vehicle_volume(t), b.vehicle_volume(t));
        }
    }

    #[test]
    fn invalid_config_fails_construction() {
        let mut config = scenario_config();
        config.num_sidewalks = 0.0;
        assert!(Street::from_config(config, 0).is_err());
    }
}
