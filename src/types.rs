//! Core types for the Streetlight model
//!
//! This module defines the street construction parameters and the histogram
//! bin type shared by the sampling and scoring stages.

use crate::error::ModelError;
use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// Hours in one day; all time-of-day math happens on the [0, 24) interval.
pub const HOURS_PER_DAY: f64 = 24.0;

/// Static attributes of a street segment.
///
/// All fields are fixed for the lifetime of a [`crate::street::Street`] built
/// from them. Lane, sidewalk, and bike-lane counts are fractional because they
/// are totals across both directions (a street can have 1.5 sidewalks where
/// one side is only partially covered).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreetConfig {
    /// Posted speed limit in mph.
    pub speed_limit: f64,
    /// Number of lanes (including turning) in all directions.
    pub num_lanes: f64,
    /// Whether car traffic is one-way.
    pub one_way: bool,
    /// Number of sidewalks in all directions.
    pub num_sidewalks: f64,
    /// Whether sidewalks are separated from the roadway.
    pub sidewalks_separated: bool,
    /// Number of bike lanes in all directions.
    pub num_bike_lanes: f64,
    /// Whether bike lanes are protected.
    pub bike_lanes_protected: bool,
    /// Maximum pedestrian capacity per hour.
    pub max_pedestrian_capacity: f64,
    /// Maximum vehicle capacity per hour.
    pub max_vehicle_capacity: f64,
    /// Hours of the day around which traffic clusters (e.g. 8.0, 12.5, 18.0).
    pub busy_peak_hours: Vec<f64>,
}

impl StreetConfig {
    /// Validate the configuration.
    ///
    /// The scoring formulas divide by the attribute fields, so every numeric
    /// attribute must be strictly positive, and the sampler needs at least one
    /// peak hour inside [0, 24).
    pub fn validate(&self) -> Result<(), ModelError> {
        let positive = [
            ("speed_limit", self.speed_limit),
            ("num_lanes", self.num_lanes),
            ("num_sidewalks", self.num_sidewalks),
            ("num_bike_lanes", self.num_bike_lanes),
            ("max_pedestrian_capacity", self.max_pedestrian_capacity),
            ("max_vehicle_capacity", self.max_vehicle_capacity),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(ModelError::InvalidAttribute { name, value });
            }
        }

        if self.busy_peak_hours.is_empty() {
            return Err(ModelError::EmptyPeakHours);
        }
        for &peak in &self.busy_peak_hours {
            if !(0.0..HOURS_PER_DAY).contains(&peak) {
                return Err(ModelError::PeakHourOutOfRange(peak));
            }
        }

        Ok(())
    }
}

/// One fixed-width bin of the busy histogram.
///
/// A sample lands in the bin with `start < sample <= end`; the first bin also
/// accepts samples equal to its start so 0.0 is not lost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    /// Bin lower bound (exclusive, except for the first bin).
    pub start: f64,
    /// Bin upper bound (inclusive).
    pub end: f64,
    /// Number of samples that landed in this bin.
    pub count: u32,
}

impl HistogramBin {
    /// Whether `hour` falls in this bin.
    pub fn contains(&self, hour: f64) -> bool {
        (hour > self.start || (self.start == 0.0 && hour == 0.0)) && hour <= self.end
    }
}

/// Reduce a wall-clock time to a decimal hour-of-day in [0, 24).
pub fn decimal_hour(time: NaiveTime) -> f64 {
    f64::from(time.hour())
        + f64::from(time.minute()) / 60.0
        + f64::from(time.second()) / 3600.0
}
