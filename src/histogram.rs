//! Empirical busy histogram
//!
//! The histogram is the frozen Monte-Carlo approximation of a street's rush
//! density: a fixed number of draws from [`RushSampler`] binned into
//! quarter-hour intervals. It is built once at street construction and only
//! read afterwards, as a lookup table from hour-of-day to busy fraction.

use crate::sampler::RushSampler;
use crate::types::{HistogramBin, HOURS_PER_DAY};
use serde::{Deserialize, Serialize};

/// Number of samples drawn when building a histogram.
pub const DEFAULT_SAMPLE_COUNT: u32 = 1000;

/// Width of each histogram bin, in hours (0.25 h = 96 bins per day).
pub const DEFAULT_BIN_WIDTH_HOURS: f64 = 0.25;

/// Frozen empirical distribution of busy time over one day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusyHistogram {
    bins: Vec<HistogramBin>,
    sample_count: u32,
}

impl BusyHistogram {
    /// Build a histogram with the default sample count and bin width.
    pub fn build(sampler: &mut RushSampler) -> Self {
        Self::build_with(sampler, DEFAULT_SAMPLE_COUNT, DEFAULT_BIN_WIDTH_HOURS)
    }

    /// Build a histogram from `sample_count` draws binned at `bin_width`.
    ///
    /// Every draw lands in exactly one bin (the first bin also accepts 0.0),
    /// so the bin counts always total `sample_count`.
    pub fn build_with(sampler: &mut RushSampler, sample_count: u32, bin_width: f64) -> Self {
        let num_bins = (HOURS_PER_DAY / bin_width).round() as usize;
        let mut bins: Vec<HistogramBin> = (0..num_bins)
            .map(|i| HistogramBin {
                start: i as f64 * bin_width,
                end: (i + 1) as f64 * bin_width,
                count: 0,
            })
            .collect();

        for _ in 0..sample_count {
            let sample = sampler.sample();
            if let Some(bin) = bins.iter_mut().find(|bin| bin.contains(sample)) {
                bin.count += 1;
            } else {
                // The sampler's grid includes the 24.0 endpoint; fold it into
                // the last bin so no draw is dropped.
                if let Some(last) = bins.last_mut() {
                    last.count += 1;
                }
            }
        }

        Self { bins, sample_count }
    }

    /// Fraction of sampled busy time falling in the bin containing `hour`.
    ///
    /// Returns 0.0 when no bin contains the hour.
    pub fn fraction_at(&self, hour: f64) -> f64 {
        let count = self
            .bins
            .iter()
            .find(|bin| bin.contains(hour))
            .map_or(0, |bin| bin.count);
        f64::from(count) / f64::from(self.sample_count)
    }

    /// The histogram bins in ascending time order.
    pub fn bins(&self) -> &[HistogramBin] {
        &self.bins
    }

    /// Number of samples the histogram was built from.
    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    /// Sum of all bin counts. Equals [`sample_count`] by construction.
    ///
    /// [`sample_count`]: BusyHistogram::sample_count
    pub fn total_count(&self) -> u32 {
        self.bins.iter().map(|bin| bin.count).sum()
    }
}
