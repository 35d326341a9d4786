//! Rush-hour density sampling
//!
//! A street's traffic clusters around its configured peak hours. The density
//! over the day is a normalized sum of Gaussian kernels, one per peak, all
//! sharing a spread parameter. There is no closed-form inverse CDF for the
//! mixture, so sampling discretizes the density onto a grid and does an
//! inverse-CDF lookup against the cumulative sum.

use crate::error::ModelError;
use crate::types::HOURS_PER_DAY;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Standard-deviation-like width of each rush-hour kernel, in hours.
pub const DEFAULT_SPREAD_HOURS: f64 = 2.0;

/// Number of grid intervals the density is discretized onto.
pub const DEFAULT_RESOLUTION: usize = 1000;

/// Draws hour-of-day samples from a mixture-of-Gaussians rush density.
///
/// The discrete CDF is computed once at construction; each [`sample`] call is
/// a single uniform draw plus a lookup. The RNG is seeded explicitly so
/// every stream of samples is reproducible.
///
/// [`sample`]: RushSampler::sample
#[derive(Debug, Clone)]
pub struct RushSampler {
    step: f64,
    cdf: Vec<f64>,
    rng: ChaCha8Rng,
}

impl RushSampler {
    /// Create a sampler with the default grid resolution.
    pub fn new(peak_hours: &[f64], spread: f64, seed: u64) -> Result<Self, ModelError> {
        Self::with_resolution(peak_hours, spread, DEFAULT_RESOLUTION, seed)
    }

    /// Create a sampler with an explicit grid resolution.
    ///
    /// The grid has `resolution + 1` evenly spaced points covering the day.
    pub fn with_resolution(
        peak_hours: &[f64],
        spread: f64,
        resolution: usize,
        seed: u64,
    ) -> Result<Self, ModelError> {
        if peak_hours.is_empty() {
            return Err(ModelError::EmptyPeakHours);
        }
        for &peak in peak_hours {
            if !(0.0..HOURS_PER_DAY).contains(&peak) {
                return Err(ModelError::PeakHourOutOfRange(peak));
            }
        }
        if !(spread > 0.0) {
            return Err(ModelError::InvalidAttribute {
                name: "spread",
                value: spread,
            });
        }

        let step = HOURS_PER_DAY / resolution as f64;
        let densities: Vec<f64> = (0..=resolution)
            .map(|i| {
                let x = i as f64 * step;
                peak_hours
                    .iter()
                    .map(|&peak| {
                        let distance = x - peak;
                        (-(distance * distance) / (2.0 * spread * spread)).exp()
                    })
                    .sum()
            })
            .collect();

        let total: f64 = densities.iter().sum();
        let mut cumulative = 0.0;
        let cdf = densities
            .iter()
            .map(|&d| {
                cumulative += d / total;
                cumulative
            })
            .collect();

        Ok(Self {
            step,
            cdf,
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }

    /// Draw one hour-of-day sample.
    ///
    /// Returns the grid point at the first CDF position covering a uniform
    /// draw. Floating-point rounding can leave the final cumulative value a
    /// hair below 1.0; a draw past it clamps to the last grid point.
    pub fn sample(&mut self) -> f64 {
        let u: f64 = self.rng.gen();
        let index = self
            .cdf
            .iter()
            .position(|&c| u <= c)
            .unwrap_or(self.cdf.len() - 1);
        index as f64 * self.step
    }
}
