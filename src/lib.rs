//! Streetlight - per-street traffic and transit estimation engine
//!
//! Streetlight estimates, for a named street segment, how many pedestrians
//! and vehicles use it at a given time of day, and derives an accessibility
//! score and a categorical transit-importance tier from those estimates:
//! rush-density sampling → busy histogram → scoring formulas → tier
//! classification.
//!
//! The histogram is built once per street by Monte-Carlo sampling from a
//! mixture-of-Gaussians rush density; every later query reads the frozen
//! histogram and the street's static attributes. Sampling is seeded, so a
//! street (and a whole registry) rebuilds bit-identically from the same seed.

pub mod error;
pub mod histogram;
pub mod registry;
pub mod report;
pub mod sampler;
pub mod street;
pub mod tier;
pub mod types;

pub use error::ModelError;
pub use histogram::BusyHistogram;
pub use registry::{RegistryConfig, StreetRegistry};
pub use report::StreetReport;
pub use sampler::RushSampler;
pub use street::Street;
pub use tier::{importance_tier, volume_tier, Tier};
pub use types::StreetConfig;

/// Streetlight version embedded in CLI output
pub const STREETLIGHT_VERSION: &str = env!("CARGO_PKG_VERSION");
