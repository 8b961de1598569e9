//! Estimates the installation angles (tilt, azimuth) of a solar PV array
//! from its measured power-output history.
//!
//! The pipeline: a clear-day detector picks usable days out of a noisy
//! multi-day series, a fitness function scores candidate orientations
//! against each day by comparing scale-matched simulated curves to the
//! measurements, and two search strategies — exhaustive sampling over a
//! Fibonacci hemisphere lattice and iterative compass refinement on a
//! unit-disk encoding — locate the best-fitting angle pair. The physical
//! irradiance/power simulator is an external collaborator consumed through
//! the [`DaySimulator`] trait.

pub mod clear_sky;
pub mod config;
pub mod fitness;
pub mod geometry;
pub mod measurement;
pub mod search;

#[cfg(test)]
pub(crate) mod testutil;

pub use clear_sky::{is_clear_day, select_clear_days, smoothness_score};
pub use config::{ConfigError, EstimatorConfig};
pub use fitness::{DaySimulator, SimulatedSample, evaluate_day};
pub use geometry::{
    AnglePoint, DiskPoint, angular_distance_deg, fibonacci_hemisphere,
};
pub use measurement::{
    DayMeasurement, MINUTES_PER_DAY, MeasurementError, POWER_FLOOR, PowerSample,
};
pub use search::iterative::IterativeSettings;
pub use search::{SearchResult, SearchSummary};
