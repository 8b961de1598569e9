use serde::Deserialize;
use serde::Deserializer;
use serde::de::Error;

use std::fs::File;
use std::io::BufReader;
use std::ops::RangeInclusive;
use std::path::Path;

use crate::geometry::AnglePoint;
use crate::search::iterative::IterativeSettings;

pub mod error;
pub use error::ConfigError;

const DEFAULT_INITIAL_STEP: f64 = 0.3;
const DEFAULT_MAX_ROUNDS: u32 = 30;

/// Run parameters for an estimation: installation location, the day window
/// and clear-day threshold used to pick usable days, and the knobs of the
/// two searches. Optionally carries the known installation orientation so
/// reports can state the estimation error.
#[derive(Debug, Clone)]
pub struct EstimatorConfig {
    latitude: f64,
    longitude: f64,
    day_start: u32,
    day_end: u32,
    clear_day_threshold_percent: f64,
    lattice_points: usize,
    seed_tilt_deg: f64,
    seed_azimuth_deg: f64,
    initial_step: f64,
    max_rounds: u32,
    reference: Option<AnglePoint>,
}

// Deserializes a config while validating that the location, the day window
// and the search parameters are within acceptable ranges.
impl<'de> Deserialize<'de> for EstimatorConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct ConfigHelper {
            latitude: f64,
            longitude: f64,
            day_start: u32,
            day_end: u32,
            clear_day_threshold_percent: f64,
            lattice_points: usize,
            seed_tilt_deg: Option<f64>,
            seed_azimuth_deg: Option<f64>,
            initial_step: Option<f64>,
            max_rounds: Option<u32>,
            reference: Option<ReferenceHelper>,
        }

        #[derive(Deserialize)]
        struct ReferenceHelper {
            tilt_deg: f64,
            azimuth_deg: f64,
        }

        let helper = ConfigHelper::deserialize(deserializer)?;

        if !(-90.0..=90.0).contains(&helper.latitude) {
            return Err(D::Error::custom(ConfigError::LatitudeRange(helper.latitude)));
        }
        if !(-180.0..=180.0).contains(&helper.longitude) {
            return Err(D::Error::custom(ConfigError::LongitudeRange(
                helper.longitude,
            )));
        }

        for day in [helper.day_start, helper.day_end] {
            if day == 0 || day > 366 {
                return Err(D::Error::custom(ConfigError::DayOutOfRange(day)));
            }
        }
        if helper.day_start > helper.day_end {
            return Err(D::Error::custom(ConfigError::DayOrder));
        }

        if helper.clear_day_threshold_percent <= 0.0 {
            return Err(D::Error::custom(ConfigError::Threshold(
                helper.clear_day_threshold_percent,
            )));
        }
        if helper.lattice_points == 0 {
            return Err(D::Error::custom(ConfigError::LatticePoints));
        }

        let seed_tilt_deg = helper.seed_tilt_deg.unwrap_or(60.0);
        if !(0.0..=90.0).contains(&seed_tilt_deg) {
            return Err(D::Error::custom(ConfigError::SeedTilt(seed_tilt_deg)));
        }

        let seed_azimuth_deg = helper.seed_azimuth_deg.unwrap_or(270.0);
        if !(0.0..360.0).contains(&seed_azimuth_deg) {
            return Err(D::Error::custom(ConfigError::SeedAzimuth(seed_azimuth_deg)));
        }

        let initial_step = helper.initial_step.unwrap_or(DEFAULT_INITIAL_STEP);
        if initial_step <= 0.0 {
            return Err(D::Error::custom(ConfigError::StepDistance(initial_step)));
        }

        let reference = helper
            .reference
            .map(|r| AnglePoint::new(r.tilt_deg, r.azimuth_deg));

        Ok(EstimatorConfig {
            latitude: helper.latitude,
            longitude: helper.longitude,
            day_start: helper.day_start,
            day_end: helper.day_end,
            clear_day_threshold_percent: helper.clear_day_threshold_percent,
            lattice_points: helper.lattice_points,
            seed_tilt_deg,
            seed_azimuth_deg,
            initial_step,
            max_rounds: helper.max_rounds.unwrap_or(DEFAULT_MAX_ROUNDS),
            reference,
        })
    }
}

impl EstimatorConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<EstimatorConfig, ConfigError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let config: EstimatorConfig =
            serde_json::from_reader(reader).map_err(ConfigError::from)?;

        Ok(config)
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn day_range(&self) -> RangeInclusive<u32> {
        self.day_start..=self.day_end
    }

    pub fn clear_day_threshold_percent(&self) -> f64 {
        self.clear_day_threshold_percent
    }

    pub fn lattice_points(&self) -> usize {
        self.lattice_points
    }

    pub fn seed(&self) -> AnglePoint {
        AnglePoint::new(self.seed_tilt_deg, self.seed_azimuth_deg)
    }

    pub fn iterative_settings(&self) -> IterativeSettings {
        IterativeSettings {
            initial_step: self.initial_step,
            max_rounds: self.max_rounds,
        }
    }

    pub fn reference(&self) -> Option<AnglePoint> {
        self.reference
    }
}
