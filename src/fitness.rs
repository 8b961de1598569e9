use std::collections::BTreeMap;

use crate::geometry::AnglePoint;
use crate::measurement::{DayMeasurement, MINUTES_PER_DAY, POWER_FLOOR};

/// One minute of simulated power output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulatedSample {
    pub minute: u32,
    pub power: f64,
}

impl SimulatedSample {
    pub fn new(minute: u32, power: f64) -> Self {
        Self { minute, power }
    }
}

/// External irradiance/power simulator collaborator.
///
/// Implementations turn a date, a location and a candidate panel orientation
/// into a one-day power curve at 1-minute nominal resolution for a
/// reference, unit-scale system. The evaluator removes the absolute scale
/// itself, so the implementation's rated power does not matter.
pub trait DaySimulator {
    fn simulate_day(
        &self,
        year: i32,
        day_of_year: u32,
        latitude: f64,
        longitude: f64,
        tilt_deg: f64,
        azimuth_deg: f64,
    ) -> Vec<SimulatedSample>;
}

/// Scores a candidate orientation against one day of measurements.
///
/// The simulated curve is rescaled so its energy matches the measured
/// energy, which cancels the unknown rated power and leaves only the curve
/// *shape* to be compared. Measured and simulated curves are then outer
/// joined by minute-of-day, a minute absent on either side counting as
/// zero power for that side; disagreeing on day length is thereby penalized.
/// The result is the summed absolute deviation divided by 1440 regardless
/// of how many minutes carried data, so scores are comparable across
/// seasons. Lower is better; `f64::INFINITY` means the pair could not be
/// evaluated (zero measured or simulated energy).
pub fn evaluate_day<S: DaySimulator>(
    simulator: &S,
    day: &DayMeasurement,
    latitude: f64,
    longitude: f64,
    angles: AnglePoint,
) -> f64 {
    let simulated = simulator.simulate_day(
        day.year(),
        day.day_of_year(),
        latitude,
        longitude,
        angles.tilt_deg,
        angles.azimuth_deg,
    );

    let simulated_sum: f64 = simulated.iter().map(|s| s.power).sum();
    let measured_sum = day.measured_sum();

    if simulated_sum <= 0.0 || measured_sum <= 0.0 {
        return f64::INFINITY;
    }

    let ratio = measured_sum / simulated_sum;

    // Outer join keyed by minute: (measured, simulated), absent side = 0
    let mut by_minute: BTreeMap<u32, (f64, f64)> = BTreeMap::new();

    for sample in day.samples() {
        by_minute.entry(sample.minute).or_default().0 = sample.power.unwrap_or(0.0);
    }

    for sample in &simulated {
        let rescaled = sample.power * ratio;
        // Near-midnight simulation noise would otherwise dominate the join
        if rescaled < POWER_FLOOR {
            continue;
        }
        by_minute.entry(sample.minute).or_default().1 = rescaled;
    }

    let total_deviation: f64 = by_minute
        .values()
        .map(|(measured, simulated)| (measured - simulated).abs())
        .sum();

    total_deviation / f64::from(MINUTES_PER_DAY)
}
