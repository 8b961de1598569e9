pub mod exhaustive;
pub mod iterative;

use crate::geometry::{self, AnglePoint};

/// Best orientation found by a search, with the score it achieved and,
/// for batch runs, the day it was computed for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    pub angles: AnglePoint,
    pub fitness: f64,
    pub day_of_year: Option<u32>,
}

impl SearchResult {
    fn unevaluated() -> Self {
        Self {
            angles: AnglePoint::new(0.0, 0.0),
            fitness: f64::INFINITY,
            day_of_year: None,
        }
    }
}

/// Aggregate over the per-day bests of a multi-day search: ranges and means
/// of the estimated angles and fitness, plus the angular distance from the
/// mean estimate to a known reference orientation when one is available.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSummary {
    pub per_day: Vec<SearchResult>,
    pub mean_tilt_deg: f64,
    pub mean_azimuth_deg: f64,
    pub mean_fitness: f64,
    pub tilt_range_deg: (f64, f64),
    pub azimuth_range_deg: (f64, f64),
    pub fitness_range: (f64, f64),
    pub reference_delta_deg: Option<f64>,
}

impl SearchSummary {
    /// Builds the aggregate, `None` when no day produced a result — callers
    /// scanning noisy years routinely hit that and must handle it.
    pub fn from_results(
        per_day: Vec<SearchResult>,
        reference: Option<AnglePoint>,
    ) -> Option<Self> {
        if per_day.is_empty() {
            return None;
        }

        let count = per_day.len() as f64;

        let mut tilt_range = (f64::INFINITY, f64::NEG_INFINITY);
        let mut azimuth_range = (f64::INFINITY, f64::NEG_INFINITY);
        let mut fitness_range = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut tilt_sum, mut azimuth_sum, mut fitness_sum) = (0.0, 0.0, 0.0);

        for result in &per_day {
            let tilt = result.angles.tilt_deg;
            let azimuth = result.angles.azimuth_deg;

            tilt_range = (tilt_range.0.min(tilt), tilt_range.1.max(tilt));
            azimuth_range = (azimuth_range.0.min(azimuth), azimuth_range.1.max(azimuth));
            fitness_range = (
                fitness_range.0.min(result.fitness),
                fitness_range.1.max(result.fitness),
            );

            tilt_sum += tilt;
            azimuth_sum += azimuth;
            fitness_sum += result.fitness;
        }

        let mean_tilt_deg = tilt_sum / count;
        let mean_azimuth_deg = azimuth_sum / count;

        let reference_delta_deg = reference.map(|known| {
            geometry::angular_distance_deg(
                AnglePoint::new(mean_tilt_deg, mean_azimuth_deg),
                known,
            )
        });

        Some(Self {
            per_day,
            mean_tilt_deg,
            mean_azimuth_deg,
            mean_fitness: fitness_sum / count,
            tilt_range_deg: tilt_range,
            azimuth_range_deg: azimuth_range,
            fitness_range,
            reference_delta_deg,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn result(tilt: f64, azimuth: f64, fitness: f64, day: u32) -> SearchResult {
        SearchResult {
            angles: AnglePoint::new(tilt, azimuth),
            fitness,
            day_of_year: Some(day),
        }
    }

    #[test]
    fn test_summary_of_empty_results_is_none() {
        assert_eq!(SearchSummary::from_results(Vec::new(), None), None);
    }

    #[test]
    fn test_summary_aggregates_ranges_and_means() {
        let summary = SearchSummary::from_results(
            vec![
                result(10.0, 200.0, 4.0, 130),
                result(20.0, 220.0, 8.0, 145),
                result(15.0, 210.0, 6.0, 160),
            ],
            None,
        )
        .unwrap();

        assert_relative_eq!(summary.mean_tilt_deg, 15.0);
        assert_relative_eq!(summary.mean_azimuth_deg, 210.0);
        assert_relative_eq!(summary.mean_fitness, 6.0);
        assert_eq!(summary.tilt_range_deg, (10.0, 20.0));
        assert_eq!(summary.azimuth_range_deg, (200.0, 220.0));
        assert_eq!(summary.fitness_range, (4.0, 8.0));
        assert_eq!(summary.reference_delta_deg, None);
    }

    #[test]
    fn test_summary_reports_reference_delta() {
        let summary = SearchSummary::from_results(
            vec![result(15.0, 217.0, 1.0, 172)],
            Some(AnglePoint::new(15.0, 217.0)),
        )
        .unwrap();

        let delta = summary.reference_delta_deg.unwrap();
        assert_relative_eq!(delta, 0.0, epsilon = 1e-9);
    }
}
