use std::ops::RangeInclusive;

use crate::clear_sky;
use crate::fitness::{self, DaySimulator};
use crate::geometry::{AnglePoint, DiskPoint};
use crate::measurement::DayMeasurement;
use crate::search::{SearchResult, SearchSummary};

/// Parameters of the local search: a starting step distance on the unit
/// disk (0.3 corresponds to 27 degrees of tilt when taken radially) and a
/// fixed round count.
#[derive(Debug, Clone, Copy)]
pub struct IterativeSettings {
    pub initial_step: f64,
    pub max_rounds: u32,
}

impl Default for IterativeSettings {
    fn default() -> Self {
        Self {
            initial_step: 0.3,
            max_rounds: 30,
        }
    }
}

/// Derivative-free compass search from a seed orientation.
///
/// Each round encodes the current center on the unit disk, probes the 4
/// cross neighbors at the current step distance, and moves to the best of
/// them if it strictly improves on the center; otherwise the step is
/// halved. Stepping on the disk rather than in (tilt, azimuth) space keeps
/// probe displacements physically uniform near tilt 0, where a fixed-degree
/// azimuth step would shrink to nothing.
///
/// Runs exactly `max_rounds` rounds — there is deliberately no step-size
/// floor or early exit, so results stay comparable across runs. Converges
/// to a local optimum near the seed; global coverage is the exhaustive
/// search's job.
pub fn search_day<S: DaySimulator>(
    simulator: &S,
    day: &DayMeasurement,
    latitude: f64,
    longitude: f64,
    seed: AnglePoint,
    settings: IterativeSettings,
) -> SearchResult {
    let mut center = seed;
    let mut center_fit = fitness::evaluate_day(simulator, day, latitude, longitude, center);
    let mut step = settings.initial_step;

    for round in 0..settings.max_rounds {
        let disk = center.to_disk();

        let neighbors = [
            DiskPoint::new(disk.x + step, disk.y),
            DiskPoint::new(disk.x - step, disk.y),
            DiskPoint::new(disk.x, disk.y + step),
            DiskPoint::new(disk.x, disk.y - step),
        ]
        .map(DiskPoint::to_angle);

        let mut best_neighbor = neighbors[0];
        let mut best_fit = f64::INFINITY;
        for &candidate in &neighbors {
            let fitness = fitness::evaluate_day(simulator, day, latitude, longitude, candidate);
            if fitness < best_fit {
                best_neighbor = candidate;
                best_fit = fitness;
            }
        }

        if best_fit < center_fit {
            center = best_neighbor;
            center_fit = best_fit;
            log::trace!(
                "round {}: moved to ({:.2}, {:.2}) at fitness {:.4}",
                round,
                center.tilt_deg,
                center.azimuth_deg,
                center_fit
            );
        } else {
            step /= 2.0;
            log::trace!("round {}: no improvement, step halved to {:.5}", round, step);
        }
    }

    SearchResult {
        angles: center,
        fitness: center_fit,
        day_of_year: Some(day.day_of_year()),
    }
}

/// Batch variant matching the exhaustive one: selects the clear days of a
/// series, runs the local search per day from the same seed and aggregates
/// the results, enabling a direct exhaustive-vs-iterative comparison on
/// matched days. `None` when no day passes the threshold.
#[allow(clippy::too_many_arguments)]
pub fn search_clear_days<S: DaySimulator>(
    simulator: &S,
    days: &[DayMeasurement],
    latitude: f64,
    longitude: f64,
    day_range: RangeInclusive<u32>,
    clear_day_threshold_percent: f64,
    seed: AnglePoint,
    settings: IterativeSettings,
    reference: Option<AnglePoint>,
) -> Option<SearchSummary> {
    let clear_days = clear_sky::select_clear_days(days, day_range, clear_day_threshold_percent);

    let per_day: Vec<SearchResult> = clear_days
        .iter()
        .map(|day| {
            log::debug!(
                "iterative search over day {} of year {}",
                day.day_of_year(),
                day.year()
            );
            search_day(simulator, day, latitude, longitude, seed, settings)
        })
        .filter(|result| result.fitness.is_finite())
        .collect();

    SearchSummary::from_results(per_day, reference)
}
