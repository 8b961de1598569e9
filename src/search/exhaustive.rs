use std::ops::RangeInclusive;

use crate::clear_sky;
use crate::fitness::{self, DaySimulator};
use crate::geometry::{AnglePoint, fibonacci_hemisphere};
use crate::measurement::DayMeasurement;
use crate::search::{SearchResult, SearchSummary};

/// Brute-force search: evaluates one day of measurements at every point of
/// a fresh Fibonacci hemisphere lattice of roughly `lattice_points` points.
///
/// Linear in lattice size; intended as the ground-truth baseline the
/// iterative search is validated against.
pub fn search_day<S: DaySimulator>(
    simulator: &S,
    day: &DayMeasurement,
    latitude: f64,
    longitude: f64,
    lattice_points: usize,
) -> SearchResult {
    let lattice = fibonacci_hemisphere(lattice_points);
    search_day_with_lattice(simulator, day, latitude, longitude, &lattice)
}

/// Same search over a caller-built lattice, so batch runs can generate the
/// lattice once and share it across days. Ties on exactly equal fitness
/// keep the first point in lattice order, which makes results reproducible.
pub fn search_day_with_lattice<S: DaySimulator>(
    simulator: &S,
    day: &DayMeasurement,
    latitude: f64,
    longitude: f64,
    lattice: &[AnglePoint],
) -> SearchResult {
    let mut best = SearchResult::unevaluated();
    best.day_of_year = Some(day.day_of_year());

    for (i, &candidate) in lattice.iter().enumerate() {
        if (i + 1) % 50 == 0 {
            log::debug!("evaluated {}/{} lattice points", i + 1, lattice.len());
        }

        let fitness = fitness::evaluate_day(simulator, day, latitude, longitude, candidate);

        if fitness < best.fitness {
            best.angles = candidate;
            best.fitness = fitness;
        }
    }

    best
}

/// Batch variant: selects the clear days of a multi-day series, runs the
/// lattice search on each and aggregates the per-day bests.
///
/// Returns `None` when no day in the window passes the clear-sky threshold.
/// `reference` is a known installation orientation to report the estimation
/// error against, when one is available.
#[allow(clippy::too_many_arguments)]
pub fn search_clear_days<S: DaySimulator>(
    simulator: &S,
    days: &[DayMeasurement],
    latitude: f64,
    longitude: f64,
    day_range: RangeInclusive<u32>,
    clear_day_threshold_percent: f64,
    lattice_points: usize,
    reference: Option<AnglePoint>,
) -> Option<SearchSummary> {
    let clear_days = clear_sky::select_clear_days(days, day_range, clear_day_threshold_percent);

    let lattice = fibonacci_hemisphere(lattice_points);

    let per_day: Vec<SearchResult> = clear_days
        .iter()
        .map(|day| {
            log::debug!(
                "exhaustive search over day {} of year {}",
                day.day_of_year(),
                day.year()
            );
            search_day_with_lattice(simulator, day, latitude, longitude, &lattice)
        })
        .filter(|result| result.fitness.is_finite())
        .collect();

    SearchSummary::from_results(per_day, reference)
}
