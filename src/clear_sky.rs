use rustfft::FftPlanner;
use rustfft::num_complex::Complex;

use std::ops::RangeInclusive;

use crate::measurement::{DayMeasurement, POWER_FLOOR};

/// Harmonics kept by the low-pass filter. Tunable, not derived: seven
/// harmonics over a daylight window track the clear-sky envelope while
/// cloud transients land in the discarded bins.
const LOW_PASS_HARMONICS: usize = 7;

/// Days with less than one hour of usable samples are never clear.
const MIN_VALID_SAMPLES: usize = 60;

/// Roughness of one day of measurements: the mean absolute residual between
/// the observed daylight curve and its 7-harmonic low-pass reconstruction,
/// normalized by the reconstruction's peak. Low values mean the curve tracks
/// a smooth envelope (clear sky); high values mean cloud jaggedness.
///
/// Returns `f64::INFINITY` when the day cannot be scored: fewer than 60
/// usable samples, or a reconstruction that never rises above zero.
pub fn smoothness_score(day: &DayMeasurement) -> f64 {
    let powers: Vec<f64> = day
        .samples()
        .iter()
        .filter_map(|s| s.power)
        .filter(|&p| p >= POWER_FLOOR)
        .collect();

    if powers.len() < MIN_VALID_SAMPLES {
        return f64::INFINITY;
    }

    let filtered = fourier_low_pass(&powers, LOW_PASS_HARMONICS);

    let peak = filtered.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if peak <= 0.0 {
        return f64::INFINITY;
    }

    let residual: f64 = powers
        .iter()
        .zip(&filtered)
        .map(|(observed, smooth)| (observed - smooth).abs())
        .sum();

    residual / powers.len() as f64 / peak
}

/// Whether the day's smoothness score, expressed in percent, stays within
/// the caller-supplied threshold. Values around 0.4–1.5 percent have proved
/// useful for residential installations.
pub fn is_clear_day(day: &DayMeasurement, threshold_percent: f64) -> bool {
    smoothness_score(day) * 100.0 <= threshold_percent
}

/// Selects the clear days of a multi-day series within a day-of-year window.
///
/// Accepted days are returned as daylight-filtered copies (missing samples
/// and powers below the floor removed), ready to be fed to the searches.
pub fn select_clear_days(
    days: &[DayMeasurement],
    day_range: RangeInclusive<u32>,
    threshold_percent: f64,
) -> Vec<DayMeasurement> {
    let mut clear_days = Vec::new();

    for day in days {
        if !day_range.contains(&day.day_of_year()) {
            continue;
        }

        if is_clear_day(day, threshold_percent) {
            clear_days.push(day.retain_daylight(POWER_FLOOR));
        }
    }

    log::debug!(
        "selected {} clear days out of {} in day range {:?}",
        clear_days.len(),
        days.len(),
        day_range
    );

    clear_days
}

/// FFT low-pass filter: keeps the DC bin plus the `keep` lowest harmonics
/// and their mirror at the high end of the spectrum, zeroes everything in
/// between and transforms back to the time domain.
fn fourier_low_pass(values: &[f64], keep: usize) -> Vec<f64> {
    let n = values.len();

    let mut planner = FftPlanner::new();
    let mut spectrum: Vec<Complex<f64>> =
        values.iter().map(|&v| Complex::new(v, 0.0)).collect();

    planner.plan_fft_forward(n).process(&mut spectrum);

    if n > 2 * keep + 1 {
        for bin in &mut spectrum[keep + 1..n - keep] {
            *bin = Complex::new(0.0, 0.0);
        }
    }

    planner.plan_fft_inverse(n).process(&mut spectrum);

    // rustfft leaves the inverse transform unnormalized
    spectrum.into_iter().map(|c| c.re / n as f64).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measurement::PowerSample;
    use std::f64::consts::PI;

    /// Daylight-shaped day from a closure over the sample index.
    fn day_from_curve<F: Fn(usize) -> f64>(day_of_year: u32, len: usize, f: F) -> DayMeasurement {
        let samples = (0..len)
            .map(|i| PowerSample::new(400 + i as u32, Some(f(i))))
            .collect();
        DayMeasurement::new(2021, day_of_year, samples).unwrap()
    }

    #[test]
    fn test_pure_low_frequency_curve_scores_near_zero() {
        // DC plus a third harmonic sits entirely inside the kept bins
        let n = 640;
        let day = day_from_curve(150, n, |i| {
            2.0 + (2.0 * PI * 3.0 * i as f64 / n as f64).cos()
        });

        let score = smoothness_score(&day);
        assert!(score < 1e-9, "expected near-zero score, got {}", score);
    }

    #[test]
    fn test_high_frequency_noise_raises_score() {
        let n = 640;
        let smooth = day_from_curve(150, n, |i| {
            2.0 + (2.0 * PI * 3.0 * i as f64 / n as f64).cos()
        });
        let noisy = day_from_curve(150, n, |i| {
            2.0 + (2.0 * PI * 3.0 * i as f64 / n as f64).cos()
                + 0.4 * (2.0 * PI * 60.0 * i as f64 / n as f64).sin()
        });

        let smooth_score = smoothness_score(&smooth);
        let noisy_score = smoothness_score(&noisy);

        assert!(
            noisy_score > smooth_score,
            "noisy {} should exceed smooth {}",
            noisy_score,
            smooth_score
        );
        assert!(noisy_score > 0.01);
    }

    #[test]
    fn test_short_day_is_never_clear() {
        let day = day_from_curve(150, 59, |_| 5.0);
        assert_eq!(smoothness_score(&day), f64::INFINITY);
        assert!(!is_clear_day(&day, 100.0));
    }

    #[test]
    fn test_floor_and_missing_samples_are_ignored() {
        // 59 usable samples plus night noise below the floor: still too short
        let mut samples: Vec<PowerSample> = (0..59)
            .map(|i| PowerSample::new(600 + i, Some(3.0)))
            .collect();
        for i in 0..30 {
            samples.push(PowerSample::new(700 + i, Some(0.0001)));
        }
        samples.push(PowerSample::new(800, None));

        let day = DayMeasurement::new(2021, 150, samples).unwrap();
        assert_eq!(smoothness_score(&day), f64::INFINITY);
    }

    #[test]
    fn test_select_clear_days_applies_range_and_threshold() {
        let n = 640;
        let smooth = |i: usize| 2.0 + (2.0 * PI * 2.0 * i as f64 / n as f64).cos();
        let noisy = |i: usize| {
            2.0 + (2.0 * PI * 2.0 * i as f64 / n as f64).cos()
                + 0.8 * (2.0 * PI * 80.0 * i as f64 / n as f64).sin()
        };

        let days = vec![
            day_from_curve(119, n, smooth), // outside the range
            day_from_curve(130, n, smooth),
            day_from_curve(140, n, noisy),
            day_from_curve(160, n, smooth),
        ];

        let clear = select_clear_days(&days, 120..=200, 1.0);
        let kept: Vec<u32> = clear.iter().map(|d| d.day_of_year()).collect();
        assert_eq!(kept, vec![130, 160]);
    }

    #[test]
    fn test_select_clear_days_returns_daylight_filtered_copies() {
        let n = 640;
        let mut samples: Vec<PowerSample> = (0..n)
            .map(|i| {
                PowerSample::new(
                    400 + i as u32,
                    Some(2.0 + (2.0 * PI * 2.0 * i as f64 / n as f64).cos()),
                )
            })
            .collect();
        samples.push(PowerSample::new(1100, Some(0.0)));
        samples.push(PowerSample::new(1101, None));

        let days = vec![DayMeasurement::new(2021, 150, samples).unwrap()];
        let clear = select_clear_days(&days, 120..=200, 1.0);

        assert_eq!(clear.len(), 1);
        assert_eq!(clear[0].samples().len(), n);
        assert!(clear[0].samples().iter().all(|s| s.power.is_some()));
    }
}
