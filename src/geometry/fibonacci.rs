use std::f64::consts::PI;

use crate::geometry::AnglePoint;

/// Approximately uniform orientation samples over the upper hemisphere via
/// the golden-angle spiral, returned in generation order as (tilt, azimuth)
/// pairs in degrees.
///
/// Twice `n_samples` points are laid out over the full sphere and the lower
/// half is discarded, so the returned count is close to but not exactly
/// `n_samples`: hemisphere membership is a data-dependent filter, not an
/// exact halving.
pub fn fibonacci_hemisphere(n_samples: usize) -> Vec<AnglePoint> {
    let iterations = n_samples * 2;
    let mut points = Vec::with_capacity(n_samples + n_samples / 16 + 1);

    for i in 0..iterations {
        let k = i as f64 + 0.5;

        // Polar angle from the top of the sphere
        let phi = (1.0 - 2.0 * k / iterations as f64).acos();
        // Golden-angle spiral grows without bound, modulo keeps it in [0, 2pi)
        let theta = (PI * (1.0 + 5.0_f64.sqrt()) * k) % (2.0 * PI);

        let z = phi.cos();
        if z < 0.0 {
            continue;
        }

        points.push(AnglePoint::new(phi.to_degrees(), theta.to_degrees()));
    }

    points
}
