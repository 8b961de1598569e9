//! Angle-space geometry: panel orientations, their unit-disk encoding and
//! the great-circle distance between two orientations.
//!
//! The disk encoding exists so that local search can take uniform Euclidean
//! steps despite (tilt, azimuth) being polar coordinates with a singularity
//! at tilt = 0: equal steps on the disk correspond to roughly equal angular
//! steps on the sphere near the pole.

pub mod fibonacci;

pub use fibonacci::fibonacci_hemisphere;

/// Panel orientation: tilt in [0, 90] degrees from horizontal, azimuth in
/// [0, 360) degrees. At tilt = 0 the azimuth carries no information and
/// consumers must tolerate any value there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnglePoint {
    pub tilt_deg: f64,
    pub azimuth_deg: f64,
}

/// Point on the unit disk standing in for an [`AnglePoint`]. Bijective with
/// angle space except at the origin, which decodes to (tilt 0, azimuth 0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiskPoint {
    pub x: f64,
    pub y: f64,
}

impl AnglePoint {
    pub fn new(tilt_deg: f64, azimuth_deg: f64) -> Self {
        Self {
            tilt_deg,
            azimuth_deg,
        }
    }

    /// Encodes this orientation on the unit disk: r = tilt/90, angle =
    /// azimuth. Only defined for tilt in [0, 90]; out-of-range tilts must
    /// be clamped upstream.
    pub fn to_disk(self) -> DiskPoint {
        let r = self.tilt_deg / 90.0;
        let azimuth_rad = self.azimuth_deg.to_radians();

        DiskPoint {
            x: r * azimuth_rad.cos(),
            y: r * azimuth_rad.sin(),
        }
    }

    /// Unit vector of this orientation with tilt measured from the +z axis.
    fn unit_vector(self) -> [f64; 3] {
        let tilt_rad = self.tilt_deg.to_radians();
        let azimuth_rad = self.azimuth_deg.to_radians();

        [
            tilt_rad.sin() * azimuth_rad.cos(),
            tilt_rad.sin() * azimuth_rad.sin(),
            tilt_rad.cos(),
        ]
    }
}

impl DiskPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Decodes a disk point back to an orientation. The origin maps to
    /// (0, 0) and distances beyond 1 clamp to tilt 90, tolerating search
    /// overshoot and floating-point drift rather than erroring.
    pub fn to_angle(self) -> AnglePoint {
        let r = (self.x * self.x + self.y * self.y).sqrt();

        if r == 0.0 {
            return AnglePoint::new(0.0, 0.0);
        }

        let mut azimuth_deg = (self.y / r).atan2(self.x / r).to_degrees();
        if azimuth_deg < 0.0 {
            azimuth_deg += 360.0;
        }

        AnglePoint::new(r.min(1.0) * 90.0, azimuth_deg)
    }
}

/// Great-circle angle in degrees between two panel orientations, derived
/// from the chord length between their unit vectors.
pub fn angular_distance_deg(a: AnglePoint, b: AnglePoint) -> f64 {
    let va = a.unit_vector();
    let vb = b.unit_vector();

    let chord_squared = (va[0] - vb[0]).powi(2) + (va[1] - vb[1]).powi(2) + (va[2] - vb[2]).powi(2);

    // Floating-point drift can push the acos argument just outside [-1, 1]
    let cos_angle = ((2.0 - chord_squared) / 2.0).clamp(-1.0, 1.0);

    cos_angle.acos().to_degrees()
}
