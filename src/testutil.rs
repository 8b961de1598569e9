//! Test-only stand-in for the external irradiance/power simulator: a small
//! geometric clear-sky model (declination, hour angle, incidence cosine,
//! crude air-mass attenuation). Shape-wise it behaves like the real
//! collaborator — azimuth- and tilt-sensitive, zero below the horizon —
//! which is all the fitness and search tests need.

use std::f64::consts::PI;

use crate::fitness::{DaySimulator, SimulatedSample};
use crate::geometry::AnglePoint;
use crate::measurement::{DayMeasurement, PowerSample};

/// Outputs below this are clamped to exactly zero so that rescaling by a
/// rated power cannot leave sub-floor crumbs on one side of the join.
const NIGHT_CLAMP: f64 = 1e-3;

pub(crate) struct GeometricSimulator;

impl DaySimulator for GeometricSimulator {
    fn simulate_day(
        &self,
        _year: i32,
        day_of_year: u32,
        latitude: f64,
        longitude: f64,
        tilt_deg: f64,
        azimuth_deg: f64,
    ) -> Vec<SimulatedSample> {
        let declination =
            23.45_f64.to_radians() * (360.0 * (284.0 + day_of_year as f64) / 365.0).to_radians().sin();
        let lat = latitude.to_radians();

        // Panel normal in east-north-up, azimuth clockwise from north
        let tilt = tilt_deg.to_radians();
        let azimuth = azimuth_deg.to_radians();
        let normal = [tilt.sin() * azimuth.sin(), tilt.sin() * azimuth.cos(), tilt.cos()];

        let mut samples = Vec::with_capacity(1440);

        for minute in 0..1440u32 {
            let solar_minute = minute as f64 + 4.0 * longitude;
            let hour_angle = ((solar_minute - 720.0) / 4.0).to_radians();

            let sin_elevation = lat.sin() * declination.sin()
                + lat.cos() * declination.cos() * hour_angle.cos();

            if sin_elevation <= 0.0 {
                samples.push(SimulatedSample::new(minute, 0.0));
                continue;
            }

            let elevation = sin_elevation.asin();

            let cos_sun_azimuth = ((declination.sin() - lat.sin() * sin_elevation)
                / (lat.cos() * elevation.cos()))
            .clamp(-1.0, 1.0);
            let mut sun_azimuth = cos_sun_azimuth.acos();
            if hour_angle > 0.0 {
                sun_azimuth = 2.0 * PI - sun_azimuth;
            }

            let sun = [
                elevation.cos() * sun_azimuth.sin(),
                elevation.cos() * sun_azimuth.cos(),
                sin_elevation,
            ];

            let incidence =
                normal[0] * sun[0] + normal[1] * sun[1] + normal[2] * sun[2];
            let attenuation = (-0.2 / sin_elevation.max(0.02)).exp();

            let mut power = incidence.max(0.0) * attenuation;
            if power < NIGHT_CLAMP {
                power = 0.0;
            }

            samples.push(SimulatedSample::new(minute, power));
        }

        samples
    }
}

/// Measured day manufactured from a simulator run at known angles, scaled
/// by `rated_power` and stripped of night zeros — the measurements a
/// noise-free logger would have recorded for that installation.
pub(crate) fn measured_day<S: DaySimulator>(
    simulator: &S,
    year: i32,
    day_of_year: u32,
    latitude: f64,
    longitude: f64,
    angles: AnglePoint,
    rated_power: f64,
) -> DayMeasurement {
    let samples = simulator
        .simulate_day(
            year,
            day_of_year,
            latitude,
            longitude,
            angles.tilt_deg,
            angles.azimuth_deg,
        )
        .into_iter()
        .filter(|s| s.power > 0.0)
        .map(|s| PowerSample::new(s.minute, Some(s.power * rated_power)))
        .collect();

    DayMeasurement::new(year, day_of_year, samples).expect("simulator produced an invalid day")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulator_produces_a_daylight_curve() {
        let samples =
            GeometricSimulator.simulate_day(2020, 172, 62.89, 27.63, 15.0, 217.0);

        assert_eq!(samples.len(), 1440);
        let total: f64 = samples.iter().map(|s| s.power).sum();
        assert!(total > 0.0, "midsummer day should produce power");

        // Midsummer at 62.9N is long but not a polar day
        let lit = samples.iter().filter(|s| s.power > 0.0).count();
        assert!(lit > 600 && lit < 1440, "unexpected day length: {} minutes", lit);
    }

    #[test]
    fn test_simulator_is_azimuth_sensitive() {
        let east: f64 = GeometricSimulator
            .simulate_day(2020, 172, 62.89, 27.63, 40.0, 90.0)
            .iter()
            .map(|s| s.power)
            .sum();
        let west: f64 = GeometricSimulator
            .simulate_day(2020, 172, 62.89, 27.63, 40.0, 270.0)
            .iter()
            .map(|s| s.power)
            .sum();
        let south: f64 = GeometricSimulator
            .simulate_day(2020, 172, 62.89, 27.63, 40.0, 180.0)
            .iter()
            .map(|s| s.power)
            .sum();

        assert!(south > east);
        assert!(south > west);
    }
}
