use chrono::NaiveDate;

use std::fmt;

/// Number of minutes in a nominal measurement day.
pub const MINUTES_PER_DAY: u32 = 1440;

/// Power floor below which a sample is treated as night/noise and ignored
/// by the clear-day filter and the simulated-curve cleanup.
pub const POWER_FLOOR: f64 = 0.001;

#[derive(Debug)]
pub enum MeasurementError {
    DayOutOfRange(u32),
    MinuteOutOfRange(u32),
    UnorderedMinutes { previous: u32, current: u32 },
    NegativePower { minute: u32, power: f64 },
}

impl fmt::Display for MeasurementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeasurementError::DayOutOfRange(day) => {
                write!(f, "day of year {} outside 1..=366", day)
            }
            MeasurementError::MinuteOutOfRange(minute) => {
                write!(f, "minute of day {} outside 0..=1439", minute)
            }
            MeasurementError::UnorderedMinutes { previous, current } => {
                write!(
                    f,
                    "minute {} follows minute {}: samples must be strictly increasing",
                    current, previous
                )
            }
            MeasurementError::NegativePower { minute, power } => {
                write!(f, "negative power {} at minute {}", power, minute)
            }
        }
    }
}

impl std::error::Error for MeasurementError {}

/// One measured power sample. `power` is `None` when the logger reported
/// nothing for that minute, which is distinct from a measured zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerSample {
    pub minute: u32,
    pub power: Option<f64>,
}

impl PowerSample {
    pub fn new(minute: u32, power: Option<f64>) -> Self {
        Self { minute, power }
    }
}

/// One calendar day of power output at one-minute nominal resolution.
///
/// Produced by an external loader/day splitter and consumed read-only by the
/// clear-day filter and the fitness evaluator. Transformations such as
/// [`DayMeasurement::retain_daylight`] produce new values; a day is never
/// mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct DayMeasurement {
    year: i32,
    day_of_year: u32,
    samples: Vec<PowerSample>,
}

impl DayMeasurement {
    /// Builds a day, validating that minutes are in range and strictly
    /// increasing and that measured powers are non-negative.
    pub fn new(
        year: i32,
        day_of_year: u32,
        samples: Vec<PowerSample>,
    ) -> Result<Self, MeasurementError> {
        if day_of_year == 0 || day_of_year > 366 {
            return Err(MeasurementError::DayOutOfRange(day_of_year));
        }

        let mut previous: Option<u32> = None;
        for sample in &samples {
            if sample.minute >= MINUTES_PER_DAY {
                return Err(MeasurementError::MinuteOutOfRange(sample.minute));
            }
            if let Some(prev) = previous
                && sample.minute <= prev
            {
                return Err(MeasurementError::UnorderedMinutes {
                    previous: prev,
                    current: sample.minute,
                });
            }
            if let Some(power) = sample.power
                && power < 0.0
            {
                return Err(MeasurementError::NegativePower {
                    minute: sample.minute,
                    power,
                });
            }
            previous = Some(sample.minute);
        }

        Ok(Self {
            year,
            day_of_year,
            samples,
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn day_of_year(&self) -> u32 {
        self.day_of_year
    }

    pub fn samples(&self) -> &[PowerSample] {
        &self.samples
    }

    /// Calendar date of this day, `None` for day 366 of a non-leap year.
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_yo_opt(self.year, self.day_of_year)
    }

    /// Sum of measured powers, missing samples excluded.
    pub fn measured_sum(&self) -> f64 {
        self.samples.iter().filter_map(|s| s.power).sum()
    }

    /// Count of samples carrying an actual measurement.
    pub fn valid_sample_count(&self) -> usize {
        self.samples.iter().filter(|s| s.power.is_some()).count()
    }

    /// New day keeping only samples measured at or above `floor`.
    /// Missing samples are dropped along with the near-zero night tail.
    pub fn retain_daylight(&self, floor: f64) -> Self {
        let samples = self
            .samples
            .iter()
            .filter(|s| s.power.is_some_and(|p| p >= floor))
            .copied()
            .collect();

        Self {
            year: self.year,
            day_of_year: self.day_of_year,
            samples,
        }
    }
}
