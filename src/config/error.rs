use std::fmt;

#[derive(Debug)]
pub enum ConfigError {
    LatitudeRange(f64),
    LongitudeRange(f64),
    DayOrder,
    DayOutOfRange(u32),
    Threshold(f64),
    LatticePoints,
    StepDistance(f64),
    SeedTilt(f64),
    SeedAzimuth(f64),
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::LatitudeRange(lat) => {
                write!(f, "latitude {} outside -90 to 90 degrees", lat)
            }
            ConfigError::LongitudeRange(lon) => {
                write!(f, "longitude {} outside -180 to 180 degrees", lon)
            }
            ConfigError::DayOrder => write!(f, "day_end cannot be earlier than day_start"),
            ConfigError::DayOutOfRange(day) => {
                write!(f, "day of year {} outside 1 to 366", day)
            }
            ConfigError::Threshold(value) => {
                write!(f, "clear_day_threshold_percent {} must be positive", value)
            }
            ConfigError::LatticePoints => write!(f, "lattice_points must be greater than zero"),
            ConfigError::StepDistance(value) => {
                write!(f, "initial_step {} must be positive", value)
            }
            ConfigError::SeedTilt(tilt) => {
                write!(f, "seed tilt {} outside 0 to 90 degrees", tilt)
            }
            ConfigError::SeedAzimuth(azimuth) => {
                write!(f, "seed azimuth {} outside 0 to 360 degrees", azimuth)
            }
            ConfigError::Io(e) => write!(f, "I/O error: {}", e),
            ConfigError::Json(e) => write!(f, "Failed to parse JSON: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> ConfigError {
        ConfigError::Io(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> ConfigError {
        ConfigError::Json(err)
    }
}
