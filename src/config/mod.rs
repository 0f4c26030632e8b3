pub mod park;

use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    InvalidBounds { north: f64, south: f64, east: f64, west: f64 },
    InvalidZoomRange { min: f64, max: f64 },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(error) => write!(f, "failed to parse park config: {error}"),
            Self::InvalidBounds { north, south, east, west } => write!(
                f,
                "invalid park bounds: north={north}, south={south}, east={east}, west={west} \
                 (need north>south and east>west)"
            ),
            Self::InvalidZoomRange { min, max } => {
                write!(f, "invalid zoom range: [{min}, {max}] (need 0 < min <= max)")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(error) => Some(error),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}
