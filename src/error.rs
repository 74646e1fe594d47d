//! Error taxonomy of the shadow pipeline.

/// Errors raised by the shadow geometry core and its collaborators.
#[derive(thiserror::Error, Debug)]
pub enum ShadowError {
    /// Sun altitude outside (0, 90], or a non-finite azimuth, where a shadow
    /// length is needed.
    #[error("Invalid sun angle: {0}")]
    InvalidSunAngle(String),

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// The footprint data source failed (file missing, unreadable, malformed).
    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ShadowError {
    pub fn altitude(altitude: f64) -> Self {
        ShadowError::InvalidSunAngle(format!("altitude {altitude} deg is outside (0, 90]"))
    }

    pub fn azimuth(azimuth: f64) -> Self {
        ShadowError::InvalidSunAngle(format!("azimuth {azimuth} deg is not finite"))
    }

    pub fn geometry<T: ToString>(msg: T) -> Self {
        ShadowError::InvalidGeometry(msg.to_string())
    }

    pub fn data<T: ToString>(msg: T) -> Self {
        ShadowError::DataUnavailable(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ShadowError>;
