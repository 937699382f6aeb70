//! Error types for chart computation.

use thiserror::Error;

/// Errors raised by ephemeris collaborators.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EphemerisError {
    #[error("Ephemeris file not found at path: {path}. {message}")]
    FileNotFound { path: String, message: String },
    #[error("Invalid house system: {system}. Valid systems: {valid:?}")]
    InvalidHouseSystem { system: String, valid: Vec<String> },
    #[error("Failed to calculate position for {body} at JD {julian_day}: {message}")]
    CalculationFailed {
        body: String,
        julian_day: f64,
        message: String,
    },
    #[error("House calculation failed: {message}")]
    HouseCalculationFailed { message: String },
}

/// Errors surfaced to callers of the chart engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    #[error("Location not found: {0}")]
    LocationNotFound(String),
    #[error(transparent)]
    Ephemeris(#[from] EphemerisError),
    #[error("Invalid birth moment: {0}")]
    InvalidBirthMoment(String),
    #[error("Invalid chart settings: {0}")]
    InvalidSettings(String),
}
