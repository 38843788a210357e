//! Error types for the distancing core

use thiserror::Error;

/// Main error type for the distancing core
#[derive(Error, Debug)]
pub enum DistancingError {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid rate table: {0}")]
    InvalidRateTable(String),

    #[error("No valid ages provided")]
    NoValidAges,

    #[error("Person not found: {0}")]
    UnknownPerson(usize),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Scheduler error: {0}")]
    Scheduler(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Logger error: {0}")]
    Logger(String),
}

impl From<serde_json::Error> for DistancingError {
    fn from(err: serde_json::Error) -> Self {
        DistancingError::Deserialization(err.to_string())
    }
}

impl From<log::SetLoggerError> for DistancingError {
    fn from(err: log::SetLoggerError) -> Self {
        DistancingError::Logger(err.to_string())
    }
}

#[cfg(feature = "python")]
impl From<DistancingError> for pyo3::PyErr {
    fn from(err: DistancingError) -> pyo3::PyErr {
        use pyo3::exceptions::{PyKeyError, PyRuntimeError, PyValueError};

        match err {
            DistancingError::InvalidConfig(msg) => {
                PyValueError::new_err(format!("Invalid config: {}", msg))
            }
            DistancingError::InvalidRateTable(msg) => {
                PyValueError::new_err(format!("Invalid rate table: {}", msg))
            }
            DistancingError::NoValidAges => PyValueError::new_err("No valid ages provided"),
            DistancingError::UnknownPerson(id) => {
                PyKeyError::new_err(format!("Person not found: {}", id))
            }
            DistancingError::Deserialization(msg) => {
                PyValueError::new_err(format!("Deserialization error: {}", msg))
            }
            DistancingError::Scheduler(msg) => {
                PyRuntimeError::new_err(format!("Scheduler error: {}", msg))
            }
            DistancingError::Io(err) => PyRuntimeError::new_err(format!("I/O error: {}", err)),
            DistancingError::Logger(msg) => {
                PyRuntimeError::new_err(format!("Logger error: {}", msg))
            }
        }
    }
}

/// Result type alias for the distancing core
pub type Result<T> = std::result::Result<T, DistancingError>;
