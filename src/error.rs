// error.rs - Error taxonomy for the Monte Carlo engine

use thiserror::Error;

/// Errors raised by the engine and its CSV report writers.
///
/// The engine itself only ever fails with [`IsingError::InvalidArgument`],
/// and always before any lattice is allocated.
#[derive(Debug, Error)]
pub enum IsingError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("csv output failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("i/o failed: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, IsingError>;

/// Shorthand used by the validators.
pub(crate) fn invalid(msg: impl Into<String>) -> IsingError {
    IsingError::InvalidArgument(msg.into())
}

/// Reject zero counts (sizes, sweeps, trials).
pub(crate) fn require_positive(name: &str, value: usize) -> Result<()> {
    if value == 0 {
        return Err(invalid(format!("{name} must be > 0, got 0")));
    }
    Ok(())
}

/// Reject non-positive or non-finite temperatures.
pub(crate) fn require_temperature(temperature: f64) -> Result<()> {
    if !temperature.is_finite() || temperature <= 0.0 {
        return Err(invalid(format!(
            "temperature must be a positive finite number, got {temperature}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temperature_validation() {
        assert!(require_temperature(1.0).is_ok());
        assert!(require_temperature(0.0).is_err());
        assert!(require_temperature(-2.0).is_err());
        assert!(require_temperature(f64::NAN).is_err());
        assert!(require_temperature(f64::INFINITY).is_err());
    }

    #[test]
    fn test_message_names_the_argument() {
        let err = require_positive("lattice_size", 0).unwrap_err();
        assert_eq!(err.to_string(), "invalid argument: lattice_size must be > 0, got 0");
    }
}
