//! Error types for the DSA engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading rate tables,
//! calculating allowances and managing mission records.

use chrono::NaiveDateTime;
use thiserror::Error;
use uuid::Uuid;

/// The main error type for the DSA engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use dsa_engine::error::EngineError;
///
/// let error = EngineError::RateNotFound {
///     country: "Jordan".to_string(),
///     area: "Petra".to_string(),
/// };
/// assert_eq!(error.to_string(), "No DSA rate for country 'Jordan', area 'Petra'");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed or failed validation.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The (country, area) pair is absent from the rate table.
    #[error("No DSA rate for country '{country}', area '{area}'")]
    RateNotFound {
        /// The requested country.
        country: String,
        /// The requested area.
        area: String,
    },

    /// The return date-time precedes the departure date-time.
    #[error("Return {return_datetime} is earlier than departure {departure}")]
    InvalidRange {
        /// The departure date-time.
        departure: NaiveDateTime,
        /// The return date-time.
        return_datetime: NaiveDateTime,
    },

    /// A trip plan was structurally invalid.
    #[error("Invalid trip: {message}")]
    InvalidTrip {
        /// A description of what made the trip invalid.
        message: String,
    },

    /// A request field was invalid.
    #[error("Invalid field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// No mission record exists with the given id.
    #[error("Mission record not found: {id}")]
    RecordNotFound {
        /// The unknown record id.
        id: Uuid,
    },

    /// Writing an export failed.
    #[error("Export failed: {message}")]
    ExportError {
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

impl From<csv::Error> for EngineError {
    fn from(error: csv::Error) -> Self {
        EngineError::ExportError {
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/rates.csv".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/rates.csv"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/policy.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/policy.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_rate_not_found_displays_country_and_area() {
        let error = EngineError::RateNotFound {
            country: "Lebanon".to_string(),
            area: "Tyre".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "No DSA rate for country 'Lebanon', area 'Tyre'"
        );
    }

    #[test]
    fn test_invalid_range_displays_both_datetimes() {
        let departure = NaiveDateTime::parse_from_str("2025-03-03 09:00:00", "%Y-%m-%d %H:%M:%S")
            .unwrap();
        let return_datetime =
            NaiveDateTime::parse_from_str("2025-03-01 20:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
        let error = EngineError::InvalidRange {
            departure,
            return_datetime,
        };
        assert_eq!(
            error.to_string(),
            "Return 2025-03-01 20:00:00 is earlier than departure 2025-03-03 09:00:00"
        );
    }

    #[test]
    fn test_invalid_input_displays_field_and_message() {
        let error = EngineError::InvalidInput {
            field: "name".to_string(),
            message: "must not be empty".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid field 'name': must not be empty");
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_rate_not_found() -> EngineResult<()> {
            Err(EngineError::RateNotFound {
                country: "Egypt".to_string(),
                area: "Luxor".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_rate_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
