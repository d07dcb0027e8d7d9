//! Error conversion glue between third-party crates and [`DataViewError`].
//!
//! Widgets only ever return [`DataViewError`]; settings validation and row
//! loading go through these conversions so callers can use `?` throughout.

use validator::ValidationErrors;

use crate::errors::DataViewError;

impl From<ValidationErrors> for DataViewError {
    fn from(val: ValidationErrors) -> Self {
        DataViewError::InvalidConfig(val.to_string())
    }
}

impl From<serde_json::Error> for DataViewError {
    fn from(val: serde_json::Error) -> Self {
        DataViewError::InvalidData(val.to_string())
    }
}

impl From<std::io::Error> for DataViewError {
    fn from(val: std::io::Error) -> Self {
        DataViewError::InvalidData(val.to_string())
    }
}

#[cfg(feature = "server")]
impl From<config::ConfigError> for DataViewError {
    fn from(val: config::ConfigError) -> Self {
        DataViewError::InvalidConfig(val.to_string())
    }
}
