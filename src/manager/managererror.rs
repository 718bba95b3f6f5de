use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManagerError {
    #[error(transparent)]
    IOError(#[from] std::io::Error),
    #[error(transparent)]
    JsonParseError(#[from] serde_json::Error),
    #[error("key '{0}' not found")]
    NameNotFoundError(String),
    #[error("holiday '{name}' has an invalid rule: {reason}")]
    InvalidHolidayError { name: String, reason: String },
    #[error("configuration field '{0}' must be positive")]
    NonPositiveIntervalError(&'static str)
}

impl ManagerError {
    pub fn map_elem_not_found(name: &str) -> ManagerError {
        ManagerError::NameNotFoundError(name.to_owned())
    }

    pub fn invalid_holiday(name: &str, reason: impl Into<String>) -> ManagerError {
        ManagerError::InvalidHolidayError { name: name.to_owned(), reason: reason.into() }
    }
}

pub fn parse_json_value<T>(json_value: serde_json::Value) -> Result<T, ManagerError>
    where T: DeserializeOwned {
    serde_json::from_value(json_value).map_err(ManagerError::JsonParseError)
}
