//! Error types for the Diet Tracker domain

use thiserror::Error;

/// Daily target calculation errors
///
/// There is exactly one failure kind: the input stats violate a constraint.
/// `field` names the offending `UserStats` field using its wire name.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TargetError {
    #[error("Invalid input for {field}: {message}")]
    InvalidInput { field: &'static str, message: String },
}

impl TargetError {
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        TargetError::InvalidInput {
            field,
            message: message.into(),
        }
    }

    /// Name of the field that failed validation
    pub fn field(&self) -> &'static str {
        match self {
            TargetError::InvalidInput { field, .. } => field,
        }
    }
}

/// Food catalog lookup and portioning errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("Food item not found: {0}")]
    UnknownFood(String),

    #[error("Serving size must be between {min} and {max}, got {value}")]
    ServingOutOfRange { value: f64, min: f64, max: f64 },
}

/// Photo analysis output errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EstimateError {
    #[error("Analysis returned no content")]
    Empty,

    #[error("Analysis output is not a JSON object: {0}")]
    Malformed(String),
}
