use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single violated parameter constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterViolation {
    pub field: String,
    pub reason: String,
}

impl ParameterViolation {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ParameterViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

#[derive(Debug, Error)]
pub enum FinCalcError {
    #[error("Invalid parameters: {}", join_violations(.0))]
    InvalidParameter(Vec<ParameterViolation>),

    #[error("Numeric overflow in {context}")]
    NumericOverflow { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl FinCalcError {
    /// The violated constraints, if this is a validation failure.
    pub fn violations(&self) -> &[ParameterViolation] {
        match self {
            FinCalcError::InvalidParameter(v) => v,
            _ => &[],
        }
    }

    pub(crate) fn overflow(context: &str) -> Self {
        FinCalcError::NumericOverflow {
            context: context.to_string(),
        }
    }
}

fn join_violations(violations: &[ParameterViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<serde_json::Error> for FinCalcError {
    fn from(e: serde_json::Error) -> Self {
        FinCalcError::SerializationError(e.to_string())
    }
}
