//! Response checks.
//!
//! Checks run in order after the implicit 2xx status check. The first failing
//! one turns the request KO; captures only land in the session if every check
//! passes.

use crate::session::UserSession;
use serde_json::Value;
use videogamedb_core::{ApiResponse, HarnessError};

#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("status.find.in(200..299), but actually found {0}")]
    Status(u16),

    #[error("jsonPath($.{field}).find.is({expected}), but actually found {actual}")]
    FieldMismatch { field: String, expected: String, actual: String },

    #[error("jsonPath($.{0}).find.exists, but actually found nothing")]
    MissingField(String),

    #[error("bodyString.find.is({expected}), but actually found {actual}")]
    BodyMismatch { expected: String, actual: String },

    /// Unresolvable session variable or failed HTTP exchange.
    #[error(transparent)]
    Harness(#[from] HarnessError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Check {
    /// Top-level string field must equal the rendered expectation.
    FieldEquals { field: String, expected: String },
    /// Raw body must equal `expected` exactly.
    BodyEquals(String),
    /// Copy a top-level field into the session under `into`.
    Save { field: String, into: String },
}

impl Check {
    pub fn field_equals(field: &str, expected: &str) -> Self {
        Self::FieldEquals { field: field.to_string(), expected: expected.to_string() }
    }

    pub fn body_equals(expected: &str) -> Self {
        Self::BodyEquals(expected.to_string())
    }

    pub fn save(field: &str, into: &str) -> Self {
        Self::Save { field: field.to_string(), into: into.to_string() }
    }

    fn apply(&self, response: &ApiResponse, session: UserSession) -> Result<UserSession, CheckError> {
        match self {
            Self::FieldEquals { field, expected } => {
                let expected = session.render(expected)?;
                let actual = response.field(field).ok_or_else(|| CheckError::MissingField(field.clone()))?;
                if actual.as_str() == Some(expected.as_str()) {
                    Ok(session)
                } else {
                    Err(CheckError::FieldMismatch { field: field.clone(), expected, actual: actual.to_string() })
                }
            }
            Self::BodyEquals(expected) => {
                if &response.body == expected {
                    Ok(session)
                } else {
                    Err(CheckError::BodyMismatch { expected: expected.clone(), actual: response.body.clone() })
                }
            }
            Self::Save { field, into } => match response.field(field) {
                Some(Value::String(value)) => Ok(session.with_var(into.as_str(), value)),
                Some(other) => Ok(session.with_var(into.as_str(), other.to_string())),
                None => Err(CheckError::MissingField(field.clone())),
            },
        }
    }
}

/// Status check, then every check in order.
pub fn verify(checks: &[Check], response: &ApiResponse, session: &UserSession) -> Result<UserSession, CheckError> {
    if !response.is_success() {
        return Err(CheckError::Status(response.status));
    }
    checks.iter().try_fold(session.clone(), |session, check| check.apply(response, session))
}
