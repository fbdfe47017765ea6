use thiserror::Error;

/// Rejection produced while validating a signaling payload. The message
/// names the offending field so UI-side logs can point at the real gap.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("field `{0}` has the wrong type")]
    InvalidField(&'static str),
}

impl ValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingField(name) => name,
            ValidationError::InvalidField(name) => name,
        }
    }
}
