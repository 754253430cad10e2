pub mod application;
pub mod interview;
pub mod job;
pub mod resume;
pub mod user;

/// Error returned when a stored or submitted enum name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl From<UnknownVariant> for crate::errors::AppError {
    fn from(err: UnknownVariant) -> Self {
        crate::errors::AppError::Validation(err.to_string())
    }
}
