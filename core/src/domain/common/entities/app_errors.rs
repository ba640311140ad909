use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("No health data found for this user")]
    NoHealthData,

    #[error("At least two health records are required")]
    NotEnoughHealthData,

    #[error("Suggestion generation failed: {0}")]
    GenerationFailed(String),

    #[error("Response does not match its contract: {0}")]
    ContractViolation(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Invalid input: {0}")]
    Invalid(String),

    #[error("Internal server error")]
    InternalServerError,
}
