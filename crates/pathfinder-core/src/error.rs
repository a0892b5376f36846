use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PathfinderError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Registry error: {0}")]
    RegistryError(String),

    #[error("Convergence failure: {function} did not converge after {iterations} iterations (delta: {last_delta})")]
    ConvergenceFailure {
        function: String,
        iterations: u32,
        last_delta: Decimal,
    },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for PathfinderError {
    fn from(e: serde_json::Error) -> Self {
        PathfinderError::SerializationError(e.to_string())
    }
}
