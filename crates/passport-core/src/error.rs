use thiserror::Error;

#[derive(Debug, Error)]
pub enum PassportError {
    #[error("Normalization failed: {0}")]
    Normalization(String),

    #[error("Invalid configuration: {component} — {reason}")]
    Configuration { component: String, reason: String },

    #[error("Invalid simulation delta: {item} — {reason}")]
    SimulationInput { item: String, reason: String },

    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for PassportError {
    fn from(e: serde_json::Error) -> Self {
        PassportError::Serialization(e.to_string())
    }
}
