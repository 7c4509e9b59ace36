#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("vital '{vital_type}' at index {index} has a non-finite value")]
    NonFiniteVital { vital_type: String, index: usize },
    #[error("failed to serialize summary: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type EngineResult<T> = std::result::Result<T, EngineError>;
