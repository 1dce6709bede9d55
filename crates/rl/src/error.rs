use thiserror::Error;

#[derive(Error, Debug)]
pub enum RlError {
    #[error("replay buffer holds {available} transitions but {requested} were requested")]
    InsufficientData { requested: usize, available: usize },
    #[error("invalid config `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },
    #[error("dimension mismatch for {what}: expected {expected}, got {actual}")]
    DimensionMismatch { what: &'static str, expected: usize, actual: usize },
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T, E = RlError> = std::result::Result<T, E>;
