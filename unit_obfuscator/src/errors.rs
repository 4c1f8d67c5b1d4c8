use thiserror::Error;

#[derive(Debug, Error)]
pub enum ObfuscationError {
    #[error("invalid input {0:?}: expected \"<integer> <unit>\"")]
    InvalidInput(String),
    #[error("non-numeric amount {0:?}")]
    NonNumericAmount(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] crate::config::ConfigError),
    #[error("obfuscation error: {0}")]
    Obfuscation(#[from] ObfuscationError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("metrics error: {0}")]
    Metrics(#[from] prometheus::Error),
}
