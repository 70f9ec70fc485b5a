use thiserror::Error;

#[derive(Error, Debug)]
pub enum VesperError {
    #[error("Classifier error: {0}")]
    Classifier(String),

    #[error("Handler error: {0}")]
    Handler(String),

    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, VesperError>;
