use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Metadata access cancelled")]
    Cancelled,

    #[error("Metadata access timed out after {0:?}")]
    Timeout(Duration),

    #[error("Metadata source error: {0}")]
    Source(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T = ()> = std::result::Result<T, Error>;
