use thiserror::Error;

/// Custom error types for the launcher binaries
#[derive(Error, Debug)]
pub enum LauncherError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Exec error: {0}")]
    Exec(String),

    #[error("Staging error: {0}")]
    Staging(String),

    #[error("no privilege escalation helper could be started")]
    EscalationExhausted,
}

/// Result type alias for launcher operations
pub type Result<T> = std::result::Result<T, LauncherError>;
