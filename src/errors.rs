use thiserror::Error;

/// Errors that can occur during dependency resolution and ordering.
#[derive(Error, Debug)]
pub enum DepchainError {
    #[error("not found: '{path}' could not be resolved through any load path")]
    NotFound { path: String },

    #[error("cyclic dependency: {}", participants.join(" -> "))]
    CyclicDependency { participants: Vec<String> },

    #[error("not scanned: '{path}' was never passed to scan")]
    NotScanned { path: String },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for results using `DepchainError`.
pub type Result<T> = std::result::Result<T, DepchainError>;
