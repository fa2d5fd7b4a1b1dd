use thiserror::Error;

/// Errors from configuration loading and saving.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Perkins is not initialized. Run `perkins init` first.")]
    NotInitialized,

    #[error("failed to read config: {0}")]
    Read(String),

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("failed to write config: {0}")]
    Write(String),
}

/// Errors from session file operations.
///
/// A `Parse` error on load is recoverable: the caller discards the file
/// and starts with an empty history.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to read session: {0}")]
    Read(String),

    #[error("failed to parse session: {0}")]
    Parse(String),

    #[error("failed to write session: {0}")]
    Write(String),
}

/// Errors from selecting a provider for a model identifier.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProviderSelectError {
    #[error("{0} configuration not found. Run `perkins init` to set up.")]
    MissingProviderConfig(String),

    #[error("unsupported model: {0}")]
    UnsupportedModel(String),
}
