use thiserror::Error;

/// Errors that can occur while editing, exporting or loading recipes
#[derive(Error, Debug)]
pub enum EditorError {
    /// Reading or writing a recipe file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Recipe could not be serialized or deserialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Export file name would escape the output directory
    #[error("Invalid export file name: {0}")]
    InvalidFileName(String),

    /// Unit text did not match any known unit
    #[error("Unknown unit: {0}")]
    UnknownUnit(String),

    /// Console command was not recognized
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// Console command was recognized but its arguments were not
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Recipe directory path exists and is not a directory
    #[error("Not a directory: {0}")]
    NotADirectory(String),
}
