//! Error types for spectrogram jobs

use thiserror::Error;

/// Result type used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// No configured binary and nothing named `sox` on the search path.
    #[error(
        "SoX binary not found. Please set the correct SoX binary path in the plugin settings. \
         The path must contain the 'sox' executable."
    )]
    BinaryNotFound,

    /// The renderer was resolved but could not be started.
    #[error("An error occurred: {0}")]
    Spawn(#[source] std::io::Error),

    /// Configuration loading or parsing error
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
