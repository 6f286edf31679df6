//! Error types for mobctl

use thiserror::Error;

/// Error types for the mobctl library.
///
/// The decision path itself is total; these variants cover the fallible
/// edges around it. Configuration loading produces [`Io`](Error::Io) and
/// [`YamlParse`](Error::YamlParse) directly, and crate-local errors such as
/// the engine's loader errors fold into [`Config`](Error::Config).
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing errors.
    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),
}
