use thiserror::Error;

/// Failures the importer can run into before a record is built.
///
/// These never leave the importer as errors; they are folded into
/// `ImportOutcome::Failure` using their `Display` text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    /// The input is not a well-formed absolute URL.
    #[error("invalid URL")]
    InvalidUrl,

    /// Well-formed URL, but no known listing platform matched.
    #[error("unsupported platform: supported platforms are {supported}")]
    UnsupportedPlatform { supported: String },

    /// The page could not be fetched through the proxy.
    #[error("source unreachable: {0}")]
    Fetch(String),

    #[error("import cancelled")]
    Cancelled,
}

/// Invalid values while loading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}
