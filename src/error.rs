use thiserror::Error;

/// Failures raised while assembling a subscription.
///
/// Only [`SubscribeError::MissingParameter`] and [`SubscribeError::Internal`]
/// ever reach the HTTP caller; source and converter failures are absorbed
/// by the pipeline and replaced with fallback content.
#[derive(Error, Debug)]
pub enum SubscribeError {
    #[error("Missing required parameters: {0}")]
    MissingParameter(String),

    #[error("Failed to fetch address source {url}: {reason}")]
    SourceFetch { url: String, reason: String },

    #[error("Subscription converter error: {0}")]
    Converter(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for SubscribeError {
    fn from(e: serde_json::Error) -> Self {
        SubscribeError::Internal(format!("JSON serialization failed: {}", e))
    }
}

/// Errors produced while loading [`crate::Settings`].
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}
