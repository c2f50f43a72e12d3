use thiserror::Error;

/// The single failure kind of the poll path.
///
/// Every variant is handled the same way by the widget (fallback text, no
/// retry beyond the next tick); the variant only enriches the diagnostic log.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataUnavailable {
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP error! Status: {0}")]
    Status(u16),
    #[error("malformed progress data: {0}")]
    Malformed(String),
}

/// Errors raised while loading a [`crate::WidgetConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid widget configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Endpoint cannot be empty")]
    EmptyEndpoint,
    #[error("Poll interval must be positive")]
    ZeroPollInterval,
    #[error("Digit height must be positive, got {0}")]
    InvalidDigitHeight(f64),
    #[error("Group separator cannot be a digit, got '{0}'")]
    InvalidSeparator(char),
}
