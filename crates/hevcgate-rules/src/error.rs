//! Error types for hevcgate-rules.

/// Result type alias using [`ConfigError`].
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors raised while merging operator options into [`PolicyInputs`].
///
/// Evaluation itself never fails; only the configuration boundary does.
///
/// [`PolicyInputs`]: crate::PolicyInputs
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The value has the wrong kind for the option.
    #[error("option `{name}` expects {expected}, got {found}")]
    InvalidType {
        name: &'static str,
        expected: &'static str,
        found: String,
    },

    /// The value parsed but is outside the accepted range.
    #[error("option `{name}` is out of range: {message}")]
    OutOfRange { name: &'static str, message: String },
}

impl ConfigError {
    pub(crate) fn invalid_type(
        name: &'static str,
        expected: &'static str,
        found: impl Into<String>,
    ) -> Self {
        Self::InvalidType {
            name,
            expected,
            found: found.into(),
        }
    }

    pub(crate) fn out_of_range(name: &'static str, message: impl Into<String>) -> Self {
        Self::OutOfRange {
            name,
            message: message.into(),
        }
    }
}
