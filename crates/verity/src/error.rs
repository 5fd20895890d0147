use thiserror::Error;

/// Error raised when configuring [`Options`][crate::Options].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigurationError {
    /// Tried to configure an option which doesn't exist.
    #[error("unsupported option `{option}`")]
    UnsupportedOption {
        /// The unsupported option.
        option: String,
    },
    /// Tried to configure an option with a value it doesn't accept.
    #[error("invalid value in option `{option}`")]
    InvalidValue {
        /// The option with the invalid value.
        option: String,
    },
}
