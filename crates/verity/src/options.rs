use crate::error::ConfigurationError;

/// Options which affect how values are captured and compared.
///
/// # Examples
///
/// ```
/// use verity::Options;
///
/// let mut options = Options::default();
/// options.parse_option("max-depth=16")?;
/// options.parse_option("nan-equal=false")?;
/// assert_eq!(options.max_depth(), 16);
/// assert!(!options.nan_equal());
/// # Ok::<_, verity::ConfigurationError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// The maximum nesting depth of a captured value.
    pub(crate) max_depth: usize,
    /// Whether NaN floats compare equal to each other.
    pub(crate) nan_equal: bool,
}

impl Options {
    /// Parse the given option.
    ///
    /// Options are specified as `<key>=<value>`, where a boolean option
    /// without a value is enabled.
    pub fn parse_option(&mut self, option: &str) -> Result<(), ConfigurationError> {
        let mut it = option.splitn(2, '=');

        match it.next().map(str::trim) {
            Some("max-depth") => {
                let value = it.next().unwrap_or_default().trim();

                self.max_depth = value
                    .parse()
                    .map_err(|_| ConfigurationError::InvalidValue {
                        option: option.to_owned(),
                    })?;
            }
            Some("nan-equal") => {
                self.nan_equal = it.next().map(str::trim) != Some("false");
            }
            _ => {
                return Err(ConfigurationError::UnsupportedOption {
                    option: option.to_owned(),
                });
            }
        }

        Ok(())
    }

    /// Parse a comma-separated list of options, like `max-depth=8,nan-equal`.
    ///
    /// Empty entries are skipped.
    pub fn parse_options(&mut self, options: &str) -> Result<(), ConfigurationError> {
        for option in split_options(options) {
            self.parse_option(option)?;
        }

        Ok(())
    }

    /// The maximum nesting depth of a captured value.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Set the maximum nesting depth of a captured value.
    pub fn set_max_depth(&mut self, max_depth: usize) {
        self.max_depth = max_depth;
    }

    /// Whether NaN floats compare equal to each other.
    pub fn nan_equal(&self) -> bool {
        self.nan_equal
    }

    /// Set whether NaN floats compare equal to each other.
    pub fn set_nan_equal(&mut self, nan_equal: bool) {
        self.nan_equal = nan_equal;
    }
}

/// Split a comma-separated list of options, skipping empty entries.
pub(crate) fn split_options(options: &str) -> impl Iterator<Item = &str> {
    options.split(',').map(str::trim).filter(|o| !o.is_empty())
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_depth: 128,
            nan_equal: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{split_options, Options};
    use crate::ConfigurationError;

    #[test]
    fn test_parse_option() {
        let mut options = Options::default();
        options.parse_option("max-depth=4").unwrap();
        assert_eq!(options.max_depth(), 4);

        options.parse_option("nan-equal=false").unwrap();
        assert!(!options.nan_equal());

        options.parse_option("nan-equal").unwrap();
        assert!(options.nan_equal());
    }

    #[test]
    fn test_parse_options() {
        let mut options = Options::default();
        options.parse_options("max-depth=2, nan-equal=false,").unwrap();
        assert_eq!(options.max_depth(), 2);
        assert!(!options.nan_equal());
    }

    #[test]
    fn test_split_options() {
        let options = split_options(" max-depth=2,, nan-equal ,").collect::<Vec<_>>();
        assert_eq!(options, ["max-depth=2", "nan-equal"]);
    }

    #[test]
    fn test_parse_bad_options() {
        let mut options = Options::default();

        assert!(matches!(
            options.parse_option("max-depth=lots"),
            Err(ConfigurationError::InvalidValue { .. })
        ));

        assert!(matches!(
            options.parse_option("colors=true"),
            Err(ConfigurationError::UnsupportedOption { .. })
        ));

        assert_eq!(options, Options::default());
    }
}
