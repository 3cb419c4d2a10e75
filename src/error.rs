//! Error types for distkit.

use thiserror::Error;

/// distkit error type
#[derive(Error, Debug)]
pub enum Error {
    /// The observation source could not be opened or read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A line of the observation source is not a number.
    #[error("line {line}: expected a number, got {content:?}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// The offending line, trimmed.
        content: String,
    },

    /// A statistic was requested over too few observations, or a density
    /// was requested with a zero standard deviation.
    #[error("division by zero: {0}")]
    DivisionByZero(String),

    /// An argument or observation lies outside the distribution's support.
    #[error("domain error: {0}")]
    Domain(String),

    /// Two distributions cannot be combined.
    #[error("precondition failed: {0}")]
    Precondition(String),

    /// Constructor parameters violate distribution constraints.
    #[error("invalid distribution parameters: {0}")]
    InvalidParameters(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let e = Error::Parse { line: 3, content: "abc".into() };
        assert_eq!(e.to_string(), "line 3: expected a number, got \"abc\"");

        let e = Error::Precondition("p values are not equal".into());
        assert_eq!(e.to_string(), "precondition failed: p values are not equal");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let e: Error = io.into();
        assert!(matches!(e, Error::Io(_)));
    }
}
