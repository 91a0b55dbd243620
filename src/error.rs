use std::fmt;

use thiserror::Error as ThisError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A scheme line had a field count outside the accepted set.
    SchemaMismatch,
    /// A magnitude could not be converted by the value parser.
    MalformedValue,
    /// The input is neither a readable file nor a decodable scheme text.
    NotAFileOrScheme,
    /// The input parsed as JSON but did not describe a list of schemes.
    InvalidJson,
    /// A scheme holds something the requested output grammar cannot express.
    Encode,
    Io,
}

/// Where in a scheme document an error was found.
///
/// `line` is the zero-based index into the comment-stripped line list and
/// `field` the zero-based whitespace-separated field of that line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Location {
    pub line: Option<usize>,
    pub field: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct Error {
    pub kind: ErrorKind,
    pub message: String,
    pub location: Option<Location>,
    /// Kind of the underlying failure when this error wraps another one.
    pub cause: Option<ErrorKind>,
}

impl Error {
    fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            location: None,
            cause: None,
        }
    }

    pub fn schema_mismatch(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SchemaMismatch, message)
    }

    pub fn malformed_value(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedValue, message)
    }

    pub fn not_a_file_or_scheme(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotAFileOrScheme, message)
    }

    pub fn invalid_json(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidJson, message)
    }

    pub fn encode(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Encode, message)
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Io, message)
    }

    pub fn with_cause(mut self, cause: ErrorKind) -> Self {
        self.cause = Some(cause);
        self
    }

    pub fn with_line(mut self, line: usize) -> Self {
        let location = self.location.get_or_insert_with(Location::default);
        location.line = Some(line);
        self
    }

    pub fn with_field(mut self, field: usize) -> Self {
        let location = self.location.get_or_insert_with(Location::default);
        location.field = Some(field);
        self
    }

    pub fn line(&self) -> Option<usize> {
        self.location.and_then(|location| location.line)
    }

    pub fn field(&self) -> Option<usize> {
        self.location.and_then(|location| location.field)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

/// Failure of a single magnitude conversion.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum ValueError {
    #[error("empty value")]
    Empty,
    #[error("invalid number '{0}'")]
    InvalidNumber(String),
    #[error("integer expected but got '{0}'")]
    NotAnInteger(String),
    #[error("unknown unit '{unit}' in '{text}'")]
    UnknownUnit { text: String, unit: String },
    #[error("'%' expected after '{0}'")]
    MissingPercent(String),
}

impl From<ValueError> for Error {
    fn from(err: ValueError) -> Self {
        Error::malformed_value(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    fn test_location_builders() {
        let err = Error::malformed_value("wrong input field")
            .with_line(3)
            .with_field(5);
        assert_eq!(err.kind, ErrorKind::MalformedValue);
        assert_eq!(err.line(), Some(3));
        assert_eq!(err.field(), Some(5));
        assert_eq!(err.to_string(), "wrong input field");
    }

    #[rstest::rstest]
    fn test_value_error_converts_to_malformed_value() {
        let err: Error = ValueError::MissingPercent("10".to_string()).into();
        assert_eq!(err.kind, ErrorKind::MalformedValue);
        assert_eq!(err.message, "'%' expected after '10'");
        assert!(err.location.is_none());
    }
}
