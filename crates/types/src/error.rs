use thiserror::Error;

/// Rejected command input
///
/// Every variant is recoverable at the caller boundary: nothing has been
/// sent to the controller when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty command")]
    Empty,

    #[error("too many separators")]
    TooManySeparators,

    #[error("{field} must be an integer between {min} and {max} inclusive, not \"{value}\"")]
    NotAnInteger {
        field: &'static str,
        min: i64,
        max: i64,
        value: String,
    },

    #[error("{field} must be an integer between {min} and {max} inclusive, not \"{value}\"")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
        value: i64,
    },

    #[error("invalid button \"{name}\". Valid buttons are: {valid}")]
    UnknownButton { name: String, valid: String },
}

impl ParseError {
    /// Short machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            ParseError::Empty => "empty",
            ParseError::TooManySeparators => "too_many_separators",
            ParseError::NotAnInteger { .. } => "not_an_integer",
            ParseError::OutOfRange { .. } => "out_of_range",
            ParseError::UnknownButton { .. } => "unknown_button",
        }
    }
}

/// Failure inside the move translator.
///
/// Only reachable through a bug upstream (validation skipped or wrong), so
/// callers treat it as fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslateError {
    #[error("invariant broken: {0}")]
    InvariantBroken(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_message_names_field_bound_and_value() {
        let err = ParseError::OutOfRange {
            field: "Column",
            min: 0,
            max: 5,
            value: 9,
        };
        assert_eq!(
            err.to_string(),
            "Column must be an integer between 0 and 5 inclusive, not \"9\""
        );
        assert_eq!(err.code(), "out_of_range");
    }

    #[test]
    fn too_many_separators_message() {
        assert_eq!(ParseError::TooManySeparators.to_string(), "too many separators");
    }
}
