//! Parameter errors shared by every layer of the workspace.

use thiserror::Error;

/// Parameter error type
///
/// Raised when a user-supplied value (bit geometry, board size, spacing
/// parameter, cut extents) is outside the range the geometry can accept.
/// The message is meant to be shown to the user, who is expected to
/// correct the value; the rejected value is never applied.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// A value is out of its valid range
    #[error("{name} must be between {min} and {max} (got {value})")]
    OutOfRange {
        /// The parameter name.
        name: String,
        /// The rejected value.
        value: f64,
        /// Smallest accepted value.
        min: f64,
        /// Largest accepted value.
        max: f64,
    },

    /// A value must be strictly positive
    #[error("{name} must be positive (got {value})")]
    NotPositive {
        /// The parameter name.
        name: String,
        /// The rejected value.
        value: f64,
    },

    /// A value could not be parsed
    #[error("Unable to read '{input}' as a {expected}")]
    Unparsable {
        /// The text that failed to parse.
        input: String,
        /// What the text should have been.
        expected: String,
    },

    /// A value is well-formed but makes the geometry unusable
    #[error("{0}")]
    Incompatible(String),
}

impl ParameterError {
    /// Shorthand for an out-of-range error on integer parameters
    pub fn out_of_range(name: impl Into<String>, value: i32, min: i32, max: i32) -> Self {
        ParameterError::OutOfRange {
            name: name.into(),
            value: value as f64,
            min: min as f64,
            max: max as f64,
        }
    }

    /// Shorthand for a non-positive value error
    pub fn not_positive(name: impl Into<String>, value: f64) -> Self {
        ParameterError::NotPositive {
            name: name.into(),
            value,
        }
    }
}

/// Result type alias for parameter validation.
pub type ParameterResult<T> = std::result::Result<T, ParameterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_error_display() {
        let err = ParameterError::out_of_range("Fingers", 12, 3, 7);
        assert_eq!(err.to_string(), "Fingers must be between 3 and 7 (got 12)");

        let err = ParameterError::not_positive("Bit width", -2.0);
        assert_eq!(err.to_string(), "Bit width must be positive (got -2)");

        let err = ParameterError::Unparsable {
            input: "1/0x".to_string(),
            expected: "length".to_string(),
        };
        assert_eq!(err.to_string(), "Unable to read '1/0x' as a length");
    }
}
