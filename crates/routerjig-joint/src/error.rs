//! Error types for the joint crate.
//!
//! Two kinds of failure reach the caller:
//! - [`ParameterError`] when a bit, board or cut value is out of its domain
//! - [`SpacingError`] when a spacing strategy cannot lay out a joint for the
//!   current bit and board
//!
//! Rejected interactive edits are not errors; they are reported in-band by
//! [`crate::spacing::EditStatus`].

use routerjig_core::ParameterError;
use routerjig_settings::SettingsError;
use thiserror::Error;

/// Errors raised when a spacing strategy cannot produce a valid joint.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpacingError {
    /// The finger period left no room for a neck.
    #[error("Neck width {neck_width} is less than one increment; increase the spacing or width")]
    NeckTooNarrow { neck_width: String },

    /// The board is too narrow for the bit.
    #[error("Board width {board_width} is too narrow for a bit of width {bit_width}")]
    BoardTooNarrow { board_width: i32, bit_width: i32 },

    /// The finger-count bounds for variable spacing are inverted.
    #[error("Unable to fit variable spaced fingers: finger count range [{min}, {max}] is empty")]
    FingerBounds { min: i32, max: i32 },

    /// The edited cuts no longer fit the board.
    #[error("No edited cuts remain on a board of width {board_width}")]
    NoCuts { board_width: i32 },
}

/// Errors that can occur while building or restoring a joint.
#[derive(Error, Debug)]
pub enum JointError {
    /// A bit, board or cut value was rejected.
    #[error(transparent)]
    Parameter(#[from] ParameterError),

    /// The spacing could not be laid out.
    #[error("Spacing error: {0}")]
    Spacing(#[from] SpacingError),

    /// The configuration was invalid.
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    /// IO error reading or writing a saved joint.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// A derived geometry product could not be built.
    #[error("Geometry error: {0}")]
    GeometryError(String),

    /// A saved joint state is inconsistent.
    #[error("Invalid joint state: {0}")]
    InvalidState(String),
}

/// Result type alias for spacing operations.
pub type SpacingResult<T> = Result<T, SpacingError>;

/// Result type alias for joint operations.
pub type JointResult<T> = Result<T, JointError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spacing_error_display() {
        let err = SpacingError::BoardTooNarrow {
            board_width: 10,
            bit_width: 16,
        };
        assert_eq!(
            err.to_string(),
            "Board width 10 is too narrow for a bit of width 16"
        );

        let err = SpacingError::FingerBounds { min: 4, max: 3 };
        assert!(err.to_string().contains("[4, 3]"));
    }

    #[test]
    fn test_error_conversion() {
        let err: JointError = SpacingError::NoCuts { board_width: 8 }.into();
        assert!(matches!(err, JointError::Spacing(_)));

        let err: JointError = ParameterError::Incompatible("bad cut".to_string()).into();
        assert_eq!(err.to_string(), "bad cut");
    }
}
