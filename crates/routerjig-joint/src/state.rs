//! Saved joint state.
//!
//! The smallest set of values a joint can be rebuilt from: the bit, the unit
//! model, each board and the spacing parameters (or, for edited spacing, the
//! cuts themselves). Everything else is recomputed on load.

use crate::error::{JointError, JointResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// State format version
pub const STATE_FORMAT_VERSION: &str = "1.0";

/// Complete saved joint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointState {
    pub version: String,
    pub bit: BitState,
    pub units: UnitState,
    /// Top, bottom, double, double-double
    pub boards: Vec<BoardState>,
    pub spacing: SpacingState,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BitState {
    pub width: i32,
    pub depth: i32,
    pub angle: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitState {
    pub metric: bool,
    pub num_increments: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardState {
    pub width: i32,
    pub height: i32,
    #[serde(default)]
    pub wood: String,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub dheight: i32,
}

fn default_active() -> bool {
    true
}

/// Spacing strategy and its parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SpacingState {
    Equal {
        spacing: i32,
        width: i32,
        centered: bool,
    },
    Variable {
        fingers: i32,
    },
    Edit {
        cuts: Vec<(i32, i32)>,
    },
}

impl JointState {
    pub fn to_json(&self) -> JointResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> JointResult<Self> {
        let state: Self = serde_json::from_str(json)?;
        if state.boards.len() != 4 {
            return Err(JointError::InvalidState(format!(
                "expected 4 boards, found {}",
                state.boards.len()
            )));
        }
        Ok(state)
    }

    /// Save to a JSON file.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> JointResult<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Load from a JSON file.
    pub fn load_from_file(path: impl AsRef<Path>) -> JointResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> BoardState {
        BoardState {
            width: 240,
            height: 64,
            wood: "maple".to_string(),
            active: true,
            dheight: 0,
        }
    }

    #[test]
    fn test_spacing_tag() {
        let json = serde_json::to_string(&SpacingState::Variable { fingers: 5 }).unwrap();
        assert_eq!(json, r#"{"kind":"variable","fingers":5}"#);
    }

    #[test]
    fn test_board_count_checked() {
        let state = JointState {
            version: STATE_FORMAT_VERSION.to_string(),
            bit: BitState {
                width: 16,
                depth: 24,
                angle: 0.0,
            },
            units: UnitState {
                metric: false,
                num_increments: 32,
            },
            boards: vec![board(), board()],
            spacing: SpacingState::Edit {
                cuts: vec![(16, 32)],
            },
        };
        let json = state.to_json().unwrap();
        assert!(matches!(
            JointState::from_json(&json),
            Err(JointError::InvalidState(_))
        ));
    }

    #[test]
    fn test_board_defaults() {
        let board: BoardState = serde_json::from_str(r#"{"width": 100, "height": 20}"#).unwrap();
        assert!(board.active);
        assert_eq!(board.dheight, 0);
        assert!(board.wood.is_empty());
    }
}
