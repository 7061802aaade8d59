//! Finger spacing strategies.
//!
//! A strategy produces the reference cuts on the bottom edge of the top
//! board. Three strategies are available:
//!
//! - [`EquallySpaced`]: fingers of one width on a fixed period
//! - [`VariableSpaced`]: fingers that narrow from the centre outwards
//! - [`EditSpaced`]: cuts edited one increment at a time, with undo
//!
//! Strategies work from an [`EdgeGeometry`] snapshot of the bit and board
//! rather than holding the bit or board themselves.

mod edit;
mod equal;
mod history;
mod params;
mod variable;

pub use edit::{EditOp, EditSpaced, EditStatus};
pub use equal::EquallySpaced;
pub use history::CutHistory;
pub use params::{FlagParam, IntParam};
pub use variable::VariableSpaced;

use crate::bit::RouterBit;
use crate::cut::Cut;
use crate::error::SpacingResult;
use routerjig_core::{Fixed, Units};
use routerjig_settings::SpacingKind;

/// Bit and board dimensions a strategy needs, in increments.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeGeometry {
    pub board_width: i32,
    pub bit_width: i32,
    pub width_f: Fixed,
    pub midline: Fixed,
    pub neck: Fixed,
    pub dovetail: bool,
    pub min_finger_width: i32,
}

impl EdgeGeometry {
    pub fn new(bit: &RouterBit, board_width: i32, min_finger_width: i32) -> Self {
        Self {
            board_width,
            bit_width: bit.width(),
            width_f: bit.width_f(),
            midline: bit.midline(),
            neck: bit.neck(),
            dovetail: bit.is_dovetail(),
            min_finger_width: min_finger_width.max(0),
        }
    }

    /// Smallest finger allowed between two edited cuts.
    pub fn neck_width(&self) -> i32 {
        self.neck.ceil()
    }
}

/// Shared behaviour of the spacing strategies.
pub trait SpacingStrategy {
    /// The reference cuts, ordered by `xmin`.
    fn cuts(&self) -> &[Cut];

    /// Recompute the cuts from the current parameters.
    fn recompute_cuts(&mut self) -> SpacingResult<()>;

    /// Summary for the joint title.
    fn description(&self, units: &Units) -> String;
}

/// The active spacing strategy.
#[derive(Debug, Clone, PartialEq)]
pub enum Spacing {
    Equal(EquallySpaced),
    Variable(VariableSpaced),
    Edit(EditSpaced),
}

impl Spacing {
    /// Build a strategy of the given kind with default parameters.
    ///
    /// Edit spacing starts from the default equally spaced cuts.
    pub fn new(kind: SpacingKind, geom: EdgeGeometry, undo_depth: usize) -> SpacingResult<Self> {
        Ok(match kind {
            SpacingKind::Equal => Spacing::Equal(EquallySpaced::new(geom)?),
            SpacingKind::Variable => Spacing::Variable(VariableSpaced::new(geom)?),
            SpacingKind::Edit => {
                let equal = EquallySpaced::new(geom.clone())?;
                Spacing::Edit(EditSpaced::new(geom, equal.cuts().to_vec(), undo_depth)?)
            }
        })
    }

    pub fn kind(&self) -> SpacingKind {
        match self {
            Spacing::Equal(_) => SpacingKind::Equal,
            Spacing::Variable(_) => SpacingKind::Variable,
            Spacing::Edit(_) => SpacingKind::Edit,
        }
    }

    pub fn geometry(&self) -> &EdgeGeometry {
        match self {
            Spacing::Equal(s) => s.geometry(),
            Spacing::Variable(s) => s.geometry(),
            Spacing::Edit(s) => s.geometry(),
        }
    }

    /// The same strategy rebuilt for new bit or board dimensions, keeping
    /// parameter values where they are still in range.
    pub fn with_geometry(&self, geom: EdgeGeometry) -> SpacingResult<Self> {
        Ok(match self {
            Spacing::Equal(s) => Spacing::Equal(EquallySpaced::with_params(
                geom,
                s.spacing().value(),
                s.width().value(),
                s.centered().value(),
            )?),
            Spacing::Variable(s) => {
                Spacing::Variable(VariableSpaced::with_fingers(geom, Some(s.fingers().value()))?)
            }
            Spacing::Edit(s) => Spacing::Edit(s.with_geometry(geom)?),
        })
    }

    pub fn as_equal_mut(&mut self) -> Option<&mut EquallySpaced> {
        match self {
            Spacing::Equal(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_variable_mut(&mut self) -> Option<&mut VariableSpaced> {
        match self {
            Spacing::Variable(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_edit(&self) -> Option<&EditSpaced> {
        match self {
            Spacing::Edit(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_edit_mut(&mut self) -> Option<&mut EditSpaced> {
        match self {
            Spacing::Edit(s) => Some(s),
            _ => None,
        }
    }
}

impl SpacingStrategy for Spacing {
    fn cuts(&self) -> &[Cut] {
        match self {
            Spacing::Equal(s) => s.cuts(),
            Spacing::Variable(s) => s.cuts(),
            Spacing::Edit(s) => s.cuts(),
        }
    }

    fn recompute_cuts(&mut self) -> SpacingResult<()> {
        match self {
            Spacing::Equal(s) => s.recompute_cuts(),
            Spacing::Variable(s) => s.recompute_cuts(),
            Spacing::Edit(s) => s.recompute_cuts(),
        }
    }

    fn description(&self, units: &Units) -> String {
        match self {
            Spacing::Equal(s) => s.description(units),
            Spacing::Variable(s) => s.description(units),
            Spacing::Edit(s) => s.description(units),
        }
    }
}
