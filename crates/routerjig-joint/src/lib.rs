//! # RouterJig Joint
//!
//! Geometry of box and dovetail joints cut on a router jig.
//!
//! A spacing strategy lays out the cuts on the bottom edge of the top board.
//! Those cuts are propagated through any insert boards to the bottom board,
//! every cut is split into router passes, and the mating edges are compared
//! to measure the fit.
//!
//! ## Modules
//!
//! - [`bit`]: router bit and its derived dimensions
//! - [`cut`]: a single cut and its router passes
//! - [`board`]: boards, routed edges, outlines and triangulation
//! - [`adjoin`]: cuts induced on a mating board
//! - [`spacing`]: equal, variable and edited spacing
//! - [`geometry`]: layout and fit
//! - [`joint`]: the joint being designed
//! - [`state`]: saved joint state

pub mod adjoin;
pub mod bit;
pub mod board;
pub mod cut;
pub mod error;
pub mod geometry;
pub mod joint;
pub mod spacing;
pub mod state;

pub use adjoin::{adjoining_cuts, caul_cuts};
pub use bit::RouterBit;
pub use board::{Board, BoardRole, Point, Triangulation};
pub use cut::Cut;
pub use error::{JointError, JointResult, SpacingError, SpacingResult};
pub use geometry::{compute_fit, pass_labels, JointGeometry, LayoutParams, PassLabel, Rect, SeamFit};
pub use joint::Joint;
pub use spacing::{
    CutHistory, EdgeGeometry, EditOp, EditSpaced, EditStatus, EquallySpaced, FlagParam, IntParam,
    Spacing, SpacingStrategy, VariableSpaced,
};
pub use state::{BitState, BoardState, JointState, SpacingState, UnitState};
