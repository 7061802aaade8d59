//! The joint being designed.
//!
//! A [`Joint`] owns the bit, the four boards and the spacing strategy. Every
//! change is applied to a copy; the copy replaces the joint only if the
//! spacing and board cuts can be recomputed, so a rejected change leaves the
//! joint exactly as it was.

use crate::adjoin::adjoining_cuts;
use crate::bit::RouterBit;
use crate::board::{Board, BoardRole};
use crate::cut::Cut;
use crate::error::{JointError, JointResult};
use crate::geometry::{JointGeometry, LayoutParams};
use crate::spacing::{
    EdgeGeometry, EditOp, EditSpaced, EditStatus, EquallySpaced, Spacing, SpacingStrategy,
    VariableSpaced,
};
use crate::state::{BitState, BoardState, JointState, SpacingState, UnitState, STATE_FORMAT_VERSION};
use routerjig_core::{MeasurementSystem, ParameterError, Units};
use routerjig_settings::{Config, FitSettings, SpacingKind};
use tracing::{debug, info, warn};

const TOP: usize = 0;
const BOTTOM: usize = 1;
const DOUBLE: usize = 2;
const DOUBLE_DOUBLE: usize = 3;

fn index(role: BoardRole) -> usize {
    match role {
        BoardRole::Top => TOP,
        BoardRole::Bottom => BOTTOM,
        BoardRole::Double => DOUBLE,
        BoardRole::DoubleDouble => DOUBLE_DOUBLE,
    }
}

/// Config lengths that do not belong to the bit or boards, in increments of
/// `units`. The config may use a different measurement system.
fn layout_in(config: &Config, units: &Units) -> (LayoutParams, i32) {
    let from = config.units.measurement_system;
    let inc = |length: f64| units.length_to_increments(units.convert_length(length, from));
    let layout = LayoutParams {
        margin: inc(config.layout.margin),
        template_height: inc(config.layout.template_height),
        show_caul: config.layout.show_caul,
        caul_trim: inc(config.spacing.caul_trim),
    };
    (layout, inc(config.spacing.min_finger_width))
}

/// A box or dovetail joint.
#[derive(Debug, Clone)]
pub struct Joint {
    units: Units,
    bit: RouterBit,
    boards: Vec<Board>,
    spacing: Spacing,
    layout: LayoutParams,
    fit: FitSettings,
    min_finger_width: i32,
    undo_depth: usize,
    geometry: JointGeometry,
}

impl Joint {
    /// Build a joint from the configured defaults.
    pub fn new(config: &Config) -> JointResult<Self> {
        config.validate()?;
        let units = config.units()?;
        let inc = |length: f64| units.length_to_increments(length);

        let bit = RouterBit::new(
            units,
            inc(config.bit.width),
            inc(config.bit.depth),
            config.bit.angle,
        )?;

        let b = &config.boards;
        let (width, height) = (inc(b.width), inc(b.height));
        let mut boards = Vec::with_capacity(4);
        for (role, wood) in [
            (BoardRole::Top, &b.top_wood),
            (BoardRole::Bottom, &b.bottom_wood),
            (BoardRole::Double, &b.double_wood),
            (BoardRole::DoubleDouble, &b.dd_wood),
        ] {
            let mut board = Board::new(role, width, height)?;
            board.set_wood(wood.as_str());
            boards.push(board);
        }
        boards[DOUBLE].set_active(b.double_active);
        boards[DOUBLE].set_dheight(inc(b.double_thickness))?;
        boards[DOUBLE_DOUBLE].set_active(b.double_active && b.dd_active);
        boards[DOUBLE_DOUBLE].set_dheight(inc(b.dd_thickness))?;

        let (layout, min_finger_width) = layout_in(config, &units);
        let undo_depth = config.spacing.undo_depth;

        let geom = EdgeGeometry::new(&bit, width, min_finger_width);
        let spacing = Spacing::new(config.spacing.default_kind, geom, undo_depth)?;

        let mut joint = Self {
            units,
            bit,
            boards,
            spacing,
            layout,
            fit: config.fit.clone(),
            min_finger_width,
            undo_depth,
            geometry: JointGeometry::default(),
        };
        joint.cut_boards()?;
        info!("Created joint: {}", joint.title());
        Ok(joint)
    }

    /// Rebuild a saved joint. Layout, fit thresholds and spacing policy come
    /// from `config`; everything else comes from `state`.
    pub fn from_state(state: &JointState, config: &Config) -> JointResult<Self> {
        let mut joint = Self::new(config)?;

        let system = if state.units.metric {
            MeasurementSystem::Metric
        } else {
            MeasurementSystem::Imperial
        };
        joint.units = Units::new(system, state.units.num_increments)?;
        (joint.layout, joint.min_finger_width) = layout_in(config, &joint.units);
        let from = config.units.measurement_system;
        joint.fit.warn_gap = joint.units.convert_length(config.fit.warn_gap, from);
        joint.fit.warn_overlap = joint.units.convert_length(config.fit.warn_overlap, from);
        joint.bit = RouterBit::new(joint.units, state.bit.width, state.bit.depth, state.bit.angle)?;

        if state.boards.len() != 4 {
            return Err(JointError::InvalidState(format!(
                "expected 4 boards, found {}",
                state.boards.len()
            )));
        }
        let width = state.boards[TOP].width;
        if state.boards.iter().any(|b| b.width != width) {
            return Err(JointError::InvalidState(
                "all boards must have the same width".to_string(),
            ));
        }
        if state.boards[DOUBLE_DOUBLE].active && !state.boards[DOUBLE].active {
            return Err(JointError::InvalidState(
                "the double-double board requires the double board".to_string(),
            ));
        }
        for (board, saved) in joint.boards.iter_mut().zip(&state.boards) {
            board.set_width(saved.width)?;
            board.set_height(saved.height)?;
            board.set_dheight(saved.dheight)?;
            board.set_wood(saved.wood.as_str());
        }
        joint.boards[DOUBLE].set_active(state.boards[DOUBLE].active);
        joint.boards[DOUBLE_DOUBLE].set_active(state.boards[DOUBLE_DOUBLE].active);

        let geom = joint.edge_geometry();
        joint.spacing = match &state.spacing {
            SpacingState::Equal {
                spacing,
                width,
                centered,
            } => Spacing::Equal(EquallySpaced::with_params(geom, *spacing, *width, *centered)?),
            SpacingState::Variable { fingers } => {
                Spacing::Variable(VariableSpaced::with_fingers(geom, Some(*fingers))?)
            }
            SpacingState::Edit { cuts } => {
                let cuts = cuts.iter().map(|&(xmin, xmax)| Cut::new(xmin, xmax)).collect();
                Spacing::Edit(EditSpaced::new(geom, cuts, joint.undo_depth)?)
            }
        };
        joint.cut_boards()?;
        debug!("Restored joint: {}", joint.title());
        Ok(joint)
    }

    /// The values needed to rebuild this joint.
    pub fn state(&self) -> JointState {
        let spacing = match &self.spacing {
            Spacing::Equal(s) => SpacingState::Equal {
                spacing: s.spacing().value(),
                width: s.width().value(),
                centered: s.centered().value(),
            },
            Spacing::Variable(s) => SpacingState::Variable {
                fingers: s.fingers().value(),
            },
            Spacing::Edit(s) => SpacingState::Edit {
                cuts: s.cuts().iter().map(|c| (c.xmin, c.xmax)).collect(),
            },
        };
        JointState {
            version: STATE_FORMAT_VERSION.to_string(),
            bit: BitState {
                width: self.bit.width(),
                depth: self.bit.depth(),
                angle: self.bit.angle(),
            },
            units: UnitState {
                metric: self.units.is_metric(),
                num_increments: self.units.num_increments,
            },
            boards: self
                .boards
                .iter()
                .map(|b| BoardState {
                    width: b.width(),
                    height: b.height(),
                    wood: b.wood().to_string(),
                    active: b.is_active(),
                    dheight: b.dheight(),
                })
                .collect(),
            spacing,
        }
    }

    pub fn units(&self) -> &Units {
        &self.units
    }

    pub fn bit(&self) -> &RouterBit {
        &self.bit
    }

    /// Boards in joint order: top, bottom, double, double-double.
    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    pub fn board(&self, role: BoardRole) -> &Board {
        &self.boards[index(role)]
    }

    pub fn spacing(&self) -> &Spacing {
        &self.spacing
    }

    /// Layout and fit as of the last recomputation.
    pub fn geometry(&self) -> &JointGeometry {
        &self.geometry
    }

    /// Fit metrics beyond the configured thresholds.
    pub fn fit_warnings(&self) -> Vec<String> {
        self.geometry.fit_warnings(&self.units, &self.fit)
    }

    /// One-line summary of the bit, spacing and board.
    pub fn title(&self) -> String {
        format!(
            "{}; {}; Board width: {}",
            self.bit.description(),
            self.spacing.description(&self.units),
            self.units.increments_to_string(self.boards[TOP].width(), true)
        )
    }

    fn edge_geometry(&self) -> EdgeGeometry {
        EdgeGeometry::new(&self.bit, self.boards[TOP].width(), self.min_finger_width)
    }

    /// Rebuild the spacing for the current bit and board.
    fn refresh_spacing(&mut self) -> JointResult<()> {
        self.spacing = self.spacing.with_geometry(self.edge_geometry())?;
        Ok(())
    }

    /// Apply a change to a copy and keep it only if the boards can be cut.
    fn update(&mut self, change: impl FnOnce(&mut Self) -> JointResult<()>) -> JointResult<()> {
        let mut next = self.clone();
        let result = change(&mut next).and_then(|_| next.cut_boards());
        match result {
            Ok(()) => {
                *self = next;
                Ok(())
            }
            Err(e) => {
                warn!("Change rejected, joint unchanged: {}", e);
                Err(e)
            }
        }
    }

    /// Propagate the spacing cuts through the boards, make the router
    /// passes and lay out the joint.
    ///
    /// Board A's bottom edge takes the spacing cuts. Each active insert gets
    /// the cuts adjoining the board above on both edges, and board B's top
    /// edge adjoins the lowest board above it.
    pub fn cut_boards(&mut self) -> JointResult<()> {
        let mut above = self.spacing.cuts().to_vec();
        self.boards[TOP].set_cuts(None, Some(above.clone()));

        for i in [DOUBLE, DOUBLE_DOUBLE] {
            if self.boards[i].is_active() {
                let cuts = adjoining_cuts(&above, &self.bit, &self.boards[i]);
                self.boards[i].set_cuts(Some(cuts.clone()), Some(cuts.clone()));
                above = cuts;
            } else {
                self.boards[i].set_cuts(None, None);
            }
        }

        let cuts = adjoining_cuts(&above, &self.bit, &self.boards[BOTTOM]);
        self.boards[BOTTOM].set_cuts(Some(cuts), None);

        for board in self.boards.iter_mut().filter(|b| b.is_active()) {
            board.make_router_passes(&self.bit)?;
        }
        self.geometry = JointGeometry::build(&self.bit, &mut self.boards, &self.layout);
        debug!(
            "Cut boards: {} passes, max gap {}, max overlap {}",
            self.geometry.passes.len(),
            self.geometry.max_gap,
            self.geometry.max_overlap
        );
        Ok(())
    }

    pub fn set_bit_width(&mut self, width: i32) -> JointResult<()> {
        self.update(|j| {
            j.bit.set_width(width)?;
            j.refresh_spacing()
        })
    }

    pub fn set_bit_depth(&mut self, depth: i32) -> JointResult<()> {
        self.update(|j| {
            j.bit.set_depth(depth)?;
            j.refresh_spacing()
        })
    }

    pub fn set_bit_angle(&mut self, angle: f64) -> JointResult<()> {
        self.update(|j| {
            j.bit.set_angle(angle)?;
            j.refresh_spacing()
        })
    }

    /// Set the width of every board.
    pub fn set_board_width(&mut self, width: i32) -> JointResult<()> {
        self.update(|j| {
            for board in &mut j.boards {
                board.set_width(width)?;
            }
            j.refresh_spacing()
        })
    }

    pub fn set_board_height(&mut self, role: BoardRole, height: i32) -> JointResult<()> {
        self.update(|j| Ok(j.boards[index(role)].set_height(height)?))
    }

    pub fn set_wood(&mut self, role: BoardRole, wood: &str) {
        self.boards[index(role)].set_wood(wood);
    }

    /// Use or drop the double insert. Dropping it also drops the
    /// double-double.
    pub fn set_double_active(&mut self, active: bool) -> JointResult<()> {
        self.update(|j| {
            j.boards[DOUBLE].set_active(active);
            if !active {
                j.boards[DOUBLE_DOUBLE].set_active(false);
            }
            Ok(())
        })
    }

    pub fn set_double_double_active(&mut self, active: bool) -> JointResult<()> {
        if active && !self.boards[DOUBLE].is_active() {
            return Err(ParameterError::Incompatible(
                "The double-double board requires the double board".to_string(),
            )
            .into());
        }
        self.update(|j| {
            j.boards[DOUBLE_DOUBLE].set_active(active);
            Ok(())
        })
    }

    /// Set the extra thickness of an insert board.
    pub fn set_dheight(&mut self, role: BoardRole, dheight: i32) -> JointResult<()> {
        if !matches!(role, BoardRole::Double | BoardRole::DoubleDouble) {
            return Err(ParameterError::Incompatible(format!(
                "Only insert boards have a thickness; {} is not an insert",
                role
            ))
            .into());
        }
        self.update(|j| Ok(j.boards[index(role)].set_dheight(dheight)?))
    }

    /// Switch spacing strategy. Edited spacing starts from the current cuts;
    /// the others start from their default parameters.
    pub fn set_spacing_kind(&mut self, kind: SpacingKind) -> JointResult<()> {
        if kind == self.spacing.kind() {
            return Ok(());
        }
        self.update(|j| {
            let geom = j.edge_geometry();
            j.spacing = match kind {
                SpacingKind::Edit => Spacing::Edit(EditSpaced::new(
                    geom,
                    j.spacing.cuts().to_vec(),
                    j.undo_depth,
                )?),
                other => Spacing::new(other, geom, j.undo_depth)?,
            };
            Ok(())
        })
    }

    /// Set all equal spacing parameters at once.
    pub fn set_equal_params(&mut self, spacing: i32, width: i32, centered: bool) -> JointResult<()> {
        self.update(|j| {
            let equal = j.spacing.as_equal_mut().ok_or_else(|| {
                JointError::InvalidState("equal spacing is not selected".to_string())
            })?;
            equal.set_spacing(spacing)?;
            equal.set_width(width)?;
            equal.set_centered(centered)?;
            equal.recompute_cuts()?;
            Ok(())
        })
    }

    /// Set the variable spacing finger count.
    pub fn set_fingers(&mut self, fingers: i32) -> JointResult<()> {
        self.update(|j| {
            let variable = j.spacing.as_variable_mut().ok_or_else(|| {
                JointError::InvalidState("variable spacing is not selected".to_string())
            })?;
            variable.set_fingers(fingers)?;
            variable.recompute_cuts()?;
            Ok(())
        })
    }

    /// Run an edit command on edited spacing.
    ///
    /// A rejected edit is reported in the returned status, not as an error.
    /// That includes edits whose cuts the boards cannot take; an undo
    /// rejected that way drops its snapshot so the next undo goes further back.
    pub fn edit(&mut self, op: EditOp) -> JointResult<EditStatus> {
        let mut status = None;
        let result = self.update(|j| {
            let edit = j.spacing.as_edit_mut().ok_or_else(|| {
                JointError::InvalidState("edited spacing is not selected".to_string())
            })?;
            status = Some(edit.apply(op));
            Ok(())
        });
        match (result, status) {
            (Ok(()), Some(status)) => Ok(status),
            (Err(e), Some(_)) => {
                if op == EditOp::Undo {
                    if let Some(edit) = self.spacing.as_edit_mut() {
                        edit.discard_undo();
                    }
                }
                Ok(EditStatus::warn(format!("Edit rejected: {}", e)))
            }
            (Err(e), None) => Err(e),
            (Ok(()), None) => Err(JointError::InvalidState(
                "edit produced no status".to_string(),
            )),
        }
    }
}
