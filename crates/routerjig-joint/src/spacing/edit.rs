//! Interactively edited cuts.
//!
//! The user selects cuts with a cursor and an active set, then moves, widens,
//! trims, adds or deletes them one increment at a time. Every batch edit is
//! all-or-nothing: it is applied to a working copy and committed only if
//! every active cut can take the change.
//!
//! Rejected edits are normal during interactive use, so every transition
//! returns an [`EditStatus`] instead of an error.

use super::history::CutHistory;
use super::{EdgeGeometry, SpacingStrategy};
use crate::cut::Cut;
use crate::error::{SpacingError, SpacingResult};
use routerjig_core::Units;
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Outcome of an edit, shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditStatus {
    pub message: String,
    pub warning: bool,
}

impl EditStatus {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            warning: false,
        }
    }

    pub(crate) fn warn(message: impl Into<String>) -> Self {
        let message = message.into();
        debug!("Edit rejected: {}", message);
        Self {
            message,
            warning: true,
        }
    }

    pub fn is_warning(&self) -> bool {
        self.warning
    }
}

/// Edit commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOp {
    MoveLeft,
    MoveRight,
    WidenLeft,
    WidenRight,
    TrimLeft,
    TrimRight,
    Toggle,
    CursorNext,
    CursorPrevious,
    ActivateAll,
    DeactivateAll,
    Add,
    DeleteActive,
    Undo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

impl Side {
    fn name(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

/// Cut numbers as shown to the user.
fn cut_list(indices: &[usize]) -> String {
    indices
        .iter()
        .map(|i| (i + 1).to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Cuts edited by hand.
#[derive(Debug, Clone, PartialEq)]
pub struct EditSpaced {
    geom: EdgeGeometry,
    cuts: Vec<Cut>,
    cursor: usize,
    active: BTreeSet<usize>,
    history: CutHistory,
}

impl EditSpaced {
    /// Start editing from `initial`.
    pub fn new(geom: EdgeGeometry, initial: Vec<Cut>, undo_depth: usize) -> SpacingResult<Self> {
        let mut edit = Self {
            geom,
            cuts: Vec::new(),
            cursor: 0,
            active: BTreeSet::new(),
            history: CutHistory::with_depth(undo_depth),
        };
        edit.set_cuts(initial)?;
        Ok(edit)
    }

    /// Replace the cuts, select the first one and forget the undo history.
    pub fn set_cuts(&mut self, initial: Vec<Cut>) -> SpacingResult<()> {
        self.cuts = Self::clipped(initial, self.geom.board_width)?;
        self.cursor = 0;
        self.active = BTreeSet::from([0]);
        self.history.clear();
        Ok(())
    }

    /// The same edit session on a board of a different width or with a
    /// different bit. Cuts are clipped to the new board and the undo history
    /// is dropped, since its snapshots were laid out for the old geometry.
    pub fn with_geometry(&self, geom: EdgeGeometry) -> SpacingResult<Self> {
        let mut edit = self.clone();
        edit.cuts = Self::clipped(self.cuts.clone(), geom.board_width)?;
        if geom != self.geom {
            edit.history.clear();
        }
        edit.geom = geom;
        edit.clamp_selection();
        Ok(edit)
    }

    fn clipped(cuts: Vec<Cut>, board_width: i32) -> SpacingResult<Vec<Cut>> {
        let mut cuts: Vec<Cut> = cuts
            .into_iter()
            .map(|c| Cut::new(c.xmin.max(0), c.xmax.min(board_width)))
            .filter(|c| c.xmax > c.xmin)
            .collect();
        cuts.sort_by_key(|c| c.xmin);
        if cuts.is_empty() {
            return Err(SpacingError::NoCuts { board_width });
        }
        Ok(cuts)
    }

    fn clamp_selection(&mut self) {
        let n = self.cuts.len();
        self.cursor = self.cursor.min(n.saturating_sub(1));
        self.active.retain(|&i| i < n);
    }

    pub fn geometry(&self) -> &EdgeGeometry {
        &self.geom
    }

    /// Index of the cut under the cursor.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Indices of the cuts selected for editing.
    pub fn active(&self) -> &BTreeSet<usize> {
        &self.active
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Drop the most recent snapshot without restoring it.
    pub(crate) fn discard_undo(&mut self) {
        self.history.undo();
    }

    /// How far cut `i` may extend: its neighbours' extents plus a neck width,
    /// or the board edges.
    pub fn get_limits(&self, i: usize) -> (i32, i32) {
        Self::limits_in(&self.cuts, i, &self.geom)
    }

    fn limits_in(cuts: &[Cut], i: usize, geom: &EdgeGeometry) -> (i32, i32) {
        let neck = geom.neck_width();
        let lo = if i > 0 { cuts[i - 1].xmax + neck } else { 0 };
        let hi = if i + 1 < cuts.len() {
            cuts[i + 1].xmin - neck
        } else {
            geom.board_width
        };
        (lo, hi)
    }

    /// Smallest allowed width of a cut: anything at a board edge, one bit
    /// width elsewhere.
    fn min_width(&self, cut: &Cut) -> i32 {
        if cut.is_interior(self.geom.board_width) {
            self.geom.bit_width
        } else {
            1
        }
    }

    fn commit(&mut self, cuts: Vec<Cut>) {
        if cuts != self.cuts {
            let previous = std::mem::replace(&mut self.cuts, cuts);
            self.history.record(previous);
        }
    }

    /// Run an edit command.
    pub fn apply(&mut self, op: EditOp) -> EditStatus {
        match op {
            EditOp::MoveLeft => self.move_left(),
            EditOp::MoveRight => self.move_right(),
            EditOp::WidenLeft => self.widen_left(),
            EditOp::WidenRight => self.widen_right(),
            EditOp::TrimLeft => self.trim_left(),
            EditOp::TrimRight => self.trim_right(),
            EditOp::Toggle => self.toggle(),
            EditOp::CursorNext => self.increment_cursor(1),
            EditOp::CursorPrevious => self.increment_cursor(-1),
            EditOp::ActivateAll => self.activate_all(),
            EditOp::DeactivateAll => self.deactivate_all(),
            EditOp::Add => self.add(),
            EditOp::DeleteActive => self.delete_active(),
            EditOp::Undo => self.undo(),
        }
    }

    pub fn move_left(&mut self) -> EditStatus {
        self.shift(Side::Left)
    }

    pub fn move_right(&mut self) -> EditStatus {
        self.shift(Side::Right)
    }

    /// Move every active cut one increment towards `side`.
    ///
    /// A cut pushed against the board edge shrinks, and is deleted once it
    /// would be down to a single increment. Cuts are processed leading edge first so that a
    /// moving neighbour has already made room.
    fn shift(&mut self, side: Side) -> EditStatus {
        if self.active.is_empty() {
            return EditStatus::warn("No cuts are active");
        }
        let board = self.geom.board_width;
        let order: Vec<usize> = match side {
            Side::Left => self.active.iter().copied().collect(),
            Side::Right => self.active.iter().rev().copied().collect(),
        };

        let mut cuts = self.cuts.clone();
        let mut cursor = self.cursor;
        let mut active = self.active.clone();
        let mut failed = Vec::new();
        let mut deleted = 0;
        for original in order {
            // deleting at the left edge shifts the cuts still to be moved
            let i = match side {
                Side::Left => original - deleted,
                Side::Right => original,
            };
            let c = &cuts[i];
            let moved = match side {
                Side::Left => Cut::new((c.xmin - 1).max(0), c.xmax - 1),
                Side::Right => Cut::new(c.xmin + 1, (c.xmax + 1).min(board)),
            };
            let at_edge = match side {
                Side::Left => moved.xmin == 0,
                Side::Right => moved.xmax == board,
            };
            if at_edge && moved.width() <= 1 {
                if cuts.len() == 1 {
                    failed.push(original);
                    continue;
                }
                cuts.remove(i);
                if cursor > i || cursor >= cuts.len() {
                    cursor = cursor.saturating_sub(1);
                }
                active = active
                    .into_iter()
                    .filter(|&a| a != i)
                    .map(|a| if a > i { a - 1 } else { a })
                    .collect();
                deleted += 1;
                continue;
            }
            let (lo, hi) = Self::limits_in(&cuts, i, &self.geom);
            let within = match side {
                Side::Left => moved.xmin >= lo,
                Side::Right => moved.xmax <= hi,
            };
            if !within || moved.width() < self.min_width(&moved) {
                failed.push(original);
                continue;
            }
            cuts[i] = moved;
        }

        if !failed.is_empty() {
            failed.sort_unstable();
            return EditStatus::warn(format!(
                "Unable to move cuts {} {}",
                cut_list(&failed),
                side.name()
            ));
        }
        self.commit(cuts);
        self.cursor = cursor;
        self.active = active;
        if deleted > 0 {
            EditStatus::ok(format!("Moved cuts {}; deleted {} at the edge", side.name(), deleted))
        } else {
            EditStatus::ok(format!("Moved cuts {}", side.name()))
        }
    }

    pub fn widen_left(&mut self) -> EditStatus {
        self.resize(Side::Left, true)
    }

    pub fn widen_right(&mut self) -> EditStatus {
        self.resize(Side::Right, true)
    }

    pub fn trim_left(&mut self) -> EditStatus {
        self.resize(Side::Left, false)
    }

    pub fn trim_right(&mut self) -> EditStatus {
        self.resize(Side::Right, false)
    }

    /// Grow or shrink every active cut by one increment on `side`.
    fn resize(&mut self, side: Side, grow: bool) -> EditStatus {
        let verb = if grow { "widen" } else { "trim" };
        if self.active.is_empty() {
            return EditStatus::warn("No cuts are active");
        }

        let mut cuts = self.cuts.clone();
        let mut failed = Vec::new();
        for &i in &self.active {
            let c = &cuts[i];
            let step = if grow { 1 } else { -1 };
            let resized = match side {
                Side::Left => Cut::new(c.xmin - step, c.xmax),
                Side::Right => Cut::new(c.xmin, c.xmax + step),
            };
            let ok = if grow {
                let (lo, hi) = Self::limits_in(&cuts, i, &self.geom);
                resized.xmin >= lo && resized.xmax <= hi
            } else {
                resized.width() >= self.min_width(&resized)
            };
            if ok {
                cuts[i] = resized;
            } else {
                failed.push(i);
            }
        }

        if !failed.is_empty() {
            return EditStatus::warn(format!(
                "Unable to {} cuts {} on the {}",
                verb,
                cut_list(&failed),
                side.name()
            ));
        }
        self.commit(cuts);
        let past = if grow { "Widened" } else { "Trimmed" };
        EditStatus::ok(format!("{} cuts on the {}", past, side.name()))
    }

    /// Add or remove the cursor cut from the active set.
    pub fn toggle(&mut self) -> EditStatus {
        let n = self.cursor + 1;
        if self.active.remove(&self.cursor) {
            EditStatus::ok(format!("Cut {} deactivated", n))
        } else {
            self.active.insert(self.cursor);
            EditStatus::ok(format!("Cut {} activated", n))
        }
    }

    /// Move the cursor by `delta` cuts, wrapping at either end.
    pub fn increment_cursor(&mut self, delta: i32) -> EditStatus {
        let n = self.cuts.len() as i64;
        self.cursor = (self.cursor as i64 + delta as i64).rem_euclid(n) as usize;
        EditStatus::ok(format!("Cursor on cut {}", self.cursor + 1))
    }

    pub fn activate_all(&mut self) -> EditStatus {
        self.active = (0..self.cuts.len()).collect();
        EditStatus::ok("All cuts activated")
    }

    pub fn deactivate_all(&mut self) -> EditStatus {
        self.active.clear();
        EditStatus::ok("All cuts deactivated")
    }

    /// Add a bit-width cut at the first place with room for it.
    ///
    /// The left margin is tried first, then each cut in turn (split in two
    /// when wide enough, otherwise the gap after it), then the right margin.
    pub fn add(&mut self) -> EditStatus {
        let board = self.geom.board_width;
        let bw = self.geom.bit_width;
        let neck = self.geom.neck_width();
        let mut cuts = self.cuts.clone();

        let mut added = None;
        if bw + neck <= cuts[0].xmin {
            cuts.insert(0, Cut::new(0, bw));
            added = Some(0);
        }
        if added.is_none() {
            for i in 0..cuts.len() {
                let c = cuts[i].clone();
                if c.width() >= 2 * bw + neck {
                    let left = (c.width() - neck) / 2;
                    cuts[i] = Cut::new(c.xmin, c.xmin + left);
                    cuts.insert(i + 1, Cut::new(c.xmin + left + neck, c.xmax));
                    added = Some(i + 1);
                    break;
                }
                if let Some(next) = cuts.get(i + 1) {
                    let gap = next.xmin - c.xmax;
                    if gap >= 2 * neck + bw {
                        let start = c.xmax + (gap - bw) / 2;
                        cuts.insert(i + 1, Cut::new(start, start + bw));
                        added = Some(i + 1);
                        break;
                    }
                }
            }
        }
        if added.is_none() {
            let last = cuts.len() - 1;
            if cuts[last].xmax + neck + bw <= board {
                cuts.push(Cut::new(board - bw, board));
                added = Some(last + 1);
            }
        }

        match added {
            Some(i) => {
                self.commit(cuts);
                self.cursor = i;
                self.active = BTreeSet::from([i]);
                EditStatus::ok(format!("Added cut {}", i + 1))
            }
            None => EditStatus::warn("No room to add a cut"),
        }
    }

    /// Delete every active cut. The last remaining cut is never deleted.
    pub fn delete_active(&mut self) -> EditStatus {
        if self.active.is_empty() {
            return EditStatus::warn("No cuts are active");
        }
        let mut cuts = self.cuts.clone();
        let mut cursor = self.cursor;
        let mut deleted = 0;
        let mut refused = false;
        for &i in self.active.iter().rev() {
            if cuts.len() == 1 {
                refused = true;
                continue;
            }
            cuts.remove(i);
            if cursor > i {
                cursor -= 1;
            }
            deleted += 1;
        }
        if deleted == 0 {
            return EditStatus::warn("Unable to delete the last cut");
        }

        cursor = cursor.min(cuts.len() - 1);
        self.commit(cuts);
        self.cursor = cursor;
        self.active = BTreeSet::from([cursor]);
        if refused {
            warn!("Deleted {} cuts but kept the last one", deleted);
            EditStatus::warn(format!("Deleted {} cuts; the last cut cannot be deleted", deleted))
        } else {
            EditStatus::ok(format!("Deleted {} cuts", deleted))
        }
    }

    /// Restore the cuts from before the last change.
    ///
    /// Only the cuts are restored. The cursor and active set stay where they
    /// are, limited to the restored cuts.
    pub fn undo(&mut self) -> EditStatus {
        match self.history.undo() {
            Some(previous) => {
                self.cuts = previous;
                self.clamp_selection();
                EditStatus::ok("Undo")
            }
            None => EditStatus::warn("Nothing to undo"),
        }
    }
}

impl SpacingStrategy for EditSpaced {
    fn cuts(&self) -> &[Cut] {
        &self.cuts
    }

    fn recompute_cuts(&mut self) -> SpacingResult<()> {
        self.cuts = Self::clipped(std::mem::take(&mut self.cuts), self.geom.board_width)?;
        self.clamp_selection();
        Ok(())
    }

    fn description(&self, _units: &Units) -> String {
        format!("Edited spacing: {} cuts", self.cuts.len())
    }
}
