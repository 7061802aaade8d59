//! Joint layout and fit.
//!
//! After the boards are cut they are stacked bottom-up for display: the
//! optional caul template, the router template, board B, any inserts, then
//! board A. Each seam between mating boards is measured for gap and overlap.

use crate::adjoin::caul_cuts;
use crate::bit::RouterBit;
use crate::board::{Board, BoardRole, Point};
use crate::cut::Cut;
use routerjig_core::{get_unit_label, Fixed, Units};
use routerjig_settings::FitSettings;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Distances below this are treated as coincident edges.
const FIT_EPSILON: f64 = 1e-9;

/// Layout dimensions in increments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutParams {
    pub margin: i32,
    pub template_height: i32,
    pub show_caul: bool,
    pub caul_trim: i32,
}

/// An axis-aligned rectangle in the layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub label: String,
    pub origin: Point,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    fn new(label: impl Into<String>, origin: Point, width: i32, height: i32) -> Self {
        Self {
            label: label.into(),
            origin,
            width: width as f64,
            height: height as f64,
        }
    }

    pub fn top(&self) -> f64 {
        self.origin.y + self.height
    }
}

/// Fit of one seam between two mating boards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeamFit {
    pub upper: BoardRole,
    pub lower: BoardRole,
    /// Largest gap in increments.
    pub max_gap: f64,
    /// Largest overlap in increments.
    pub max_overlap: f64,
}

/// A router pass labelled for the pass table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassLabel {
    pub board: BoardRole,
    pub label: String,
    pub position: Fixed,
}

/// Derived layout and fit of a cut joint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JointGeometry {
    pub template: Rect,
    pub caul: Option<Rect>,
    pub caul_cuts: Vec<Cut>,
    pub boards: Vec<Rect>,
    pub seams: Vec<SeamFit>,
    pub max_gap: f64,
    pub max_overlap: f64,
    pub passes: Vec<PassLabel>,
}

impl JointGeometry {
    /// Lay out the boards, set their origins and measure every seam.
    ///
    /// `boards` are in joint order: top, bottom, double, double-double.
    pub fn build(bit: &RouterBit, boards: &mut [Board], params: &LayoutParams) -> Self {
        let margin = params.margin;
        let width = boards.first().map(|b| b.width()).unwrap_or(0);
        let x = margin as f64;
        let mut y = margin;

        let caul = if params.show_caul {
            let rect = Rect::new("Caul", Point::new(x, y as f64), width, params.template_height);
            y += params.template_height + margin;
            Some(rect)
        } else {
            None
        };
        let template = Rect::new("Template", Point::new(x, y as f64), width, params.template_height);
        y += params.template_height + margin;

        let mut rects = Vec::new();
        for i in stack_order(boards) {
            let board = &mut boards[i];
            board.set_origin(Point::new(x, y as f64));
            rects.push(Rect::new(
                board.role().to_string(),
                board.origin(),
                board.width(),
                board.height(),
            ));
            y += board.height() + margin;
        }

        let caul_cuts = match (&caul, boards.first().and_then(|b| b.bottom_cuts())) {
            (Some(_), Some(cuts)) => caul_cuts(cuts, width, params.caul_trim),
            _ => Vec::new(),
        };

        let seams: Vec<SeamFit> = seam_pairs(boards)
            .into_iter()
            .map(|(upper, lower)| compute_fit(bit, &boards[upper], &boards[lower]))
            .collect();
        let max_gap = seams.iter().map(|s| s.max_gap).fold(0.0, f64::max);
        let max_overlap = seams.iter().map(|s| s.max_overlap).fold(0.0, f64::max);

        let passes = boards
            .iter()
            .filter(|b| b.is_active())
            .flat_map(pass_labels)
            .collect();

        Self {
            template,
            caul,
            caul_cuts,
            boards: rects,
            seams,
            max_gap,
            max_overlap,
            passes,
        }
    }

    /// Messages for fit metrics beyond the configured thresholds.
    pub fn fit_warnings(&self, units: &Units, fit: &FitSettings) -> Vec<String> {
        let label = get_unit_label(units.system);
        let gap = units.fixed_to_length(Fixed::from_f64(self.max_gap));
        let overlap = units.fixed_to_length(Fixed::from_f64(self.max_overlap));
        let mut warnings = Vec::new();
        if gap > fit.warn_gap {
            warnings.push(format!(
                "Maximum gap {:.4} {} exceeds {:.4} {}",
                gap, label, fit.warn_gap, label
            ));
        }
        if overlap > fit.warn_overlap {
            warnings.push(format!(
                "Maximum overlap {:.4} {} exceeds {:.4} {}",
                overlap, label, fit.warn_overlap, label
            ));
        }
        for w in &warnings {
            warn!("{}", w);
        }
        warnings
    }

    /// Total height of the layout including the outer margins.
    pub fn height(&self) -> f64 {
        let margin = self.caul.as_ref().unwrap_or(&self.template).origin.y;
        self.boards
            .last()
            .map(Rect::top)
            .unwrap_or_else(|| self.template.top())
            + margin
    }
}

fn position(boards: &[Board], role: BoardRole) -> Option<usize> {
    boards
        .iter()
        .position(|b| b.role() == role && b.is_active())
}

/// Active boards from the bottom of the layout up.
fn stack_order(boards: &[Board]) -> Vec<usize> {
    [
        BoardRole::Bottom,
        BoardRole::DoubleDouble,
        BoardRole::Double,
        BoardRole::Top,
    ]
    .into_iter()
    .filter_map(|role| position(boards, role))
    .collect()
}

/// Mating pairs as (upper, lower), from A down to B.
fn seam_pairs(boards: &[Board]) -> Vec<(usize, usize)> {
    let chain: Vec<usize> = [
        BoardRole::Top,
        BoardRole::Double,
        BoardRole::DoubleDouble,
        BoardRole::Bottom,
    ]
    .into_iter()
    .filter_map(|role| position(boards, role))
    .collect();
    chain.windows(2).map(|w| (w[0], w[1])).collect()
}

/// Measure the seam between `upper` and `lower`.
///
/// The upper board's bottom edge is placed with its surface at y = 0 and the
/// lower board's top edge with its surface at y = depth, so a perfect fit puts
/// both on the same polyline. Both edges are drawn as the bit cuts them, so
/// the rounding of a dovetail bit's midline shows up as a gap or overlap.
/// Each upper segment midpoint is measured against the matching lower segment
/// along the lower segment's outward normal: positive distances are gaps,
/// negative ones overlaps.
pub fn compute_fit(bit: &RouterBit, upper: &Board, lower: &Board) -> SeamFit {
    let female = upper.bottom_cut_edge(bit, 0.0);
    let male = lower.top_cut_edge(bit, bit.depth() as f64);
    if female.len() != male.len() {
        warn!(
            "Seam {}/{} edges differ in point count ({} vs {})",
            upper.role(),
            lower.role(),
            female.len(),
            male.len()
        );
    }

    let mut max_gap = 0.0_f64;
    let mut max_overlap = 0.0_f64;
    for (f, m) in female.windows(2).zip(male.windows(2)) {
        let (dx, dy) = (m[1].x - m[0].x, m[1].y - m[0].y);
        let len = dx.hypot(dy);
        let flen = (f[1].x - f[0].x).hypot(f[1].y - f[0].y);
        if len < FIT_EPSILON || flen < FIT_EPSILON {
            continue;
        }
        let (nx, ny) = (-dy / len, dx / len);
        let mid = Point::new((f[0].x + f[1].x) / 2.0, (f[0].y + f[1].y) / 2.0);
        let d = (mid.x - m[0].x) * nx + (mid.y - m[0].y) * ny;
        if d > FIT_EPSILON {
            max_gap = max_gap.max(d);
        } else if d < -FIT_EPSILON {
            max_overlap = max_overlap.max(-d);
        }
    }

    SeamFit {
        upper: upper.role(),
        lower: lower.role(),
        max_gap,
        max_overlap,
    }
}

/// Label the passes of a board `A1`, `A2`, ... in cut order.
///
/// An insert is routed the same way on both edges, so only one edge is
/// labelled.
pub fn pass_labels(board: &Board) -> Vec<PassLabel> {
    let cuts = board.bottom_cuts().or_else(|| board.top_cuts()).unwrap_or(&[]);
    cuts.iter()
        .flat_map(|c| c.passes.iter().copied())
        .enumerate()
        .map(|(i, position)| PassLabel {
            board: board.role(),
            label: format!("{}{}", board.role().label(), i + 1),
            position,
        })
        .collect()
}
