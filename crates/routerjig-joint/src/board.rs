//! Boards and their routed edges.
//!
//! A board is a rectangle whose bottom and top edges may carry cuts. The
//! outline is derived from the cuts and the bit: each cut goes `depth` into
//! the board, and for a dovetail bit the cut sides slope so that the cut is
//! `offset` narrower at the board surface than at full depth.

use crate::bit::RouterBit;
use crate::cut::Cut;
use crate::error::{JointError, JointResult};
use routerjig_core::{ParameterError, ParameterResult};
use serde::{Deserialize, Serialize};

/// Position of a board in the joint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardRole {
    /// Top board (A), cut by the spacing
    Top,
    /// Bottom board (B)
    Bottom,
    /// Double insert between A and B
    Double,
    /// Double-double insert below the double
    DoubleDouble,
}

impl BoardRole {
    /// Letter used in router pass labels.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Top => "A",
            Self::Bottom => "B",
            Self::Double => "C",
            Self::DoubleDouble => "D",
        }
    }
}

impl std::fmt::Display for BoardRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Top => write!(f, "Top"),
            Self::Bottom => write!(f, "Bottom"),
            Self::Double => write!(f, "Double"),
            Self::DoubleDouble => write!(f, "Double-Double"),
        }
    }
}

/// A point in increments.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

fn push_unique_point(path: &mut Vec<Point>, point: Point) {
    if let Some(last) = path.last() {
        if (point.x - last.x).abs() < 1e-9 && (point.y - last.y).abs() < 1e-9 {
            return;
        }
    }
    path.push(point);
}

/// Triangles covering a board outline.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangulation {
    pub vertices: Vec<Point>,
    pub triangles: Vec<[usize; 3]>,
}

/// A board in the joint.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    role: BoardRole,
    width: i32,
    height: i32,
    dheight: i32,
    active: bool,
    wood: String,
    origin: Point,
    bottom_cuts: Option<Vec<Cut>>,
    top_cuts: Option<Vec<Cut>>,
}

impl Board {
    /// Create an active board with no cuts.
    pub fn new(role: BoardRole, width: i32, height: i32) -> ParameterResult<Self> {
        let mut board = Self {
            role,
            width: 1,
            height: 1,
            dheight: 0,
            active: true,
            wood: String::new(),
            origin: Point::default(),
            bottom_cuts: None,
            top_cuts: None,
        };
        board.set_width(width)?;
        board.set_height(height)?;
        Ok(board)
    }

    pub fn role(&self) -> BoardRole {
        self.role
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Extra thickness of an insert board.
    pub fn dheight(&self) -> i32 {
        self.dheight
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn wood(&self) -> &str {
        &self.wood
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn bottom_cuts(&self) -> Option<&[Cut]> {
        self.bottom_cuts.as_deref()
    }

    pub fn top_cuts(&self) -> Option<&[Cut]> {
        self.top_cuts.as_deref()
    }

    pub fn set_width(&mut self, width: i32) -> ParameterResult<()> {
        if width <= 0 {
            return Err(ParameterError::not_positive("Board width", width as f64));
        }
        self.width = width;
        Ok(())
    }

    pub fn set_height(&mut self, height: i32) -> ParameterResult<()> {
        if height <= 0 {
            return Err(ParameterError::not_positive("Board height", height as f64));
        }
        self.height = height;
        Ok(())
    }

    pub fn set_dheight(&mut self, dheight: i32) -> ParameterResult<()> {
        if dheight < 0 {
            return Err(ParameterError::Incompatible(format!(
                "Insert thickness must not be negative (got {})",
                dheight
            )));
        }
        self.dheight = dheight;
        Ok(())
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn set_wood(&mut self, wood: impl Into<String>) {
        self.wood = wood.into();
    }

    pub fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    /// Replace the cuts on both edges; `None` leaves an edge uncut.
    pub fn set_cuts(&mut self, top: Option<Vec<Cut>>, bottom: Option<Vec<Cut>>) {
        self.top_cuts = top;
        self.bottom_cuts = bottom;
    }

    /// Compute router passes for every cut on both edges.
    pub fn make_router_passes(&mut self, bit: &RouterBit) -> ParameterResult<()> {
        let width = self.width;
        for cuts in [&mut self.bottom_cuts, &mut self.top_cuts]
            .into_iter()
            .flatten()
        {
            for cut in cuts.iter_mut() {
                cut.make_router_passes(bit, width)?;
            }
        }
        Ok(())
    }

    /// Points along an edge, left to right.
    ///
    /// `surface` is the y of the board end and `deep` the y of the bottom of
    /// the cuts. Cut sides that are not at a board edge run from the surface
    /// at `x ± run` to full depth at the cut extent.
    fn edge_points(&self, cuts: Option<&[Cut]>, run: f64, surface: f64, deep: f64) -> Vec<Point> {
        let x0 = self.origin.x;
        let w = self.width as f64;
        let s = run;
        let mut path = Vec::new();

        let cuts = match cuts {
            Some(cuts) if !cuts.is_empty() => cuts,
            _ => {
                path.push(Point::new(x0, surface));
                path.push(Point::new(x0 + w, surface));
                return path;
            }
        };

        if !cuts[0].touches_left() {
            push_unique_point(&mut path, Point::new(x0, surface));
        }
        for cut in cuts {
            let xmin = cut.xmin as f64;
            let xmax = cut.xmax as f64;
            if cut.touches_left() {
                push_unique_point(&mut path, Point::new(x0, deep));
            } else {
                push_unique_point(&mut path, Point::new(x0 + xmin + s, surface));
                push_unique_point(&mut path, Point::new(x0 + xmin, deep));
            }
            if cut.touches_right(self.width) {
                push_unique_point(&mut path, Point::new(x0 + w, deep));
            } else {
                push_unique_point(&mut path, Point::new(x0 + xmax, deep));
                push_unique_point(&mut path, Point::new(x0 + xmax - s, surface));
            }
        }
        if cuts.last().is_some_and(|c| !c.touches_right(self.width)) {
            push_unique_point(&mut path, Point::new(x0 + w, surface));
        }
        path
    }

    /// Bottom edge, left to right, with the board end at `y` and cuts going up.
    pub fn bottom_edge(&self, bit: &RouterBit, y: f64) -> Vec<Point> {
        let run = bit.offset().to_f64();
        self.edge_points(self.bottom_cuts(), run, y, y + bit.depth() as f64)
    }

    /// Top edge, left to right, with the board end at `y` and cuts going down.
    pub fn top_edge(&self, bit: &RouterBit, y: f64) -> Vec<Point> {
        let run = bit.offset().to_f64();
        self.edge_points(self.top_cuts(), run, y, y - bit.depth() as f64)
    }

    /// Bottom edge as the bit cuts it, with dovetail sides at the true
    /// [`RouterBit::cut_run`] rather than the rounded offset.
    pub fn bottom_cut_edge(&self, bit: &RouterBit, y: f64) -> Vec<Point> {
        self.edge_points(self.bottom_cuts(), bit.cut_run(), y, y + bit.depth() as f64)
    }

    /// Top edge as the bit cuts it.
    pub fn top_cut_edge(&self, bit: &RouterBit, y: f64) -> Vec<Point> {
        self.edge_points(self.top_cuts(), bit.cut_run(), y, y - bit.depth() as f64)
    }

    /// Counter-clockwise outline of the board at its origin.
    pub fn perimeter(&self, bit: &RouterBit) -> Vec<Point> {
        let y0 = self.origin.y;
        let mut path = self.bottom_edge(bit, y0);
        for p in self.top_edge(bit, y0 + self.height as f64).into_iter().rev() {
            push_unique_point(&mut path, p);
        }
        if path.len() > 1 && path.first() == path.last() {
            path.pop();
        }
        path
    }

    /// Triangulate the outline for export.
    pub fn triangulate(&self, bit: &RouterBit) -> JointResult<Triangulation> {
        let vertices = self.perimeter(bit);
        let flat: Vec<f64> = vertices.iter().flat_map(|p| [p.x, p.y]).collect();
        let indices = earcutr::earcut(&flat, &[], 2)
            .map_err(|e| JointError::GeometryError(format!("triangulation failed: {:?}", e)))?;
        let triangles = indices
            .chunks_exact(3)
            .map(|t| [t[0], t[1], t[2]])
            .collect();
        Ok(Triangulation {
            vertices,
            triangles,
        })
    }
}
