//! A single cut on a board edge and its router passes.

use crate::bit::RouterBit;
use routerjig_core::{Fixed, ParameterError, ParameterResult};
use serde::{Deserialize, Serialize};
use tracing::error;

/// The material removed for one finger gap.
///
/// `xmin`/`xmax` are the extents of the cut at full depth, in increments.
/// `passes` holds the bit-centre positions, ascending, once
/// [`Cut::make_router_passes`] has run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cut {
    pub xmin: i32,
    pub xmax: i32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub passes: Vec<Fixed>,
}

impl Cut {
    pub fn new(xmin: i32, xmax: i32) -> Self {
        Self {
            xmin,
            xmax,
            passes: Vec::new(),
        }
    }

    /// Span of the cut.
    pub fn width(&self) -> i32 {
        self.xmax - self.xmin
    }

    pub fn touches_left(&self) -> bool {
        self.xmin <= 0
    }

    pub fn touches_right(&self, board_width: i32) -> bool {
        self.xmax >= board_width
    }

    /// True if the cut touches neither board edge.
    pub fn is_interior(&self, board_width: i32) -> bool {
        !self.touches_left() && !self.touches_right(board_width)
    }

    /// Check that the cut lies on the board and can be routed with `bit`.
    ///
    /// Interior cuts must be at least one bit width wide (within the bit's
    /// tolerance); cuts at a board edge may be any positive span.
    pub fn validate(&self, bit: &RouterBit, board_width: i32) -> ParameterResult<()> {
        if self.xmin >= self.xmax {
            return Err(ParameterError::Incompatible(format!(
                "Cut [{}, {}] is empty: xmin must be less than xmax",
                self.xmin, self.xmax
            )));
        }
        if self.xmin < 0 {
            return Err(ParameterError::Incompatible(format!(
                "Cut [{}, {}] starts before the board edge",
                self.xmin, self.xmax
            )));
        }
        if self.xmax > board_width {
            return Err(ParameterError::Incompatible(format!(
                "Cut [{}, {}] extends past the board width {}",
                self.xmin, self.xmax, board_width
            )));
        }
        if self.is_interior(board_width)
            && Fixed::from(self.width()) < bit.width_f() - bit.tolerance()
        {
            return Err(ParameterError::Incompatible(format!(
                "Cut [{}, {}] is narrower than the bit width {}",
                self.xmin,
                self.xmax,
                bit.width()
            )));
        }
        Ok(())
    }

    /// Compute the bit-centre positions needed to clear the cut.
    ///
    /// Passes alternate between flush against the right side and flush
    /// against the left side, working inwards one bit width at a time. A pass
    /// that would overcut the opposite side by more than the tolerance is
    /// pulled flush to that side unless that side is a board edge.
    pub fn make_router_passes(&mut self, bit: &RouterBit, board_width: i32) -> ParameterResult<()> {
        self.validate(bit, board_width)?;

        let half = bit.halfwidth();
        let tol = bit.tolerance();
        let xmin = Fixed::from(self.xmin);
        let xmax = Fixed::from(self.xmax);

        let mut passes = Vec::new();
        let mut left = xmin;
        let mut right = xmax;
        let mut remaining = xmax - xmin;
        let mut from_right = true;
        while remaining > Fixed::ZERO {
            let p = if from_right {
                let p = right - half;
                if p - half < xmin - tol && !self.touches_left() {
                    xmin + half
                } else {
                    p
                }
            } else {
                let p = left + half;
                if p + half > xmax + tol && !self.touches_right(board_width) {
                    xmax - half
                } else {
                    p
                }
            };
            passes.push(p);
            if from_right {
                right -= bit.width_f();
            } else {
                left += bit.width_f();
            }
            remaining -= bit.width_f();
            from_right = !from_right;
        }
        passes.sort();
        passes.dedup();
        self.passes = passes;

        let covered = self.check_passes(half, tol, board_width);
        if !covered {
            error!(
                "Router passes {:?} do not clear cut [{}, {}] with bit width {}",
                self.passes,
                self.xmin,
                self.xmax,
                bit.width()
            );
        }
        debug_assert!(covered, "router passes do not clear the cut");
        Ok(())
    }

    /// True if the passes clear `[xmin, xmax]` and stay inside it, both
    /// within `tol`. Footprints are clipped to the board.
    fn check_passes(&self, half: Fixed, tol: Fixed, board_width: i32) -> bool {
        let xmin = Fixed::from(self.xmin);
        let xmax = Fixed::from(self.xmax);
        let board_lo = Fixed::ZERO;
        let board_hi = Fixed::from(board_width);

        let mut covered = xmin;
        for &p in &self.passes {
            let lo = (p - half).max(board_lo);
            let hi = (p + half).min(board_hi);
            if lo < xmin - tol || hi > xmax + tol {
                return false;
            }
            if lo > covered + tol {
                return false;
            }
            covered = covered.max(hi);
        }
        covered >= xmax - tol
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use routerjig_core::Units;

    fn bit16() -> RouterBit {
        RouterBit::new(Units::default(), 16, 24, 0.0).unwrap()
    }

    #[test]
    fn test_validate() {
        let bit = bit16();
        assert!(Cut::new(10, 10).validate(&bit, 240).is_err());
        assert!(Cut::new(-1, 20).validate(&bit, 240).is_err());
        assert!(Cut::new(230, 241).validate(&bit, 240).is_err());
        assert!(Cut::new(100, 110).validate(&bit, 240).is_err());
        assert!(Cut::new(100, 116).validate(&bit, 240).is_ok());
        assert!(Cut::new(0, 5).validate(&bit, 240).is_ok());
        assert!(Cut::new(235, 240).validate(&bit, 240).is_ok());
    }

    #[test]
    fn test_single_pass() {
        let mut cut = Cut::new(112, 128);
        cut.make_router_passes(&bit16(), 240).unwrap();
        assert_eq!(cut.passes, vec![Fixed::from(120)]);
    }

    #[test]
    fn test_two_passes() {
        let mut cut = Cut::new(100, 120);
        cut.make_router_passes(&bit16(), 240).unwrap();
        assert_eq!(cut.passes, vec![Fixed::from(108), Fixed::from(112)]);
    }

    #[test]
    fn test_three_passes_at_left_edge() {
        let mut cut = Cut::new(0, 40);
        cut.make_router_passes(&bit16(), 240).unwrap();
        assert_eq!(
            cut.passes,
            vec![Fixed::from(8), Fixed::from(16), Fixed::from(32)]
        );
    }

    #[test]
    fn test_narrow_edge_cuts() {
        let bit = bit16();
        let mut cut = Cut::new(0, 5);
        cut.make_router_passes(&bit, 240).unwrap();
        assert_eq!(cut.passes, vec![Fixed::from(-3)]);

        let mut cut = Cut::new(235, 240);
        cut.make_router_passes(&bit, 240).unwrap();
        assert_eq!(cut.passes, vec![Fixed::from(243)]);
    }

    #[test]
    fn test_odd_width_bit() {
        let bit = RouterBit::new(Units::default(), 15, 24, 0.0).unwrap();
        let mut cut = Cut::new(50, 65);
        cut.make_router_passes(&bit, 240).unwrap();
        assert_eq!(cut.passes, vec![Fixed::from_f64(57.5)]);
    }

    #[test]
    fn test_invalid_cut_has_no_passes() {
        let mut cut = Cut::new(100, 108);
        assert!(cut.make_router_passes(&bit16(), 240).is_err());
        assert!(cut.passes.is_empty());
    }
}
