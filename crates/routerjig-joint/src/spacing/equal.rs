//! Equally spaced fingers.

use super::params::{FlagParam, IntParam};
use super::{EdgeGeometry, SpacingStrategy};
use crate::cut::Cut;
use crate::error::{SpacingError, SpacingResult};
use routerjig_core::{Fixed, ParameterResult, Units};
use tracing::debug;

/// Cuts of one width repeated on a fixed period.
///
/// The period is `spacing + 2 * (midline + width - bit width)`: one cut plus
/// one finger. With `centered` a cut sits in the middle of the board,
/// otherwise a finger does.
#[derive(Debug, Clone, PartialEq)]
pub struct EquallySpaced {
    geom: EdgeGeometry,
    spacing: IntParam,
    width: IntParam,
    centered: FlagParam,
    cuts: Vec<Cut>,
}

impl EquallySpaced {
    /// Default parameters: no extra spacing, bit-width cuts, centred.
    pub fn new(geom: EdgeGeometry) -> SpacingResult<Self> {
        let width = geom.bit_width;
        Self::with_params(geom, 0, width, true)
    }

    /// Build with the given parameters, clamped to their bounds.
    pub fn with_params(
        geom: EdgeGeometry,
        spacing: i32,
        width: i32,
        centered: bool,
    ) -> SpacingResult<Self> {
        let half = geom.board_width / 2;
        let mut centered = FlagParam::new("Centered", centered);
        if geom.dovetail {
            centered.lock(true);
        }
        let mut equal = Self {
            spacing: IntParam::new("Spacing", spacing, 0, half),
            width: IntParam::new("Width", width, geom.bit_width, half),
            centered,
            geom,
            cuts: Vec::new(),
        };
        equal.set_cuts()?;
        Ok(equal)
    }

    pub fn geometry(&self) -> &EdgeGeometry {
        &self.geom
    }

    pub fn spacing(&self) -> &IntParam {
        &self.spacing
    }

    pub fn width(&self) -> &IntParam {
        &self.width
    }

    pub fn centered(&self) -> &FlagParam {
        &self.centered
    }

    /// Extra space between fingers. Call [`SpacingStrategy::recompute_cuts`]
    /// afterwards.
    pub fn set_spacing(&mut self, value: i32) -> ParameterResult<()> {
        self.spacing.set(value)
    }

    /// Cut width.
    pub fn set_width(&mut self, value: i32) -> ParameterResult<()> {
        self.width.set(value)
    }

    /// Whether a cut (rather than a finger) is centred. Fixed for dovetails.
    pub fn set_centered(&mut self, value: bool) -> ParameterResult<()> {
        self.centered.set(value)
    }

    /// Lay out the cuts from the current parameters.
    pub fn set_cuts(&mut self) -> SpacingResult<()> {
        let g = &self.geom;
        let board = g.board_width;
        let width = self.width.value();
        let period =
            Fixed::from(self.spacing.value()) + (g.midline + width - g.width_f) * 2;
        if period < Fixed::ONE {
            return Err(SpacingError::NeckTooNarrow {
                neck_width: period.to_string(),
            });
        }
        let period = period.ceil();

        let first = if self.centered.value() {
            (board - width) / 2
        } else {
            let finger = period - width;
            (board - finger) / 2 + finger
        };

        let mut starts = Vec::new();
        let mut x = first;
        while x + width > 0 {
            starts.push(x);
            x -= period;
        }
        starts.reverse();
        let mut x = first + period;
        while x < board {
            starts.push(x);
            x += period;
        }

        let mut cuts: Vec<Cut> = starts
            .into_iter()
            .filter_map(|x| {
                let xmin = x.max(0);
                let xmax = (x + width).min(board);
                (xmax > xmin).then(|| Cut::new(xmin, xmax))
            })
            .collect();

        let min_finger = g.min_finger_width;
        if cuts
            .first()
            .is_some_and(|c| c.touches_left() && c.width() < min_finger)
        {
            cuts.remove(0);
        }
        if cuts
            .last()
            .is_some_and(|c| c.touches_right(board) && c.width() < min_finger)
        {
            cuts.pop();
        }
        if let Some(c) = cuts.first_mut() {
            if c.xmin > 0 && c.xmin < min_finger {
                c.xmin = 0;
            }
        }
        if let Some(c) = cuts.last_mut() {
            if c.xmax < board && board - c.xmax < min_finger {
                c.xmax = board;
            }
        }

        let whole_board = cuts.len() == 1 && cuts[0].xmin == 0 && cuts[0].xmax == board;
        if cuts.is_empty() || whole_board {
            return Err(SpacingError::BoardTooNarrow {
                board_width: board,
                bit_width: g.bit_width,
            });
        }

        debug!(
            "Equal spacing: {} cuts, period {}, width {}",
            cuts.len(),
            period,
            width
        );
        self.cuts = cuts;
        Ok(())
    }
}

impl SpacingStrategy for EquallySpaced {
    fn cuts(&self) -> &[Cut] {
        &self.cuts
    }

    fn recompute_cuts(&mut self) -> SpacingResult<()> {
        self.set_cuts()
    }

    fn description(&self, units: &Units) -> String {
        let mut text = format!(
            "Equally spaced: Width {}, Spacing {}",
            units.increments_to_string(self.width.value(), true),
            units.increments_to_string(self.spacing.value(), true)
        );
        if self.centered.value() {
            text.push_str(", Centered");
        }
        text
    }
}
