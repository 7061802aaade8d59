//! Variable spaced fingers.
//!
//! Finger widths shrink linearly from the centre of the board outwards. With
//! `m` pieces on each side of a centre cut, measured in midline widths, the
//! side pieces are `c - i*d` for `i = 1..=m`, where
//! `d = (wb - 2m - 1) / m^2` and `c = 1 + m*d`, and `wb` is the board width in
//! whole midlines. The centre cut takes whatever width remains.

use super::params::IntParam;
use super::{EdgeGeometry, SpacingStrategy};
use crate::cut::Cut;
use crate::error::{SpacingError, SpacingResult};
use routerjig_core::{Fixed, ParameterResult, Units};
use tracing::debug;

/// Cuts and fingers that are widest at the centre of the board.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableSpaced {
    geom: EdgeGeometry,
    fingers: IntParam,
    cuts: Vec<Cut>,
}

/// Board width in whole midline widths.
fn board_in_midlines(geom: &EdgeGeometry) -> i32 {
    (Fixed::from(geom.board_width) / geom.midline).floor()
}

/// Bounds on the number of pieces either side of the centre cut.
fn finger_bounds(geom: &EdgeGeometry) -> SpacingResult<(i32, i32)> {
    let wb = board_in_midlines(geom);
    let alpha = (wb + 1) % 2;
    let m_min = (3 - alpha).max((wb.max(0) as f64).sqrt().ceil() as i32);
    let m_max = (wb - 1 + alpha) / 2;
    if m_max < m_min {
        return Err(SpacingError::FingerBounds {
            min: m_min,
            max: m_max,
        });
    }
    Ok((m_min, m_max))
}

impl VariableSpaced {
    /// Default finger count, halfway between the bounds.
    pub fn new(geom: EdgeGeometry) -> SpacingResult<Self> {
        Self::with_fingers(geom, None)
    }

    /// Build with a finger count, clamped to the bounds for this geometry.
    pub fn with_fingers(geom: EdgeGeometry, fingers: Option<i32>) -> SpacingResult<Self> {
        let (m_min, m_max) = finger_bounds(&geom)?;
        let value = fingers.unwrap_or((m_min + m_max) / 2);
        let mut variable = Self {
            geom,
            fingers: IntParam::new("Fingers", value, m_min, m_max),
            cuts: Vec::new(),
        };
        variable.set_cuts()?;
        Ok(variable)
    }

    pub fn geometry(&self) -> &EdgeGeometry {
        &self.geom
    }

    pub fn fingers(&self) -> &IntParam {
        &self.fingers
    }

    /// Number of pieces either side of the centre. Call
    /// [`SpacingStrategy::recompute_cuts`] afterwards.
    pub fn set_fingers(&mut self, value: i32) -> ParameterResult<()> {
        self.fingers.set(value)
    }

    /// Widths of the side pieces, innermost first.
    fn side_widths(&self, wb: i32, m: i32) -> Vec<i32> {
        let eff = self.geom.midline;
        let d = Fixed::from(wb - 2 * m - 1) / Fixed::from(m * m);
        let c = Fixed::ONE + d * m;
        let floor = eff.round_half_up().max(1);
        (1..=m)
            .map(|i| (eff * (c - d * i)).round_half_up().max(floor))
            .collect()
    }

    /// Lay out the cuts from the current finger count.
    pub fn set_cuts(&mut self) -> SpacingResult<()> {
        let board = self.geom.board_width;
        let wb = board_in_midlines(&self.geom);

        let mut m = self.fingers.value();
        let (widths, center) = loop {
            let widths = self.side_widths(wb, m);
            let center = board - 2 * widths.iter().sum::<i32>();
            if center < widths[0] && m > 1 {
                debug!(
                    "Centre width {} below {}, backing off to {} fingers",
                    center,
                    widths[0],
                    m - 1
                );
                m -= 1;
                continue;
            }
            break (widths, center);
        };
        if center <= 0 {
            return Err(SpacingError::BoardTooNarrow {
                board_width: board,
                bit_width: self.geom.bit_width,
            });
        }

        let mut left = (board - center) / 2;
        let mut right = left + center;
        let mut pieces = vec![(left, right)];
        for (i, w) in widths.iter().enumerate() {
            // odd pieces are spacers, even pieces are cuts
            if (i + 1) % 2 == 0 {
                pieces.push((left - w, left));
                pieces.push((right, right + w));
            }
            left -= w;
            right += w;
        }
        pieces.sort();

        let delta = (self.geom.width_f - self.geom.midline).round_half_up();
        let delta_m = delta / 2;
        let delta_p = delta - delta_m;
        self.cuts = pieces
            .into_iter()
            .map(|(xmin, xmax)| Cut::new((xmin - delta_m).max(0), (xmax + delta_p).min(board)))
            .collect();

        debug!(
            "Variable spacing: {} fingers, centre width {}, {} cuts",
            m,
            center,
            self.cuts.len()
        );
        Ok(())
    }
}

impl SpacingStrategy for VariableSpaced {
    fn cuts(&self) -> &[Cut] {
        &self.cuts
    }

    fn recompute_cuts(&mut self) -> SpacingResult<()> {
        self.set_cuts()
    }

    fn description(&self, _units: &Units) -> String {
        format!("Variable spaced: Fingers {}", self.fingers.value())
    }
}
