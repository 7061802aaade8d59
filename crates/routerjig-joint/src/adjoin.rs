//! Cuts induced on a facing board edge.
//!
//! The fingers left between one board's cuts become the cuts of the board it
//! mates with, shifted by the bit offset so dovetail sides line up and
//! narrowed by the facing board's insert thickness.

use crate::bit::RouterBit;
use crate::board::Board;
use crate::cut::Cut;
use routerjig_core::Fixed;
use tracing::debug;

/// Cuts on `board` that receive the fingers left between `cuts`.
///
/// Edge cuts narrower than the board's `dheight` (or empty) are dropped. An
/// interior cut is never narrower than the bit. An uncut edge faces a single
/// cut across the whole board.
pub fn adjoining_cuts(cuts: &[Cut], bit: &RouterBit, board: &Board) -> Vec<Cut> {
    let width = board.width();
    let dh = board.dheight();
    let offset = bit.offset();
    let mut adjoining = Vec::with_capacity(cuts.len() + 1);

    let (first, last) = match (cuts.first(), cuts.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return vec![Cut::new(0, width)],
    };

    if first.xmin > 0 {
        let right = (Fixed::from(first.xmin) + offset).round_half_up() - dh;
        if right > 0 && right >= dh {
            adjoining.push(Cut::new(0, right.min(width)));
        }
    }

    for pair in cuts.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        let left = (Fixed::from(prev.xmax) - offset + dh).round_half_up().max(0);
        let right = (left + bit.width())
            .max((Fixed::from(next.xmin) + offset).round_half_up() - dh)
            .min(width);
        if right > left {
            adjoining.push(Cut::new(left, right));
        }
    }

    if last.xmax < width {
        let left = (Fixed::from(last.xmax) - offset).round_half_up() + dh;
        let span = width - left;
        if span > 0 && span >= dh {
            adjoining.push(Cut::new(left.max(0), width));
        }
    }

    debug!(
        "{} adjoining cuts on {} board (dheight {})",
        adjoining.len(),
        board.role(),
        dh
    );
    adjoining
}

/// Cuts for the caul template: each cut widened by `trim` on its interior
/// sides, clipped to the board, and merged with any cut it now touches.
pub fn caul_cuts(cuts: &[Cut], board_width: i32, trim: i32) -> Vec<Cut> {
    let mut caul: Vec<Cut> = Vec::with_capacity(cuts.len());
    for cut in cuts {
        let xmin = if cut.touches_left() {
            0
        } else {
            (cut.xmin - trim).max(0)
        };
        let xmax = if cut.touches_right(board_width) {
            board_width
        } else {
            (cut.xmax + trim).min(board_width)
        };
        match caul.last_mut() {
            Some(prev) if prev.xmax >= xmin => prev.xmax = prev.xmax.max(xmax),
            _ => caul.push(Cut::new(xmin, xmax)),
        }
    }
    caul
}
