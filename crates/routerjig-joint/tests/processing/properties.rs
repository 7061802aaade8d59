use proptest::prelude::*;
use routerjig_core::{Fixed, Units};
use routerjig_joint::{
    adjoining_cuts, Board, BoardRole, Cut, EdgeGeometry, EquallySpaced, Joint, RouterBit,
    SpacingStrategy, VariableSpaced,
};
use routerjig_settings::{Config, SpacingKind};

/// True if the passes clear the cut and stay inside it, both within the
/// bit tolerance. Footprints are clipped to the board.
fn passes_cover(cut: &Cut, bit: &RouterBit, board_width: i32) -> bool {
    let half = bit.halfwidth();
    let tol = bit.tolerance();
    let xmin = Fixed::from(cut.xmin);
    let xmax = Fixed::from(cut.xmax);

    let mut covered = xmin;
    for &p in &cut.passes {
        let lo = (p - half).max(Fixed::ZERO);
        let hi = (p + half).min(Fixed::from(board_width));
        if lo < xmin - tol || hi > xmax + tol || lo > covered + tol {
            return false;
        }
        covered = covered.max(hi);
    }
    covered >= xmax - tol
}

fn is_partition(cuts: &[Cut], board_width: i32) -> bool {
    cuts.iter()
        .all(|c| 0 <= c.xmin && c.xmin < c.xmax && c.xmax <= board_width)
        && cuts.windows(2).all(|w| w[0].xmax <= w[1].xmin)
}

fn spans(cuts: &[Cut]) -> Vec<(i32, i32)> {
    cuts.iter().map(|c| (c.xmin, c.xmax)).collect()
}

fn angle() -> impl Strategy<Value = f64> {
    prop_oneof![Just(0.0), Just(7.0), Just(10.0), Just(14.0)]
}

proptest! {
    #[test]
    fn interior_passes_cover_cut(
        bit_width in 4i32..40,
        xmin in 1i32..200,
        extra in 0i32..120,
    ) {
        let bit = RouterBit::new(Units::default(), bit_width, 24, 0.0).unwrap();
        let board_width = 400;
        let mut cut = Cut::new(xmin, xmin + bit_width + extra);
        cut.make_router_passes(&bit, board_width).unwrap();
        prop_assert!(passes_cover(&cut, &bit, board_width));
        prop_assert!(cut.passes.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn edge_passes_cover_cut(
        bit_width in 4i32..40,
        width in 1i32..100,
        at_left in any::<bool>(),
    ) {
        let bit = RouterBit::new(Units::default(), bit_width, 24, 0.0).unwrap();
        let board_width = 240;
        let mut cut = if at_left {
            Cut::new(0, width)
        } else {
            Cut::new(board_width - width, board_width)
        };
        cut.make_router_passes(&bit, board_width).unwrap();
        prop_assert!(passes_cover(&cut, &bit, board_width));
    }

    #[test]
    fn strategies_are_idempotent(
        board_width in 80i32..600,
        bit_width in 8i32..32,
        angle in angle(),
        spacing in 0i32..16,
    ) {
        let bit = RouterBit::new(Units::default(), bit_width, 24, angle);
        prop_assume!(bit.is_ok());
        let bit = bit.unwrap();
        let geom = EdgeGeometry::new(&bit, board_width, 2);

        if let Ok(mut equal) = EquallySpaced::with_params(geom.clone(), spacing, bit_width, true) {
            let before = equal.cuts().to_vec();
            equal.recompute_cuts().unwrap();
            prop_assert_eq!(equal.cuts(), before.as_slice());
            prop_assert!(is_partition(equal.cuts(), board_width));
        }
        if let Ok(mut variable) = VariableSpaced::new(geom) {
            let before = variable.cuts().to_vec();
            variable.recompute_cuts().unwrap();
            prop_assert_eq!(variable.cuts(), before.as_slice());
            prop_assert!(is_partition(variable.cuts(), board_width));
        }
    }

    #[test]
    fn cut_boards_keeps_partitions(
        board_width in 120i32..480,
        bit_width in 8i32..24,
        angle in angle(),
        variable in any::<bool>(),
        double in any::<bool>(),
        dheight in 0i32..4,
    ) {
        let mut config = Config::default();
        config.bit.width = bit_width as f64 / 32.0;
        config.bit.angle = angle;
        config.boards.width = board_width as f64 / 32.0;
        config.boards.double_active = double;
        config.boards.double_thickness = dheight as f64 / 32.0;
        config.spacing.default_kind = if variable { SpacingKind::Variable } else { SpacingKind::Equal };
        let joint = Joint::new(&config);
        prop_assume!(joint.is_ok());
        let joint = joint.unwrap();

        for board in joint.boards().iter().filter(|b| b.is_active()) {
            for cuts in [board.bottom_cuts(), board.top_cuts()].into_iter().flatten() {
                prop_assert!(is_partition(cuts, board_width));
                for cut in cuts {
                    prop_assert!(passes_cover(cut, joint.bit(), board_width));
                }
            }
        }
    }

    #[test]
    fn adjoining_twice_restores_cuts(
        board_width in 80i32..480,
        bit_width in 8i32..32,
        angle in angle(),
        spacing in 0i32..16,
        centered in any::<bool>(),
    ) {
        let bit = RouterBit::new(Units::default(), bit_width, 24, angle);
        prop_assume!(bit.is_ok());
        let bit = bit.unwrap();
        let geom = EdgeGeometry::new(&bit, board_width, 2);
        let equal = EquallySpaced::with_params(geom, spacing, bit_width, centered);
        prop_assume!(equal.is_ok());
        let equal = equal.unwrap();
        let cuts = equal.cuts();

        // an edge cut no wider than the dovetail offset has no mating finger
        let offset = bit.offset().round_half_up();
        prop_assume!(cuts.iter().all(|c| !c.touches_left() || c.xmax > offset));
        prop_assume!(cuts.iter().all(|c| !c.touches_right(board_width) || c.xmin + offset < board_width));

        let board = Board::new(BoardRole::Bottom, board_width, 64).unwrap();
        let mating = adjoining_cuts(cuts, &bit, &board);
        let restored = adjoining_cuts(&mating, &bit, &board);
        prop_assert_eq!(spans(&restored), spans(cuts));

        if angle == 0.0 {
            let total: i32 = cuts.iter().chain(&mating).map(Cut::width).sum();
            prop_assert_eq!(total, board_width);
        }
    }
}
