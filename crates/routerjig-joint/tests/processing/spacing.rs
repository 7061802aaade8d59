use routerjig_core::Units;
use routerjig_joint::{
    Cut, EdgeGeometry, EquallySpaced, RouterBit, SpacingError, SpacingStrategy, VariableSpaced,
};

fn geometry(board_width: i32, bit_width: i32, angle: f64) -> EdgeGeometry {
    let bit = RouterBit::new(Units::default(), bit_width, 24, angle).unwrap();
    EdgeGeometry::new(&bit, board_width, 2)
}

#[test]
fn test_equal_spacing_tiles_board() {
    let equal = EquallySpaced::with_params(geometry(240, 16, 0.0), 0, 16, true).unwrap();
    let cuts = equal.cuts();

    assert!(cuts.contains(&Cut::new(112, 128)));
    assert_eq!(cuts.first(), Some(&Cut::new(16, 32)));
    assert_eq!(cuts.last(), Some(&Cut::new(208, 224)));
    for pair in cuts.windows(2) {
        // one bit-width finger between neighbouring cuts
        assert_eq!(pair[1].xmin - pair[0].xmax, 16);
        assert_eq!(pair[0].width(), 16);
    }
    assert_eq!(cuts[0].xmin, 240 - cuts[cuts.len() - 1].xmax);
}

#[test]
fn test_equal_spacing_board_narrower_than_bit() {
    let err = EquallySpaced::new(geometry(10, 16, 0.0)).unwrap_err();
    assert_eq!(
        err,
        SpacingError::BoardTooNarrow {
            board_width: 10,
            bit_width: 16
        }
    );
}

#[test]
fn test_equal_spacing_recompute_is_idempotent() {
    let mut equal = EquallySpaced::with_params(geometry(333, 12, 0.0), 5, 20, false).unwrap();
    let first = equal.cuts().to_vec();
    equal.set_cuts().unwrap();
    equal.set_cuts().unwrap();
    assert_eq!(equal.cuts(), first.as_slice());
}

#[test]
fn test_variable_spacing_recompute_is_idempotent() {
    let mut variable = VariableSpaced::new(geometry(400, 16, 0.0)).unwrap();
    let first = variable.cuts().to_vec();
    variable.recompute_cuts().unwrap();
    assert_eq!(variable.cuts(), first.as_slice());
}

#[test]
fn test_variable_spacing_widest_at_centre() {
    let variable = VariableSpaced::new(geometry(400, 16, 0.0)).unwrap();
    let cuts = variable.cuts();
    let centre = cuts
        .iter()
        .find(|c| c.xmin < 200 && c.xmax > 200)
        .map(Cut::width)
        .unwrap();
    assert!(cuts.iter().all(|c| c.width() <= centre));
}

#[test]
fn test_descriptions() {
    let units = Units::default();
    let equal = EquallySpaced::new(geometry(240, 16, 0.0)).unwrap();
    assert_eq!(
        equal.description(&units),
        "Equally spaced: Width 1/2\", Spacing 0\", Centered"
    );
    let variable = VariableSpaced::new(geometry(240, 16, 0.0)).unwrap();
    assert_eq!(variable.description(&units), "Variable spaced: Fingers 5");
}
