use approx::assert_abs_diff_eq;
use routerjig_joint::{compute_fit, BoardRole, Joint};
use routerjig_settings::{Config, SpacingKind};

fn joint_with(angle: f64, kind: SpacingKind) -> Joint {
    let mut config = Config::default();
    config.bit.angle = angle;
    config.spacing.default_kind = kind;
    Joint::new(&config).unwrap()
}

#[test]
fn test_straight_bit_fits_exactly() {
    let joint = joint_with(0.0, SpacingKind::Equal);
    let geometry = joint.geometry();
    assert_abs_diff_eq!(geometry.max_gap, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(geometry.max_overlap, 0.0, epsilon = 1e-9);
    assert!(joint.fit_warnings().is_empty());
}

#[test]
fn test_dovetail_midline_rounding_leaves_a_gap() {
    // a 16 wide, 24 deep bit at 7 degrees rounds its midline to 13, so the
    // mating cuts are laid out for a run of 3 while the bit cuts a run of
    // 24 * tan(7)
    let angle = 7.0_f64.to_radians();
    let expected = (3.0 - 24.0 * angle.tan()) * angle.cos();
    for kind in [SpacingKind::Equal, SpacingKind::Variable] {
        let joint = joint_with(7.0, kind);
        let seam = &joint.geometry().seams[0];
        assert_eq!(seam.upper, BoardRole::Top);
        assert_eq!(seam.lower, BoardRole::Bottom);
        assert_abs_diff_eq!(seam.max_gap, expected, epsilon = 1e-4);
        assert_abs_diff_eq!(seam.max_overlap, 0.0, epsilon = 1e-9);
        assert!(joint.fit_warnings().is_empty());
    }
}

#[test]
fn test_zero_thickness_inserts_match_two_boards() {
    let plain = joint_with(0.0, SpacingKind::Equal);
    let mut stacked = joint_with(0.0, SpacingKind::Equal);
    stacked.set_double_active(true).unwrap();
    stacked.set_double_double_active(true).unwrap();

    assert_eq!(
        stacked.board(BoardRole::Bottom).top_cuts(),
        plain.board(BoardRole::Bottom).top_cuts()
    );
    // the double-double repeats board A's cuts
    assert_eq!(
        stacked.board(BoardRole::DoubleDouble).bottom_cuts(),
        stacked.board(BoardRole::Top).bottom_cuts()
    );
    assert_eq!(stacked.geometry().seams.len(), 3);
    assert_abs_diff_eq!(stacked.geometry().max_gap, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(stacked.geometry().max_overlap, 0.0, epsilon = 1e-9);
}

#[test]
fn test_insert_thickness_offsets_the_seam() {
    let mut joint = joint_with(0.0, SpacingKind::Equal);
    joint.set_double_active(true).unwrap();
    joint.set_dheight(BoardRole::Double, 2).unwrap();

    let top = joint.board(BoardRole::Top);
    let double = joint.board(BoardRole::Double);
    let seam = compute_fit(joint.bit(), top, double);
    assert!(seam.max_gap + seam.max_overlap > 0.0);
    assert!(!joint.fit_warnings().is_empty());
}

#[test]
fn test_pass_labels_cover_every_board() {
    let mut joint = joint_with(0.0, SpacingKind::Equal);
    joint.set_double_active(true).unwrap();
    let passes = &joint.geometry().passes;
    for prefix in ["A", "B", "C"] {
        assert!(passes.iter().any(|p| p.label == format!("{}1", prefix)));
    }
    assert!(!passes.iter().any(|p| p.label.starts_with('D')));
}
