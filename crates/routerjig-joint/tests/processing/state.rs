use routerjig_core::MeasurementSystem;
use routerjig_joint::{BoardRole, EditOp, Joint, JointState, SpacingState, SpacingStrategy};
use routerjig_settings::{Config, SpacingKind};
use tempfile::TempDir;

fn assert_same_joint(a: &Joint, b: &Joint) {
    for (x, y) in a.boards().iter().zip(b.boards()) {
        assert_eq!(x, y);
    }
    assert_eq!(a.geometry(), b.geometry());
    assert_eq!(a.title(), b.title());
}

fn round_trip(joint: &Joint, config: &Config) -> Joint {
    let json = joint.state().to_json().unwrap();
    let state = JointState::from_json(&json).unwrap();
    Joint::from_state(&state, config).unwrap()
}

#[test]
fn test_round_trip_each_spacing() {
    let config = Config::default();
    for kind in [SpacingKind::Equal, SpacingKind::Variable, SpacingKind::Edit] {
        let mut joint = Joint::new(&config).unwrap();
        joint.set_spacing_kind(kind).unwrap();
        let restored = round_trip(&joint, &config);
        assert_eq!(restored.spacing().kind(), kind);
        assert_same_joint(&joint, &restored);
    }
}

#[test]
fn test_round_trip_edited_dovetail_with_inserts() {
    let mut config = Config::default();
    config.bit.angle = 7.0;
    let mut joint = Joint::new(&config).unwrap();
    joint.set_double_active(true).unwrap();
    joint.set_dheight(BoardRole::Double, 1).unwrap();
    joint.set_wood(BoardRole::Double, "padauk");
    joint.set_spacing_kind(SpacingKind::Edit).unwrap();
    joint.edit(EditOp::MoveLeft).unwrap();
    joint.edit(EditOp::Add).unwrap();

    let restored = round_trip(&joint, &config);
    assert_same_joint(&joint, &restored);
    assert_eq!(restored.board(BoardRole::Double).wood(), "padauk");
    match restored.state().spacing {
        SpacingState::Edit { cuts } => assert_eq!(cuts.len(), joint.spacing().cuts().len()),
        other => panic!("unexpected spacing {:?}", other),
    }
}

#[test]
fn test_round_trip_through_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("joint.json");
    let config = Config::default();

    let mut joint = Joint::new(&config).unwrap();
    joint.set_equal_params(4, 20, false).unwrap();
    joint.state().save_to_file(&path).unwrap();

    let state = JointState::load_from_file(&path).unwrap();
    assert_eq!(state, joint.state());
    let restored = Joint::from_state(&state, &config).unwrap();
    assert_same_joint(&joint, &restored);
}

#[test]
fn test_inconsistent_state_rejected() {
    let config = Config::default();
    let joint = Joint::new(&config).unwrap();

    let mut state = joint.state();
    state.boards[1].width += 1;
    assert!(Joint::from_state(&state, &config).is_err());

    let mut state = joint.state();
    state.boards[3].active = true;
    assert!(Joint::from_state(&state, &config).is_err());

    let mut state = joint.state();
    state.spacing = SpacingState::Edit { cuts: vec![(300, 320)] };
    assert!(Joint::from_state(&state, &config).is_err());
}

#[test]
fn test_restore_metric_joint_under_imperial_config() {
    let mut metric = Config::default();
    metric.units.measurement_system = MeasurementSystem::Metric;
    metric.units.num_increments = 2;
    metric.bit.width = 12.0;
    metric.bit.depth = 19.0;
    metric.boards.width = 200.0;
    metric.boards.height = 50.0;
    metric.spacing.min_finger_width = 1.5;
    metric.spacing.caul_trim = 0.8;
    metric.layout.margin = 6.0;
    metric.layout.template_height = 19.0;
    let joint = Joint::new(&metric).unwrap();

    // the imperial config's layout lengths land in half-millimetre increments
    let restored = Joint::from_state(&joint.state(), &Config::default()).unwrap();
    assert_eq!(restored.geometry().template.height, 38.0);
    assert_eq!(restored.geometry().template.origin.y, 13.0);
    assert_eq!(restored.spacing().cuts(), joint.spacing().cuts());
    assert_eq!(restored.bit(), joint.bit());
}
