use routerjig_core::Units;
use routerjig_joint::{Cut, EdgeGeometry, EditOp, EditSpaced, Joint, RouterBit, SpacingStrategy};
use routerjig_settings::{Config, SpacingKind};
use std::collections::BTreeSet;

fn session(board_width: i32, cuts: &[(i32, i32)]) -> EditSpaced {
    let bit = RouterBit::new(Units::default(), 16, 24, 0.0).unwrap();
    let geom = EdgeGeometry::new(&bit, board_width, 2);
    let cuts = cuts.iter().map(|&(a, b)| Cut::new(a, b)).collect();
    EditSpaced::new(geom, cuts, 20).unwrap()
}

fn spans(edit: &EditSpaced) -> Vec<(i32, i32)> {
    edit.cuts().iter().map(|c| (c.xmin, c.xmax)).collect()
}

#[test]
fn test_trim_left_rejected_as_a_batch() {
    let mut edit = session(240, &[(0, 16), (16, 32)]);
    assert_eq!(edit.active(), &BTreeSet::from([0]));

    let status = edit.apply(EditOp::TrimLeft);
    assert!(status.warning);
    assert_eq!(spans(&edit), vec![(0, 16), (16, 32)]);

    edit.apply(EditOp::ActivateAll);
    let status = edit.apply(EditOp::TrimLeft);
    assert!(status.warning);
    assert_eq!(spans(&edit), vec![(0, 16), (16, 32)]);
}

#[test]
fn test_undo_after_rejected_edit_does_nothing() {
    let mut edit = session(240, &[(16, 32), (48, 64)]);
    assert!(!edit.apply(EditOp::MoveLeft).warning);
    assert!(!edit.apply(EditOp::MoveRight).warning);
    // moving right again would crowd cut 2
    assert!(edit.apply(EditOp::MoveRight).warning);

    edit.apply(EditOp::Undo);
    assert_eq!(spans(&edit), vec![(15, 31), (48, 64)]);
    edit.apply(EditOp::Undo);
    assert_eq!(spans(&edit), vec![(16, 32), (48, 64)]);
    assert!(edit.apply(EditOp::Undo).warning);
}

#[test]
fn test_undo_keeps_cursor_and_active_cuts() {
    let mut edit = session(240, &[(16, 32), (64, 80), (120, 136)]);
    edit.apply(EditOp::CursorNext);
    edit.apply(EditOp::Toggle);
    edit.apply(EditOp::MoveRight);
    assert_eq!(spans(&edit), vec![(17, 33), (65, 81), (120, 136)]);

    edit.apply(EditOp::DeactivateAll);
    edit.apply(EditOp::CursorNext);
    edit.apply(EditOp::Undo);

    assert_eq!(spans(&edit), vec![(16, 32), (64, 80), (120, 136)]);
    assert_eq!(edit.cursor(), 2);
    assert!(edit.active().is_empty());
}

#[test]
fn test_edits_keep_a_valid_partition() {
    let mut edit = session(240, &[(16, 32), (64, 80), (120, 136)]);
    let ops = [
        EditOp::ActivateAll,
        EditOp::MoveLeft,
        EditOp::WidenRight,
        EditOp::Add,
        EditOp::WidenLeft,
        EditOp::MoveRight,
        EditOp::ActivateAll,
        EditOp::TrimRight,
        EditOp::CursorPrevious,
        EditOp::Toggle,
        EditOp::DeleteActive,
        EditOp::Add,
        EditOp::Add,
    ];
    for op in ops {
        edit.apply(op);
        let cuts = edit.cuts();
        assert!(!cuts.is_empty());
        assert!(cuts.iter().all(|c| 0 <= c.xmin && c.xmin < c.xmax && c.xmax <= 240));
        assert!(cuts.windows(2).all(|w| w[0].xmax <= w[1].xmin));
        assert!(edit.cursor() < cuts.len());
        assert!(edit.active().iter().all(|&i| i < cuts.len()));
    }
}

#[test]
fn test_move_to_edge_then_delete() {
    let mut edit = session(64, &[(0, 3), (40, 56)]);
    edit.apply(EditOp::MoveLeft);
    assert_eq!(spans(&edit), vec![(0, 2), (40, 56)]);
    // shrinking to a single increment at the edge deletes the cut
    let status = edit.apply(EditOp::MoveLeft);
    assert!(!status.warning);
    assert_eq!(spans(&edit), vec![(40, 56)]);

    // the last remaining cut is never deleted
    edit.apply(EditOp::ActivateAll);
    assert!(edit.apply(EditOp::DeleteActive).warning);
    assert_eq!(spans(&edit), vec![(40, 56)]);
}

#[test]
fn test_undo_after_board_narrows() {
    let mut joint = Joint::new(&Config::default()).unwrap();
    joint.set_spacing_kind(SpacingKind::Edit).unwrap();
    joint.edit(EditOp::ActivateAll).unwrap();
    assert!(!joint.edit(EditOp::MoveLeft).unwrap().warning);
    assert!(joint.spacing().as_edit().unwrap().can_undo());

    joint.set_board_width(120).unwrap();
    assert!(!joint.spacing().as_edit().unwrap().can_undo());

    for _ in 0..2 {
        let status = joint.edit(EditOp::Undo).unwrap();
        assert!(status.warning);
        assert!(joint.spacing().cuts().iter().all(|c| c.xmax <= 120));
    }
}
