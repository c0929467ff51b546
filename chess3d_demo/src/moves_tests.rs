use super::*;
use crate::layout::{PieceColor, PieceKind};
use chess3d_engine::chess3d::scene::NodeDesc;
use chess3d_engine::glam::Vec3;

fn sample_move(index: usize) -> Move {
    Move {
        piece: PieceId(index),
        kind: MoveKind::Relocation,
        start: Square { row: 1, col: 0 },
        end: Square::new(2, 0),
        eliminated: false,
        start_transform: Mat4::IDENTITY,
        end_transform: Mat4::IDENTITY,
    }
}

fn pieces_of(history: &MoveHistory) -> Vec<usize> {
    history.moves().iter().map(|m| m.piece().0).collect()
}

// ============================================================================
// Snapshot
// ============================================================================

#[test]
fn test_snapshot_captures_committed_and_pending_state() {
    let mut scene = Scene::new();
    let transform = Mat4::from_translation(Vec3::new(0.0, 0.0, 0.1));
    let node = scene.instantiate(&NodeDesc::mesh("p_white_pawn1").with_transform(transform));
    let start = Square { row: 1, col: 0 };
    let mut piece = Piece::new(node, "p_white_pawn1", PieceColor::White, PieceKind::Pawn, start, transform);
    piece.move_up(&mut scene, 0.0835);

    let mv = Move::snapshot(PieceId(0), &piece, &scene, MoveKind::Relocation).unwrap();

    assert_eq!(mv.start(), start);
    assert_eq!(mv.end(), Square::new(2, 0));
    assert!(!mv.is_eliminated());
    assert_eq!(*mv.start_transform(), transform);
    assert_eq!(*mv.end_transform(), piece.live_transform(&scene));
}

#[test]
fn test_snapshot_of_eliminated_piece_is_none() {
    let mut scene = Scene::new();
    let node = scene.instantiate(&NodeDesc::mesh("p_black_pawn1"));
    let mut piece = Piece::new(
        node, "p_black_pawn1", PieceColor::Black, PieceKind::Pawn,
        Square { row: 6, col: 0 }, Mat4::IDENTITY,
    );
    piece.remove(&mut scene, &Mat4::IDENTITY, 0, 0.09);

    assert!(Move::snapshot(PieceId(0), &piece, &scene, MoveKind::Relocation).is_none());
}

#[test]
fn test_capture_overrides() {
    let mut mv = sample_move(0);
    mv.set_eliminated(true);
    mv.set_end_position(None);
    assert!(mv.is_eliminated());
    assert_eq!(mv.end(), None);
}

// ============================================================================
// History
// ============================================================================

#[test]
fn test_push_advances_cursor() {
    let mut history = MoveHistory::new();
    assert_eq!(history.cursor(), None);

    history.push(sample_move(0));
    history.push(sample_move(1));

    assert_eq!(history.cursor(), Some(1));
    assert_eq!(history.len(), 2);
    assert!(history.can_undo());
    assert!(!history.can_redo());
}

#[test]
fn test_push_after_partial_undo_truncates() {
    let mut history = MoveHistory::new();
    for i in 0..4 {
        history.push(sample_move(i));
    }
    history.retreat();
    history.retreat();

    history.push(sample_move(9));

    assert_eq!(pieces_of(&history), vec![0, 1, 9]);
    assert_eq!(history.cursor(), Some(2));
    assert!(!history.can_redo());
}

#[test]
fn test_push_after_full_undo_clears_log() {
    let mut history = MoveHistory::new();
    history.push(sample_move(0));
    history.push(sample_move(1));
    history.retreat();
    history.retreat();
    assert_eq!(history.cursor(), None);
    assert!(history.can_redo());

    history.push(sample_move(7));

    assert_eq!(pieces_of(&history), vec![7]);
    assert_eq!(history.cursor(), Some(0));
}

#[test]
fn test_retreat_and_advance() {
    let mut history = MoveHistory::new();
    history.push(sample_move(0));
    history.push(sample_move(1));

    assert_eq!(history.retreat().map(|m| m.piece()), Some(PieceId(1)));
    assert_eq!(history.current().map(|m| m.piece()), Some(PieceId(0)));
    assert_eq!(history.retreat().map(|m| m.piece()), Some(PieceId(0)));
    assert_eq!(history.retreat(), None);
    assert_eq!(history.current(), None);

    assert_eq!(history.advance().map(|m| m.piece()), Some(PieceId(0)));
    assert_eq!(history.advance().map(|m| m.piece()), Some(PieceId(1)));
    assert_eq!(history.advance(), None);
    assert_eq!(history.cursor(), Some(1));
}

#[test]
fn test_empty_history() {
    let mut history = MoveHistory::new();
    assert!(history.is_empty());
    assert!(!history.can_undo());
    assert!(!history.can_redo());
    assert_eq!(history.advance(), None);
    assert_eq!(history.retreat(), None);

    history.push(sample_move(0));
    history.clear();
    assert!(history.is_empty());
    assert_eq!(history.cursor(), None);
}
