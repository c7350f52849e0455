//! Release-time placement check and completion detection.

use super::piece::PieceId;
use super::store::PieceStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SnapOutcome {
    /// Piece locked into its slot. `completed` is true when it was the last one.
    Connected { id: PieceId, completed: bool },
    /// Too far away; the piece stays where it was dropped.
    Missed,
}

/// Locks `id` into its slot when both axis deltas are strictly below
/// `threshold`. Already connected or unknown pieces are a miss.
pub fn evaluate_release(store: &mut PieceStore, id: PieceId, threshold: f64) -> SnapOutcome {
    let Some(piece) = store.get_mut(id) else { return SnapOutcome::Missed; };
    if piece.is_connected {
        return SnapOutcome::Missed;
    }
    let dx = (piece.current_x - piece.correct_x).abs();
    let dy = (piece.current_y - piece.correct_y).abs();
    if dx >= threshold || dy >= threshold {
        return SnapOutcome::Missed;
    }
    piece.current_x = piece.correct_x;
    piece.current_y = piece.correct_y;
    piece.is_connected = true;
    piece.is_dragging = false;
    SnapOutcome::Connected { id, completed: store.all_connected() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::geometry::{Point, PuzzleLayout, Rect};

    fn store() -> PieceStore {
        PieceStore::from_layout(&PuzzleLayout::from_region(Rect::new(40.0, 40.0, 150.0, 150.0), 3))
    }

    #[test]
    fn close_release_snaps_exactly() {
        let mut store = store();
        store.get_mut(0).unwrap().move_to(Point::new(45.0, 42.0));
        assert_eq!(
            evaluate_release(&mut store, 0, 30.0),
            SnapOutcome::Connected { id: 0, completed: false }
        );
        let p = store.get(0).unwrap();
        assert!(p.is_connected);
        assert_eq!((p.current_x, p.current_y), (40.0, 40.0));
    }

    #[test]
    fn far_release_leaves_piece_untouched() {
        let mut store = store();
        store.get_mut(0).unwrap().move_to(Point::new(80.0, 80.0));
        assert_eq!(evaluate_release(&mut store, 0, 30.0), SnapOutcome::Missed);
        let p = store.get(0).unwrap();
        assert!(!p.is_connected);
        assert_eq!((p.current_x, p.current_y), (80.0, 80.0));
    }

    #[test]
    fn threshold_is_strict_on_each_axis() {
        let mut store = store();
        store.get_mut(0).unwrap().move_to(Point::new(70.0, 40.0));
        assert_eq!(evaluate_release(&mut store, 0, 30.0), SnapOutcome::Missed);
        store.get_mut(0).unwrap().move_to(Point::new(40.0, 10.0));
        assert_eq!(evaluate_release(&mut store, 0, 30.0), SnapOutcome::Missed);
        store.get_mut(0).unwrap().move_to(Point::new(69.5, 10.5));
        assert!(matches!(evaluate_release(&mut store, 0, 30.0), SnapOutcome::Connected { .. }));
    }

    #[test]
    fn last_connection_reports_completion_once() {
        let mut store = PieceStore::from_layout(&PuzzleLayout::from_region(
            Rect::new(0.0, 0.0, 100.0, 100.0),
            2,
        ));
        for id in 0..3 {
            assert_eq!(
                evaluate_release(&mut store, id, 20.0),
                SnapOutcome::Connected { id, completed: false }
            );
        }
        assert_eq!(
            evaluate_release(&mut store, 3, 20.0),
            SnapOutcome::Connected { id: 3, completed: true }
        );
        assert_eq!(evaluate_release(&mut store, 3, 20.0), SnapOutcome::Missed);
    }
}
