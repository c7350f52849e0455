//! Idle / dragging lifecycle for the single held piece.

use super::geometry::Point;
use super::piece::PieceId;
use super::store::PieceStore;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        id: PieceId,
        /// Pointer position minus the piece's top-left at pick time.
        grab: Point,
    },
}

impl DragState {
    pub fn held(&self) -> Option<PieceId> {
        match *self {
            DragState::Idle => None,
            DragState::Dragging { id, .. } => Some(id),
        }
    }

    /// Picks the topmost unconnected piece under `at` and brings it to the
    /// front. Ignored while another piece is already held.
    pub fn press(&mut self, store: &mut PieceStore, at: Point) -> bool {
        if self.held().is_some() {
            return false;
        }
        let Some(id) = store.topmost_at(at) else { return false; };
        let Some(piece) = store.get_mut(id) else { return false; };
        piece.is_dragging = true;
        let grab = Point::new(at.x - piece.current_x, at.y - piece.current_y);
        store.bring_to_front(id);
        *self = DragState::Dragging { id, grab };
        true
    }

    /// Follows the pointer, preserving the grab point. No clamping.
    pub fn drag(&mut self, store: &mut PieceStore, at: Point) -> bool {
        let DragState::Dragging { id, grab } = *self else { return false; };
        let Some(piece) = store.get_mut(id) else { return false; };
        if !piece.is_dragging {
            return false;
        }
        piece.move_to(Point::new(at.x - grab.x, at.y - grab.y));
        true
    }

    /// Scales the grab offset along with the pieces on resize.
    pub fn rescale(&mut self, ratio: f64) {
        if let DragState::Dragging { grab, .. } = self {
            *grab = Point::new(grab.x * ratio, grab.y * ratio);
        }
    }

    /// Drops the held piece and returns its id for snap evaluation. The state
    /// is Idle afterwards whatever the evaluation decides.
    pub fn release(&mut self, store: &mut PieceStore) -> Option<PieceId> {
        let id = self.held()?;
        *self = DragState::Idle;
        if let Some(piece) = store.get_mut(id) {
            piece.is_dragging = false;
        }
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::geometry::{PuzzleLayout, Rect};

    fn store() -> PieceStore {
        let mut store =
            PieceStore::from_layout(&PuzzleLayout::from_region(Rect::new(40.0, 40.0, 100.0, 100.0), 2));
        store.get_mut(0).unwrap().move_to(Point::new(200.0, 200.0));
        store.get_mut(1).unwrap().move_to(Point::new(220.0, 220.0));
        store
    }

    #[test]
    fn press_picks_topmost_and_records_grab_offset() {
        let mut store = store();
        let mut drag = DragState::default();
        assert!(drag.press(&mut store, Point::new(230.0, 235.0)));
        assert_eq!(drag, DragState::Dragging { id: 1, grab: Point::new(10.0, 15.0) });
        assert!(store.get(1).unwrap().is_dragging);
        assert_eq!(store.as_slice().last().unwrap().id, 1);
    }

    #[test]
    fn press_on_empty_space_stays_idle() {
        let mut store = store();
        let mut drag = DragState::default();
        assert!(!drag.press(&mut store, Point::new(5.0, 5.0)));
        assert_eq!(drag, DragState::Idle);
        assert!(store.iter().all(|p| !p.is_dragging));
    }

    #[test]
    fn drag_preserves_grab_point_without_clamping() {
        let mut store = store();
        let mut drag = DragState::default();
        drag.press(&mut store, Point::new(210.0, 210.0));
        assert_eq!(drag.held(), Some(0));
        assert!(drag.drag(&mut store, Point::new(-100.0, 5000.0)));
        assert_eq!(store.get(0).unwrap().position(), Point::new(-110.0, 4990.0));
    }

    #[test]
    fn rescale_scales_grab_offset_only_while_dragging() {
        let mut idle = DragState::Idle;
        idle.rescale(2.0);
        assert_eq!(idle, DragState::Idle);

        let mut store = store();
        let mut drag = DragState::default();
        drag.press(&mut store, Point::new(230.0, 235.0));
        drag.rescale(0.5);
        assert_eq!(drag, DragState::Dragging { id: 1, grab: Point::new(5.0, 7.5) });
    }

    #[test]
    fn second_press_while_dragging_is_ignored() {
        let mut store = store();
        let mut drag = DragState::default();
        drag.press(&mut store, Point::new(210.0, 210.0));
        assert!(!drag.press(&mut store, Point::new(250.0, 250.0)));
        assert_eq!(drag.held(), Some(0));
        assert_eq!(store.iter().filter(|p| p.is_dragging).count(), 1);
    }

    #[test]
    fn release_clears_flag_and_returns_to_idle() {
        let mut store = store();
        let mut drag = DragState::default();
        drag.press(&mut store, Point::new(210.0, 210.0));
        assert_eq!(drag.release(&mut store), Some(0));
        assert_eq!(drag, DragState::Idle);
        assert!(!store.get(0).unwrap().is_dragging);
        assert_eq!(drag.release(&mut store), None);
        assert!(!drag.drag(&mut store, Point::new(0.0, 0.0)));
    }
}
