//! Puzzle interaction engine: owns the pieces, the drag state machine and the
//! hint overlay, and queues notifications for the session layer.

use rand::Rng;

use super::drag::DragState;
use super::geometry::{
    ImageSize, Point, PuzzleLayout, Size, SurfaceMetrics, grid_size_for, scatter_area,
    scatter_position,
};
use super::hint::HintController;
use super::piece::{Piece, PieceId};
use super::snap::{SnapOutcome, evaluate_release};
use super::store::PieceStore;
use crate::config::{Difficulty, DifficultyProfile, Tuning};
use crate::error::EngineError;

#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    /// Must be a perfect square.
    pub piece_count: u32,
    pub difficulty: Difficulty,
    pub tuning: Tuning,
}

impl EngineConfig {
    pub fn new(piece_count: u32, difficulty: Difficulty) -> Self {
        Self { piece_count, difficulty, tuning: Tuning::default() }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineEvent {
    PieceConnected { id: PieceId, connected: usize, total: usize },
    /// Emitted once per game, right after the last connection.
    PuzzleComplete,
}

/// Read-only view handed to the renderer.
#[derive(Clone, Copy, Debug)]
pub struct Scene<'a> {
    pub surface: Size,
    pub layout: &'a PuzzleLayout,
    pub image: ImageSize,
    pub pieces: &'a [Piece],
    pub show_outline: bool,
    pub show_hint: bool,
}

/// `T` is the hint expiry timer handle.
#[derive(Debug)]
pub struct PuzzleEngine<T> {
    config: EngineConfig,
    profile: DifficultyProfile,
    grid_size: u32,
    surface: SurfaceMetrics,
    image: ImageSize,
    layout: PuzzleLayout,
    store: PieceStore,
    drag: DragState,
    hint: HintController<T>,
    events: Vec<EngineEvent>,
    initialized: bool,
    paused: bool,
    active: bool,
    completed: bool,
}

impl<T> PuzzleEngine<T> {
    pub fn new(
        config: EngineConfig,
        surface: SurfaceMetrics,
        image: ImageSize,
    ) -> Result<Self, EngineError> {
        let grid_size = grid_size_for(config.piece_count)?;
        image.validate()?;
        let layout = PuzzleLayout::compute(&surface, grid_size, &config.tuning)?;
        let profile = DifficultyProfile::for_difficulty(config.difficulty, &config.tuning);
        Ok(Self {
            config,
            profile,
            grid_size,
            surface,
            image,
            layout,
            store: PieceStore::default(),
            drag: DragState::Idle,
            hint: HintController::default(),
            events: Vec::new(),
            initialized: false,
            paused: false,
            active: true,
            completed: false,
        })
    }

    /// Lays out the puzzle, creates every piece and scatters them. Calling it
    /// again starts a fresh game on the same image.
    pub fn initialize<R: Rng>(&mut self, rng: &mut R) -> Result<(), EngineError> {
        self.layout = PuzzleLayout::compute(&self.surface, self.grid_size, &self.config.tuning)?;
        self.store = PieceStore::from_layout(&self.layout);
        self.drag = DragState::Idle;
        self.hint.cancel();
        self.events.clear();
        self.completed = false;
        self.shuffle(rng);
        self.initialized = true;
        Ok(())
    }

    fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        let tuning = &self.config.tuning;
        let area = scatter_area(&self.surface, tuning);
        let keep_out = self
            .profile
            .avoid_target_on_scatter
            .then(|| self.layout.region.inflate(tuning.target_clearance));
        for piece in self.store.iter_mut() {
            let size = Size { width: piece.width, height: piece.height };
            let pos = scatter_position(rng, &area, size, keep_out.as_ref(), tuning.scatter_attempts);
            piece.move_to(pos);
        }
    }

    /// Re-runs the layout for a new surface. Connected pieces move to their
    /// new slots; loose pieces keep their place relative to the puzzle origin.
    pub fn resize(&mut self, surface: SurfaceMetrics) -> Result<(), EngineError> {
        let layout = PuzzleLayout::compute(&surface, self.grid_size, &self.config.tuning)?;
        let old = self.layout;
        let ratio = layout.piece_size / old.piece_size;
        for piece in self.store.iter_mut() {
            let slot = layout.slot(piece.row, piece.col);
            piece.correct_x = slot.x;
            piece.correct_y = slot.y;
            piece.width = slot.width;
            piece.height = slot.height;
            if piece.is_connected {
                piece.current_x = slot.x;
                piece.current_y = slot.y;
            } else {
                piece.current_x = layout.region.x + (piece.current_x - old.region.x) * ratio;
                piece.current_y = layout.region.y + (piece.current_y - old.region.y) * ratio;
            }
        }
        self.drag.rescale(ratio);
        self.surface = surface;
        self.layout = layout;
        Ok(())
    }

    fn accepts_input(&self) -> bool {
        self.active && self.initialized && !self.paused
    }

    /// Returns true when the scene changed and needs a repaint.
    pub fn pointer_down(&mut self, at: Point) -> bool {
        self.accepts_input() && self.drag.press(&mut self.store, at)
    }

    pub fn pointer_move(&mut self, at: Point) -> bool {
        self.accepts_input() && self.drag.drag(&mut self.store, at)
    }

    /// Release (or cancel) of the held piece, followed by the snap check.
    pub fn pointer_up(&mut self) -> bool {
        if !self.accepts_input() {
            return false;
        }
        let Some(id) = self.drag.release(&mut self.store) else { return false; };
        if let SnapOutcome::Connected { id, completed } =
            evaluate_release(&mut self.store, id, self.profile.snap_threshold)
        {
            self.events.push(EngineEvent::PieceConnected {
                id,
                connected: self.store.connected_count(),
                total: self.store.len(),
            });
            if completed && !self.completed {
                self.completed = true;
                self.events.push(EngineEvent::PuzzleComplete);
            }
        }
        true
    }

    /// Freezes input. An in-progress drag is kept and continues on resume.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// See [`HintController::show`].
    pub fn show_hint(&mut self, schedule: impl FnOnce(u32) -> T) -> bool {
        if !self.active || !self.initialized {
            return false;
        }
        self.hint.show(self.config.tuning.hint_duration_ms, schedule)
    }

    /// Hint timer callback; a no-op once the engine is destroyed.
    pub fn expire_hint(&mut self) -> Option<T> {
        if !self.active {
            return None;
        }
        self.hint.expire()
    }

    pub fn hint_active(&self) -> bool {
        self.hint.is_active()
    }

    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn destroy(&mut self) {
        self.active = false;
        self.hint.cancel();
        self.events.clear();
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn connected_count(&self) -> usize {
        self.store.connected_count()
    }

    pub fn piece_count(&self) -> usize {
        self.store.len()
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    pub fn held_piece(&self) -> Option<PieceId> {
        self.drag.held()
    }

    pub fn grid_size(&self) -> u32 {
        self.grid_size
    }

    pub fn layout(&self) -> &PuzzleLayout {
        &self.layout
    }

    pub fn surface(&self) -> SurfaceMetrics {
        self.surface
    }

    pub fn pieces(&self) -> &[Piece] {
        self.store.as_slice()
    }

    pub fn difficulty(&self) -> Difficulty {
        self.config.difficulty
    }

    pub fn tuning(&self) -> &Tuning {
        &self.config.tuning
    }

    pub fn scene(&self) -> Scene<'_> {
        Scene {
            surface: self.surface.logical_size(),
            layout: &self.layout,
            image: self.image,
            pieces: self.store.as_slice(),
            show_outline: self.profile.show_outline,
            show_hint: self.hint.is_active(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::geometry::{Rect, rects_overlap};
    use crate::puzzle::hint::tests::ManualTimers;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    const IMAGE: ImageSize = ImageSize { width: 600, height: 600 };

    /// 230x230 surface with padding 40 and full fraction: region (40,40) 150x150.
    fn example_engine(difficulty: Difficulty, pieces: u32) -> PuzzleEngine<u32> {
        let tuning = Tuning { puzzle_fraction: 1.0, ..Tuning::default() };
        let config = EngineConfig { piece_count: pieces, difficulty, tuning };
        let mut engine =
            PuzzleEngine::new(config, SurfaceMetrics::new(230, 230, 1.0), IMAGE).unwrap();
        engine.initialize(&mut SmallRng::seed_from_u64(1)).unwrap();
        engine
    }

    fn park(engine: &mut PuzzleEngine<u32>, id: PieceId, x: f64, y: f64) {
        engine.store.get_mut(id).unwrap().move_to(Point::new(x, y));
        engine.store.bring_to_front(id);
    }

    fn drop_piece_at(engine: &mut PuzzleEngine<u32>, id: PieceId, x: f64, y: f64) {
        let from = engine.store.get(id).unwrap().position();
        assert!(engine.pointer_down(Point::new(from.x + 1.0, from.y + 1.0)));
        assert_eq!(engine.held_piece(), Some(id));
        assert!(engine.pointer_move(Point::new(x + 1.0, y + 1.0)));
        assert!(engine.pointer_up());
    }

    #[test]
    fn rejects_invalid_configuration() {
        let surface = SurfaceMetrics::new(600, 600, 1.0);
        assert!(matches!(
            PuzzleEngine::<()>::new(EngineConfig::new(10, Difficulty::Easy), surface, IMAGE),
            Err(EngineError::NonSquarePieceCount { count: 10 })
        ));
        assert!(matches!(
            PuzzleEngine::<()>::new(
                EngineConfig::new(9, Difficulty::Easy),
                SurfaceMetrics::new(0, 0, 1.0),
                IMAGE
            ),
            Err(EngineError::EmptySurface { .. })
        ));
        assert!(matches!(
            PuzzleEngine::<()>::new(
                EngineConfig::new(9, Difficulty::Easy),
                surface,
                ImageSize { width: 0, height: 10 }
            ),
            Err(EngineError::EmptyImage { .. })
        ));
    }

    #[test]
    fn initialize_scatters_unconnected_pieces_inside_bounds() {
        let mut engine: PuzzleEngine<u32> = PuzzleEngine::new(
            EngineConfig::new(16, Difficulty::Easy),
            SurfaceMetrics::new(1200, 1200, 2.0),
            IMAGE,
        )
        .unwrap();
        engine.initialize(&mut SmallRng::seed_from_u64(42)).unwrap();
        let area = Rect::new(20.0, 20.0, 560.0, 560.0);
        let keep_out = engine.layout().region.inflate(20.0);
        assert_eq!(engine.piece_count(), 16);
        for p in engine.pieces() {
            assert!(!p.is_connected && !p.is_dragging);
            assert!(p.current_x >= area.x && p.current_x + p.width <= area.right());
            assert!(p.current_y >= area.y && p.current_y + p.height <= area.bottom());
            assert!(!rects_overlap(&p.bounds(), &keep_out));
        }
        assert_eq!(engine.connected_count(), 0);
    }

    #[test]
    fn hard_tier_scatters_inside_bounds_without_keep_out() {
        let mut engine: PuzzleEngine<u32> = PuzzleEngine::new(
            EngineConfig::new(64, Difficulty::Hard),
            SurfaceMetrics::new(1200, 1200, 2.0),
            IMAGE,
        )
        .unwrap();
        engine.initialize(&mut SmallRng::seed_from_u64(7)).unwrap();
        let area = Rect::new(20.0, 20.0, 560.0, 560.0);
        let region = engine.layout().region;
        assert_eq!(engine.piece_count(), 64);
        for p in engine.pieces() {
            assert!(!p.is_connected);
            assert!(p.current_x >= area.x && p.current_x + p.width <= area.right());
            assert!(p.current_y >= area.y && p.current_y + p.height <= area.bottom());
        }
        // no keep-out zone: with 64 pieces some land on the puzzle region
        assert!(engine.pieces().iter().any(|p| rects_overlap(&p.bounds(), &region)));
    }

    #[test]
    fn example_release_near_slot_connects_exactly() {
        let mut engine = example_engine(Difficulty::Easy, 9);
        let piece = engine.store.get(0).unwrap();
        assert_eq!((piece.correct_x, piece.correct_y, piece.width), (40.0, 40.0, 50.0));

        park(&mut engine, 0, 150.0, 180.0);
        drop_piece_at(&mut engine, 0, 45.0, 42.0);
        let piece = engine.store.get(0).unwrap();
        assert!(piece.is_connected && !piece.is_dragging);
        assert_eq!((piece.current_x, piece.current_y), (40.0, 40.0));
        assert_eq!(
            engine.drain_events(),
            vec![EngineEvent::PieceConnected { id: 0, connected: 1, total: 9 }]
        );
        assert_eq!(engine.connected_count(), 1);
    }

    #[test]
    fn example_release_far_from_slot_stays_put() {
        let mut engine = example_engine(Difficulty::Easy, 9);
        park(&mut engine, 0, 150.0, 180.0);
        drop_piece_at(&mut engine, 0, 80.0, 80.0);
        let piece = engine.store.get(0).unwrap();
        assert!(!piece.is_connected);
        assert_eq!((piece.current_x, piece.current_y), (80.0, 80.0));
        assert!(engine.drain_events().is_empty());
        assert_eq!(engine.held_piece(), None);
    }

    #[test]
    fn hard_tier_uses_tighter_threshold_and_no_outline() {
        let mut engine = example_engine(Difficulty::Hard, 9);
        assert!(!engine.scene().show_outline);
        park(&mut engine, 0, 150.0, 180.0);
        drop_piece_at(&mut engine, 0, 65.0, 40.0);
        assert!(!engine.store.get(0).unwrap().is_connected);
        drop_piece_at(&mut engine, 0, 55.0, 40.0);
        assert!(engine.store.get(0).unwrap().is_connected);
    }

    #[test]
    fn connected_pieces_cannot_be_picked() {
        let mut engine = example_engine(Difficulty::Easy, 9);
        park(&mut engine, 0, 150.0, 180.0);
        drop_piece_at(&mut engine, 0, 40.0, 40.0);
        engine.drain_events();
        let before = engine.pieces().to_vec();
        assert!(!engine.pointer_down(Point::new(41.0, 41.0)) || engine.held_piece() != Some(0));
        assert!(engine.store.get(0).unwrap().is_connected);
        assert_eq!(engine.store.get(0).unwrap().position(), before.iter().find(|p| p.id == 0).unwrap().position());
    }

    #[test]
    fn completion_fires_exactly_once() {
        let mut engine = example_engine(Difficulty::Easy, 4);
        let mut events = Vec::new();
        let ids: Vec<PieceId> = engine.pieces().iter().map(|p| p.id).collect();
        for id in ids {
            park(&mut engine, id, 180.0, 180.0);
            let target = engine.store.get(id).unwrap().target();
            drop_piece_at(&mut engine, id, target.x + 3.0, target.y - 3.0);
            events.extend(engine.drain_events());
            if id < 3 {
                assert!(!engine.is_complete());
            }
        }
        let completions = events.iter().filter(|e| **e == EngineEvent::PuzzleComplete).count();
        assert_eq!(completions, 1);
        assert_eq!(events.last(), Some(&EngineEvent::PuzzleComplete));
        assert!(engine.is_complete());

        assert!(!engine.pointer_down(Point::new(50.0, 50.0)));
        assert!(!engine.pointer_up());
        assert!(engine.drain_events().is_empty());
    }

    #[test]
    fn pause_freezes_input_but_keeps_drag() {
        let mut engine = example_engine(Difficulty::Easy, 9);
        park(&mut engine, 0, 150.0, 180.0);
        assert!(engine.pointer_down(Point::new(151.0, 181.0)));
        engine.pause();
        assert!(!engine.pointer_move(Point::new(10.0, 10.0)));
        assert!(!engine.pointer_up());
        assert_eq!(engine.store.get(0).unwrap().position(), Point::new(150.0, 180.0));
        assert!(engine.store.get(0).unwrap().is_dragging);
        assert!(!engine.pointer_down(Point::new(151.0, 181.0)));

        engine.resume();
        assert_eq!(engine.held_piece(), Some(0));
        assert!(engine.pointer_move(Point::new(171.0, 191.0)));
        assert_eq!(engine.store.get(0).unwrap().position(), Point::new(170.0, 190.0));
        assert!(engine.pointer_up());
        assert_eq!(engine.held_piece(), None);
    }

    #[test]
    fn hint_overlay_expires_and_ignores_repeat() {
        let mut engine = example_engine(Difficulty::Easy, 9);
        let mut timers = ManualTimers::default();
        assert!(engine.show_hint(|d| timers.schedule(d)));
        assert!(engine.scene().show_hint);
        timers.advance(500);
        assert!(!engine.show_hint(|d| timers.schedule(d)));
        for _ in timers.advance(1500) {
            engine.expire_hint();
        }
        assert!(!engine.hint_active());
    }

    #[test]
    fn destroy_cancels_hint_and_input() {
        let mut engine = example_engine(Difficulty::Easy, 9);
        let mut timers = ManualTimers::default();
        engine.show_hint(|d| timers.schedule(d));
        engine.destroy();
        assert!(!engine.is_active());
        assert!(!engine.hint_active());
        assert_eq!(engine.expire_hint(), None);
        assert!(!engine.show_hint(|d| timers.schedule(d)));
        park(&mut engine, 0, 150.0, 180.0);
        assert!(!engine.pointer_down(Point::new(151.0, 181.0)));
    }

    #[test]
    fn input_before_initialize_is_ignored() {
        let mut engine: PuzzleEngine<u32> = PuzzleEngine::new(
            EngineConfig::new(9, Difficulty::Easy),
            SurfaceMetrics::new(600, 600, 1.0),
            IMAGE,
        )
        .unwrap();
        assert!(!engine.pointer_down(Point::new(300.0, 300.0)));
        assert_eq!(engine.piece_count(), 0);
    }

    #[test]
    fn resize_moves_connected_pieces_to_new_slots() {
        let mut engine = example_engine(Difficulty::Easy, 9);
        park(&mut engine, 0, 150.0, 180.0);
        drop_piece_at(&mut engine, 0, 40.0, 40.0);
        park(&mut engine, 1, 200.0, 40.0);
        engine.resize(SurfaceMetrics::new(460, 460, 1.0)).unwrap();
        // padding 40, fraction 1.0, cap 300 -> region (80,80) 300x300
        assert_eq!(engine.layout().region, Rect::new(80.0, 80.0, 300.0, 300.0));
        let p0 = engine.store.get(0).unwrap();
        assert_eq!((p0.current_x, p0.current_y), (80.0, 80.0));
        assert_eq!(p0.width, 100.0);
        let p1 = engine.store.get(1).unwrap();
        assert_eq!((p1.correct_x, p1.correct_y), (180.0, 80.0));
        assert_eq!((p1.current_x, p1.current_y), (400.0, 80.0));
    }

    #[test]
    fn resize_mid_drag_keeps_grab_point_under_pointer() {
        let mut engine = example_engine(Difficulty::Easy, 9);
        park(&mut engine, 0, 150.0, 180.0);
        assert!(engine.pointer_down(Point::new(175.0, 205.0)));
        engine.resize(SurfaceMetrics::new(460, 460, 1.0)).unwrap();
        // ratio 2: piece now at (300,360), 100x100, grab (50,50)
        let p0 = engine.store.get(0).unwrap();
        assert_eq!((p0.current_x, p0.current_y), (300.0, 360.0));
        assert!(engine.pointer_move(Point::new(350.0, 410.0)));
        assert_eq!(engine.store.get(0).unwrap().position(), Point::new(300.0, 360.0));
        assert!(engine.pointer_move(Point::new(360.0, 430.0)));
        assert_eq!(engine.store.get(0).unwrap().position(), Point::new(310.0, 380.0));
    }

    #[test]
    fn reinitialize_starts_a_fresh_game() {
        let mut engine = example_engine(Difficulty::Easy, 4);
        park(&mut engine, 0, 180.0, 180.0);
        drop_piece_at(&mut engine, 0, 40.0, 40.0);
        engine.initialize(&mut SmallRng::seed_from_u64(9)).unwrap();
        assert_eq!(engine.connected_count(), 0);
        assert!(engine.drain_events().is_empty());
        assert!(!engine.is_complete());
    }
}
