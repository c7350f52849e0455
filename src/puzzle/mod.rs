pub mod drag;
pub mod engine;
pub mod geometry;
pub mod hint;
pub mod piece;
pub mod snap;
pub mod store;

pub use engine::{EngineConfig, EngineEvent, PuzzleEngine, Scene};
pub use geometry::{ImageSize, Point, Rect, Size, SurfaceMetrics};
pub use piece::{Piece, PieceId};
