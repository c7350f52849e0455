use serde::{Deserialize, Serialize};

use super::geometry::{Point, Rect};

pub type PieceId = u32;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Piece {
    /// `row * grid_size + col`; stable for the lifetime of a game.
    pub id: PieceId,
    pub row: u32,
    pub col: u32,
    pub correct_x: f64,
    pub correct_y: f64,
    pub current_x: f64,
    pub current_y: f64,
    pub width: f64,
    pub height: f64,
    /// Locked into its slot; never cleared once set.
    pub is_connected: bool,
    pub is_dragging: bool,
}

impl Piece {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.current_x, self.current_y, self.width, self.height)
    }

    pub fn target(&self) -> Rect {
        Rect::new(self.correct_x, self.correct_y, self.width, self.height)
    }

    pub fn move_to(&mut self, p: Point) {
        self.current_x = p.x;
        self.current_y = p.y;
    }

    pub fn position(&self) -> Point {
        Point::new(self.current_x, self.current_y)
    }
}
