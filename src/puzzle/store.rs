//! Ordered piece collection. Order is paint order and hit-test priority:
//! the last piece is drawn on top and is picked first.

use super::geometry::{Point, PuzzleLayout};
use super::piece::{Piece, PieceId};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PieceStore {
    pieces: Vec<Piece>,
}

impl PieceStore {
    /// One piece per grid cell, row-major, every piece sitting in its slot
    /// until scattered.
    pub fn from_layout(layout: &PuzzleLayout) -> Self {
        let n = layout.grid_size;
        let mut pieces = Vec::with_capacity((n * n) as usize);
        for row in 0..n {
            for col in 0..n {
                let slot = layout.slot(row, col);
                pieces.push(Piece {
                    id: row * n + col,
                    row,
                    col,
                    correct_x: slot.x,
                    correct_y: slot.y,
                    current_x: slot.x,
                    current_y: slot.y,
                    width: slot.width,
                    height: slot.height,
                    is_connected: false,
                    is_dragging: false,
                });
            }
        }
        Self { pieces }
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Pieces bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Piece> {
        self.pieces.iter_mut()
    }

    pub fn as_slice(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn index_of(&self, id: PieceId) -> Option<usize> {
        self.pieces.iter().position(|p| p.id == id)
    }

    pub fn get(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.id == id)
    }

    pub fn get_mut(&mut self, id: PieceId) -> Option<&mut Piece> {
        self.pieces.iter_mut().find(|p| p.id == id)
    }

    /// Moves the piece to the end of the ordering. Returns false for an
    /// unknown id.
    pub fn bring_to_front(&mut self, id: PieceId) -> bool {
        let Some(idx) = self.index_of(id) else { return false; };
        let piece = self.pieces.remove(idx);
        self.pieces.push(piece);
        true
    }

    /// Topmost unconnected piece whose bounds contain `p`.
    pub fn topmost_at(&self, p: Point) -> Option<PieceId> {
        self.pieces
            .iter()
            .rev()
            .find(|piece| !piece.is_connected && piece.bounds().contains(p))
            .map(|piece| piece.id)
    }

    pub fn connected_count(&self) -> usize {
        self.pieces.iter().filter(|p| p.is_connected).count()
    }

    pub fn all_connected(&self) -> bool {
        !self.is_empty() && self.pieces.iter().all(|p| p.is_connected)
    }
}
