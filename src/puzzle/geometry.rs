//! Puzzle geometry: surface metrics, the square puzzle region, per-slot
//! rectangles and the scatter placement used when a game starts.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::Tuning;
use crate::error::EngineError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Grows the rectangle by `amount` on every side.
    pub fn inflate(&self, amount: f64) -> Self {
        Self::new(
            self.x - amount,
            self.y - amount,
            self.width + amount * 2.0,
            self.height + amount * 2.0,
        )
    }

    /// Edge-inclusive point containment.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }
}

/// Strict overlap: rectangles that only share an edge do not overlap.
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

/// Backing-store dimensions of the play surface plus its device pixel ratio.
/// Geometry is expressed in logical units (backing pixels / ratio), the same
/// units the pointer router produces.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SurfaceMetrics {
    pub backing_width: u32,
    pub backing_height: u32,
    pub device_pixel_ratio: f64,
}

impl SurfaceMetrics {
    pub fn new(backing_width: u32, backing_height: u32, device_pixel_ratio: f64) -> Self {
        Self { backing_width, backing_height, device_pixel_ratio }
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        let ratio_ok = self.device_pixel_ratio.is_finite() && self.device_pixel_ratio > 0.0;
        if self.backing_width == 0 || self.backing_height == 0 || !ratio_ok {
            return Err(EngineError::EmptySurface {
                width: self.backing_width,
                height: self.backing_height,
            });
        }
        Ok(())
    }

    pub fn logical_size(&self) -> Size {
        Size {
            width: self.backing_width as f64 / self.device_pixel_ratio,
            height: self.backing_height as f64 / self.device_pixel_ratio,
        }
    }
}

/// Native pixel dimensions of the decoded source image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.width == 0 || self.height == 0 {
            return Err(EngineError::EmptyImage { width: self.width, height: self.height });
        }
        Ok(())
    }

    /// Source sub-rectangle of the image cell at `row, col`.
    pub fn cell(&self, row: u32, col: u32, grid_size: u32) -> Rect {
        let w = self.width as f64 / grid_size as f64;
        let h = self.height as f64 / grid_size as f64;
        Rect::new(col as f64 * w, row as f64 * h, w, h)
    }
}

/// Side length of the square grid for `piece_count` pieces.
pub fn grid_size_for(piece_count: u32) -> Result<u32, EngineError> {
    if piece_count == 0 {
        return Err(EngineError::ZeroPieces);
    }
    let root = (piece_count as f64).sqrt().round() as u32;
    if root.checked_mul(root) != Some(piece_count) {
        return Err(EngineError::NonSquarePieceCount { count: piece_count });
    }
    Ok(root)
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PuzzleLayout {
    /// Puzzle region (where every correct slot lies).
    pub region: Rect,
    pub grid_size: u32,
    pub piece_size: f64,
}

impl PuzzleLayout {
    /// Square puzzle region centered on the surface.
    pub fn compute(
        surface: &SurfaceMetrics,
        grid_size: u32,
        tuning: &Tuning,
    ) -> Result<Self, EngineError> {
        surface.validate()?;
        let logical = surface.logical_size();
        let shortest = logical.width.min(logical.height);
        let available = shortest - tuning.puzzle_padding * 2.0;
        let puzzle_size = (available * tuning.puzzle_fraction).min(tuning.max_puzzle_size);
        if grid_size == 0 || !(puzzle_size > 0.0) {
            return Err(EngineError::SurfaceTooSmall {
                width: surface.backing_width,
                height: surface.backing_height,
            });
        }
        let region = Rect::new(
            (logical.width - puzzle_size) / 2.0,
            (logical.height - puzzle_size) / 2.0,
            puzzle_size,
            puzzle_size,
        );
        Ok(Self::from_region(region, grid_size))
    }

    pub fn from_region(region: Rect, grid_size: u32) -> Self {
        Self { region, grid_size, piece_size: region.width / grid_size as f64 }
    }

    /// Top-left of the slot at `row, col`.
    pub fn slot_origin(&self, row: u32, col: u32) -> Point {
        Point::new(
            self.region.x + col as f64 * self.piece_size,
            self.region.y + row as f64 * self.piece_size,
        )
    }

    pub fn slot(&self, row: u32, col: u32) -> Rect {
        let o = self.slot_origin(row, col);
        Rect::new(o.x, o.y, self.piece_size, self.piece_size)
    }
}

/// Rectangle in which scattered pieces keep their top-left corner plus size.
pub fn scatter_area(surface: &SurfaceMetrics, tuning: &Tuning) -> Rect {
    let logical = surface.logical_size();
    let m = tuning.scatter_margin;
    Rect::new(m, m, (logical.width - m * 2.0).max(0.0), (logical.height - m * 2.0).max(0.0))
}

/// Samples a top-left position for a `piece`-sized rectangle inside `area`,
/// retrying up to `attempts` times while it overlaps `keep_out`. The last
/// sample is kept when no free spot turns up.
pub fn scatter_position<R: Rng>(
    rng: &mut R,
    area: &Rect,
    piece: Size,
    keep_out: Option<&Rect>,
    attempts: u32,
) -> Point {
    let span_x = (area.width - piece.width).max(0.0);
    let span_y = (area.height - piece.height).max(0.0);
    let mut pos = Point::new(area.x, area.y);
    for _ in 0..attempts.max(1) {
        pos = Point::new(
            area.x + rng.random::<f64>() * span_x,
            area.y + rng.random::<f64>() * span_y,
        );
        let candidate = Rect::new(pos.x, pos.y, piece.width, piece.height);
        match keep_out {
            Some(zone) if rects_overlap(&candidate, zone) => continue,
            _ => break,
        }
    }
    pos
}
