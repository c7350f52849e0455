//! Pointer input normalization: raw client coordinates from mouse or touch
//! events become play-surface coordinates.

use web_sys::{DomRect, HtmlCanvasElement, MouseEvent, TouchEvent};

use crate::puzzle::{Point, Size};
use crate::state::TouchPoint;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Cancel,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerInput {
    pub phase: PointerPhase,
    /// Client coordinates; `None` for releases, which carry no position.
    pub client: Option<Point>,
}

/// On-screen box of the canvas (CSS pixels).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl From<&DomRect> for ScreenRect {
    fn from(r: &DomRect) -> Self {
        Self { left: r.left(), top: r.top(), width: r.width(), height: r.height() }
    }
}

/// Subtracts the canvas origin, then scales by logical surface size over
/// on-screen size, which folds in both the pixel ratio and CSS resizing.
pub fn to_surface(client: Point, screen: ScreenRect, surface: Size) -> Option<Point> {
    if screen.width <= 0.0 || screen.height <= 0.0 {
        return None;
    }
    Some(Point::new(
        (client.x - screen.left) * (surface.width / screen.width),
        (client.y - screen.top) * (surface.height / screen.height),
    ))
}

pub fn canvas_screen_rect(canvas: &HtmlCanvasElement) -> ScreenRect {
    ScreenRect::from(&canvas.get_bounding_client_rect())
}

pub fn mouse_client(e: &MouseEvent) -> Point {
    Point::new(e.client_x() as f64, e.client_y() as f64)
}

/// Every active touch point, in list order.
pub fn active_touches(e: &TouchEvent) -> Vec<TouchPoint> {
    let list = e.touches();
    (0..list.length())
        .filter_map(|i| list.item(i))
        .map(|t| TouchPoint {
            id: t.identifier(),
            client: Point::new(t.client_x() as f64, t.client_y() as f64),
        })
        .collect()
}

/// Touches that ended or were cancelled by this event.
pub fn changed_touch_ids(e: &TouchEvent) -> Vec<i32> {
    let list = e.changed_touches();
    (0..list.length()).filter_map(|i| list.item(i)).map(|t| t.identifier()).collect()
}
