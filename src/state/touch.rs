//! Single-pointer touch tracking: the first finger down owns the drag and
//! any further simultaneous touches are ignored.

use crate::input::{PointerInput, PointerPhase};
use crate::puzzle::Point;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchPoint {
    pub id: i32,
    pub client: Point,
}

#[derive(Default, Debug, Clone)]
pub struct TouchState {
    primary: Option<i32>,
}

impl TouchState {
    pub fn primary(&self) -> Option<i32> {
        self.primary
    }

    /// `touches` is the full active list after the touchstart.
    pub fn start(&mut self, touches: &[TouchPoint]) -> Option<PointerInput> {
        if self.primary.is_some() {
            return None;
        }
        let first = touches.first()?;
        self.primary = Some(first.id);
        Some(PointerInput { phase: PointerPhase::Down, client: Some(first.client) })
    }

    pub fn moved(&mut self, touches: &[TouchPoint]) -> Option<PointerInput> {
        let id = self.primary?;
        let t = touches.iter().find(|t| t.id == id)?;
        Some(PointerInput { phase: PointerPhase::Move, client: Some(t.client) })
    }

    /// `changed` holds the identifiers lifted (or cancelled) by this event.
    pub fn ended(&mut self, changed: &[i32], cancelled: bool) -> Option<PointerInput> {
        let id = self.primary?;
        if !changed.contains(&id) {
            return None;
        }
        self.primary = None;
        let phase = if cancelled { PointerPhase::Cancel } else { PointerPhase::Up };
        Some(PointerInput { phase, client: None })
    }
}
