//! Pointer interaction: drag-to-pan and click-to-pick.
//!
//! A small state machine over `Idle`/`Dragging`, gated by a selection flag.
//! While selecting, dragging is disabled entirely so a user can place a pin
//! without accidentally panning; while not selecting, clicks never produce
//! picks. Pan deltas are computed incrementally against the last pointer
//! position, so the net pan equals the net pointer displacement regardless
//! of how many move events the host delivers.

use crate::core::geo::{GeoPoint, PixelPoint, PixelVec};
use crate::rendering::viewport::Viewport;

#[derive(Debug, Clone, Copy, PartialEq)]
enum DragState {
    Idle,
    Dragging { last: PixelPoint },
}

#[derive(Debug)]
pub struct InteractionController {
    drag: DragState,
    selecting: bool,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractionController {
    pub fn new() -> Self {
        Self {
            drag: DragState::Idle,
            selecting: false,
        }
    }

    pub fn is_selecting(&self) -> bool {
        self.selecting
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    /// Enter or leave location-selection mode. Entering cancels any drag in
    /// progress; the two modes are mutually exclusive.
    pub fn set_selecting(&mut self, selecting: bool) {
        self.selecting = selecting;
        if selecting {
            self.drag = DragState::Idle;
        }
    }

    /// Pointer pressed on the canvas. Starts a drag unless selecting.
    /// Non-finite positions are rejected before they can reach the viewport.
    pub fn pointer_down(&mut self, pos: PixelPoint) {
        if self.selecting || !pos.is_finite() {
            return;
        }
        self.drag = DragState::Dragging { last: pos };
    }

    /// Pointer moved. While dragging, pans by the delta since the previous
    /// event and re-anchors on the current position.
    pub fn pointer_move(&mut self, pos: PixelPoint, viewport: &mut Viewport) {
        if !pos.is_finite() {
            return;
        }
        if let DragState::Dragging { last } = self.drag {
            viewport.pan(PixelVec::new(pos.x - last.x, pos.y - last.y));
            self.drag = DragState::Dragging { last: pos };
        }
    }

    pub fn pointer_up(&mut self) {
        self.drag = DragState::Idle;
    }

    /// Pointer left the canvas: treat like a release so the drag doesn't
    /// keep following the cursor outside.
    pub fn pointer_left(&mut self) {
        self.drag = DragState::Idle;
    }

    /// Resolve a click to a geographic pick. Returns a point only when
    /// selecting and the unprojected coordinate lies inside the park bounds;
    /// out-of-bounds clicks are silently dropped.
    pub fn click(&self, pos: PixelPoint, viewport: &Viewport) -> Option<GeoPoint> {
        if !self.selecting || !pos.is_finite() {
            return None;
        }
        let coords = viewport.unproject(pos);
        viewport.bounds().contains(coords).then_some(coords)
    }
}
