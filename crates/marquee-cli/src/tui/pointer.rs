//! Mouse to pointer-event translation
//!
//! Crossterm reports raw cell coordinates for the whole terminal. The lane only
//! cares about events relative to its own area, plus synthetic enter and leave
//! events as the mouse crosses the area's edge.

use std::time::Duration;

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use marquee_core::events::{Point, PointerEvent, PointerEventKind};
use ratatui::layout::{Position, Rect};

/// Lane units per terminal cell
pub const CELL_UNITS: f32 = 8.0;

/// Wheel notches reported for one terminal scroll event
pub const WHEEL_STEP: f32 = 4.0;

/// Tracks hover and drag across mouse events
#[derive(Debug, Default)]
pub struct PointerTracker {
    inside: bool,
    dragging: bool,
    /// Last lane-relative position seen, used for synthetic leaves
    last_point: Point,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Translate one mouse event against the lane area
    pub fn translate(&mut self, mouse: MouseEvent, area: Rect, at: Duration) -> Vec<PointerEvent> {
        let point = lane_point(mouse, area);
        self.last_point = point;
        let over = area.contains(Position::new(mouse.column, mouse.row));
        let mut events = Vec::new();

        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(MouseButton::Left) => {
                if !self.cross_edge(over, point, at, &mut events) && self.dragging {
                    events.push(PointerEvent::new(PointerEventKind::Move, point, at));
                }
            }
            MouseEventKind::Down(MouseButton::Left) if over => {
                self.cross_edge(over, point, at, &mut events);
                self.dragging = true;
                events.push(PointerEvent::new(PointerEventKind::Down, point, at));
            }
            MouseEventKind::Up(MouseButton::Left) if self.dragging => {
                self.dragging = false;
                events.push(PointerEvent::new(PointerEventKind::Up, point, at));
            }
            MouseEventKind::ScrollDown if over => {
                events.push(PointerEvent::wheel(point, at, WHEEL_STEP));
            }
            MouseEventKind::ScrollUp if over => {
                events.push(PointerEvent::wheel(point, at, -WHEEL_STEP));
            }
            _ => {}
        }
        events
    }

    /// The mouse left the terminal without crossing the lane edge
    pub fn focus_lost(&mut self, at: Duration) -> Vec<PointerEvent> {
        if !self.inside {
            return Vec::new();
        }
        self.inside = false;
        self.dragging = false;
        vec![PointerEvent::new(PointerEventKind::Leave, self.last_point, at)]
    }

    /// Emit enter or leave when the mouse crosses the lane edge. Returns true on leave.
    fn cross_edge(
        &mut self,
        over: bool,
        point: Point,
        at: Duration,
        events: &mut Vec<PointerEvent>,
    ) -> bool {
        match (self.inside, over) {
            (false, true) => {
                self.inside = true;
                events.push(PointerEvent::new(PointerEventKind::Enter, point, at));
                false
            }
            (true, false) => {
                self.inside = false;
                // Leaving releases the drag on the engine side
                self.dragging = false;
                events.push(PointerEvent::new(PointerEventKind::Leave, point, at));
                true
            }
            _ => false,
        }
    }
}

/// Mouse position relative to the lane area, in lane units
fn lane_point(mouse: MouseEvent, area: Rect) -> Point {
    Point::new(
        (f32::from(mouse.column) - f32::from(area.x)) * CELL_UNITS,
        (f32::from(mouse.row) - f32::from(area.y)) * CELL_UNITS,
    )
}
