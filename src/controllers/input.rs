// src/controllers/input.rs
//
// Host events the controller understands. Coordinates are canvas pixels.
// Touch and window visibility are folded into the same events here, so
// the window callbacks stay one-liners.

use nannou::prelude::*;

use crate::models::geometry::distance_sq;

/// Farthest a finger may travel between press and lift and still count
/// as a tap.
pub const TAP_SLOP: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerMoved { x: f32, y: f32 },
    PointerEntered,
    PointerLeft,
    Clicked { x: f32, y: f32 },
    Resized { width: f32, height: f32 },
    VisibilityChanged(bool),
}

impl InputEvent {
    pub fn pointer_at(p: Vec2) -> Self {
        InputEvent::PointerMoved { x: p.x, y: p.y }
    }
}

/// A touching finger acts as the pointer. Lifting it leaves the canvas,
/// and a short tap also clicks where it landed.
#[derive(Debug, Default)]
pub struct TouchTracker {
    // first finger down, with where it went down
    tap: Option<(u64, Vec2)>,
}

impl TouchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&mut self, id: u64, phase: TouchPhase, at: Vec2) -> Vec<InputEvent> {
        match phase {
            TouchPhase::Started => {
                if self.tap.is_none() {
                    self.tap = Some((id, at));
                }
                vec![InputEvent::pointer_at(at)]
            }
            TouchPhase::Moved => vec![InputEvent::pointer_at(at)],
            TouchPhase::Ended => {
                let mut events = Vec::with_capacity(2);
                if let Some(start) = self.take_tap(id) {
                    if distance_sq(start, at) <= TAP_SLOP * TAP_SLOP {
                        events.push(InputEvent::Clicked { x: at.x, y: at.y });
                    }
                }
                events.push(InputEvent::PointerLeft);
                events
            }
            TouchPhase::Cancelled => {
                self.take_tap(id);
                vec![InputEvent::PointerLeft]
            }
        }
    }

    fn take_tap(&mut self, id: u64) -> Option<Vec2> {
        match self.tap {
            Some((tap_id, start)) if tap_id == id => {
                self.tap = None;
                Some(start)
            }
            _ => None,
        }
    }
}

/// The window counts as visible unless the user paused it or the OS
/// reports it fully covered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostVisibility {
    user_paused: bool,
    occluded: bool,
}

impl HostVisibility {
    pub fn is_visible(&self) -> bool {
        !(self.user_paused || self.occluded)
    }

    pub fn is_user_paused(&self) -> bool {
        self.user_paused
    }

    pub fn toggle_pause(&mut self) -> InputEvent {
        self.user_paused = !self.user_paused;
        InputEvent::VisibilityChanged(self.is_visible())
    }

    pub fn set_occluded(&mut self, occluded: bool) -> InputEvent {
        self.occluded = occluded;
        InputEvent::VisibilityChanged(self.is_visible())
    }
}
