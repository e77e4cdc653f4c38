//! Event adapter: raw input to named menu transitions.

use std::time::Instant;

use log::trace;

use crate::event::{Event, Key, MouseButton};

use super::Menu;

/// Whether a handler used the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// The event was handled; stop propagating it.
    Consumed,
    /// The event should continue to other handlers.
    Ignored,
}

impl EventResult {
    pub fn is_consumed(self) -> bool {
        self == EventResult::Consumed
    }
}

impl Menu {
    /// Translate a raw event into a transition, hit-testing against the
    /// layout of the last render.
    pub fn handle_event(&mut self, event: &Event, now: Instant) -> EventResult {
        if !self.is_open() && !self.layout.layers.is_empty() {
            // Closed from outside since the last render
            self.layout.layers.clear();
        }

        match *event {
            Event::MouseMove { x, y } => {
                let target = self.layout.hit(x, y);
                trace!("menu {}: pointer over {:?}", self.id, target);
                self.pointer_moved(target, now);
                EventResult::Ignored
            }
            Event::Click {
                x,
                y,
                button: MouseButton::Left,
            } => {
                let target = self.layout.hit(x, y);
                self.click(target, now)
            }
            Event::Click { .. } => EventResult::Ignored,
            Event::Key {
                key: Key::Escape, ..
            } => self.escape(),
            Event::Key { .. } => EventResult::Ignored,
            Event::Resize { .. } => {
                // Submenu anchors were captured against the old layout
                self.close();
                EventResult::Ignored
            }
        }
    }
}
