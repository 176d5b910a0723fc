//=========================================================================
// Bus Events
//=========================================================================
//
// Immutable, `Copy` events routed by the event bus.
//
// Every event has a kind (`EventKind`); subscribers register per kind and
// receive their own copy of each matching event.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::input::{KeyCode, KeyState};

//=== EventKind ===========================================================

/// Routing key for subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    MouseMoved,
    MouseScrolled,
    Keyboard,
}

//=== Event ===============================================================

/// An event delivered to observers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// Cursor moved since the previous sample. `dy` is positive upwards.
    MouseMoved { dx: f64, dy: f64 },

    /// Scroll position changed since the previous sample.
    MouseScrolled { dy: f64 },

    /// A key changed state.
    Keyboard { key: KeyCode, state: KeyState },
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::MouseMoved { .. } => EventKind::MouseMoved,
            Event::MouseScrolled { .. } => EventKind::MouseScrolled,
            Event::Keyboard { .. } => EventKind::Keyboard,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        assert_eq!(
            Event::MouseMoved { dx: 1.0, dy: 2.0 }.kind(),
            EventKind::MouseMoved
        );
        assert_eq!(Event::MouseScrolled { dy: 1.0 }.kind(), EventKind::MouseScrolled);
        assert_eq!(
            Event::Keyboard { key: KeyCode::KeyW, state: KeyState::Pressed }.kind(),
            EventKind::Keyboard
        );
    }

    #[test]
    fn event_is_copy() {
        let event = Event::MouseScrolled { dy: 3.0 };
        let copied = event;
        assert_eq!(event, copied);
    }
}
