//=========================================================================
// Input Processor
//=========================================================================
//
// Converts Winit device events into raw input tracker samples.
//
// Architecture:
//   Winit Events → InputProcessor → (KeyCode, KeyAction) / scroll position
//                                 → InputTracker::process_*()
//
// Key repeats and unmapped keys (F13-F24, exotic keyboards) are filtered
// (returns None). Wheel deltas are accumulated into an absolute scroll
// position, since the tracker computes deltas between positions itself.
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    event::{ElementState, KeyEvent, MouseScrollDelta},
    keyboard::{KeyCode as WinitKeyCode, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::{KeyAction, KeyCode};

//=== Constants ===========================================================

/// Pixel deltas (touchpads) are scaled down to wheel lines.
const PIXELS_PER_LINE: f64 = 20.0;

//=== InputProcessor ======================================================

/// Converts Winit events to tracker samples, keeping the accumulated
/// scroll position.
pub(crate) struct InputProcessor {
    scroll_position: f64,
}

impl InputProcessor {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new() -> Self {
        Self { scroll_position: 0.0 }
    }

    //--- Event Processing -------------------------------------------------

    /// Converts a Winit KeyEvent (filters repeats and unmapped keys).
    pub(crate) fn process_key_event(&self, key_event: &KeyEvent) -> Option<(KeyCode, KeyAction)> {
        map_key(key_event.physical_key, key_event.state, key_event.repeat)
    }

    /// Adds a wheel delta and returns the new absolute scroll position.
    pub(crate) fn process_mouse_wheel(&mut self, delta: MouseScrollDelta) -> f64 {
        let lines = match delta {
            MouseScrollDelta::LineDelta(_, y) => f64::from(y),
            MouseScrollDelta::PixelDelta(position) => position.y / PIXELS_PER_LINE,
        };
        self.scroll_position += lines;
        self.scroll_position
    }

    #[cfg(test)]
    pub(crate) fn scroll_position(&self) -> f64 {
        self.scroll_position
    }
}

//--- Internal Helpers ----------------------------------------------------

fn map_key(
    physical_key: PhysicalKey,
    state: ElementState,
    repeat: bool,
) -> Option<(KeyCode, KeyAction)> {
    if repeat {
        return None;
    }

    let key_code = match physical_key {
        PhysicalKey::Code(code) => KeyCode::from(code),
        _ => return None,
    };

    if matches!(key_code, KeyCode::Unidentified) {
        return None;
    }

    Some((key_code, KeyAction::from(state)))
}

//=========================================================================
// Winit Conversions
//=========================================================================

impl From<ElementState> for KeyAction {
    fn from(state: ElementState) -> Self {
        match state {
            ElementState::Pressed => KeyAction::Press,
            ElementState::Released => KeyAction::Release,
        }
    }
}

/// Converts Winit physical key codes to engine key codes.
///
/// Maps A-Z, 0-9, arrows, and common special keys. Everything else
/// returns `KeyCode::Unidentified`.
impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode::*;
        match code {
            //--- Digits -------------------------------------------------------

            Digit0 => KeyCode::Digit0,
            Digit1 => KeyCode::Digit1,
            Digit2 => KeyCode::Digit2,
            Digit3 => KeyCode::Digit3,
            Digit4 => KeyCode::Digit4,
            Digit5 => KeyCode::Digit5,
            Digit6 => KeyCode::Digit6,
            Digit7 => KeyCode::Digit7,
            Digit8 => KeyCode::Digit8,
            Digit9 => KeyCode::Digit9,

            //--- Letters ------------------------------------------------------

            KeyA => KeyCode::KeyA,
            KeyB => KeyCode::KeyB,
            KeyC => KeyCode::KeyC,
            KeyD => KeyCode::KeyD,
            KeyE => KeyCode::KeyE,
            KeyF => KeyCode::KeyF,
            KeyG => KeyCode::KeyG,
            KeyH => KeyCode::KeyH,
            KeyI => KeyCode::KeyI,
            KeyJ => KeyCode::KeyJ,
            KeyK => KeyCode::KeyK,
            KeyL => KeyCode::KeyL,
            KeyM => KeyCode::KeyM,
            KeyN => KeyCode::KeyN,
            KeyO => KeyCode::KeyO,
            KeyP => KeyCode::KeyP,
            KeyQ => KeyCode::KeyQ,
            KeyR => KeyCode::KeyR,
            KeyS => KeyCode::KeyS,
            KeyT => KeyCode::KeyT,
            KeyU => KeyCode::KeyU,
            KeyV => KeyCode::KeyV,
            KeyW => KeyCode::KeyW,
            KeyX => KeyCode::KeyX,
            KeyY => KeyCode::KeyY,
            KeyZ => KeyCode::KeyZ,

            //--- Arrows -------------------------------------------------------

            ArrowUp => KeyCode::ArrowUp,
            ArrowDown => KeyCode::ArrowDown,
            ArrowLeft => KeyCode::ArrowLeft,
            ArrowRight => KeyCode::ArrowRight,

            //--- Special ------------------------------------------------------

            Space => KeyCode::Space,
            Enter => KeyCode::Enter,
            Escape => KeyCode::Escape,
            Tab => KeyCode::Tab,
            Backspace => KeyCode::Backspace,
            ShiftLeft => KeyCode::ShiftLeft,
            ControlLeft => KeyCode::ControlLeft,
            F1 => KeyCode::F1,

            //--- Unmapped (return Unidentified) -------------------------------

            _ => KeyCode::Unidentified,
        }
    }
}

//=========================================================================
// Tests
//=========================================================================
