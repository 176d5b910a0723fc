//=========================================================================
// Raw Input Types
//
// Defines the engine-side representation of raw device samples.
//
// This module abstracts away platform-specific input (e.g. Winit) into a
// small, portable vocabulary consumed by the input tracker:
//
// - `KeyCode`: physical key identifier
// - `KeyAction`: the raw action sampled for a key (press / release)
//
// Event Flow:
// ```text
// Platform Layer (Winit)
//         ↓
//    KeyCode + KeyAction (this module)
//         ↓
//    InputTracker (per-key state machine)
//         ↓
//    Event::Keyboard (published on the event bus)
// ```
//
//=========================================================================

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced.
/// For example, `KeyW` is always the same physical key regardless of
/// keyboard layout (QWERTY vs AZERTY).
///
/// `Ord` gives the input tracker a stable processing order, so key
/// transitions within one frame are always published in the same order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------

    /// Number row: 0-9
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------

    /// Letter keys: A-Z (physical location, not character)
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------

    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Special Keys -----------------------------------------------------

    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    ShiftLeft,
    ControlLeft,
    F1,

    /// Fallback for keys the platform layer does not map.
    ///
    /// The platform adapter filters these out before they reach the
    /// tracker.
    Unidentified,
}

//=== KeyAction ===========================================================

/// Raw action reported by the device layer for a single key.
///
/// Auto-repeat is not an action of its own: the platform adapter drops
/// repeats, since the key is already held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    Press,
    Release,
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keycode_is_copy() {
        let key = KeyCode::KeyW;
        let copied = key;
        assert_eq!(key, copied);
    }

    #[test]
    fn keycode_order_follows_declaration() {
        assert!(KeyCode::Digit9 < KeyCode::KeyA);
        assert!(KeyCode::KeyA < KeyCode::KeyW);
        assert!(KeyCode::KeyW < KeyCode::Space);
    }

    #[test]
    fn key_actions_are_distinct() {
        assert_ne!(KeyAction::Press, KeyAction::Release);
    }
}
