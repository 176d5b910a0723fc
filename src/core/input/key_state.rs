//=========================================================================
// Key State Machine
//=========================================================================
//
// Four-state press/release machine advanced once per frame.
//
// Transitions (raw = latest action sampled this frame):
//
//   From          │ Press         Release        none
//   ──────────────┼─────────────────────────────────────────
//   Released      │ JustPressed   -              -
//   JustPressed   │ Pressed       Pressed        Pressed
//   Pressed       │ -             JustReleased   -
//   JustReleased  │ Released      Released       Released
//
// The `Just*` states always settle on the next frame, whatever the raw
// input says, so a key never stays in a transitional state for more than
// one frame.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

//=== Internal Dependencies ===============================================

use super::event::KeyAction;

//=== KeyState ============================================================

/// Per-key state as seen by gameplay code and event subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyState {
    /// Key is up and was up last frame.
    #[default]
    Released,

    /// Key went down this frame.
    JustPressed,

    /// Key is held.
    Pressed,

    /// Key went up this frame.
    JustReleased,
}

impl KeyState {
    /// Returns the state following `self` given this frame's raw action.
    pub fn next(self, raw: Option<KeyAction>) -> KeyState {
        match (self, raw) {
            (KeyState::Released, Some(KeyAction::Press)) => KeyState::JustPressed,
            (KeyState::Released, _) => KeyState::Released,
            (KeyState::JustPressed, _) => KeyState::Pressed,
            (KeyState::Pressed, Some(KeyAction::Release)) => KeyState::JustReleased,
            (KeyState::Pressed, _) => KeyState::Pressed,
            (KeyState::JustReleased, _) => KeyState::Released,
        }
    }

    /// Returns `true` for `JustPressed` and `Pressed`.
    pub fn is_down(self) -> bool {
        matches!(self, KeyState::JustPressed | KeyState::Pressed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            KeyState::Released => "Released",
            KeyState::JustPressed => "JustPressed",
            KeyState::Pressed => "Pressed",
            KeyState::JustReleased => "JustReleased",
        }
    }
}

impl fmt::Display for KeyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//=== KeyFrameState =======================================================

/// Tracked state for one key code: the machine state plus the latest raw
/// action sampled since the previous frame.
#[derive(Debug, Clone, Copy, Default)]
pub(super) struct KeyFrameState {
    pub(super) state: KeyState,
    pub(super) raw: Option<KeyAction>,
}

impl KeyFrameState {
    /// Records the latest raw action, overwriting any earlier sample from
    /// the same frame.
    pub(super) fn sample(&mut self, action: KeyAction) {
        self.raw = Some(action);
    }

    /// Advances the machine one frame and clears the raw sample.
    ///
    /// Returns the new state if a transition happened.
    pub(super) fn advance(&mut self) -> Option<KeyState> {
        let next = self.state.next(self.raw.take());
        if next == self.state {
            return None;
        }
        self.state = next;
        Some(next)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
