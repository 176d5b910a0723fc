//=========================================================================
// Input System
//
// Raw device input in, key state transitions and mouse deltas out.
//
// Responsibilities:
// - Define portable key codes and raw key actions
// - Run one four-state press/release machine per key
// - Track mouse and scroll deltas between samples
// - Publish every change on the event bus
//
// Notes:
// The platform adapter feeds this module once per raw device event; the
// service registry calls `InputTracker::update` once per frame, before the
// process scheduler runs.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod event;
mod input_tracker;
mod key_state;

//=== Public API ==========================================================

pub use event::{KeyAction, KeyCode};
pub use input_tracker::{InputTracker, MouseMovement};
pub use key_state::KeyState;
