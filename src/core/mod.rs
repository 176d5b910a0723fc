//=========================================================================
// Runtime Core
//
// Platform-independent building blocks of the frame loop.
//
// Responsibilities:
// - Store gameplay entities behind generation-checked handles
// - Route in-frame events from publishers to observers
// - Turn raw device samples into key transitions and mouse deltas
// - Run prioritized per-frame processes with deferred insertion
// - Own one of each of the above in an explicit service registry
//
// Frame order (driven by `Services::step`):
// ```text
//   InputTracker::update ──publish──> EventBus ──notify──> observers
//            ↓
//   ProcessScheduler::update ──> Process::update(dt, ctx)
// ```
//
// Notes:
// Everything here runs on one thread. Nothing in this module touches the
// windowing layer; the platform adapter feeds raw input in from outside.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod camera;
pub mod entity;
pub mod event_bus;
pub mod globals;
pub mod input;
pub mod process;

//=== Public API ==========================================================

pub use camera::Camera;
pub use entity::{EntityPool, Handle, PoolError};
pub use event_bus::{Event, EventBus, EventKind, Observer};
pub use globals::{Services, ServicesConfig};
pub use input::{InputTracker, KeyAction, KeyCode, KeyState};
pub use process::{Process, ProcessContext, ProcessScheduler};
