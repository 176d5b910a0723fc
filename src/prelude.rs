//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use framestep::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Runtime
pub use crate::engine::{Runtime, RuntimeBuilder, RuntimeError};

// Service registry
pub use crate::core::globals::{Services, ServicesConfig};

// Entities
pub use crate::core::entity::{
    DrawCall, DrawTarget, Dragon, Entity, EntityKind, EntityPool, EntitySimulation, Handle,
    Human, Mesh, Monster, PoolError,
};

// Events
pub use crate::core::event_bus::{Event, EventBus, EventInbox, EventKind, Observer};

// Input
pub use crate::core::input::{InputTracker, KeyAction, KeyCode, KeyState};

// Processes
pub use crate::core::process::{Process, ProcessContext, ProcessScheduler};

// Camera
pub use crate::core::camera::Camera;
