//=========================================================================
// Global Engine State
//=========================================================================
//
// Explicit service registry for the runtime core.
//
// Architecture:
//   Services: InputTracker + EventBus + EntityPool + ProcessScheduler
//   (owned by the runtime, borrowed by the frame hook and processes)
//
//=========================================================================

//=== Module Declarations =================================================

mod services;

//=== Public API ==========================================================

pub use services::{Services, ServicesConfig};
