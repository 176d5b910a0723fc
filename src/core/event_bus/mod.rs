//=========================================================================
// Event Bus
//=========================================================================
//
// Observer-pattern event routing for in-frame communication.
//
// Architecture:
//   InputTracker ──publish()──> EventBus ──notify()──> Observers
//                                  │                    ├─ EventInbox (Camera)
//                                  │                    └─ ...
//                    HashMap<EventKind, Vec<Rc<dyn Observer>>>
//
//=========================================================================

//=== Module Declarations =================================================

mod bus;
mod event;
mod inbox;

//=== Public API ==========================================================

pub use bus::{EventBus, Observer};
pub use event::{Event, EventKind};
pub use inbox::EventInbox;
