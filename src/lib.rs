//=========================================================================
// framestep: Library Root
//
// A single-threaded, frame-stepped runtime for small real-time
// applications.
//
// Responsibilities:
// - Expose the runtime entry point (`RuntimeBuilder` / `Runtime`)
// - Expose the core services (entities, events, input, processes)
// - Keep the windowing adapter (`platform`) hidden from end users
//
// Typical usage:
// ```no_run
// use framestep::RuntimeBuilder;
//
// fn main() -> Result<(), framestep::RuntimeError> {
//     RuntimeBuilder::new().build().run(|_services, _dt| {})
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds every service the frame loop drives. It is fully usable
// without a window, which is how the tests exercise it.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` owns the winit event loop and window. `engine` wires the
// builder configuration into it.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Runtime, RuntimeBuilder, RuntimeError};
