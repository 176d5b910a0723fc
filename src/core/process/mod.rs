//=========================================================================
// Process System
//=========================================================================
//
// Per-frame units of behavior with explicit completion and priority.
//
// Architecture:
//   ProcessScheduler
//     ├─ current: Vec<Box<dyn Process>>   (runs this frame)
//     └─ pending: Vec<Box<dyn Process>>   (starts next frame)
//
// Flow:
//   update() → reap done → promote pending → stable sort → Process::update
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::entity::EntityPool;
use crate::core::event_bus::EventBus;
use crate::core::input::InputTracker;

//=== Module Declarations =================================================

mod scheduler;

//=== Public API ==========================================================

pub use scheduler::ProcessScheduler;

//=== Process Trait =======================================================

/// A schedulable unit of per-frame behavior.
///
/// Only `update()` is required:
///
/// ```rust
/// # use framestep::core::process::{Process, ProcessContext};
/// struct Countdown(u32);
///
/// impl Process for Countdown {
///     fn update(&mut self, _dt: f32, _ctx: &mut ProcessContext<'_>) {
///         self.0 = self.0.saturating_sub(1);
///     }
///
///     fn is_done(&self) -> bool {
///         self.0 == 0
///     }
/// }
/// ```
pub trait Process {
    /// Called once per frame while the process is scheduled.
    fn update(&mut self, dt: f32, ctx: &mut ProcessContext<'_>);

    /// Once this returns `true` the scheduler drops the process at the
    /// start of the next frame. Checked once per frame.
    fn is_done(&self) -> bool {
        false
    }

    /// Higher priorities run first; equal priorities keep insertion order.
    fn priority(&self) -> i32 {
        0
    }
}

//=== ProcessContext ======================================================

/// Services a running process may touch during its update.
///
/// Processes pushed through the context are queued for the next frame,
/// exactly like [`ProcessScheduler::push`].
pub struct ProcessContext<'a> {
    pub entities: &'a mut EntityPool,
    pub events: &'a EventBus,
    pub input: &'a InputTracker,
    pending: &'a mut Vec<Box<dyn Process>>,
}

impl<'a> ProcessContext<'a> {
    pub(crate) fn new(
        entities: &'a mut EntityPool,
        events: &'a EventBus,
        input: &'a InputTracker,
        pending: &'a mut Vec<Box<dyn Process>>,
    ) -> Self {
        Self {
            entities,
            events,
            input,
            pending,
        }
    }

    /// Queues a boxed process to start next frame.
    pub fn push(&mut self, process: Box<dyn Process>) {
        self.pending.push(process);
    }

    /// Queues `process` to start next frame.
    pub fn spawn<P: Process + 'static>(&mut self, process: P) {
        self.push(Box::new(process));
    }
}
