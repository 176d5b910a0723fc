//=========================================================================
// Process Scheduler
//=========================================================================
//
// Double-buffered, priority-ordered process runner.
//
// A pushed process always lands in `pending` and only runs from the next
// `update` on, even when pushed by another process mid-frame: `pending` is
// never read again during the frame that filled it.
//
// update(dt):
//   1. drop every process in `current` reporting is_done()
//   2. append `pending` to `current`
//   3. stable sort `current` by descending priority
//   4. run update(dt) on each process in `current`
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cmp::Reverse;

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use super::{Process, ProcessContext};
use crate::core::entity::EntityPool;
use crate::core::event_bus::EventBus;
use crate::core::input::InputTracker;

//=== ProcessScheduler ====================================================

/// Owns every scheduled process from push until it reports done.
///
/// Processes that never finish are kept forever; bounding their lifetime
/// is up to the code that pushes them.
pub struct ProcessScheduler {
    current: Vec<Box<dyn Process>>,
    pending: Vec<Box<dyn Process>>,
}

impl ProcessScheduler {
    /// Slots reserved in each buffer by [`ProcessScheduler::new`].
    pub const DEFAULT_CAPACITY: usize = 1024;

    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Creates a scheduler reserving room for `capacity` processes in each
    /// buffer. The buffers still grow past it if needed.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            current: Vec::with_capacity(capacity),
            pending: Vec::with_capacity(capacity),
        }
    }

    //--- Scheduling -------------------------------------------------------

    /// Queues a process to start running on the next `update`.
    pub fn push(&mut self, process: Box<dyn Process>) {
        self.pending.push(process);
    }

    /// Boxes and queues `process`.
    pub fn spawn<P: Process + 'static>(&mut self, process: P) {
        self.push(Box::new(process));
    }

    //--- Update Loop ------------------------------------------------------

    /// Runs one scheduling pass.
    pub fn update(
        &mut self,
        dt: f32,
        entities: &mut EntityPool,
        events: &EventBus,
        input: &InputTracker,
    ) {
        let Self { current, pending } = self;

        // 1. Reap before promotion so nothing is both dropped and rerun
        let before = current.len();
        current.retain(|process| !process.is_done());
        let reaped = before - current.len();
        if reaped > 0 {
            debug!("Reaped {} finished process(es)", reaped);
        }

        // 2. Promote last frame's arrivals
        if !pending.is_empty() {
            debug!("Starting {} new process(es)", pending.len());
            current.append(pending);
        }

        // 3. sort_by_key is stable: ties keep their previous order
        current.sort_by_key(|process| Reverse(process.priority()));

        // 4. Run; anything pushed now goes to `pending` for next frame
        trace!("Running {} process(es)", current.len());
        let mut ctx = ProcessContext::new(entities, events, input, pending);
        for process in current.iter_mut() {
            process.update(dt, &mut ctx);
        }
    }

    //--- Query API --------------------------------------------------------

    /// Processes that ran (or will run) this frame.
    pub fn running_count(&self) -> usize {
        self.current.len()
    }

    /// Processes waiting for the next frame.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Returns `true` if no process is running or pending.
    pub fn is_empty(&self) -> bool {
        self.current.is_empty() && self.pending.is_empty()
    }
}

impl Default for ProcessScheduler {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Tests
//=========================================================================
