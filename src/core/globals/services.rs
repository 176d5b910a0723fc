//=========================================================================
// Services
//=========================================================================
//
// The one owner of the runtime core.
//
// Holds exactly one of each core component and runs them in frame order:
//
//   step(dt):
//     1. InputTracker::update   → publishes input events on the EventBus
//     2. ProcessScheduler::update → processes touch entities/events/input
//
// Constructed once by the runtime and passed by reference to whoever needs
// it. There is no global instance.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::entity::{EntityPool, DEFAULT_ENTITY_CAPACITY};
use crate::core::event_bus::EventBus;
use crate::core::input::InputTracker;
use crate::core::process::ProcessScheduler;

//=== ServicesConfig ======================================================

/// Storage sizes reserved when the services are constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServicesConfig {
    /// Number of entity pool slots.
    pub entity_capacity: usize,

    /// Initial room in each process buffer.
    pub process_capacity: usize,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            entity_capacity: DEFAULT_ENTITY_CAPACITY,
            process_capacity: ProcessScheduler::DEFAULT_CAPACITY,
        }
    }
}

//=== Services ============================================================

/// Owns the input tracker, event bus, entity pool and process scheduler.
///
/// Not `Clone`: one instance per runtime.
pub struct Services {
    input: InputTracker,
    events: EventBus,
    entities: EntityPool,
    processes: ProcessScheduler,
}

impl Services {
    //--- Construction -----------------------------------------------------

    /// Creates the services with default capacities.
    pub fn new() -> Self {
        Self::with_config(ServicesConfig::default())
    }

    /// Creates the services with the given capacities.
    ///
    /// # Panics
    ///
    /// Panics if `config.entity_capacity == 0`.
    pub fn with_config(config: ServicesConfig) -> Self {
        debug!(
            "Creating services (entities: {}, processes: {})",
            config.entity_capacity, config.process_capacity
        );

        Self {
            input: InputTracker::new(),
            events: EventBus::new(),
            entities: EntityPool::with_capacity(config.entity_capacity),
            processes: ProcessScheduler::with_capacity(config.process_capacity),
        }
    }

    //--- Accessors --------------------------------------------------------

    pub fn input(&self) -> &InputTracker {
        &self.input
    }

    /// Raw device feed goes through here.
    pub fn input_mut(&mut self) -> &mut InputTracker {
        &mut self.input
    }

    /// The bus takes `&self` for every operation, so no `_mut` variant.
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn entities(&self) -> &EntityPool {
        &self.entities
    }

    pub fn entities_mut(&mut self) -> &mut EntityPool {
        &mut self.entities
    }

    pub fn processes(&self) -> &ProcessScheduler {
        &self.processes
    }

    pub fn processes_mut(&mut self) -> &mut ProcessScheduler {
        &mut self.processes
    }

    //--- Frame Step -------------------------------------------------------

    /// Runs one frame of the core: input first, then processes.
    pub fn step(&mut self, dt: f32) {
        let Self { input, events, entities, processes } = self;

        input.update(dt, events);
        processes.update(dt, entities, events, input);
    }
}

impl Default for Services {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::{EntitySimulation, Human};
    use crate::core::event_bus::{Event, EventInbox, EventKind};
    use crate::core::input::{KeyAction, KeyCode, KeyState};
    use crate::core::process::{Process, ProcessContext};
    use glam::Vec3;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn config_sizes_the_components() {
        let services = Services::with_config(ServicesConfig {
            entity_capacity: 16,
            process_capacity: 4,
        });
        assert_eq!(services.entities().capacity(), 16);
        assert!(services.processes().is_empty());
    }

    #[test]
    fn default_config_matches_component_defaults() {
        let services = Services::new();
        assert_eq!(services.entities().capacity(), DEFAULT_ENTITY_CAPACITY);
    }

    #[test]
    fn step_publishes_input_before_processes_run() {
        /// Records the key state seen by the process each frame.
        struct Watcher {
            seen: Rc<RefCell<Vec<KeyState>>>,
        }

        impl Process for Watcher {
            fn update(&mut self, _dt: f32, ctx: &mut ProcessContext<'_>) {
                self.seen.borrow_mut().push(ctx.input.key_state(KeyCode::KeyW));
            }
        }

        let mut services = Services::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        services.processes_mut().spawn(Watcher { seen: Rc::clone(&seen) });

        let inbox = Rc::new(EventInbox::new());
        services.events().subscribe(EventKind::Keyboard, &inbox);

        services.input_mut().process_key(KeyCode::KeyW, KeyAction::Press);
        services.step(0.016);
        services.step(0.016);

        assert_eq!(*seen.borrow(), vec![KeyState::JustPressed, KeyState::Pressed]);
        let events: Vec<Event> = inbox.drain().collect();
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn entities_advance_under_simulation_process() {
        let mut services = Services::new();
        let human = services
            .entities_mut()
            .create_with(Human { position: Vec3::ZERO, velocity: Vec3::new(0.0, 0.0, 2.0) })
            .unwrap();
        services.processes_mut().spawn(EntitySimulation::new());

        services.step(0.5);
        services.step(0.5);

        let position = services.entities().get(human).unwrap().position;
        assert_eq!(position, Vec3::new(0.0, 0.0, 2.0));
    }
}
