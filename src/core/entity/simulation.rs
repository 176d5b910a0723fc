//=========================================================================
// Entity Simulation
//=========================================================================
//
// Process that advances every pooled entity once per frame.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::process::{Process, ProcessContext};

//=== EntitySimulation ====================================================

/// Calls [`EntityPool::update_entities`](super::EntityPool::update_entities)
/// every frame. Never finishes.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntitySimulation {
    priority: i32,
}

impl EntitySimulation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the simulation at `priority` instead of 0.
    pub fn with_priority(priority: i32) -> Self {
        Self { priority }
    }
}

impl Process for EntitySimulation {
    fn update(&mut self, dt: f32, ctx: &mut ProcessContext<'_>) {
        ctx.entities.update_entities(dt);
    }

    fn priority(&self) -> i32 {
        self.priority
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::{EntityPool, Monster};
    use crate::core::event_bus::EventBus;
    use crate::core::input::InputTracker;
    use crate::core::process::ProcessScheduler;

    #[test]
    fn simulation_updates_entities_every_frame() {
        let mut scheduler = ProcessScheduler::with_capacity(4);
        let mut entities = EntityPool::with_capacity(4);
        let events = EventBus::new();
        let input = InputTracker::new();

        let monster = entities.create::<Monster>().unwrap();
        scheduler.spawn(EntitySimulation::new());

        scheduler.update(0.25, &mut entities, &events, &input);
        scheduler.update(0.25, &mut entities, &events, &input);

        assert_eq!(entities.get(monster).unwrap().age, 0.5);
    }

    #[test]
    fn priority_is_configurable() {
        assert_eq!(EntitySimulation::new().priority(), 0);
        assert_eq!(EntitySimulation::with_priority(-10).priority(), -10);
    }
}
