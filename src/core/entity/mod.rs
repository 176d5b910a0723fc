//=========================================================================
// Entity System
//=========================================================================
//
// Fixed-capacity, generation-checked storage for gameplay entities.
//
// Architecture:
//   EntityPool
//     └─ slots: Vec<Slot { generation, payload: Option<Entity> }>
//
//   Handle<K> { index, generation } ──get::<K>()──> Option<&K>
//
//=========================================================================

//=== Module Declarations =================================================

mod handle;
mod kinds;
mod pool;
mod simulation;

//=== Public API ==========================================================

pub use handle::Handle;
pub use kinds::{DrawCall, DrawTarget, Dragon, Entity, EntityKind, Human, Mesh, Monster};
pub use pool::{EntityPool, PoolError, DEFAULT_ENTITY_CAPACITY};
pub use simulation::EntitySimulation;
