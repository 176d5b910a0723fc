//=========================================================================
// Entity Pool
//=========================================================================
//
// Fixed-capacity slot table accessed through generation-checked handles.
//
// Architecture:
//   Vec<Slot> (allocated once, never grows)
//     Slot { generation: u64, payload: Option<Entity> }
//
//   create<K>()  → first free slot, generation += 1 → Handle<K>
//   get<K>(h)    → occupied && generation == h.generation && variant == K
//   destroy<K>(h)→ same check, payload = None
//
// A handle only ever resolves to the entity it was created for: the
// generation changes on every reuse and a freed slot has no payload.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;
use thiserror::Error;

//=== Internal Dependencies ===============================================

use super::handle::Handle;
use super::kinds::{DrawTarget, Entity, EntityKind};

//=== Constants ===========================================================

/// Slot count used by [`EntityPool::new`].
pub const DEFAULT_ENTITY_CAPACITY: usize = 1024;

//=== PoolError ===========================================================

/// Recoverable failures of pool operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PoolError {
    /// Every slot is occupied.
    #[error("entity pool exhausted: all {capacity} slots are occupied")]
    Exhausted { capacity: usize },
}

//=== Slot ================================================================

#[derive(Debug, Default)]
struct Slot {
    generation: u64,
    payload: Option<Entity>,
}

//=== EntityPool ==========================================================

/// Fixed-capacity storage for entities of every [`EntityKind`].
///
/// All slots are allocated up front. Handles with a slot index outside the
/// pool can only come from a different pool and are treated as a bug:
/// every lookup through them panics.
pub struct EntityPool {
    slots: Vec<Slot>,
    live: usize,
}

impl EntityPool {
    //--- Construction -----------------------------------------------------

    /// Creates a pool with [`DEFAULT_ENTITY_CAPACITY`] slots.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_ENTITY_CAPACITY)
    }

    /// Creates a pool with `capacity` slots.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "Entity pool capacity must be positive");

        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, Slot::default);

        Self { slots, live: 0 }
    }

    //--- Lifecycle --------------------------------------------------------

    /// Creates a default-constructed `K` in the first free slot.
    pub fn create<K: EntityKind>(&mut self) -> Result<Handle<K>, PoolError> {
        self.create_with(K::default())
    }

    /// Stores `value` in the first free slot.
    pub fn create_with<K: EntityKind>(&mut self, value: K) -> Result<Handle<K>, PoolError> {
        let capacity = self.capacity();
        let Some(index) = self.slots.iter().position(|slot| slot.payload.is_none()) else {
            debug!("Entity pool exhausted ({} slots)", capacity);
            return Err(PoolError::Exhausted { capacity });
        };

        let slot = &mut self.slots[index];
        slot.generation += 1;
        slot.payload = Some(value.into_entity());
        self.live += 1;

        Ok(Handle::new(index, slot.generation))
    }

    /// Frees the slot referenced by `handle`.
    ///
    /// Returns `false` if the handle is stale (already destroyed or the
    /// slot has been reused).
    ///
    /// # Panics
    ///
    /// Panics if the handle's slot index is outside the pool.
    pub fn destroy<K: EntityKind>(&mut self, handle: Handle<K>) -> bool {
        if self.get(handle).is_none() {
            return false;
        }

        self.slots[handle.index()].payload = None;
        self.live -= 1;
        true
    }

    //--- Access -----------------------------------------------------------

    /// Resolves `handle` to its entity.
    ///
    /// Returns `None` for stale handles.
    ///
    /// # Panics
    ///
    /// Panics if the handle's slot index is outside the pool.
    pub fn get<K: EntityKind>(&self, handle: Handle<K>) -> Option<&K> {
        let slot = self.slot(handle.index());
        if slot.generation != handle.generation() {
            return None;
        }
        slot.payload.as_ref().and_then(K::from_entity)
    }

    /// Mutable counterpart of [`get`](Self::get).
    pub fn get_mut<K: EntityKind>(&mut self, handle: Handle<K>) -> Option<&mut K> {
        let slot = self.slot_mut(handle.index());
        if slot.generation != handle.generation() {
            return None;
        }
        slot.payload.as_mut().and_then(K::from_entity_mut)
    }

    /// Returns `true` if `handle` still resolves to a live entity.
    pub fn contains<K: EntityKind>(&self, handle: Handle<K>) -> bool {
        self.get(handle).is_some()
    }

    //--- Per-Frame Dispatch -----------------------------------------------

    /// Updates every live entity, in slot order.
    pub fn update_entities(&mut self, dt: f32) {
        for entity in self.slots.iter_mut().filter_map(|slot| slot.payload.as_mut()) {
            entity.update(dt);
        }
    }

    /// Draws every live entity into `target`, in slot order.
    pub fn draw_entities(&self, target: &mut dyn DrawTarget) {
        for entity in self.iter() {
            entity.draw(target);
        }
    }

    /// Iterates over live entities in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.slots.iter().filter_map(|slot| slot.payload.as_ref())
    }

    //--- Query API --------------------------------------------------------

    /// Number of live entities.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Total number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    //--- Internal Helpers -------------------------------------------------

    fn slot(&self, index: usize) -> &Slot {
        assert!(
            index < self.slots.len(),
            "Handle slot index {} out of range for pool of {} slots",
            index,
            self.slots.len()
        );
        &self.slots[index]
    }

    fn slot_mut(&mut self, index: usize) -> &mut Slot {
        assert!(
            index < self.slots.len(),
            "Handle slot index {} out of range for pool of {} slots",
            index,
            self.slots.len()
        );
        &mut self.slots[index]
    }
}

impl Default for EntityPool {
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
    use crate::core::entity::kinds::{DrawCall, Dragon, Human, Mesh, Monster};
    use glam::Vec3;
    use std::collections::HashSet;

    //=====================================================================
    // Creation & Lookup
    //=====================================================================

    #[test]
    fn new_pool_has_default_capacity_and_no_entities() {
        let pool = EntityPool::new();
        assert_eq!(pool.capacity(), DEFAULT_ENTITY_CAPACITY);
        assert!(pool.is_empty());
    }

    #[test]
    fn create_returns_handle_to_default_entity() {
        let mut pool = EntityPool::with_capacity(4);
        let handle = pool.create::<Monster>().unwrap();

        assert_eq!(pool.get(handle), Some(&Monster::default()));
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn slot_zero_is_usable() {
        let mut pool = EntityPool::with_capacity(2);
        let first = pool.create::<Monster>().unwrap();
        let second = pool.create::<Dragon>().unwrap();

        assert_eq!(first.index(), 0);
        assert_eq!(second.index(), 1);
        assert!(pool.contains(first));
        assert!(pool.contains(second));
    }

    #[test]
    fn get_mut_allows_in_place_edits() {
        let mut pool = EntityPool::with_capacity(4);
        let handle = pool.create::<Human>().unwrap();

        pool.get_mut(handle).unwrap().velocity = Vec3::Z;
        assert_eq!(pool.get(handle).unwrap().velocity, Vec3::Z);
    }

    #[test]
    fn create_with_stores_given_value() {
        let mut pool = EntityPool::with_capacity(4);
        let human = Human { position: Vec3::ONE, velocity: Vec3::ZERO };
        let handle = pool.create_with(human.clone()).unwrap();

        assert_eq!(pool.get(handle), Some(&human));
    }

    //=====================================================================
    // Generational Isolation
    //=====================================================================

    #[test]
    fn destroyed_handle_is_absent_before_reuse() {
        let mut pool = EntityPool::with_capacity(4);
        let handle = pool.create::<Monster>().unwrap();

        assert!(pool.destroy(handle));
        assert!(pool.get(handle).is_none());
        assert!(pool.get_mut(handle).is_none());
        assert!(!pool.contains(handle));
        assert!(!pool.destroy(handle), "double destroy must fail");
        assert!(pool.is_empty());
    }

    #[test]
    fn stale_handle_never_sees_new_occupant() {
        let mut pool = EntityPool::with_capacity(1);
        let a = pool.create::<Monster>().unwrap();
        assert!(pool.destroy(a));

        let b = pool.create::<Monster>().unwrap();
        assert_eq!(a.index(), b.index());
        assert!(b.generation() > a.generation());

        pool.get_mut(b).unwrap().age = 42.0;

        assert!(pool.get(a).is_none());
        assert!(pool.get_mut(a).is_none());
        assert!(!pool.contains(a));
        assert!(!pool.destroy(a));
        assert_eq!(pool.get(b).unwrap().age, 42.0);
    }

    #[test]
    fn handles_stay_unique_across_churn() {
        let mut pool = EntityPool::with_capacity(8);
        let mut live: Vec<Handle<Monster>> = Vec::new();

        for round in 0..50 {
            live.push(pool.create::<Monster>().unwrap());
            if round % 3 == 0 {
                let victim = live.remove(0);
                assert!(pool.destroy(victim));
            }
            if live.len() == pool.capacity() {
                let victim = live.remove(live.len() / 2);
                assert!(pool.destroy(victim));
            }

            let slots: HashSet<usize> = live.iter().map(|handle| handle.index()).collect();
            assert_eq!(slots.len(), live.len(), "two live handles share a slot");
            assert!(live.iter().all(|&handle| pool.contains(handle)));
        }
    }

    //=====================================================================
    // Exhaustion
    //=====================================================================

    #[test]
    fn full_pool_rejects_create_until_a_slot_frees() {
        let mut pool = EntityPool::new();
        let handles: Vec<Handle<Human>> = (0..DEFAULT_ENTITY_CAPACITY)
            .map(|_| pool.create::<Human>().unwrap())
            .collect();

        assert_eq!(
            pool.create::<Dragon>(),
            Err(PoolError::Exhausted { capacity: DEFAULT_ENTITY_CAPACITY })
        );

        assert!(pool.destroy(handles[17]));
        let reused = pool.create::<Dragon>().unwrap();
        assert_eq!(reused.index(), 17);
    }

    #[test]
    fn exhausted_error_message_names_capacity() {
        let error = PoolError::Exhausted { capacity: 8 };
        assert_eq!(error.to_string(), "entity pool exhausted: all 8 slots are occupied");
    }

    //=====================================================================
    // Misuse
    //=====================================================================

    #[test]
    #[should_panic(expected = "out of range")]
    fn out_of_range_handle_panics() {
        let mut big = EntityPool::with_capacity(8);
        let small = EntityPool::with_capacity(2);

        let mut handle = big.create::<Monster>().unwrap();
        for _ in 0..4 {
            handle = big.create::<Monster>().unwrap();
        }

        let _ = small.get(handle);
    }

    #[test]
    #[should_panic(expected = "capacity must be positive")]
    fn zero_capacity_panics() {
        EntityPool::with_capacity(0);
    }

    //=====================================================================
    // Dispatch
    //=====================================================================

    #[test]
    fn update_and_draw_visit_live_entities_in_slot_order() {
        let mut pool = EntityPool::with_capacity(4);
        let monster = pool.create::<Monster>().unwrap();
        let dragon = pool.create::<Dragon>().unwrap();
        let human = pool.create_with(Human { position: Vec3::ZERO, velocity: Vec3::X }).unwrap();
        assert!(pool.destroy(dragon));

        pool.update_entities(0.5);

        assert_eq!(pool.get(monster).unwrap().age, 0.5);
        assert_eq!(pool.get(human).unwrap().position, Vec3::new(0.5, 0.0, 0.0));

        let mut calls: Vec<DrawCall> = Vec::new();
        pool.draw_entities(&mut calls);
        let meshes: Vec<Mesh> = calls.iter().map(|call| call.mesh).collect();
        assert_eq!(meshes, vec![Mesh::Monster, Mesh::Human]);
    }
}
