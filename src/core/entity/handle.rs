//=========================================================================
// Entity Handle
//=========================================================================
//
// Generation-checked, kind-typed reference to a pool slot.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

//=== Handle ==============================================================

/// Copyable identifier for an entity of kind `K` living in an
/// [`EntityPool`](super::EntityPool).
///
/// A handle stays valid until its entity is destroyed. Afterwards every
/// lookup through it returns `None`, even once the slot has been reused.
///
/// The trait impls are written by hand so they do not require anything of
/// `K`: the kind is a compile-time tag only.
pub struct Handle<K> {
    index: usize,
    generation: u64,
    _kind: PhantomData<fn() -> K>,
}

impl<K> Handle<K> {
    pub(super) fn new(index: usize, generation: u64) -> Self {
        Self {
            index,
            generation,
            _kind: PhantomData,
        }
    }

    /// Slot index in the pool.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Generation of the slot at the time the entity was created.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

//--- Trait Implementations -----------------------------------------------

impl<K> Clone for Handle<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for Handle<K> {}

impl<K> PartialEq for Handle<K> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.generation == other.generation
    }
}

impl<K> Eq for Handle<K> {}

impl<K> Hash for Handle<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
        self.generation.hash(state);
    }
}

impl<K> fmt::Debug for Handle<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = std::any::type_name::<K>().rsplit("::").next().unwrap_or("?");
        write!(f, "Handle<{}>({}:{})", kind, self.index, self.generation)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Kind tag with no trait impls at all.
    struct Opaque;

    #[test]
    fn handle_is_copy_without_kind_bounds() {
        let handle: Handle<Opaque> = Handle::new(3, 7);
        let copied = handle;
        assert_eq!(handle, copied);
        assert_eq!(copied.index(), 3);
        assert_eq!(copied.generation(), 7);
    }

    #[test]
    fn handles_differ_by_generation() {
        let a: Handle<Opaque> = Handle::new(0, 1);
        let b: Handle<Opaque> = Handle::new(0, 2);
        assert_ne!(a, b);
    }

    #[test]
    fn debug_shows_kind_index_and_generation() {
        let handle: Handle<Opaque> = Handle::new(12, 4);
        assert_eq!(format!("{:?}", handle), "Handle<Opaque>(12:4)");
    }
}
