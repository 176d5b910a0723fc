//=========================================================================
// Entity Kinds
//=========================================================================
//
// The closed set of payloads a pool slot can hold, and the draw interface
// they render through.
//
// Architecture:
//   Entity (enum) ─┬─ Monster
//                  ├─ Dragon
//                  └─ Human
//
//   EntityKind: typed access into the enum ("get by expected kind" is a
//   checked variant match, never a cast)
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec3;

//=== Draw Interface ======================================================

/// Mesh selector handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mesh {
    Monster,
    Dragon,
    Human,
}

/// One draw request emitted by an entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub mesh: Mesh,
    pub position: Vec3,
    /// Rotation around the world up axis, in radians.
    pub heading: f32,
}

/// Rendering collaborator receiving draw requests from the pool.
///
/// Implemented outside the core by whatever owns the GPU context.
pub trait DrawTarget {
    fn submit(&mut self, call: DrawCall);
}

impl DrawTarget for Vec<DrawCall> {
    fn submit(&mut self, call: DrawCall) {
        self.push(call);
    }
}

//=== Entity Payloads =====================================================

/// Stands still and keeps track of how long it has been alive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Monster {
    pub position: Vec3,
    pub age: f32,
}

impl Monster {
    pub fn update(&mut self, dt: f32) {
        self.age += dt;
    }

    pub fn draw(&self, target: &mut dyn DrawTarget) {
        target.submit(DrawCall { mesh: Mesh::Monster, position: self.position, heading: 0.0 });
    }
}

/// Circles in place at a constant turn rate.
#[derive(Debug, Clone, PartialEq)]
pub struct Dragon {
    pub position: Vec3,
    pub heading: f32,
    /// Radians per second.
    pub turn_rate: f32,
}

impl Default for Dragon {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 5.0, 0.0),
            heading: 0.0,
            turn_rate: std::f32::consts::FRAC_PI_4,
        }
    }
}

impl Dragon {
    pub fn update(&mut self, dt: f32) {
        self.heading = (self.heading + self.turn_rate * dt).rem_euclid(std::f32::consts::TAU);
    }

    pub fn draw(&self, target: &mut dyn DrawTarget) {
        target.submit(DrawCall { mesh: Mesh::Dragon, position: self.position, heading: self.heading });
    }
}

/// Walks in a straight line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Human {
    pub position: Vec3,
    pub velocity: Vec3,
}

impl Human {
    pub fn update(&mut self, dt: f32) {
        self.position += self.velocity * dt;
    }

    pub fn draw(&self, target: &mut dyn DrawTarget) {
        let heading = if self.velocity.length_squared() > 0.0 {
            self.velocity.x.atan2(self.velocity.z)
        } else {
            0.0
        };
        target.submit(DrawCall { mesh: Mesh::Human, position: self.position, heading });
    }
}

//=== Entity ==============================================================

/// Payload stored in an occupied pool slot.
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Monster(Monster),
    Dragon(Dragon),
    Human(Human),
}

impl Entity {
    pub fn update(&mut self, dt: f32) {
        match self {
            Entity::Monster(monster) => monster.update(dt),
            Entity::Dragon(dragon) => dragon.update(dt),
            Entity::Human(human) => human.update(dt),
        }
    }

    pub fn draw(&self, target: &mut dyn DrawTarget) {
        match self {
            Entity::Monster(monster) => monster.draw(target),
            Entity::Dragon(dragon) => dragon.draw(target),
            Entity::Human(human) => human.draw(target),
        }
    }
}

//=== EntityKind ==========================================================

/// Typed view into one variant of [`Entity`].
///
/// Implemented for every payload type; `Default` is what
/// [`EntityPool::create`](super::EntityPool::create) constructs.
pub trait EntityKind: Default + 'static {
    fn into_entity(self) -> Entity;
    fn from_entity(entity: &Entity) -> Option<&Self>;
    fn from_entity_mut(entity: &mut Entity) -> Option<&mut Self>;
}

macro_rules! entity_kind {
    ($kind:ident) => {
        impl EntityKind for $kind {
            fn into_entity(self) -> Entity {
                Entity::$kind(self)
            }

            fn from_entity(entity: &Entity) -> Option<&Self> {
                match entity {
                    Entity::$kind(inner) => Some(inner),
                    _ => None,
                }
            }

            fn from_entity_mut(entity: &mut Entity) -> Option<&mut Self> {
                match entity {
                    Entity::$kind(inner) => Some(inner),
                    _ => None,
                }
            }
        }
    };
}

entity_kind!(Monster);
entity_kind!(Dragon);
entity_kind!(Human);

//=========================================================================
// Unit Tests
//=========================================================================
