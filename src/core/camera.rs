//=========================================================================
// Camera
//=========================================================================
//
// Fly camera driven entirely by bus events.
//
// The camera never queries the input tracker. It subscribes an inbox to
// mouse and keyboard events, and `update(dt)` drains the inbox once per
// frame:
//
//   EventBus ──notify──> EventInbox ──drain (update)──> yaw/pitch/zoom,
//                                                       movement flags
//
//=========================================================================

//=== External Dependencies ===============================================

use std::rc::Rc;

use glam::{Mat4, Vec3};
use log::trace;

//=== Internal Dependencies ===============================================

use crate::core::event_bus::{Event, EventBus, EventInbox, EventKind};
use crate::core::input::{KeyCode, KeyState};

//=== Constants ===========================================================

const PITCH_LIMIT: f32 = 89.0;
const ZOOM_MIN: f32 = 1.0;
const ZOOM_MAX: f32 = 45.0;

//=== Direction ===========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward = 0,
    Backward = 1,
    Left = 2,
    Right = 3,
}

impl Direction {
    fn from_key(key: KeyCode) -> Option<Self> {
        match key {
            KeyCode::KeyW => Some(Direction::Forward),
            KeyCode::KeyS => Some(Direction::Backward),
            KeyCode::KeyA => Some(Direction::Left),
            KeyCode::KeyD => Some(Direction::Right),
            _ => None,
        }
    }
}

//=== Camera ==============================================================

/// Yaw/pitch fly camera with WASD movement and scroll zoom.
///
/// Angles are in degrees.
pub struct Camera {
    inbox: Rc<EventInbox>,
    moving: [bool; 4],

    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    /// Vertical field of view, in degrees.
    pub zoom: f32,
    pub movement_speed: f32,
    pub mouse_sensitivity: f32,
    /// Ignore mouse movement (e.g. while a debug UI has the cursor).
    pub mouse_look_enabled: bool,

    front: Vec3,
    right: Vec3,
    up: Vec3,
    world_up: Vec3,
}

impl Camera {
    /// Creates a camera at `position` looking down -Z.
    pub fn new(position: Vec3) -> Self {
        let mut camera = Self {
            inbox: Rc::new(EventInbox::new()),
            moving: [false; 4],
            position,
            yaw: -90.0,
            pitch: 0.0,
            zoom: ZOOM_MAX,
            movement_speed: 2.5,
            mouse_sensitivity: 0.1,
            mouse_look_enabled: true,
            front: Vec3::NEG_Z,
            right: Vec3::X,
            up: Vec3::Y,
            world_up: Vec3::Y,
        };
        camera.update_vectors();
        camera
    }

    //--- Bus Wiring -------------------------------------------------------

    /// Subscribes the camera's inbox to every event kind it reacts to.
    pub fn subscribe(&self, events: &EventBus) {
        events.subscribe(EventKind::MouseMoved, &self.inbox);
        events.subscribe(EventKind::MouseScrolled, &self.inbox);
        events.subscribe(EventKind::Keyboard, &self.inbox);
    }

    pub fn unsubscribe(&self, events: &EventBus) {
        events.unsubscribe_all(&self.inbox);
    }

    //--- Update -----------------------------------------------------------

    /// Applies every event received since the last update, then moves
    /// along the currently held directions.
    pub fn update(&mut self, dt: f32) {
        let inbox = Rc::clone(&self.inbox);
        for event in inbox.drain() {
            self.apply(event);
        }

        let velocity = self.movement_speed * dt;
        if self.moving[Direction::Forward as usize] {
            self.position += self.front * velocity;
        }
        if self.moving[Direction::Backward as usize] {
            self.position -= self.front * velocity;
        }
        if self.moving[Direction::Left as usize] {
            self.position -= self.right * velocity;
        }
        if self.moving[Direction::Right as usize] {
            self.position += self.right * velocity;
        }
    }

    fn apply(&mut self, event: Event) {
        match event {
            Event::MouseMoved { dx, dy } => {
                if self.mouse_look_enabled {
                    self.look(dx as f32, dy as f32);
                }
            }
            Event::MouseScrolled { dy } => {
                self.zoom = (self.zoom - dy as f32).clamp(ZOOM_MIN, ZOOM_MAX);
            }
            Event::Keyboard { key, state } => {
                // Movement starts once the key has settled into Pressed
                if let Some(direction) = Direction::from_key(key) {
                    trace!("Camera {:?}: {}", direction, state);
                    self.moving[direction as usize] = state == KeyState::Pressed;
                }
            }
        }
    }

    fn look(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.mouse_sensitivity;
        self.pitch = (self.pitch + dy * self.mouse_sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.update_vectors();
    }

    fn update_vectors(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        self.front = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize();
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }

    //--- Query API --------------------------------------------------------

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Right-handed view matrix for the renderer.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::new(2.0, 2.0, 10.0))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
