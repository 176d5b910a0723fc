//=========================================================================
// Input Tracker
//=========================================================================
//
// Turns raw per-frame device samples into key state transitions and
// mouse/scroll deltas, and publishes them on the event bus.
//
// Architecture:
//   process_key() ────────────┐
//   process_mouse_movement() ─┼─> samples ──update()──> EventBus::publish
//   process_mouse_scroll() ───┘
//
// Frame lifecycle: process_*() (0..n per frame) → update() → query
//
// On update, buffered mouse/scroll events go out first, in arrival order,
// then every tracked key advances one step (in key-code order) and each
// transition is published as `Event::Keyboard`.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::BTreeMap;

use log::trace;

//=== Internal Dependencies ===============================================

use super::event::{KeyAction, KeyCode};
use super::key_state::{KeyFrameState, KeyState};
use crate::core::event_bus::{Event, EventBus};

//=== Mouse Samples =======================================================

/// Last two cursor positions reported by the device layer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MouseMovement {
    pub last_x: f64,
    pub last_y: f64,
    pub current_x: f64,
    pub current_y: f64,
}

impl MouseMovement {
    /// Offset between the last two samples; `y` is reversed so that moving
    /// the cursor up yields a positive value.
    pub fn offset(&self) -> (f64, f64) {
        (self.current_x - self.last_x, self.last_y - self.current_y)
    }
}

/// Last two scroll positions reported by the device layer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct ScrollMovement {
    last_y: f64,
    current_y: f64,
}

//=== InputTracker ========================================================

/// Per-key state machines plus mouse and scroll deltas.
///
/// Key entries are created the first time a key is sampled and kept for
/// the lifetime of the tracker.
pub struct InputTracker {
    //--- Keyboard ---------------------------------------------------------
    keys: BTreeMap<KeyCode, KeyFrameState>,

    //--- Continuous Input -------------------------------------------------
    mouse: MouseMovement,
    has_mouse_sample: bool,
    scroll: ScrollMovement,

    //--- Pending Publication ----------------------------------------------
    pending: Vec<Event>,
}

impl InputTracker {
    /// Creates a tracker with no keys seen yet.
    pub fn new() -> Self {
        const PENDING_BASE: usize = 64;

        Self {
            keys: BTreeMap::new(),
            mouse: MouseMovement::default(),
            has_mouse_sample: false,
            scroll: ScrollMovement::default(),
            pending: Vec::with_capacity(PENDING_BASE),
        }
    }

    //--- Raw Device Feed --------------------------------------------------

    /// Records the latest raw action for `key`.
    ///
    /// Only the last action before the next `update` counts.
    pub fn process_key(&mut self, key: KeyCode, action: KeyAction) {
        self.keys.entry(key).or_default().sample(action);
    }

    /// Records a cursor position and queues a `MouseMoved` event carrying
    /// the delta from the previous sample.
    ///
    /// The first sample only establishes the baseline.
    pub fn process_mouse_movement(&mut self, x: f64, y: f64) {
        if !self.has_mouse_sample {
            self.mouse = MouseMovement { last_x: x, last_y: y, current_x: x, current_y: y };
            self.has_mouse_sample = true;
            return;
        }

        self.mouse.last_x = self.mouse.current_x;
        self.mouse.last_y = self.mouse.current_y;
        self.mouse.current_x = x;
        self.mouse.current_y = y;

        let (dx, dy) = self.mouse.offset();
        self.pending.push(Event::MouseMoved { dx, dy });
    }

    /// Records a scroll position and queues a `MouseScrolled` event carrying
    /// the delta from the previous sample.
    pub fn process_mouse_scroll(&mut self, y: f64) {
        self.scroll.last_y = self.scroll.current_y;
        self.scroll.current_y = y;

        self.pending.push(Event::MouseScrolled { dy: self.scroll_offset() });
    }

    //--- Frame Processing -------------------------------------------------

    /// Publishes queued mouse/scroll events, then advances every key one
    /// frame and publishes each transition.
    ///
    /// Key states advance per call, not per elapsed time: `dt` never
    /// changes which transitions happen.
    pub fn update(&mut self, dt: f32, events: &EventBus) {
        trace!("Input update (dt: {:.4}, {} queued)", dt, self.pending.len());

        for event in self.pending.drain(..) {
            events.publish(event);
        }

        for (&key, frame_state) in self.keys.iter_mut() {
            if let Some(state) = frame_state.advance() {
                trace!("{:?} -> {}", key, state);
                events.publish(Event::Keyboard { key, state });
            }
        }
    }

    //=====================================================================
    // Query API
    //=====================================================================

    /// Current state of `key`; keys never sampled are `Released`.
    pub fn key_state(&self, key: KeyCode) -> KeyState {
        self.keys
            .get(&key)
            .map(|frame_state| frame_state.state)
            .unwrap_or(KeyState::Released)
    }

    /// Returns `true` while `key` is `JustPressed` or `Pressed`.
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.key_state(key).is_down()
    }

    /// Offset between the last two cursor samples (`y` positive upwards).
    pub fn mouse_offset(&self) -> (f64, f64) {
        self.mouse.offset()
    }

    /// Latest cursor position.
    pub fn mouse_position(&self) -> (f64, f64) {
        (self.mouse.current_x, self.mouse.current_y)
    }

    pub fn mouse_movement(&self) -> &MouseMovement {
        &self.mouse
    }

    /// Offset between the last two scroll samples.
    pub fn scroll_offset(&self) -> f64 {
        self.scroll.current_y - self.scroll.last_y
    }

    /// Number of distinct keys seen so far.
    pub fn tracked_keys(&self) -> usize {
        self.keys.len()
    }
}

//--- Trait Implementations -----------------------------------------------

impl Default for InputTracker {
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
    use crate::core::event_bus::{EventInbox, EventKind};
    use std::rc::Rc;

    //--- Test Helpers -----------------------------------------------------

    const FRAME_DT: f32 = 1.0 / 60.0;

    fn listening_bus() -> (EventBus, Rc<EventInbox>) {
        let bus = EventBus::new();
        let inbox = Rc::new(EventInbox::new());
        bus.subscribe(EventKind::Keyboard, &inbox);
        bus.subscribe(EventKind::MouseMoved, &inbox);
        bus.subscribe(EventKind::MouseScrolled, &inbox);
        (bus, inbox)
    }

    fn keyboard(key: KeyCode, state: KeyState) -> Event {
        Event::Keyboard { key, state }
    }

    //=====================================================================
    // Keyboard Tests
    //=====================================================================

    #[test]
    fn unseen_key_is_released() {
        let tracker = InputTracker::new();
        assert_eq!(tracker.key_state(KeyCode::KeyQ), KeyState::Released);
        assert_eq!(tracker.tracked_keys(), 0);
    }

    #[test]
    fn press_press_release_release_cycles_through_all_states() {
        let (bus, inbox) = listening_bus();
        let mut tracker = InputTracker::new();
        let mut states = Vec::new();

        for action in [KeyAction::Press, KeyAction::Press, KeyAction::Release, KeyAction::Release] {
            tracker.process_key(KeyCode::KeyW, action);
            tracker.update(FRAME_DT, &bus);
            states.push(tracker.key_state(KeyCode::KeyW));
        }

        assert_eq!(
            states,
            vec![
                KeyState::JustPressed,
                KeyState::Pressed,
                KeyState::JustReleased,
                KeyState::Released,
            ]
        );

        let published: Vec<Event> = inbox.drain().collect();
        assert_eq!(
            published,
            vec![
                keyboard(KeyCode::KeyW, KeyState::JustPressed),
                keyboard(KeyCode::KeyW, KeyState::Pressed),
                keyboard(KeyCode::KeyW, KeyState::JustReleased),
                keyboard(KeyCode::KeyW, KeyState::Released),
            ]
        );
    }

    #[test]
    fn held_key_publishes_nothing_after_settling() {
        let (bus, inbox) = listening_bus();
        let mut tracker = InputTracker::new();

        tracker.process_key(KeyCode::Space, KeyAction::Press);
        tracker.update(FRAME_DT, &bus);
        tracker.update(FRAME_DT, &bus);
        assert_eq!(inbox.drain().count(), 2);

        for _ in 0..10 {
            tracker.update(FRAME_DT, &bus);
        }

        assert!(inbox.is_empty());
        assert_eq!(tracker.key_state(KeyCode::Space), KeyState::Pressed);
    }

    #[test]
    fn release_while_just_pressed_still_settles_to_pressed() {
        let (bus, _inbox) = listening_bus();
        let mut tracker = InputTracker::new();

        tracker.process_key(KeyCode::KeyA, KeyAction::Press);
        tracker.update(FRAME_DT, &bus);

        tracker.process_key(KeyCode::KeyA, KeyAction::Release);
        tracker.update(FRAME_DT, &bus);
        assert_eq!(tracker.key_state(KeyCode::KeyA), KeyState::Pressed);

        // The release was consumed; a new one is needed
        tracker.update(FRAME_DT, &bus);
        assert_eq!(tracker.key_state(KeyCode::KeyA), KeyState::Pressed);
    }

    #[test]
    fn transitions_do_not_depend_on_dt() {
        let (bus, inbox) = listening_bus();
        let mut tracker = InputTracker::new();

        tracker.process_key(KeyCode::KeyE, KeyAction::Press);
        tracker.update(0.0, &bus);
        assert_eq!(tracker.key_state(KeyCode::KeyE), KeyState::JustPressed);

        tracker.update(10.0, &bus);
        assert_eq!(tracker.key_state(KeyCode::KeyE), KeyState::Pressed);
        assert_eq!(inbox.drain().count(), 2);
    }

    #[test]
    fn raw_action_is_consumed_by_update() {
        let (bus, _inbox) = listening_bus();
        let mut tracker = InputTracker::new();

        tracker.process_key(KeyCode::KeyD, KeyAction::Release);
        tracker.update(FRAME_DT, &bus);

        assert_eq!(tracker.key_state(KeyCode::KeyD), KeyState::Released);
        assert_eq!(tracker.tracked_keys(), 1);
    }

    #[test]
    fn keys_publish_in_key_code_order() {
        let (bus, inbox) = listening_bus();
        let mut tracker = InputTracker::new();

        tracker.process_key(KeyCode::KeyW, KeyAction::Press);
        tracker.process_key(KeyCode::KeyA, KeyAction::Press);
        tracker.update(FRAME_DT, &bus);

        let published: Vec<Event> = inbox.drain().collect();
        assert_eq!(
            published,
            vec![
                keyboard(KeyCode::KeyA, KeyState::JustPressed),
                keyboard(KeyCode::KeyW, KeyState::JustPressed),
            ]
        );
    }

    //=====================================================================
    // Mouse Tests
    //=====================================================================

    #[test]
    fn first_mouse_sample_sets_baseline_only() {
        let (bus, inbox) = listening_bus();
        let mut tracker = InputTracker::new();

        tracker.process_mouse_movement(400.0, 300.0);
        tracker.update(FRAME_DT, &bus);

        assert!(inbox.is_empty());
        assert_eq!(tracker.mouse_offset(), (0.0, 0.0));
        assert_eq!(tracker.mouse_position(), (400.0, 300.0));
    }

    #[test]
    fn mouse_offset_reverses_y() {
        let (bus, inbox) = listening_bus();
        let mut tracker = InputTracker::new();

        tracker.process_mouse_movement(100.0, 100.0);
        tracker.process_mouse_movement(110.0, 90.0);
        tracker.update(FRAME_DT, &bus);

        assert_eq!(tracker.mouse_offset(), (10.0, 10.0));
        let published: Vec<Event> = inbox.drain().collect();
        assert_eq!(published, vec![Event::MouseMoved { dx: 10.0, dy: 10.0 }]);
    }

    #[test]
    fn every_mouse_sample_is_published_in_order() {
        let (bus, inbox) = listening_bus();
        let mut tracker = InputTracker::new();

        tracker.process_mouse_movement(0.0, 0.0);
        tracker.process_mouse_movement(5.0, 0.0);
        tracker.process_mouse_movement(5.0, 5.0);

        // Nothing goes out before update
        assert!(inbox.is_empty());

        tracker.update(FRAME_DT, &bus);
        let published: Vec<Event> = inbox.drain().collect();
        assert_eq!(
            published,
            vec![
                Event::MouseMoved { dx: 5.0, dy: 0.0 },
                Event::MouseMoved { dx: 0.0, dy: -5.0 },
            ]
        );
    }

    #[test]
    fn scroll_offset_is_delta_from_last_sample() {
        let (bus, inbox) = listening_bus();
        let mut tracker = InputTracker::new();

        tracker.process_mouse_scroll(2.0);
        tracker.process_mouse_scroll(5.0);
        tracker.update(FRAME_DT, &bus);

        assert_eq!(tracker.scroll_offset(), 3.0);
        let published: Vec<Event> = inbox.drain().collect();
        assert_eq!(
            published,
            vec![Event::MouseScrolled { dy: 2.0 }, Event::MouseScrolled { dy: 3.0 }]
        );
    }

    #[test]
    fn mouse_events_precede_key_transitions() {
        let (bus, inbox) = listening_bus();
        let mut tracker = InputTracker::new();

        tracker.process_mouse_movement(0.0, 0.0);
        tracker.process_key(KeyCode::KeyS, KeyAction::Press);
        tracker.process_mouse_movement(1.0, 0.0);
        tracker.update(FRAME_DT, &bus);

        let kinds: Vec<EventKind> = inbox.drain().map(|event| event.kind()).collect();
        assert_eq!(kinds, vec![EventKind::MouseMoved, EventKind::Keyboard]);
    }
}
