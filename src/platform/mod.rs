//=========================================================================
// Platform Subsystem
//
// Bridges Winit (OS-level events) with the runtime services.
//
// Architecture:
// ```text
//  Calling Thread:
//  ┌──────────────────────────────────────────────┐
//  │  Winit Event Loop                            │
//  │   ↓                                          │
//  │  InputProcessor                              │
//  │   ├─ KeyEvent  → (KeyCode, KeyAction)        │
//  │   └─ Wheel     → absolute scroll position    │
//  │   ↓                                          │
//  │  InputTracker::process_*()   (raw samples)   │
//  │   ↓                                          │
//  │  RedrawRequested                             │
//  │   ├─ FrameClock::tick()      → dt            │
//  │   ├─ Services::step(dt)                      │
//  │   └─ frame hook(services, dt)                │
//  └──────────────────────────────────────────────┘
// ```
//
// Frame Boundary: RedrawRequested
//   → Every device sample since the last frame is already in the tracker
//   → One step, one hook call, then the next redraw is requested
//
// Responsibilities:
// - Create and manage the OS window
// - Convert Winit types into tracker samples
// - Drive one frame per redraw
// - Surface fatal window errors to `Runtime::run`
//
//=========================================================================

//=== Submodules ==========================================================

mod frame_clock;
mod input_processor;

//=== External Crates =====================================================

use std::time::Instant;

use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::core::globals::Services;
use crate::engine::RuntimeError;
use frame_clock::FrameClock;
use input_processor::InputProcessor;

//=== PlatformSettings ====================================================

/// Window and pacing settings carried over from the runtime builder.
#[derive(Debug, Clone)]
pub(crate) struct PlatformSettings {
    pub title: String,
    /// Logical size in pixels.
    pub size: (u32, u32),
    pub max_frame_dt: f32,
}

//=== Platform ============================================================

/// Window owner and frame driver.
///
/// Runs on the calling thread (a Winit requirement on macOS/iOS) and owns
/// the services for the lifetime of the loop.
///
/// # Lifecycle
///
/// 1. **Construction**: `Platform::new(services, settings, hook)`
/// 2. **Execution**: `platform.run()` starts the event loop
/// 3. **Event processing**: Winit calls `ApplicationHandler` methods
/// 4. **Shutdown**: window closed (or window creation failed) → loop exits
pub(crate) struct Platform<F> {
    /// OS window handle (None until `resumed()` called).
    window: Option<Window>,
    settings: PlatformSettings,

    services: Services,
    frame_hook: F,

    clock: FrameClock,
    input_processor: InputProcessor,

    /// Fatal error raised inside a callback, returned once the loop ends.
    failure: Option<RuntimeError>,
}

impl<F> Platform<F>
where
    F: FnMut(&mut Services, f32),
{
    //--- Construction -----------------------------------------------------

    /// Does not create the window yet; that happens lazily in `resumed()`.
    pub fn new(services: Services, settings: PlatformSettings, frame_hook: F) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            window: None,
            clock: FrameClock::new(settings.max_frame_dt),
            settings,
            services,
            frame_hook,
            input_processor: InputProcessor::new(),
            failure: None,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the event loop until the window closes.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError`] if the event loop cannot be created, fails
    /// while running, or the window cannot be opened.
    pub fn run(mut self) -> Result<(), RuntimeError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop = EventLoop::new().map_err(RuntimeError::EventLoopCreation)?;
        event_loop
            .run_app(&mut self)
            .map_err(RuntimeError::EventLoopExecution)?;

        match self.failure.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    //--- Frame Driving ----------------------------------------------------

    /// Steps the services once and hands them to the frame hook.
    fn run_frame(&mut self, dt: f32) {
        trace!(target: "platform", "Frame (dt: {:.4})", dt);
        self.services.step(dt);
        (self.frame_hook)(&mut self.services, dt);
    }

    //--- Raw Input Feed ---------------------------------------------------

    fn feed_cursor(&mut self, x: f64, y: f64) {
        self.services.input_mut().process_mouse_movement(x, y);
    }

    fn feed_scroll(&mut self, position: f64) {
        trace!(target: "platform::input", "Scroll position: {}", position);
        self.services.input_mut().process_mouse_scroll(position);
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }
}

//=== Winit Integration ===================================================

impl<F> ApplicationHandler for Platform<F>
where
    F: FnMut(&mut Services, f32),
{
    /// Called when app becomes active (startup or mobile resume).
    ///
    /// Creates the window if it doesn't exist yet. On mobile, this may be
    /// called multiple times (suspend/resume cycle).
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let (width, height) = self.settings.size;
        let attrs = WindowAttributes::default()
            .with_title(self.settings.title.as_str())
            .with_inner_size(LogicalSize::new(width, height));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                self.failure = Some(RuntimeError::WindowCreation(e));
                event_loop.exit();
            }
        }
    }

    /// Handles per-window events.
    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                event_loop.exit();
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.feed_cursor(position.x, position.y);
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                match self.input_processor.process_key_event(&key_event) {
                    Some((key, action)) => self.services.input_mut().process_key(key, action),
                    None => trace!(target: "platform::input", "Repeat or unmapped key ignored"),
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let position = self.input_processor.process_mouse_wheel(delta);
                self.feed_scroll(position);
            }

            WindowEvent::RedrawRequested => {
                let dt = self.clock.tick(Instant::now());
                self.run_frame(dt);

                // Request next frame
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {
                // Ignore: Resized, Focused, etc.
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event_bus::{Event, EventInbox, EventKind};
    use crate::core::input::{KeyAction, KeyCode, KeyState};
    use std::rc::Rc;

    fn settings() -> PlatformSettings {
        PlatformSettings {
            title: String::from("test"),
            size: (320, 240),
            max_frame_dt: 0.25,
        }
    }

    #[test]
    fn platform_creation() {
        let platform = Platform::new(Services::new(), settings(), |_: &mut Services, _: f32| {});
        assert!(platform.window().is_none(), "Window should be created lazily");
    }

    #[test]
    fn frame_steps_services_then_calls_hook() {
        let mut frames = Vec::new();
        let mut platform = Platform::new(Services::new(), settings(), |services: &mut Services, dt: f32| {
            frames.push((services.input().key_state(KeyCode::Space), dt));
        });

        platform.services.input_mut().process_key(KeyCode::Space, KeyAction::Press);
        platform.run_frame(0.016);
        platform.run_frame(0.02);
        drop(platform);

        assert_eq!(frames, vec![(KeyState::JustPressed, 0.016), (KeyState::Pressed, 0.02)]);
    }

    #[test]
    fn cursor_and_scroll_feed_reach_the_bus() {
        let mut platform = Platform::new(Services::new(), settings(), |_: &mut Services, _: f32| {});
        let inbox = Rc::new(EventInbox::new());
        platform.services.events().subscribe(EventKind::MouseMoved, &inbox);
        platform.services.events().subscribe(EventKind::MouseScrolled, &inbox);

        platform.feed_cursor(100.0, 100.0);
        platform.feed_cursor(110.0, 90.0);
        platform.feed_scroll(2.0);
        platform.run_frame(0.0);

        let events: Vec<Event> = inbox.drain().collect();
        assert_eq!(
            events,
            vec![Event::MouseMoved { dx: 10.0, dy: 10.0 }, Event::MouseScrolled { dy: 2.0 }]
        );
    }
}
