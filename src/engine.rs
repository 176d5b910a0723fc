//=========================================================================
// Runtime
//
// Main entry point: configures the services and hands them to the
// platform event loop.
//
// Architecture:
// ```text
//     RuntimeBuilder  ──build()──>  Runtime  ──run(hook)──>  [Platform]
//         │                           │
//         ├─ with_entity_capacity()   ├─ init(|services| ...)
//         ├─ with_process_capacity()  └─ blocks until the window closes
//         ├─ with_max_frame_dt()
//         └─ with_window_*()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use log::info;
use thiserror::Error;
use winit::error::{EventLoopError, OsError};

//=== Internal Dependencies ===============================================

use crate::core::globals::{Services, ServicesConfig};
use crate::platform::{Platform, PlatformSettings};

//=== RuntimeError ========================================================

/// Fatal failures of the windowing layer.
///
/// None of these can be recovered from inside the frame loop, so they end
/// [`Runtime::run`].
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Failed to create the event loop (OS-level issue).
    #[error("event loop creation failed: {0}")]
    EventLoopCreation(#[source] EventLoopError),

    #[error("event loop error: {0}")]
    EventLoopExecution(#[source] EventLoopError),

    /// The OS refused to open the window.
    #[error("window creation failed: {0}")]
    WindowCreation(#[source] OsError),
}

//=== RuntimeBuilder ======================================================

/// Builder for configuring and constructing a [`Runtime`].
///
/// # Default Values
///
/// - **Entity capacity**: 1024 slots
/// - **Process capacity**: 1024 per buffer
/// - **Max frame dt**: 0.25 seconds
/// - **Window**: "framestep", 800x600
///
/// # Examples
///
/// ```no_run
/// use framestep::RuntimeBuilder;
/// use framestep::core::entity::{DrawCall, EntitySimulation, Monster};
///
/// RuntimeBuilder::new()
///     .with_entity_capacity(256)
///     .with_window_title("Arena")
///     .build()
///     .init(|services| {
///         services.entities_mut().create::<Monster>().ok();
///         services.processes_mut().spawn(EntitySimulation::new());
///     })
///     .run(|services, _dt| {
///         let mut calls: Vec<DrawCall> = Vec::new();
///         services.entities().draw_entities(&mut calls);
///     })?;
/// # Ok::<(), framestep::RuntimeError>(())
/// ```
#[derive(Debug, Clone)]
pub struct RuntimeBuilder {
    services: ServicesConfig,
    max_frame_dt: f32,
    window_title: String,
    window_size: (u32, u32),
}

impl RuntimeBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            services: ServicesConfig::default(),
            max_frame_dt: 0.25,
            window_title: String::from("framestep"),
            window_size: (800, 600),
        }
    }

    /// Sets the number of entity pool slots.
    ///
    /// Default: 1024
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_entity_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Entity capacity must be positive");
        self.services.entity_capacity = capacity;
        self
    }

    /// Sets the initial room of each process buffer. The buffers still
    /// grow past this if needed.
    ///
    /// Default: 1024
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_process_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Process capacity must be positive");
        self.services.process_capacity = capacity;
        self
    }

    /// Caps the `dt` handed to a single frame, so a stall (window drag,
    /// debugger pause) does not turn into one huge simulation step.
    ///
    /// Default: 0.25
    ///
    /// # Panics
    ///
    /// Panics if `max_dt <= 0.0`.
    pub fn with_max_frame_dt(mut self, max_dt: f32) -> Self {
        assert!(max_dt > 0.0, "Max frame dt must be positive, got {}", max_dt);
        self.max_frame_dt = max_dt;
        self
    }

    /// # Panics
    ///
    /// Panics if `title` is empty.
    pub fn with_window_title(mut self, title: impl Into<String>) -> Self {
        let title = title.into();
        assert!(!title.is_empty(), "Window title must not be empty");
        self.window_title = title;
        self
    }

    /// Sets the logical window size in pixels.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        assert!(
            width > 0 && height > 0,
            "Window size must be positive, got {}x{}",
            width,
            height
        );
        self.window_size = (width, height);
        self
    }

    /// Builds the runtime and its services.
    pub fn build(self) -> Runtime {
        info!(
            "Building runtime (entities: {}, processes: {}, max dt: {})",
            self.services.entity_capacity, self.services.process_capacity, self.max_frame_dt
        );

        Runtime {
            services: Services::with_config(self.services),
            settings: PlatformSettings {
                title: self.window_title,
                size: self.window_size,
                max_frame_dt: self.max_frame_dt,
            },
        }
    }
}

impl Default for RuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Runtime =============================================================

/// Owns the [`Services`] and runs them under a winit event loop.
///
/// Create via [`RuntimeBuilder`].
///
/// # Architecture
///
/// ```text
/// Runtime (calling thread)
///   └─► Platform (winit event loop)
///         ├─ window events ──> InputTracker (raw samples)
///         └─ RedrawRequested ──> Services::step(dt) ──> frame hook
/// ```
pub struct Runtime {
    services: Services,
    settings: PlatformSettings,
}

impl Runtime {
    //--- Initialization ---------------------------------------------------

    /// Gives mutable access to the services before the loop starts:
    /// spawn entities, push processes, subscribe observers.
    pub fn init<F>(mut self, init_fn: F) -> Self
    where
        F: FnOnce(&mut Services),
    {
        info!("Initializing runtime services");
        init_fn(&mut self.services);
        self
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    //--- Execution --------------------------------------------------------

    /// Runs the event loop on the calling thread until the window closes.
    ///
    /// `frame_hook` runs once per frame after `Services::step`, with the
    /// same `dt`. Rendering belongs here.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError`] if the event loop or the window cannot be
    /// created, or if the loop fails while running.
    ///
    /// # Panics
    ///
    /// Panics if called off the main thread on platforms where winit
    /// requires it (macOS/iOS).
    pub fn run<F>(self, frame_hook: F) -> Result<(), RuntimeError>
    where
        F: FnMut(&mut Services, f32),
    {
        info!("Starting runtime (window: \"{}\")", self.settings.title);

        let result = Platform::new(self.services, self.settings, frame_hook).run();

        info!("Runtime shutdown complete");
        result
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
