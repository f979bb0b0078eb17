//=========================================================================
// Platform Subsystem
//=========================================================================
//
// Bridges Winit (window, keyboard) and gilrs (gamepads) with the core
// thread.
//
// Architecture:
// ```text
//  Main Thread:                      Logic Thread:
//  ┌───────────────────────────┐    ┌──────────────────────┐
//  │  Winit Event Loop         │    │  CoreSystems-        │
//  │   ├─ KeyboardInput        │    │  Orchestrator        │
//  │   └─ RedrawRequested      │    │   ↓                  │
//  │        ├─ poll gilrs      │    │  EventCollector      │
//  │        └─ flush buffer ───┼───>│   ↓                  │
//  │  InputProcessor           │    │  Game::handle_input  │
//  │  InputBuffer              │    │  Game::update(dt)    │
//  └───────────────────────────┘    └──────────────────────┘
//                    PlatformEvent (bounded channel)
// ```
//
// RedrawRequested is the frame boundary: everything buffered since the
// previous redraw is sent as one `PlatformEvent::Inputs`. If the core
// thread is gone, events are dropped with a warning and the window stays
// closable.
//
//=========================================================================

//=== Submodules ==========================================================

mod input_buffer;
mod input_processor;

//=== External Dependencies ===============================================

use crossbeam_channel::Sender;
use gilrs::Gilrs;
use log::{debug, error, info, trace, warn};
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Dependencies ===============================================

use crate::config::EngineConfig;
use crate::core::platform_bridge::PlatformEvent;
use crate::error::PlatformError;
use input_buffer::InputBuffer;
use input_processor::InputProcessor;

//=== Platform ============================================================

/// Window owner and input aggregator. Main thread only.
pub(crate) struct Platform {
    window: Option<Window>,
    window_title: String,
    window_size: (u32, u32),
    buffer: InputBuffer,
    event_sender: Sender<PlatformEvent>,
    input_processor: InputProcessor,
    gilrs: Option<Gilrs>,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    /// Window creation is deferred to `resumed()`.
    pub(crate) fn new(event_sender: Sender<PlatformEvent>, config: &EngineConfig) -> Self {
        let gilrs = match Gilrs::new() {
            Ok(gilrs) => Some(gilrs),
            Err(e) => {
                warn!(target: "platform", "Gamepad support unavailable: {}", e);
                None
            }
        };

        info!(target: "platform", "Platform subsystem initialized");
        Self {
            window: None,
            window_title: config.window_title.clone(),
            window_size: config.window_size,
            buffer: InputBuffer::new(),
            event_sender,
            input_processor: InputProcessor::new(),
            gilrs,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the Winit event loop until the window closes.
    pub(crate) fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;
        event_loop
            .run_app(&mut self)
            .map_err(PlatformError::EventLoopExecution)
    }

    //--- Internal Helpers -------------------------------------------------

    fn poll_gamepads(&mut self) {
        let Some(gilrs) = self.gilrs.as_mut() else {
            return;
        };

        while let Some(event) = gilrs.next_event() {
            if let Some(input) = self.input_processor.process_gamepad_event(&event.event) {
                self.buffer.push(input);
            }
        }
    }

    fn flush_input_buffer(&mut self) {
        let Some((discrete, continuous)) = self.buffer.drain() else {
            return;
        };

        let discrete_count = discrete.len();
        let continuous_count = continuous.len();

        trace!(
            target: "platform::input",
            "Flushing {} discrete + {} continuous events",
            discrete_count,
            continuous_count
        );

        if self
            .event_sender
            .send(PlatformEvent::Inputs { discrete, continuous })
            .is_err()
        {
            warn!(
                target: "platform::input",
                "Channel disconnected, dropping {} events",
                discrete_count + continuous_count
            );
        }
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists");
            return;
        }

        let (width, height) = self.window_size;
        let attrs = WindowAttributes::default()
            .with_title(self.window_title.clone())
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
                let _ = self.event_sender.send(PlatformEvent::WindowClosed);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match &event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                let _ = self.event_sender.send(PlatformEvent::WindowClosed);
                event_loop.exit();
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                match self.input_processor.process_key_event(key_event) {
                    Some(input) => self.buffer.push(input),
                    None => trace!(target: "platform::input", "Unmapped or repeated key ignored"),
                }
            }

            WindowEvent::RedrawRequested => {
                self.poll_gamepads();
                self.flush_input_buffer();

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}
