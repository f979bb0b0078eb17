//=========================================================================
// Wayfarer Engine
//
// Main entry point: wires the platform thread to the game thread.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──run(backends)──>  [Runtime]
//         │                          │
//         ├─ with_config()           └─ spawns logic thread (Game)
//         ├─ with_tps()                 runs platform on this thread
//         └─ with_channel_capacity()    blocks until exit
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Receiver, Sender};
use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::config::GameConfig;
use crate::core::platform_bridge::PlatformEvent;
use crate::core::CoreSystemsOrchestrator;
use crate::platform::Platform;
use crate::world::Backends;

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **Config**: [`GameConfig::with_default_world`]
/// - **TPS / channel capacity**: taken from the config's `engine` section
///   (60.0 and 128 unless overridden)
///
/// # Examples
///
/// ```no_run
/// use wayfarer::{Backends, EngineBuilder, GameConfig};
///
/// let config = GameConfig::load("assets/world.ron").unwrap_or_default();
/// EngineBuilder::new()
///     .with_config(config)
///     .with_tps(120.0)
///     .build()
///     .run(Backends::headless);
/// ```
pub struct EngineBuilder {
    config: GameConfig,
    tps: f64,
    channel_capacity: usize,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self::from_config(GameConfig::with_default_world())
    }

    fn from_config(config: GameConfig) -> Self {
        let (tps, capacity) = (config.engine.tps, config.engine.channel_capacity);
        Self { config, tps: 60.0, channel_capacity: 128 }
            .with_tps(tps)
            .with_channel_capacity(capacity)
    }

    /// Replaces the game configuration. TPS and channel capacity are reset
    /// to the values in `config.engine`; call the other setters afterwards
    /// to override them.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`with_tps`](Self::with_tps) and
    /// [`with_channel_capacity`](Self::with_channel_capacity).
    pub fn with_config(self, config: GameConfig) -> Self {
        Self::from_config(config)
    }

    /// Sets the target ticks per second for the logic thread.
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        self.tps = tps;
        self
    }

    /// Sets the channel capacity for platform → core communication.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    pub fn build(self) -> Engine {
        info!("Building engine (TPS: {}, channel: {})", self.tps, self.channel_capacity);

        Engine {
            config: self.config,
            tps: self.tps,
            channel_capacity: self.channel_capacity,
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Wayfarer runtime.
///
/// ```text
/// Engine (Main Thread)
///   ├─► CoreSystemsOrchestrator (Logic Thread @ TPS)
///   │     └─► Game: states, input, dialogue, entities, camera
///   │
///   └─► Platform (Event Loop)
///         └─► Window, keyboard, gamepads
///
/// Communication: bounded crossbeam channel (PlatformEvent)
/// ```
pub struct Engine {
    config: GameConfig,
    tps: f64,
    channel_capacity: usize,
}

impl Engine {
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    //--- Execution --------------------------------------------------------

    /// Starts the runtime and blocks until the window closes.
    ///
    /// `backends` is called once on the logic thread to build the physics,
    /// scene, audio and asset collaborators.
    ///
    /// # Lifecycle
    ///
    /// 1. Creates the bounded platform → core channel
    /// 2. Spawns the logic thread running at the configured TPS
    /// 3. Runs the platform event loop (blocks here)
    /// 4. On window close: platform exits → channel disconnects → logic
    ///    thread terminates
    pub fn run<F>(self, backends: F)
    where
        F: FnOnce() -> Backends + Send + 'static,
    {
        info!("Starting engine runtime (TPS: {})", self.tps);

        //--- 1. Create communication channel -----------------------------
        let (tx, rx): (Sender<PlatformEvent>, Receiver<PlatformEvent>) =
            bounded(self.channel_capacity);

        info!("Channel created (capacity: {})", self.channel_capacity);

        //--- 2. Spawn the core logic thread -------------------------------
        let engine_config = self.config.engine.clone();
        let core_handle =
            CoreSystemsOrchestrator::new(self.tps).spawn_core_thread(rx, self.config, backends);
        info!("Core logic thread spawned");

        //--- 3. Launch the platform subsystem -----------------------------
        let platform = Platform::new(tx, &engine_config);
        info!("Platform initialized, entering event loop");

        if let Err(e) = platform.run() {
            error!("Platform error: {}", e);
        }

        info!("Platform event loop exited");

        //--- 4. Cleanup: Wait for logic thread to terminate --------------
        match core_handle.join() {
            Ok(()) => info!("Core thread terminated cleanly"),
            Err(e) => error!("Core thread panicked: {:?}", e),
        }

        info!("Engine shutdown complete");
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //=====================================================================
    // EngineBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = EngineBuilder::new();
        assert_eq!(builder.tps, 60.0);
        assert_eq!(builder.channel_capacity, 128);
        assert_eq!(builder.config.npcs.len(), 2);
    }

    #[test]
    fn builder_with_tps() {
        let builder = EngineBuilder::new().with_tps(120.0);
        assert_eq!(builder.tps, 120.0);
    }

    #[test]
    #[should_panic(expected = "TPS must be positive")]
    fn builder_with_tps_panics_on_zero() {
        EngineBuilder::new().with_tps(0.0);
    }

    #[test]
    #[should_panic(expected = "TPS must be positive")]
    fn builder_with_tps_panics_on_negative() {
        EngineBuilder::new().with_tps(-60.0);
    }

    #[test]
    fn builder_with_channel_capacity() {
        let builder = EngineBuilder::new().with_channel_capacity(256);
        assert_eq!(builder.channel_capacity, 256);
    }

    #[test]
    #[should_panic(expected = "Channel capacity must be positive")]
    fn builder_with_channel_capacity_panics_on_zero() {
        EngineBuilder::new().with_channel_capacity(0);
    }

    #[test]
    fn config_supplies_engine_settings() {
        let mut config = GameConfig::default();
        config.engine.tps = 30.0;
        config.engine.channel_capacity = 16;

        let builder = EngineBuilder::new().with_config(config).with_channel_capacity(32);
        assert_eq!(builder.tps, 30.0);
        assert_eq!(builder.channel_capacity, 32);
        assert!(builder.config.npcs.is_empty());
    }

    #[test]
    #[should_panic(expected = "TPS must be positive")]
    fn config_with_zero_tps_panics_in_builder() {
        let mut config = GameConfig::default();
        config.engine.tps = 0.0;
        EngineBuilder::new().with_config(config);
    }

    #[test]
    #[should_panic(expected = "Channel capacity must be positive")]
    fn config_with_zero_capacity_panics_in_builder() {
        let mut config = GameConfig::default();
        config.engine.channel_capacity = 0;
        EngineBuilder::new().with_config(config);
    }

    #[test]
    fn build_carries_settings() {
        let engine = EngineBuilder::new().with_tps(90.0).build();
        assert_eq!(engine.tps, 90.0);
        assert_eq!(engine.config().engine.window_title, "Wayfarer");
    }
}
