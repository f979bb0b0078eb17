//=========================================================================
// Wayfarer Library Root
//
// State-driven orchestration core for an explorable 3D portfolio world.
//
// Responsibilities:
// - Expose the runtime entry point (`Engine`, `EngineBuilder`)
// - Expose the headless-testable game (`Game`) and its services
// - Keep OS integration (`platform`) hidden from end users
//
// Typical usage:
// ```no_run
// use wayfarer::{Backends, EngineBuilder};
//
// fn main() {
//     EngineBuilder::new().build().run(Backends::headless);
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the engine services (state machine, input, animation,
// audio, physics, scene, assets). `world` builds the game on top of them.
//
pub mod config;
pub mod core;
pub mod error;
pub mod prelude;
pub mod world;

//--- Internal Modules ----------------------------------------------------
//
// `platform` owns the window and gamepad polling; `engine` wires it to the
// logic thread.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use config::GameConfig;
pub use engine::{Engine, EngineBuilder};
pub use world::{Backends, Game};
