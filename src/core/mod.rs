//=========================================================================
// Core Systems Orchestrator
//=========================================================================
//
// Runs the game on the logic (non-platform) thread.
//
// Architecture:
// ```text
//   spawn_core_thread(receiver, config, backends)
//     └─ thread
//          ├─ backends()             built on this thread (not Send)
//          ├─ Game::new(config, ..)
//          └─ loop @ TPS
//               1. EventCollector::collect_frame()  → Exit? stop
//               2. Game::handle_input(batches)
//               3. Game::update(dt)                 measured, capped
//               4. sleep for the rest of the tick
// ```
//
// The platform thread never touches game state; everything crosses the
// bounded channel as `PlatformEvent`s.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod animation;
pub mod assets;
pub mod audio;
pub mod input;
pub mod physics;
pub(crate) mod platform_bridge;
pub mod scene_graph;
pub mod state;
pub mod timer;

//=== External Dependencies ===============================================

use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;
use log::{info, trace};

//=== Internal Dependencies ===============================================

use crate::config::GameConfig;
use crate::world::{Backends, Game};
use platform_bridge::{EventCollector, PlatformEvent, TickControl};

//=== Constants ===========================================================

/// Longest step handed to the game; stalls beyond this are absorbed.
const MAX_FRAME_DT: f32 = 0.1;

//=== CoreSystemsOrchestrator =============================================

pub(crate) struct CoreSystemsOrchestrator {
    tps: f64,
}

impl CoreSystemsOrchestrator {
    pub(crate) fn new(tps: f64) -> Self {
        Self { tps }
    }

    /// Spawns the logic thread. `backends` runs on that thread, so the
    /// collaborators it builds never have to be `Send`.
    pub(crate) fn spawn_core_thread<F>(
        self,
        receiver: Receiver<PlatformEvent>,
        config: GameConfig,
        backends: F,
    ) -> thread::JoinHandle<()>
    where
        F: FnOnce() -> Backends + Send + 'static,
    {
        let frame_duration = Duration::from_secs_f64(1.0 / self.tps);

        thread::spawn(move || {
            let mut collector = EventCollector::new(receiver);
            let mut game = Game::new(config, backends());
            let mut last_tick = Instant::now();

            info!(target: "core", "Core thread running at {} TPS", self.tps);

            loop {
                let frame_start = Instant::now();
                let dt = frame_start.duration_since(last_tick).as_secs_f32();
                last_tick = frame_start;

                if Self::tick(&mut collector, &mut game, dt) == TickControl::Exit {
                    info!(target: "core", "Core thread exiting");
                    break;
                }

                let elapsed = frame_start.elapsed();
                if elapsed < frame_duration {
                    thread::sleep(frame_duration - elapsed);
                }
            }
        })
    }

    /// One iteration: input in, one game frame out.
    pub(crate) fn tick(collector: &mut EventCollector, game: &mut Game, dt: f32) -> TickControl {
        if collector.collect_frame() == TickControl::Exit {
            return TickControl::Exit;
        }

        game.handle_input(collector.batches());

        let dt = dt.clamp(0.0, MAX_FRAME_DT);
        trace!(target: "core", "Tick dt={:.4}", dt);
        game.update(dt);

        TickControl::Continue
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{InputEvent, KeyCode};
    use crate::core::state::GameState;
    use crossbeam_channel::unbounded;

    #[test]
    fn tick_feeds_input_before_update() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);
        let mut game = Game::new(GameConfig::default(), Backends::headless());

        tx.send(PlatformEvent::Inputs {
            discrete: vec![InputEvent::KeyDown(KeyCode::Digit1)],
            continuous: Vec::new(),
        })
        .unwrap();

        let control = CoreSystemsOrchestrator::tick(&mut collector, &mut game, 1.0 / 60.0);

        assert_eq!(control, TickControl::Continue);
        assert_eq!(game.state(), GameState::PortfolioView);
    }

    #[test]
    fn tick_stops_on_window_close() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);
        let mut game = Game::new(GameConfig::default(), Backends::headless());

        tx.send(PlatformEvent::WindowClosed).unwrap();

        assert_eq!(
            CoreSystemsOrchestrator::tick(&mut collector, &mut game, 1.0 / 60.0),
            TickControl::Exit
        );
    }

    #[test]
    fn core_thread_exits_when_platform_disconnects() {
        let (tx, rx) = unbounded();
        let handle = CoreSystemsOrchestrator::new(240.0).spawn_core_thread(
            rx,
            GameConfig::default(),
            Backends::headless,
        );

        drop(tx);
        assert!(handle.join().is_ok());
    }
}
