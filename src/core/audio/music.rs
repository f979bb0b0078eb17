//=========================================================================
// Music Manager
//=========================================================================
//
// State-driven background music with cross-fades.
//
// Flow:
//   Enter(Playing)               → world track
//   Enter(CameraTransitionEnter) → portfolio track
//
//   first request      → play at base volume immediately
//   same track         → nothing
//   different track    → start next at 0, step volumes over `fade_steps`
//                        ticks of one TimerSlot, then stop the old voice
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::{debug, info};

//=== Internal Dependencies ===============================================

use super::{PlaybackParams, SoundManager, VoiceId};
use crate::config::MusicConfig;
use crate::core::state::{GameState, GameStateManager, Phase, StateInbox};
use crate::core::timer::TimerSlot;

//=== Track ===============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Track {
    state: GameState,
    voice: VoiceId,
}

//=== MusicManager ========================================================

pub struct MusicManager {
    tracks: HashMap<GameState, String>,
    inbox: StateInbox,
    volume: f32,
    fade_steps: u32,
    fade_duration: f32,
    current: Option<Track>,
    next: Option<Track>,
    fade: TimerSlot,
    step: u32,
}

impl MusicManager {
    //--- Construction -----------------------------------------------------

    pub fn new(config: &MusicConfig, states: &mut GameStateManager) -> Self {
        let mut tracks = HashMap::new();
        tracks.insert(GameState::Playing, config.world_track.clone());
        tracks.insert(GameState::CameraTransitionEnter, config.portfolio_track.clone());

        let watched: Vec<GameState> = tracks.keys().copied().collect();
        let inbox = states.subscribe(Phase::Enter, &watched);

        Self {
            tracks,
            inbox,
            volume: config.volume.clamp(0.0, 1.0),
            fade_steps: config.fade_steps.max(1),
            fade_duration: config.fade_duration().as_secs_f32(),
            current: None,
            next: None,
            fade: TimerSlot::new(),
            step: 0,
        }
    }

    //--- Update -----------------------------------------------------------

    /// Reacts to queued state entries, then advances any running fade.
    pub fn update(&mut self, dt: f32, sounds: &mut SoundManager) {
        let entered: Vec<GameState> = self.inbox.drain().map(|event| event.new_state).collect();
        for state in entered {
            self.cross_fade(state, sounds);
        }

        for _ in 0..self.fade.tick(dt) {
            self.fade_step(sounds);
            if !self.fade.is_live() {
                break;
            }
        }
    }

    /// Switches to the track bound to `state`, if any.
    pub fn cross_fade(&mut self, state: GameState, sounds: &mut SoundManager) {
        let Some(path) = self.tracks.get(&state).cloned() else {
            return;
        };

        let Some(current) = self.current else {
            let params = self.params(self.volume);
            if let Some(voice) = sounds.play_file(&path, params) {
                info!(target: "music", "Music started: {}", path);
                self.current = Some(Track { state, voice });
            }
            return;
        };

        if self.next.is_some_and(|next| next.state == state) {
            return;
        }

        if current.state == state {
            // Back to the track that was fading out: drop the fade.
            if let Some(abandoned) = self.next.take() {
                self.fade.cancel();
                sounds.stop_voice(abandoned.voice);
                sounds.set_voice_volume(current.voice, self.volume);
            }
            return;
        }

        self.fade.cancel();
        if let Some(abandoned) = self.next.take() {
            sounds.stop_voice(abandoned.voice);
        }

        let Some(voice) = sounds.play_file(&path, self.params(0.0)) else {
            return;
        };

        debug!(target: "music", "Cross-fading {} -> {}", current.state, state);
        self.next = Some(Track { state, voice });
        self.step = 0;
        self.fade.start(std::time::Duration::from_secs_f32(
            self.fade_duration / self.fade_steps as f32,
        ));
    }

    //--- Queries ----------------------------------------------------------

    /// State whose track is (or is becoming) audible.
    pub fn current_track(&self) -> Option<GameState> {
        self.next.or(self.current).map(|track| track.state)
    }

    pub fn is_fading(&self) -> bool {
        self.fade.is_live()
    }

    //--- Internal Helpers -------------------------------------------------

    fn params(&self, volume: f32) -> PlaybackParams {
        PlaybackParams {
            volume,
            looping: true,
            spatial: None,
        }
    }

    fn fade_step(&mut self, sounds: &mut SoundManager) {
        self.step += 1;
        let volume_step = self.volume / self.fade_steps as f32;
        let level = volume_step * self.step as f32;

        if let Some(current) = self.current {
            sounds.set_voice_volume(current.voice, (self.volume - level).max(0.0));
        }
        if let Some(next) = self.next {
            sounds.set_voice_volume(next.voice, level.max(0.0));
        }

        if self.step >= self.fade_steps {
            if let Some(old) = self.current.take() {
                sounds.set_voice_volume(old.voice, 0.0);
                sounds.stop_voice(old.voice);
            }
            self.current = self.next.take();
            self.fade.cancel();
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::audio::AudioBackend;
    use crate::core::state::TransitionTable;
    use crate::error::AudioError;
    use std::cell::RefCell;
    use std::rc::Rc;

    //--- Test Helpers -----------------------------------------------------

    #[derive(Default)]
    struct Log {
        played: Vec<String>,
        stopped: Vec<VoiceId>,
        volumes: HashMap<VoiceId, f32>,
    }

    struct Recording(Rc<RefCell<Log>>);

    impl AudioBackend for Recording {
        fn preload(&mut self, _path: &str) -> Result<(), AudioError> {
            Ok(())
        }

        fn play(&mut self, path: &str, params: &PlaybackParams) -> Result<VoiceId, AudioError> {
            let mut log = self.0.borrow_mut();
            log.played.push(path.to_string());
            let voice = VoiceId(log.played.len() as u64);
            log.volumes.insert(voice, params.volume);
            Ok(voice)
        }

        fn stop(&mut self, voice: VoiceId) {
            self.0.borrow_mut().stopped.push(voice);
        }

        fn set_volume(&mut self, voice: VoiceId, volume: f32) {
            self.0.borrow_mut().volumes.insert(voice, volume);
        }
    }

    fn setup() -> (MusicManager, GameStateManager, SoundManager, Rc<RefCell<Log>>) {
        let mut states = GameStateManager::starting_in(
            GameState::Dialogue,
            TransitionTable::standard(),
        );
        let music = MusicManager::new(&MusicConfig::default(), &mut states);
        let log = Rc::new(RefCell::new(Log::default()));
        let sounds = SoundManager::with_seed(Box::new(Recording(Rc::clone(&log))), 1);
        (music, states, sounds, log)
    }

    //--- Tests ------------------------------------------------------------

    #[test]
    fn first_track_plays_immediately_at_base_volume() {
        let (mut music, _states, mut sounds, log) = setup();
        music.cross_fade(GameState::Playing, &mut sounds);

        let log = log.borrow();
        assert_eq!(log.played, vec![MusicConfig::default().world_track]);
        assert_eq!(log.volumes.get(&VoiceId(1)), Some(&0.1));
        assert!(!music.is_fading());
    }

    #[test]
    fn same_track_is_not_restarted() {
        let (mut music, _states, mut sounds, log) = setup();
        music.cross_fade(GameState::Playing, &mut sounds);
        music.cross_fade(GameState::Playing, &mut sounds);
        assert_eq!(log.borrow().played.len(), 1);
    }

    #[test]
    fn state_entry_cross_fades_over_duration() {
        let (mut music, mut states, mut sounds, log) = setup();
        music.cross_fade(GameState::Playing, &mut sounds);

        assert!(states.set_state(GameState::CameraTransitionEnter));
        music.update(0.0, &mut sounds);
        assert!(music.is_fading());
        assert_eq!(music.current_track(), Some(GameState::CameraTransitionEnter));

        // Halfway through the fade both voices are audible.
        music.update(1.0, &mut sounds);
        {
            let log = log.borrow();
            let old = log.volumes[&VoiceId(1)];
            let new = log.volumes[&VoiceId(2)];
            assert!(old > 0.0 && old < 0.1);
            assert!(new > 0.0 && new < 0.1);
        }

        music.update(1.1, &mut sounds);
        assert!(!music.is_fading());

        let log = log.borrow();
        assert_eq!(log.stopped, vec![VoiceId(1)]);
        assert!((log.volumes[&VoiceId(2)] - 0.1).abs() < 1e-4);
    }

    #[test]
    fn redirected_fade_stops_abandoned_track() {
        let (mut music, _states, mut sounds, log) = setup();
        music.cross_fade(GameState::Playing, &mut sounds);
        music.cross_fade(GameState::CameraTransitionEnter, &mut sounds);
        music.update(0.5, &mut sounds);

        music.cross_fade(GameState::Playing, &mut sounds);
        assert_eq!(log.borrow().stopped, vec![VoiceId(2)]);
        assert!(!music.is_fading());
        assert_eq!(music.current_track(), Some(GameState::Playing));
    }

    #[test]
    fn unbound_state_is_ignored() {
        let (mut music, _states, mut sounds, log) = setup();
        music.cross_fade(GameState::Paused, &mut sounds);
        assert!(log.borrow().played.is_empty());
        assert_eq!(music.current_track(), None);
    }
}
