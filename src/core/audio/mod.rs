//=========================================================================
// Audio
//=========================================================================
//
// Sound banks and music over a host-provided playback backend.
//
// Architecture:
//   SoundManager
//     ├─ banks: key → [path]          (random variant per play)
//     ├─ voices: key → VoiceId        (last voice started for the key)
//     └─ backend: Box<dyn AudioBackend>
//
//   MusicManager drives a SoundManager from state enter events.
//
// Playback failures (missing bank, backend rejection) are logged and
// swallowed: the game keeps running without that sound.
//
//=========================================================================

//=== Module Declarations =================================================

mod music;

pub use music::MusicManager;

//=== External Dependencies ===============================================

use std::collections::HashMap;

use glam::Vec3;
use log::{debug, trace, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

//=== Internal Dependencies ===============================================

use crate::error::AudioError;

//=== Backend Types =======================================================

/// Opaque handle to one playing sound, issued by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VoiceId(pub u64);

/// Distance model for positional playback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spatial {
    pub position: Vec3,
    /// Distance at which attenuation starts.
    pub ref_distance: f32,
    /// Distance beyond which the sound is no longer attenuated further.
    pub max_distance: f32,
    pub rolloff: f32,
}

impl Spatial {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ref_distance: 1.0,
            max_distance: 20.0,
            rolloff: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackParams {
    pub volume: f32,
    pub looping: bool,
    pub spatial: Option<Spatial>,
}

impl Default for PlaybackParams {
    fn default() -> Self {
        Self {
            volume: 1.0,
            looping: false,
            spatial: None,
        }
    }
}

//=== AudioBackend ========================================================

/// Host playback device.
pub trait AudioBackend {
    fn preload(&mut self, path: &str) -> Result<(), AudioError>;
    fn play(&mut self, path: &str, params: &PlaybackParams) -> Result<VoiceId, AudioError>;
    fn stop(&mut self, voice: VoiceId);
    fn set_volume(&mut self, voice: VoiceId, volume: f32);
}

/// Backend that accepts everything and plays nothing.
#[derive(Debug, Default)]
pub struct SilentAudio {
    next_voice: u64,
}

impl AudioBackend for SilentAudio {
    fn preload(&mut self, _path: &str) -> Result<(), AudioError> {
        Ok(())
    }

    fn play(&mut self, _path: &str, _params: &PlaybackParams) -> Result<VoiceId, AudioError> {
        self.next_voice += 1;
        Ok(VoiceId(self.next_voice))
    }

    fn stop(&mut self, _voice: VoiceId) {}

    fn set_volume(&mut self, _voice: VoiceId, _volume: f32) {}
}

//=== SoundManager ========================================================

pub struct SoundManager {
    backend: Box<dyn AudioBackend>,
    banks: HashMap<String, Vec<String>>,
    voices: HashMap<String, VoiceId>,
    rng: StdRng,
}

impl SoundManager {
    //--- Construction -----------------------------------------------------

    pub fn new(backend: Box<dyn AudioBackend>) -> Self {
        Self::with_rng(backend, StdRng::from_entropy())
    }

    /// Uses a seeded generator so variant selection is reproducible.
    pub fn with_seed(backend: Box<dyn AudioBackend>, seed: u64) -> Self {
        Self::with_rng(backend, StdRng::seed_from_u64(seed))
    }

    fn with_rng(backend: Box<dyn AudioBackend>, rng: StdRng) -> Self {
        Self {
            backend,
            banks: HashMap::new(),
            voices: HashMap::new(),
            rng,
        }
    }

    //--- Banks ------------------------------------------------------------

    /// Registers `paths` as the variants of `key`, preloading each.
    ///
    /// Variants the backend fails to preload are dropped from the bank.
    pub fn load<S: AsRef<str>>(&mut self, key: &str, paths: &[S]) {
        let mut variants = Vec::with_capacity(paths.len());
        for path in paths {
            let path = path.as_ref();
            match self.backend.preload(path) {
                Ok(()) => variants.push(path.to_string()),
                Err(e) => warn!(target: "audio", "{}", e),
            }
        }

        debug!(target: "audio", "Sound bank '{}' loaded ({} variants)", key, variants.len());
        self.banks.insert(key.to_string(), variants);
    }

    pub fn has_bank(&self, key: &str) -> bool {
        self.banks.get(key).is_some_and(|bank| !bank.is_empty())
    }

    //--- Playback by Key --------------------------------------------------

    /// Plays one random variant of `key`.
    pub fn play(&mut self, key: &str) -> Option<VoiceId> {
        self.play_key(key, PlaybackParams::default())
    }

    /// Plays one random variant of `key` from a point in the world.
    pub fn play_at(&mut self, key: &str, position: Vec3) -> Option<VoiceId> {
        self.play_key(
            key,
            PlaybackParams {
                spatial: Some(Spatial::at(position)),
                ..PlaybackParams::default()
            },
        )
    }

    /// Stops the last voice started for `key`.
    pub fn stop(&mut self, key: &str) {
        if let Some(voice) = self.voices.remove(key) {
            self.backend.stop(voice);
        }
    }

    //--- Playback by Path -------------------------------------------------

    /// Plays a single file outside any bank.
    pub fn play_file(&mut self, path: &str, params: PlaybackParams) -> Option<VoiceId> {
        match self.backend.play(path, &params) {
            Ok(voice) => {
                trace!(target: "audio", "Playing '{}' as {:?}", path, voice);
                Some(voice)
            }
            Err(e) => {
                warn!(target: "audio", "{}", e);
                None
            }
        }
    }

    pub fn stop_voice(&mut self, voice: VoiceId) {
        self.backend.stop(voice);
    }

    pub fn set_voice_volume(&mut self, voice: VoiceId, volume: f32) {
        self.backend.set_volume(voice, volume.clamp(0.0, 1.0));
    }

    //--- Internal Helpers -------------------------------------------------

    fn play_key(&mut self, key: &str, params: PlaybackParams) -> Option<VoiceId> {
        let Some(path) = self.pick_variant(key) else {
            warn!(target: "audio", "{}", AudioError::UnknownKey(key.to_string()));
            return None;
        };

        let voice = self.play_file(&path, params)?;
        self.voices.insert(key.to_string(), voice);
        Some(voice)
    }

    fn pick_variant(&mut self, key: &str) -> Option<String> {
        self.banks.get(key)?.choose(&mut self.rng).cloned()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    //--- Test Helpers -----------------------------------------------------

    #[derive(Default)]
    struct Log {
        played: Vec<(String, PlaybackParams)>,
        stopped: Vec<VoiceId>,
    }

    struct Recording {
        log: Rc<RefCell<Log>>,
        reject: Option<&'static str>,
    }

    impl AudioBackend for Recording {
        fn preload(&mut self, path: &str) -> Result<(), AudioError> {
            if Some(path) == self.reject {
                return Err(AudioError::Load { path: path.into(), reason: "corrupt".into() });
            }
            Ok(())
        }

        fn play(&mut self, path: &str, params: &PlaybackParams) -> Result<VoiceId, AudioError> {
            if Some(path) == self.reject {
                return Err(AudioError::Rejected { path: path.into(), reason: "autoplay".into() });
            }
            let mut log = self.log.borrow_mut();
            log.played.push((path.to_string(), *params));
            Ok(VoiceId(log.played.len() as u64))
        }

        fn stop(&mut self, voice: VoiceId) {
            self.log.borrow_mut().stopped.push(voice);
        }

        fn set_volume(&mut self, _voice: VoiceId, _volume: f32) {}
    }

    fn manager(reject: Option<&'static str>) -> (SoundManager, Rc<RefCell<Log>>) {
        let log = Rc::new(RefCell::new(Log::default()));
        let backend = Recording { log: Rc::clone(&log), reject };
        (SoundManager::with_seed(Box::new(backend), 7), log)
    }

    //--- Tests ------------------------------------------------------------

    #[test]
    fn play_picks_a_variant_from_the_bank() {
        let (mut sounds, log) = manager(None);
        let bank = ["a.ogg", "b.ogg", "c.ogg"];
        sounds.load("GRASS", &bank);

        for _ in 0..20 {
            assert!(sounds.play("GRASS").is_some());
        }

        let log = log.borrow();
        assert_eq!(log.played.len(), 20);
        assert!(log.played.iter().all(|(path, _)| bank.contains(&path.as_str())));
    }

    #[test]
    fn unknown_key_is_not_fatal() {
        let (mut sounds, log) = manager(None);
        assert_eq!(sounds.play("MISSING"), None);
        assert!(log.borrow().played.is_empty());
    }

    #[test]
    fn rejected_playback_returns_none() {
        let (mut sounds, _log) = manager(Some("voice.mp3"));
        assert_eq!(sounds.play_file("voice.mp3", PlaybackParams::default()), None);
    }

    #[test]
    fn failed_preload_drops_variant() {
        let (mut sounds, _log) = manager(Some("bad.ogg"));
        sounds.load("STEP", &["bad.ogg"]);
        assert!(!sounds.has_bank("STEP"));
        assert_eq!(sounds.play("STEP"), None);
    }

    #[test]
    fn play_at_is_positional() {
        let (mut sounds, log) = manager(None);
        sounds.load("BELL", &["bell.ogg"]);
        sounds.play_at("BELL", Vec3::new(1.0, 2.0, 3.0));

        let log = log.borrow();
        let spatial = log.played[0].1.spatial.map(|s| s.position);
        assert_eq!(spatial, Some(Vec3::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn stop_targets_last_voice_of_key() {
        let (mut sounds, log) = manager(None);
        sounds.load("BELL", &["bell.ogg"]);
        sounds.play("BELL");
        let second = sounds.play("BELL");

        sounds.stop("BELL");
        sounds.stop("BELL");

        assert_eq!(log.borrow().stopped, second.into_iter().collect::<Vec<_>>());
    }
}
