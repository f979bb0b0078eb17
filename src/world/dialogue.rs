//=========================================================================
// Dialogue
//=========================================================================
//
// Paged, character-by-character dialogue with voice cues.
//
// Session phases:
//
//   Idle ──start──> Displaying ──reveal done──> PageComplete
//                      │  ^                          │
//                      │  └──── continue (next) ─────┤
//                      └─continue (fast-forward)─────┘
//                                                    └─ continue (last) ─> Closed
//
// The reveal timer is the only thing that advances on its own; it lives
// in a single `TimerSlot`, so restarting always cancels first and at most
// one reveal runs at a time.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::Arc;
use std::time::Duration;

use glam::Vec3;
use log::{debug, info};
use serde::Deserialize;

//=== Internal Dependencies ===============================================

use crate::config::DialogueConfig;
use crate::core::audio::{PlaybackParams, SoundManager, Spatial, VoiceId};
use crate::core::state::{GameState, GameStateManager, Phase, StateInbox};
use crate::core::timer::TimerSlot;

//=== DialogueEntry =======================================================

/// One page of dialogue.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DialogueEntry {
    pub text: String,
    /// Voice line played when the page opens.
    #[serde(default)]
    pub audio_path: Option<String>,
}

impl DialogueEntry {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), audio_path: None }
    }

    pub fn with_audio(text: impl Into<String>, audio_path: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            audio_path: Some(audio_path.into()),
        }
    }

    fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

//=== DialogueSpeaker =====================================================

/// Who is talking: where voice cues come from and what they say.
#[derive(Debug, Clone, PartialEq)]
pub struct DialogueSpeaker {
    pub name: String,
    pub position: Vec3,
    pub entries: Arc<[DialogueEntry]>,
}

//=== DialoguePhase =======================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialoguePhase {
    /// No session has run yet.
    Idle,
    /// Characters are being revealed.
    Displaying,
    /// The page is fully shown; waiting for continue.
    PageComplete,
    /// The last session ended.
    Closed,
}

//=== DialogueSurface =====================================================

/// What the dialogue box shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DialogueSurface {
    pub visible: bool,
    pub speaker: String,
    pub text: String,
}

//=== DialogueManager =====================================================

pub struct DialogueManager {
    reveal_interval: Duration,
    exit_inbox: StateInbox,
    timer: TimerSlot,
    surface: DialogueSurface,

    //--- Session ---------------------------------------------------------
    active: bool,
    speaker: Option<DialogueSpeaker>,
    page: usize,
    cursor: usize,
    animating: bool,
    voice: Option<VoiceId>,

    //--- Bookkeeping -----------------------------------------------------
    sessions_started: u32,
    ever_closed: bool,
}

impl DialogueManager {
    //--- Construction -----------------------------------------------------

    pub fn new(config: &DialogueConfig, states: &mut GameStateManager) -> Self {
        Self {
            reveal_interval: config.reveal_interval(),
            exit_inbox: states.subscribe(Phase::Exit, &[GameState::Dialogue]),
            timer: TimerSlot::new(),
            surface: DialogueSurface::default(),
            active: false,
            speaker: None,
            page: 0,
            cursor: 0,
            animating: false,
            voice: None,
            sessions_started: 0,
            ever_closed: false,
        }
    }

    //--- Session Control --------------------------------------------------

    /// Opens a session for `speaker`. Does nothing while one is active.
    pub fn start_dialogue(&mut self, speaker: DialogueSpeaker, audio: &mut SoundManager) -> bool {
        if self.active {
            debug!(target: "dialogue", "Dialogue already active, ignoring {}", speaker.name);
            return false;
        }

        info!(target: "dialogue", "Dialogue started with {}", speaker.name);
        self.active = true;
        self.page = 0;
        self.cursor = 0;
        self.sessions_started += 1;
        self.surface.visible = true;
        self.surface.speaker = speaker.name.clone();
        self.speaker = Some(speaker);

        self.open_page(audio);
        true
    }

    /// Fast-forwards a revealing page, otherwise advances or closes.
    pub fn handle_continue(&mut self, audio: &mut SoundManager, states: &mut GameStateManager) {
        if !self.active {
            return;
        }

        if self.animating {
            self.finish_reveal();
            if let Some(entry) = self.current_entry() {
                let full = entry.text.clone();
                self.cursor = entry.char_count();
                self.surface.text = full;
            }
            return;
        }

        self.page += 1;
        if self.page < self.page_count() {
            self.cursor = 0;
            self.open_page(audio);
        } else {
            self.hide(audio, states);
        }
    }

    /// Ends the session and asks for the camera pan that follows dialogue.
    pub fn hide(&mut self, audio: &mut SoundManager, states: &mut GameStateManager) {
        self.teardown(audio);
        states.set_state(GameState::CameraTransitionEnter);
    }

    //--- Update -----------------------------------------------------------

    /// Drives the reveal timer and reacts to leaving the Dialogue state.
    pub fn update(&mut self, dt: f32, audio: &mut SoundManager) {
        let left_dialogue = self.exit_inbox.drain().count() > 0;
        if left_dialogue && self.active {
            debug!(target: "dialogue", "Dialogue state exited, closing session");
            self.teardown(audio);
            return;
        }

        for _ in 0..self.timer.tick(dt) {
            self.reveal_next();
            if !self.animating {
                break;
            }
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn phase(&self) -> DialoguePhase {
        match (self.active, self.animating) {
            (true, true) => DialoguePhase::Displaying,
            (true, false) => DialoguePhase::PageComplete,
            (false, _) if self.ever_closed => DialoguePhase::Closed,
            (false, _) => DialoguePhase::Idle,
        }
    }

    pub fn surface(&self) -> &DialogueSurface {
        &self.surface
    }

    /// `(page index, revealed characters)`.
    pub fn cursors(&self) -> (usize, usize) {
        (self.page, self.cursor)
    }

    pub fn speaker(&self) -> Option<&DialogueSpeaker> {
        self.speaker.as_ref()
    }

    pub fn is_revealing(&self) -> bool {
        self.animating
    }

    pub fn has_live_timer(&self) -> bool {
        self.timer.is_live()
    }

    /// Sessions opened since construction.
    pub fn sessions_started(&self) -> u32 {
        self.sessions_started
    }

    //--- Internal Helpers -------------------------------------------------

    fn page_count(&self) -> usize {
        self.speaker.as_ref().map_or(0, |s| s.entries.len())
    }

    fn current_entry(&self) -> Option<&DialogueEntry> {
        self.speaker.as_ref()?.entries.get(self.page)
    }

    /// Clears the box, restarts the reveal and cues the page's voice line.
    fn open_page(&mut self, audio: &mut SoundManager) {
        self.surface.text.clear();
        self.animating = true;
        self.timer.start(self.reveal_interval);

        if let Some(previous) = self.voice.take() {
            audio.stop_voice(previous);
        }

        let cue = self.speaker.as_ref().and_then(|speaker| {
            let path = speaker.entries.get(self.page)?.audio_path.clone()?;
            Some((path, speaker.position))
        });

        if let Some((path, position)) = cue {
            let params = PlaybackParams {
                spatial: Some(Spatial::at(position)),
                ..PlaybackParams::default()
            };
            self.voice = audio.play_file(&path, params);
        }
    }

    fn reveal_next(&mut self) {
        let next = self.current_entry().and_then(|entry| entry.text.chars().nth(self.cursor));
        match next {
            Some(ch) => {
                self.surface.text.push(ch);
                self.cursor += 1;
                let done = self.current_entry().map_or(true, |entry| self.cursor >= entry.char_count());
                if done {
                    self.finish_reveal();
                }
            }
            None => self.finish_reveal(),
        }
    }

    fn finish_reveal(&mut self) {
        self.timer.cancel();
        self.animating = false;
    }

    fn teardown(&mut self, audio: &mut SoundManager) {
        info!(target: "dialogue", "Dialogue hidden");
        self.active = false;
        self.speaker = None;
        self.cursor = 0;
        self.finish_reveal();
        self.surface.visible = false;
        self.surface.text.clear();
        self.surface.speaker.clear();
        self.ever_closed = true;

        if let Some(voice) = self.voice.take() {
            audio.stop_voice(voice);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::audio::SilentAudio;
    use crate::core::state::TransitionTable;

    //--- Test Helpers -----------------------------------------------------

    struct Fixture {
        dialogue: DialogueManager,
        states: GameStateManager,
        audio: SoundManager,
    }

    fn fixture() -> Fixture {
        let mut states = GameStateManager::starting_in(GameState::Playing, TransitionTable::standard());
        let dialogue = DialogueManager::new(&DialogueConfig::default(), &mut states);
        let audio = SoundManager::with_seed(Box::new(SilentAudio::default()), 0);
        Fixture { dialogue, states, audio }
    }

    fn speaker(pages: &[&str]) -> DialogueSpeaker {
        DialogueSpeaker {
            name: "Mage".to_string(),
            position: Vec3::new(8.0, 0.0, 20.25),
            entries: pages.iter().map(|text| DialogueEntry::new(*text)).collect(),
        }
    }

    //--- Reveal -----------------------------------------------------------

    #[test]
    fn reveals_one_character_per_interval() {
        let mut f = fixture();
        f.dialogue.start_dialogue(speaker(&["Hello"]), &mut f.audio);
        assert_eq!(f.dialogue.phase(), DialoguePhase::Displaying);
        assert!(f.dialogue.surface().visible);

        f.dialogue.update(0.051, &mut f.audio);
        assert_eq!(f.dialogue.surface().text, "H");

        f.dialogue.update(0.1, &mut f.audio);
        assert_eq!(f.dialogue.surface().text, "Hel");

        f.dialogue.update(1.0, &mut f.audio);
        assert_eq!(f.dialogue.surface().text, "Hello");
        assert_eq!(f.dialogue.phase(), DialoguePhase::PageComplete);
        assert!(!f.dialogue.has_live_timer());
    }

    #[test]
    fn multibyte_text_reveals_by_character() {
        let mut f = fixture();
        f.dialogue.start_dialogue(speaker(&["héé"]), &mut f.audio);
        f.dialogue.update(0.101, &mut f.audio);
        assert_eq!(f.dialogue.surface().text, "hé");
    }

    #[test]
    fn continue_mid_reveal_fast_forwards() {
        let mut f = fixture();
        f.dialogue.start_dialogue(speaker(&["A long first page", "Second"]), &mut f.audio);
        f.dialogue.update(0.12, &mut f.audio);

        f.dialogue.handle_continue(&mut f.audio, &mut f.states);
        assert_eq!(f.dialogue.surface().text, "A long first page");
        assert_eq!(f.dialogue.cursors(), (0, 17));
        assert!(!f.dialogue.has_live_timer());

        // No characters appended after cancellation.
        f.dialogue.update(5.0, &mut f.audio);
        assert_eq!(f.dialogue.surface().text, "A long first page");
    }

    #[test]
    fn continue_on_complete_page_advances() {
        let mut f = fixture();
        f.dialogue.start_dialogue(speaker(&["One", "Two"]), &mut f.audio);
        f.dialogue.update(1.0, &mut f.audio);

        f.dialogue.handle_continue(&mut f.audio, &mut f.states);
        assert_eq!(f.dialogue.cursors(), (1, 0));
        assert_eq!(f.dialogue.surface().text, "");
        assert!(f.dialogue.is_revealing());
    }

    //--- Session ----------------------------------------------------------

    #[test]
    fn second_start_is_a_no_op() {
        let mut f = fixture();
        assert!(f.dialogue.start_dialogue(speaker(&["First", "Page"]), &mut f.audio));
        f.dialogue.update(0.11, &mut f.audio);
        let before = f.dialogue.cursors();

        let other = DialogueSpeaker { name: "Barbarian".into(), ..speaker(&["Other"]) };
        assert!(!f.dialogue.start_dialogue(other, &mut f.audio));

        assert_eq!(f.dialogue.cursors(), before);
        assert_eq!(f.dialogue.speaker().map(|s| s.name.as_str()), Some("Mage"));
        assert_eq!(f.dialogue.sessions_started(), 1);
    }

    #[test]
    fn last_continue_hides_and_requests_camera_pan() {
        let mut f = fixture();
        assert!(f.states.set_state(GameState::Dialogue));
        f.dialogue.start_dialogue(speaker(&["Only"]), &mut f.audio);
        f.dialogue.update(1.0, &mut f.audio);

        f.dialogue.handle_continue(&mut f.audio, &mut f.states);

        assert!(!f.dialogue.is_active());
        assert!(!f.dialogue.surface().visible);
        assert_eq!(f.dialogue.phase(), DialoguePhase::Closed);
        assert_eq!(f.states.current(), GameState::CameraTransitionEnter);

        // The exit event of our own hide does not tear anything down twice.
        f.dialogue.update(0.0, &mut f.audio);
        assert_eq!(f.states.current(), GameState::CameraTransitionEnter);
    }

    #[test]
    fn leaving_dialogue_state_closes_session_without_transition() {
        let mut f = fixture();
        assert!(f.states.set_state(GameState::Dialogue));
        f.dialogue.start_dialogue(speaker(&["Page"]), &mut f.audio);

        assert!(f.states.set_state(GameState::Playing));
        f.dialogue.update(0.0, &mut f.audio);

        assert!(!f.dialogue.is_active());
        assert!(!f.dialogue.has_live_timer());
        assert_eq!(f.states.current(), GameState::Playing);
    }

    #[test]
    fn empty_speaker_closes_on_first_continue() {
        let mut f = fixture();
        assert!(f.states.set_state(GameState::Dialogue));
        f.dialogue.start_dialogue(speaker(&[]), &mut f.audio);
        f.dialogue.update(0.06, &mut f.audio);
        assert_eq!(f.dialogue.phase(), DialoguePhase::PageComplete);

        f.dialogue.handle_continue(&mut f.audio, &mut f.states);
        assert!(!f.dialogue.is_active());
    }
}
