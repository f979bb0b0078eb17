//=========================================================================
// Game Configuration
//=========================================================================
//
// Tunables and content for the world, loaded from RON.
//
// Every section carries `#[serde(default)]`, so a config file only needs
// to name the values it overrides:
//
// ```text
// (
//     dialogue: (reveal_interval_ms: 30),
//     player: (speed: 4.5),
// )
// ```
//
// `GameConfig::default()` reproduces the shipped world: a rogue avatar,
// the projects NPC by the campfire and the education NPC further north.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::Path;
use std::time::Duration;

use glam::Vec3;
use serde::Deserialize;

//=== Internal Dependencies ===============================================

use crate::core::state::ViewKind;
use crate::error::ConfigError;
use crate::world::dialogue::DialogueEntry;

//=== GameConfig ==========================================================

/// Root configuration document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub engine: EngineConfig,
    pub input: InputConfig,
    pub player: PlayerConfig,
    pub npcs: Vec<NpcConfig>,
    pub dialogue: DialogueConfig,
    pub camera: CameraConfig,
    pub music: MusicConfig,
    pub light: LightConfig,
}

impl GameConfig {
    /// Parses and validates a RON document.
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the values the runtime cannot recover from.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let engine = &self.engine;
        if !(engine.tps.is_finite() && engine.tps > 0.0) {
            return Err(ConfigError::Invalid {
                field: "engine.tps",
                reason: format!("must be a positive number, got {}", engine.tps),
            });
        }
        if engine.channel_capacity == 0 {
            return Err(ConfigError::Invalid {
                field: "engine.channel_capacity",
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }

    /// Reads and parses a RON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_ron_str(&source)
    }

    /// Shipped world with the default cast of NPCs.
    pub fn with_default_world() -> Self {
        Self {
            npcs: default_npcs(),
            ..Self::default()
        }
    }
}

//=== EngineConfig ========================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub tps: f64,
    pub channel_capacity: usize,
    pub window_title: String,
    pub window_size: (u32, u32),
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tps: 60.0,
            channel_capacity: 128,
            window_title: "Wayfarer".to_string(),
            window_size: (1280, 720),
        }
    }
}

//=== InputConfig =========================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Analog magnitudes strictly below this read as zero.
    pub dead_zone: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self { dead_zone: 0.2 }
    }
}

//=== PlayerConfig ========================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub model: String,
    pub start_position: [f32; 3],
    pub idle_clip: String,
    pub idle_duration: f32,
    pub walk_clip: String,
    pub walk_duration: f32,
    /// Horizontal speed in units per second.
    pub speed: f32,
    /// Facing interpolation rate in radians per second.
    pub turn_rate: f32,
    /// Rotation applied to input space before it becomes world space.
    pub input_rotation_deg: f32,
    /// Capsule collider dimensions.
    pub capsule_half_height: f32,
    pub capsule_radius: f32,
    pub fade_delay: f32,
    pub fade_duration: f32,
    pub footstep_key: String,
    pub footstep_sounds: Vec<String>,
}

impl PlayerConfig {
    pub fn start_position(&self) -> Vec3 {
        Vec3::from_array(self.start_position)
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            model: "assets/adventurers/Rogue.glb".to_string(),
            start_position: [6.0, 1.0, 12.0],
            idle_clip: "Idle".to_string(),
            idle_duration: 2.0,
            walk_clip: "Walking_A".to_string(),
            walk_duration: 0.9,
            speed: 3.0,
            turn_rate: 10.0,
            input_rotation_deg: -90.0,
            capsule_half_height: 0.5,
            capsule_radius: 0.3,
            fade_delay: 0.5,
            fade_duration: 1.5,
            footstep_key: "GRASS".to_string(),
            footstep_sounds: (1..=4)
                .map(|i| format!("assets/sounds/footsteps/grass_{i:02}.ogg"))
                .collect(),
        }
    }
}

//=== NpcConfig ===========================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NpcConfig {
    pub name: String,
    pub model: String,
    pub position: [f32; 3],
    pub idle_clip: String,
    pub idle_duration: f32,
    pub view: ViewKind,
    pub interactive_distance: f32,
    pub dialogue: Vec<DialogueEntry>,
}

impl NpcConfig {
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }
}

impl Default for NpcConfig {
    fn default() -> Self {
        Self {
            name: "Wanderer".to_string(),
            model: String::new(),
            position: [9.0, 0.0, 12.0],
            idle_clip: "Sit_Chair_Idle".to_string(),
            idle_duration: 0.3,
            view: ViewKind::Portfolio,
            interactive_distance: 4.0,
            dialogue: Vec::new(),
        }
    }
}

fn default_npcs() -> Vec<NpcConfig> {
    vec![
        NpcConfig {
            name: "Barbarian".to_string(),
            model: "assets/adventurers/Barbarian_NoWeapons.glb".to_string(),
            position: [9.0, 0.0, 12.0],
            idle_clip: "Sit_Chair_Idle".to_string(),
            idle_duration: 0.3,
            view: ViewKind::Portfolio,
            interactive_distance: 4.0,
            dialogue: vec![
                DialogueEntry::with_audio(
                    "Ah... another traveler. Drawn here by fate, or by purpose? It matters not. All who walk this path seek something.",
                    "assets/voiceLines/ProjectsNPC/1_ProjectsNPC.mp3",
                ),
                DialogueEntry::with_audio(
                    "I have witnessed creations born of skill and resolve, each bearing the mark of its maker. Some shaped in quiet reflection, others tempered through challenge and strife.",
                    "assets/voiceLines/ProjectsNPC/2_ProjectsNPC.mp3",
                ),
                DialogueEntry::with_audio(
                    "If knowledge is what you seek, then look upon them. Their purpose is clear to those with the will to see.",
                    "assets/voiceLines/ProjectsNPC/3_ProjectsNPC.mp3",
                ),
            ],
        },
        NpcConfig {
            name: "Mage".to_string(),
            model: "assets/adventurers/Mage.glb".to_string(),
            position: [8.0, 0.0, 20.25],
            idle_clip: "Idle".to_string(),
            idle_duration: 2.0,
            view: ViewKind::Education,
            interactive_distance: 4.0,
            dialogue: vec![
                DialogueEntry::with_audio(
                    "You walk the path of progress... I know it well. The long nights, the silent battles fought beneath flickering lamps.",
                    "assets/voiceLines/EducationNPC/00_WizardVoice.mp3",
                ),
                DialogueEntry::with_audio(
                    "If you would know the foundations upon which I stand, then look, and see for yourself.",
                    "assets/voiceLines/EducationNPC/01_WizardVoice.mp3",
                ),
            ],
        },
    ]
}

//=== DialogueConfig ======================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DialogueConfig {
    pub reveal_interval_ms: u64,
}

impl DialogueConfig {
    pub fn reveal_interval(&self) -> Duration {
        Duration::from_millis(self.reveal_interval_ms)
    }
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self { reveal_interval_ms: 50 }
    }
}

//=== CameraConfig ========================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Follow position relative to the player.
    pub follow_offset: [f32; 3],
    /// Fraction of the remaining distance closed per second.
    pub follow_speed: f32,
    /// Displacement from the captured pose while panning to an overlay.
    pub pan_offset: [f32; 3],
    pub pan_duration_ms: u64,
    /// Overshoot of the back-out easing curve.
    pub back_overshoot: f32,
}

impl CameraConfig {
    pub fn follow_offset(&self) -> Vec3 {
        Vec3::from_array(self.follow_offset)
    }

    pub fn pan_offset(&self) -> Vec3 {
        Vec3::from_array(self.pan_offset)
    }

    pub fn pan_duration(&self) -> Duration {
        Duration::from_millis(self.pan_duration_ms)
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            follow_offset: [-8.0, 6.0, 0.0],
            follow_speed: 4.0,
            pan_offset: [0.0, 6.0, 0.0],
            pan_duration_ms: 2000,
            back_overshoot: 1.2,
        }
    }
}

//=== MusicConfig =========================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MusicConfig {
    pub world_track: String,
    pub portfolio_track: String,
    pub volume: f32,
    pub fade_duration_ms: u64,
    pub fade_steps: u32,
}

impl MusicConfig {
    pub fn fade_duration(&self) -> Duration {
        Duration::from_millis(self.fade_duration_ms)
    }
}

impl Default for MusicConfig {
    fn default() -> Self {
        Self {
            world_track: "assets/sounds/music/Echoes of Solitude.mp3".to_string(),
            portfolio_track: "assets/sounds/music/PortfolioMusic.mp3".to_string(),
            volume: 0.1,
            fade_duration_ms: 2000,
            fade_steps: 60,
        }
    }
}

//=== LightConfig =========================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    pub follow_offset: [f32; 3],
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            follow_offset: [1.0, 4.0, 4.0],
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_shipped_constants() {
        let config = GameConfig::default();
        assert_eq!(config.input.dead_zone, 0.2);
        assert_eq!(config.dialogue.reveal_interval(), Duration::from_millis(50));
        assert_eq!(config.camera.pan_duration(), Duration::from_millis(2000));
        assert_eq!(config.music.fade_steps, 60);
        assert!(config.npcs.is_empty());
    }

    #[test]
    fn default_world_has_two_npcs() {
        let config = GameConfig::with_default_world();
        assert_eq!(config.npcs.len(), 2);
        assert_eq!(config.npcs[0].view, ViewKind::Portfolio);
        assert_eq!(config.npcs[1].view, ViewKind::Education);
        assert_eq!(config.npcs[0].dialogue.len(), 3);
        assert!(config.npcs[1].dialogue.iter().all(|e| e.audio_path.is_some()));
    }

    #[test]
    fn partial_ron_overrides_only_named_fields() {
        let config = GameConfig::from_ron_str(
            "(dialogue: (reveal_interval_ms: 30), player: (speed: 4.5))",
        )
        .expect("valid config");

        assert_eq!(config.dialogue.reveal_interval_ms, 30);
        assert_eq!(config.player.speed, 4.5);
        assert_eq!(config.player.walk_clip, "Walking_A");
        assert_eq!(config.camera.pan_duration_ms, 2000);
    }

    #[test]
    fn non_positive_tps_is_rejected() {
        for source in ["(engine: (tps: 0.0))", "(engine: (tps: -30.0))"] {
            let err = GameConfig::from_ron_str(source).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid { field: "engine.tps", .. }), "{err}");
        }
    }

    #[test]
    fn zero_channel_capacity_is_rejected() {
        let err = GameConfig::from_ron_str("(engine: (channel_capacity: 0))").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "engine.channel_capacity", .. }));
    }

    #[test]
    fn defaults_validate() {
        assert!(GameConfig::default().validate().is_ok());
        assert!(GameConfig::with_default_world().validate().is_ok());
    }

    #[test]
    fn npc_list_parses_from_ron() {
        let config = GameConfig::from_ron_str(
            r#"(
                npcs: [
                    (
                        name: "Smith",
                        model: "smith.glb",
                        position: (1.0, 0.0, 2.0),
                        view: Education,
                        dialogue: [(text: "Hello there.", audio_path: None)],
                    ),
                ],
            )"#,
        )
        .expect("valid config");

        let npc = &config.npcs[0];
        assert_eq!(npc.name, "Smith");
        assert_eq!(npc.position(), Vec3::new(1.0, 0.0, 2.0));
        assert_eq!(npc.view, ViewKind::Education);
        assert_eq!(npc.interactive_distance, 4.0);
        assert_eq!(npc.dialogue[0].text, "Hello there.");
    }

    #[test]
    fn malformed_ron_is_a_parse_error() {
        let err = GameConfig::from_ron_str("(player: (speed: \"fast\"))").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = GameConfig::load("/definitely/not/here.ron").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
