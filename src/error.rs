//=========================================================================
// Errors
//=========================================================================
//
// Error types surfaced at collaborator boundaries.
//
// Gameplay-level rejections (invalid transitions, unknown clips, a second
// dialogue session) are not errors: they return `bool` or no-op and log.
// The types below cover the places where something outside the core can
// fail: configuration files, asset loading, audio playback, the OS window.
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== ConfigError =========================================================

/// Failure while reading or parsing a [`crate::config::GameConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The RON document is malformed or does not match the schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// A value parsed but is outside its allowed range.
    #[error("invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

//=== AssetError ==========================================================

/// Failure reported by an [`crate::core::assets::AssetLoader`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    #[error("asset not found: {0}")]
    NotFound(String),

    #[error("failed to decode asset {path}: {reason}")]
    Decode { path: String, reason: String },
}

//=== AudioError ==========================================================

/// Failure reported by the sound layer or its backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AudioError {
    /// No sound bank is registered under the key.
    #[error("unknown sound key: {0}")]
    UnknownKey(String),

    /// The backend refused to start playback (e.g. autoplay policy).
    #[error("playback of {path} rejected: {reason}")]
    Rejected { path: String, reason: String },

    /// The backend could not load the file.
    #[error("failed to load sound {path}: {reason}")]
    Load { path: String, reason: String },
}

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
///
/// These are fatal for the window; the logic thread is told to exit.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// Event loop creation failed (OS-level issue).
    #[error("event loop creation failed: {0}")]
    EventLoopCreation(#[source] winit::error::EventLoopError),

    /// Event loop execution error.
    #[error("event loop error: {0}")]
    EventLoopExecution(#[source] winit::error::EventLoopError),
}

//=========================================================================
// Unit Tests
//=========================================================================
