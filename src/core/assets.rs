//=========================================================================
// Assets
//=========================================================================
//
// Model loading seam and load-progress bookkeeping.
//
// Decoding is owned by the host (`AssetLoader`). The core only needs a
// model's clip list to configure animators, and treats every failure as
// "this asset is absent": entities that depend on it are skipped, the
// rest of the world still comes up.
//
// Architecture:
//   paths → load_models() → AssetLoader::load_model() per path
//     ├─ Ok  → ModelCache
//     ├─ Err → error!, skipped
//     └─ LoadingProgress::complete_one() after each attempt
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::error::AssetError;

//=== Model Types =========================================================

/// Named animation clip shipped with a model.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipInfo {
    pub name: String,
    /// Native length in seconds.
    pub duration: f32,
}

impl ClipInfo {
    pub fn new(name: impl Into<String>, duration: f32) -> Self {
        Self { name: name.into(), duration }
    }
}

/// Decoded model as far as the core is concerned.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelAsset {
    pub path: String,
    pub clips: Vec<ClipInfo>,
}

//=== AssetLoader =========================================================

/// Host-provided model loader.
pub trait AssetLoader {
    fn load_model(&mut self, path: &str) -> Result<ModelAsset, AssetError>;
}

//=== StaticAssets ========================================================

/// Loader over a fixed in-memory table, for headless runs and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticAssets {
    models: HashMap<String, Vec<ClipInfo>>,
}

impl StaticAssets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a model by path with its clip list.
    pub fn with_model(mut self, path: impl Into<String>, clips: Vec<ClipInfo>) -> Self {
        self.models.insert(path.into(), clips);
        self
    }
}

impl AssetLoader for StaticAssets {
    fn load_model(&mut self, path: &str) -> Result<ModelAsset, AssetError> {
        self.models
            .get(path)
            .map(|clips| ModelAsset { path: path.to_string(), clips: clips.clone() })
            .ok_or_else(|| AssetError::NotFound(path.to_string()))
    }
}

//=== LoadingProgress =====================================================

/// Percentage of attempted loads, always within 0–100.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadingProgress {
    total: usize,
    attempted: usize,
}

impl LoadingProgress {
    pub fn new(total: usize) -> Self {
        Self { total, attempted: 0 }
    }

    pub fn complete_one(&mut self) {
        self.attempted = (self.attempted + 1).min(self.total);
    }

    pub fn percent(&self) -> f32 {
        if self.total == 0 {
            return 100.0;
        }
        clamp_percent(self.attempted as f32 / self.total as f32 * 100.0)
    }

    pub fn is_complete(&self) -> bool {
        self.attempted >= self.total
    }
}

/// Clamps a progress value into 0–100; NaN reads as 0.
pub fn clamp_percent(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

//=== ModelCache ==========================================================

/// Successfully loaded models by path.
#[derive(Debug, Clone, Default)]
pub struct ModelCache {
    models: HashMap<String, ModelAsset>,
}

impl ModelCache {
    pub fn get(&self, path: &str) -> Option<&ModelAsset> {
        self.models.get(path)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

//=== Bulk Loading ========================================================

/// Loads every distinct path, reporting progress after each attempt.
///
/// Failures are logged and skipped; one missing model never aborts the
/// rest of the batch.
pub fn load_models<F>(loader: &mut dyn AssetLoader, paths: &[&str], mut on_progress: F) -> ModelCache
where
    F: FnMut(&LoadingProgress),
{
    let mut unique: Vec<&str> = Vec::with_capacity(paths.len());
    for path in paths {
        if !path.is_empty() && !unique.contains(path) {
            unique.push(*path);
        }
    }

    let mut progress = LoadingProgress::new(unique.len());
    let mut cache = ModelCache::default();

    // An empty batch is complete straight away.
    if unique.is_empty() {
        on_progress(&progress);
    }

    for path in unique {
        match loader.load_model(path) {
            Ok(model) => {
                cache.models.insert(path.to_string(), model);
            }
            Err(e) => {
                error!(target: "assets", "Failed to load model: {}", e);
            }
        }
        progress.complete_one();
        on_progress(&progress);
    }

    info!(target: "assets", "Loaded {}/{} models", cache.len(), progress.total);
    cache
}

//=========================================================================
// Unit Tests
//=========================================================================
