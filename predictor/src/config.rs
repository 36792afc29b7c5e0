use std::path::{Path, PathBuf};

pub const DEFAULT_MODEL_PATH: &str = "health_premium_model.safetensors";
pub const DEFAULT_SCHEMA_PATH: &str = "feature_schema.json";

/// Locations of the two artifacts produced by the training pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub schema: PathBuf,
}

impl ArtifactPaths {
    /// Creates paths pointing at explicit files.
    pub fn new(model: impl Into<PathBuf>, schema: impl Into<PathBuf>) -> Self {
        Self {
            model: model.into(),
            schema: schema.into(),
        }
    }

    /// Resolves the well-known file names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self::new(dir.join(DEFAULT_MODEL_PATH), dir.join(DEFAULT_SCHEMA_PATH))
    }
}

impl Default for ArtifactPaths {
    /// Both artifacts relative to the working directory.
    fn default() -> Self {
        Self::new(DEFAULT_MODEL_PATH, DEFAULT_SCHEMA_PATH)
    }
}
