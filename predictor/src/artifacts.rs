use std::{
    fmt, fs,
    path::Path,
    sync::{Arc, OnceLock},
};

use crate::{
    config::ArtifactPaths,
    error::ArtifactError,
    model::{LinearPipeline, Regressor},
    schema::SchemaPayload,
};

/// Where artifact bytes come from.
pub trait ArtifactSource: Send + Sync {
    /// Verifies both artifacts are present before anything is read. Every
    /// source must implement this; an absent artifact reported later by a
    /// read would surface as `Io` instead of `Missing`.
    ///
    /// # Errors
    /// Returns `ArtifactError::Missing` naming the first absent artifact.
    fn check(&self) -> Result<(), ArtifactError>;

    /// Raw bytes of the serialized model.
    ///
    /// # Errors
    /// Returns `ArtifactError` if the model cannot be read.
    fn read_model(&self) -> Result<Vec<u8>, ArtifactError>;

    /// Text of the schema/metrics document.
    ///
    /// # Errors
    /// Returns `ArtifactError` if the document cannot be read.
    fn read_schema(&self) -> Result<String, ArtifactError>;
}

/// Reads artifacts from the filesystem.
#[derive(Debug, Clone, Default)]
pub struct FsSource {
    paths: ArtifactPaths,
}

impl FsSource {
    pub fn new(paths: ArtifactPaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &ArtifactPaths {
        &self.paths
    }
}

impl ArtifactSource for FsSource {
    fn check(&self) -> Result<(), ArtifactError> {
        for (what, path) in [("model", &self.paths.model), ("schema", &self.paths.schema)] {
            if !path.exists() {
                return Err(ArtifactError::Missing {
                    what,
                    path: path.clone(),
                });
            }
        }
        Ok(())
    }

    fn read_model(&self) -> Result<Vec<u8>, ArtifactError> {
        read_with(&self.paths.model, |p| fs::read(p))
    }

    fn read_schema(&self) -> Result<String, ArtifactError> {
        read_with(&self.paths.schema, |p| fs::read_to_string(p))
    }
}

fn read_with<T>(
    path: &Path,
    read: impl FnOnce(&Path) -> std::io::Result<T>,
) -> Result<T, ArtifactError> {
    read(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// The loaded model and schema document.
pub struct Artifacts {
    model: Box<dyn Regressor>,
    payload: SchemaPayload,
}

impl Artifacts {
    pub fn new(model: Box<dyn Regressor>, payload: SchemaPayload) -> Self {
        Self { model, payload }
    }

    /// Reads and decodes both artifacts from `source`.
    ///
    /// # Errors
    /// Returns `ArtifactError` if either artifact is missing or malformed.
    pub fn read(source: &dyn ArtifactSource) -> Result<Self, ArtifactError> {
        source.check()?;

        let model = LinearPipeline::from_safetensors(&source.read_model()?)?;
        let payload = SchemaPayload::from_json(&source.read_schema()?)
            .map_err(|e| ArtifactError::InvalidSchema(e.to_string()))?;

        log::info!(
            "loaded model with {} encoded inputs and schema with {} features",
            model.num_inputs(),
            payload.schema.features.len()
        );

        Ok(Self::new(Box::new(model), payload))
    }

    pub fn model(&self) -> &dyn Regressor {
        self.model.as_ref()
    }

    pub fn payload(&self) -> &SchemaPayload {
        &self.payload
    }
}

impl fmt::Debug for Artifacts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Artifacts")
            .field("payload", &self.payload)
            .finish_non_exhaustive()
    }
}

/// Loads artifacts on first use and hands out the same instance afterwards.
///
/// There is no invalidation: picking up new artifacts requires a restart.
pub struct ArtifactCache<S> {
    source: S,
    cell: OnceLock<Arc<Artifacts>>,
}

impl<S: ArtifactSource> ArtifactCache<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            cell: OnceLock::new(),
        }
    }

    /// Returns the cached artifacts, reading them from the source only the
    /// first time this succeeds.
    ///
    /// # Errors
    /// Returns `ArtifactError` if the first read fails. A failed read is not
    /// cached.
    pub fn load(&self) -> Result<Arc<Artifacts>, ArtifactError> {
        if let Some(cached) = self.cell.get() {
            return Ok(Arc::clone(cached));
        }

        let loaded = Arc::new(Artifacts::read(&self.source)?);
        Ok(Arc::clone(self.cell.get_or_init(|| loaded)))
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

static DEFAULT_CACHE: OnceLock<ArtifactCache<FsSource>> = OnceLock::new();

/// Loads the process-wide artifacts from the well-known paths.
///
/// # Errors
/// Returns `ArtifactError::Missing` if either file is absent, or another
/// `ArtifactError` if one is malformed.
pub fn load() -> Result<Arc<Artifacts>, ArtifactError> {
    DEFAULT_CACHE
        .get_or_init(|| ArtifactCache::new(FsSource::default()))
        .load()
}
