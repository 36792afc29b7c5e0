//! Schema-driven premium prediction.
//!
//! Loads a fitted model and its feature schema, turns the schema into form
//! directives and runs single-row predictions.

pub mod artifacts;
pub mod config;
pub mod error;
pub mod inference;
pub mod model;
pub mod record;
pub mod schema;

pub use artifacts::{ArtifactCache, ArtifactSource, Artifacts, FsSource};
pub use config::ArtifactPaths;
pub use error::{ArtifactError, PredictionError};
pub use inference::{Prediction, format_premium, predict};
pub use model::{CategoricalTerm, LinearPipeline, NumericTerm, Regressor, TargetTransform};
pub use record::{Frame, Record, Value};
pub use schema::{Directive, FeatureDescriptor, FeatureKind, FieldSpec, Schema, SchemaPayload};
