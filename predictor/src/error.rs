use std::{fmt, io, path::PathBuf};

/// Errors raised while reading the model and schema artifacts.
///
/// Every variant is fatal at startup: there is no useful degraded mode for a
/// predictor without its model.
#[derive(Debug)]
pub enum ArtifactError {
    /// A required artifact does not exist at its well-known location.
    Missing { what: &'static str, path: PathBuf },
    /// The artifact exists but could not be read.
    Io { path: PathBuf, source: io::Error },
    /// The schema document is not valid JSON or has the wrong shape.
    InvalidSchema(String),
    /// The model file could not be decoded into a regressor.
    InvalidModel(String),
}

impl fmt::Display for ArtifactError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { what, path } => write!(
                f,
                "{what} not found at '{}'; run the training pipeline first",
                path.display()
            ),
            Self::Io { path, source } => write!(f, "cannot read '{}': {source}", path.display()),
            Self::InvalidSchema(msg) => write!(f, "invalid schema document: {msg}"),
            Self::InvalidModel(msg) => write!(f, "invalid model artifact: {msg}"),
        }
    }
}

impl std::error::Error for ArtifactError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<safetensors::SafeTensorError> for ArtifactError {
    fn from(e: safetensors::SafeTensorError) -> Self {
        Self::InvalidModel(e.to_string())
    }
}

/// A single prediction could not be produced.
///
/// Recovered locally: the message is shown to the operator and the form stays
/// interactive.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionError {
    /// The model expects a column the input frame does not have.
    MissingColumn(String),
    /// A categorical column holds a value never seen during training.
    UnknownCategory { column: String, value: String },
    /// A numeric column received text.
    ExpectedNumber { column: String, got: String },
    /// A categorical column received a number.
    ExpectedText { column: String, got: f64 },
    /// An input or the output was NaN or infinite.
    NonFinite { column: String },
    /// The model returned no rows.
    EmptyOutput,
    /// Any other model-specific failure.
    Model(String),
}

impl fmt::Display for PredictionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingColumn(col) => write!(f, "missing input column '{col}'"),
            Self::UnknownCategory { column, value } => {
                write!(f, "found unknown category '{value}' in column '{column}'")
            }
            Self::ExpectedNumber { column, got } => {
                write!(f, "column '{column}' expects a number, got '{got}'")
            }
            Self::ExpectedText { column, got } => {
                write!(f, "column '{column}' expects a category, got {got}")
            }
            Self::NonFinite { column } => write!(f, "non-finite value in '{column}'"),
            Self::EmptyOutput => write!(f, "model returned no prediction"),
            Self::Model(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for PredictionError {}
