use std::collections::HashMap;

use ndarray::{Array1, Array2};
use safetensors::{Dtype, SafeTensors, tensor::TensorView};

use crate::{
    error::{ArtifactError, PredictionError},
    record::{Frame, Value},
};

const INTERCEPT: &str = "intercept";
const NUMERIC_COEF: &str = "numeric.coef";
const NUMERIC_MEAN: &str = "numeric.mean";
const NUMERIC_SCALE: &str = "numeric.scale";
const CATEGORICAL_PREFIX: &str = "categorical.";

const META_NUMERIC: &str = "numeric";
const META_CATEGORICAL: &str = "categorical";
const META_TRANSFORM: &str = "target_transform";

/// A fitted model that maps tabular rows to one number each.
///
/// Implementations must not panic on bad input; every failure is reported as
/// a [`PredictionError`].
pub trait Regressor: Send + Sync {
    /// Predicts one value per frame row.
    ///
    /// # Errors
    /// Returns `PredictionError` if the frame does not match what the model
    /// was fitted on.
    fn predict(&self, frame: &Frame) -> Result<Vec<f64>, PredictionError>;
}

/// Inverse transform applied to the raw linear output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetTransform {
    #[default]
    Identity,
    /// The model was fitted on `ln(1 + y)`.
    Log1p,
}

impl TargetTransform {
    fn parse(s: &str) -> Result<Self, ArtifactError> {
        match s {
            "identity" => Ok(Self::Identity),
            "log1p" => Ok(Self::Log1p),
            other => Err(ArtifactError::InvalidModel(format!(
                "unknown target_transform: {other}"
            ))),
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::Log1p => "log1p",
        }
    }

    fn apply(self, y: f64) -> f64 {
        match self {
            Self::Identity => y,
            Self::Log1p => y.exp_m1(),
        }
    }
}

/// A standardized numeric input.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericTerm {
    pub name: String,
    pub mean: f64,
    pub scale: f64,
    pub coef: f64,
}

/// A one-hot encoded input: one coefficient per known category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoricalTerm {
    pub name: String,
    pub categories: Vec<String>,
    pub coefs: Vec<f64>,
}

/// Linear regression over standardized numerics and one-hot categoricals.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearPipeline {
    intercept: f64,
    numeric: Vec<NumericTerm>,
    categorical: Vec<CategoricalTerm>,
    transform: TargetTransform,
}

impl LinearPipeline {
    /// Assembles a pipeline from fitted terms.
    ///
    /// # Errors
    /// Returns `InvalidModel` if a categorical term's coefficient count does
    /// not match its category count.
    pub fn new(
        intercept: f64,
        numeric: Vec<NumericTerm>,
        categorical: Vec<CategoricalTerm>,
        transform: TargetTransform,
    ) -> Result<Self, ArtifactError> {
        for term in &categorical {
            if term.categories.len() != term.coefs.len() {
                return Err(ArtifactError::InvalidModel(format!(
                    "categorical '{}': {} categories but {} coefficients",
                    term.name,
                    term.categories.len(),
                    term.coefs.len()
                )));
            }
        }

        Ok(Self {
            intercept,
            numeric,
            categorical,
            transform,
        })
    }

    /// Width of the encoded design matrix.
    pub fn num_inputs(&self) -> usize {
        self.numeric.len() + self.categorical.iter().map(|c| c.coefs.len()).sum::<usize>()
    }

    /// Decodes a pipeline from safetensors bytes.
    ///
    /// # Errors
    /// Returns `InvalidModel` if the header metadata or any tensor is missing
    /// or malformed.
    pub fn from_safetensors(bytes: &[u8]) -> Result<Self, ArtifactError> {
        let (_, metadata) = SafeTensors::read_metadata(bytes)?;
        let meta = metadata
            .metadata()
            .as_ref()
            .ok_or_else(|| ArtifactError::InvalidModel("missing header metadata".into()))?;
        let tensors = SafeTensors::deserialize(bytes)?;

        let numeric_names: Vec<String> = parse_meta(meta, META_NUMERIC)?;
        let categorical_names: Vec<(String, Vec<String>)> = parse_meta(meta, META_CATEGORICAL)?;
        let transform = match meta.get(META_TRANSFORM) {
            Some(s) => TargetTransform::parse(s)?,
            None => TargetTransform::Identity,
        };

        let intercept = read_f64s(&tensors, INTERCEPT, 1)?[0];

        let numeric = if numeric_names.is_empty() {
            Vec::new()
        } else {
            let n = numeric_names.len();
            let coef = read_f64s(&tensors, NUMERIC_COEF, n)?;
            let mean = read_f64s(&tensors, NUMERIC_MEAN, n)?;
            let scale = read_f64s(&tensors, NUMERIC_SCALE, n)?;
            numeric_names
                .into_iter()
                .enumerate()
                .map(|(i, name)| NumericTerm {
                    name,
                    mean: mean[i],
                    scale: scale[i],
                    coef: coef[i],
                })
                .collect()
        };

        let categorical = categorical_names
            .into_iter()
            .map(|(name, categories)| {
                let key = format!("{CATEGORICAL_PREFIX}{name}");
                let coefs = read_f64s(&tensors, &key, categories.len())?;
                Ok(CategoricalTerm {
                    name,
                    categories,
                    coefs,
                })
            })
            .collect::<Result<Vec<_>, ArtifactError>>()?;

        log::debug!(
            "decoded linear pipeline: {} numeric, {} categorical, transform={}",
            numeric.len(),
            categorical.len(),
            transform.as_str()
        );

        Self::new(intercept, numeric, categorical, transform)
    }

    /// Encodes the pipeline in the layout [`Self::from_safetensors`] reads.
    ///
    /// # Errors
    /// Returns `InvalidModel` if safetensors rejects a tensor.
    pub fn to_safetensors(&self) -> Result<Vec<u8>, ArtifactError> {
        let mut buffers: Vec<(String, Vec<u8>, usize)> = vec![(
            INTERCEPT.to_string(),
            le_bytes(&[self.intercept]),
            1,
        )];

        if !self.numeric.is_empty() {
            let n = self.numeric.len();
            let col = |f: fn(&NumericTerm) -> f64| self.numeric.iter().map(f).collect::<Vec<_>>();
            buffers.push((NUMERIC_COEF.into(), le_bytes(&col(|t| t.coef)), n));
            buffers.push((NUMERIC_MEAN.into(), le_bytes(&col(|t| t.mean)), n));
            buffers.push((NUMERIC_SCALE.into(), le_bytes(&col(|t| t.scale)), n));
        }

        for term in &self.categorical {
            buffers.push((
                format!("{CATEGORICAL_PREFIX}{}", term.name),
                le_bytes(&term.coefs),
                term.coefs.len(),
            ));
        }

        let views = buffers
            .iter()
            .map(|(name, data, len)| {
                TensorView::new(Dtype::F64, vec![*len], data).map(|view| (name.clone(), view))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let numeric: Vec<&str> = self.numeric.iter().map(|t| t.name.as_str()).collect();
        let categorical: Vec<(&str, &[String])> = self
            .categorical
            .iter()
            .map(|t| (t.name.as_str(), t.categories.as_slice()))
            .collect();

        let meta = HashMap::from([
            (META_NUMERIC.to_string(), to_meta(&numeric)?),
            (META_CATEGORICAL.to_string(), to_meta(&categorical)?),
            (META_TRANSFORM.to_string(), self.transform.as_str().to_string()),
        ]);

        Ok(safetensors::serialize(views, &Some(meta))?)
    }

    /// Builds the `(rows, num_inputs)` design matrix for `frame`.
    fn encode(&self, frame: &Frame) -> Result<Array2<f64>, PredictionError> {
        let mut design = Array2::<f64>::zeros((frame.len(), self.num_inputs()));

        let numeric_cols = self
            .numeric
            .iter()
            .map(|t| column(frame, &t.name))
            .collect::<Result<Vec<_>, _>>()?;
        let categorical_cols = self
            .categorical
            .iter()
            .map(|t| column(frame, &t.name))
            .collect::<Result<Vec<_>, _>>()?;

        for (r, row) in frame.rows().iter().enumerate() {
            for (j, (term, &c)) in self.numeric.iter().zip(&numeric_cols).enumerate() {
                let x = match &row[c] {
                    Value::Number(x) => *x,
                    Value::Text(s) => {
                        return Err(PredictionError::ExpectedNumber {
                            column: term.name.clone(),
                            got: s.clone(),
                        });
                    }
                };
                if !x.is_finite() {
                    return Err(PredictionError::NonFinite {
                        column: term.name.clone(),
                    });
                }
                let scale = if term.scale == 0.0 { 1.0 } else { term.scale };
                design[[r, j]] = (x - term.mean) / scale;
            }

            let mut offset = self.numeric.len();
            for (term, &c) in self.categorical.iter().zip(&categorical_cols) {
                let value = match &row[c] {
                    Value::Text(s) => s,
                    Value::Number(n) => {
                        return Err(PredictionError::ExpectedText {
                            column: term.name.clone(),
                            got: *n,
                        });
                    }
                };
                let hot = term
                    .categories
                    .iter()
                    .position(|cat| cat == value)
                    .ok_or_else(|| PredictionError::UnknownCategory {
                        column: term.name.clone(),
                        value: value.clone(),
                    })?;
                design[[r, offset + hot]] = 1.0;
                offset += term.categories.len();
            }
        }

        Ok(design)
    }

    fn weights(&self) -> Array1<f64> {
        self.numeric
            .iter()
            .map(|t| t.coef)
            .chain(self.categorical.iter().flat_map(|t| t.coefs.iter().copied()))
            .collect()
    }
}

impl Regressor for LinearPipeline {
    fn predict(&self, frame: &Frame) -> Result<Vec<f64>, PredictionError> {
        let design = self.encode(frame)?;
        let raw = design.dot(&self.weights()) + self.intercept;
        Ok(raw.iter().map(|&y| self.transform.apply(y)).collect())
    }
}

fn column(frame: &Frame, name: &str) -> Result<usize, PredictionError> {
    frame
        .column_index(name)
        .ok_or_else(|| PredictionError::MissingColumn(name.to_string()))
}

fn parse_meta<T: serde::de::DeserializeOwned>(
    meta: &HashMap<String, String>,
    key: &str,
) -> Result<T, ArtifactError> {
    let raw = meta
        .get(key)
        .ok_or_else(|| ArtifactError::InvalidModel(format!("missing metadata key: {key}")))?;
    serde_json::from_str(raw)
        .map_err(|e| ArtifactError::InvalidModel(format!("metadata '{key}': {e}")))
}

fn to_meta<T: serde::Serialize>(value: &T) -> Result<String, ArtifactError> {
    serde_json::to_string(value).map_err(|e| ArtifactError::InvalidModel(e.to_string()))
}

fn read_f64s(tensors: &SafeTensors<'_>, name: &str, len: usize) -> Result<Vec<f64>, ArtifactError> {
    let view = tensors.tensor(name)?;

    if view.dtype() != Dtype::F64 {
        return Err(ArtifactError::InvalidModel(format!(
            "tensor '{name}': expected F64, got {:?}",
            view.dtype()
        )));
    }
    if view.shape() != [len] {
        return Err(ArtifactError::InvalidModel(format!(
            "tensor '{name}': expected shape [{len}], got {:?}",
            view.shape()
        )));
    }

    Ok(view
        .data()
        .chunks_exact(8)
        .map(|b| f64::from_le_bytes([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]]))
        .collect())
}

fn le_bytes(values: &[f64]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}
