//! Writes a small hand-fitted model and schema into the working directory so
//! the form can be tried without running the training pipeline.

use std::fs;

use predictor::{
    ArtifactPaths, CategoricalTerm, LinearPipeline, NumericTerm, TargetTransform,
};

const SCHEMA: &str = r#"{
  "schema": {
    "target": "annual_premium",
    "features": [
      {"name": "age", "type": "numeric", "median": 39.0},
      {"name": "bmi", "type": "numeric", "median": 30.4},
      {"name": "children", "type": "numeric", "median": 1.0},
      {"name": "smoker", "type": "categorical", "values": ["no", "yes"]},
      {"name": "region", "type": "categorical", "values": ["north", "south", "east", "west"]},
      {"name": "plan", "type": "categorical", "values": []}
    ]
  },
  "metrics": {"r2": 0.86, "mae": 2134.7, "rows": 1338}
}"#;

fn numeric(name: &str, mean: f64, scale: f64, coef: f64) -> NumericTerm {
    NumericTerm {
        name: name.into(),
        mean,
        scale,
        coef,
    }
}

fn categorical(name: &str, pairs: &[(&str, f64)]) -> CategoricalTerm {
    CategoricalTerm {
        name: name.into(),
        categories: pairs.iter().map(|(c, _)| c.to_string()).collect(),
        coefs: pairs.iter().map(|(_, w)| *w).collect(),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let model = LinearPipeline::new(
        9.1,
        vec![
            numeric("age", 39.2, 14.0, 0.48),
            numeric("bmi", 30.7, 6.1, 0.09),
            numeric("children", 1.1, 1.2, 0.12),
        ],
        vec![
            categorical("smoker", &[("no", 0.0), ("yes", 1.55)]),
            categorical(
                "region",
                &[("north", 0.06), ("south", -0.03), ("east", 0.0), ("west", -0.05)],
            ),
            categorical("plan", &[("", 0.0)]),
        ],
        TargetTransform::Log1p,
    )?;

    let paths = ArtifactPaths::default();
    fs::write(&paths.model, model.to_safetensors()?)?;
    fs::write(&paths.schema, SCHEMA)?;

    println!(
        "wrote {} and {}",
        paths.model.display(),
        paths.schema.display()
    );
    Ok(())
}
