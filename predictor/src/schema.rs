use std::collections::HashSet;

use serde::{Deserialize, Deserializer};

/// How a feature is typed in the schema document.
///
/// Parsed once from the `type` string so the rest of the crate never
/// re-dispatches on raw strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum FeatureKind {
    Numeric,
    Categorical,
    /// Anything else. Rendered as categorical.
    Other(String),
}

impl From<String> for FeatureKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "numeric" => Self::Numeric,
            "categorical" => Self::Categorical,
            _ => Self::Other(s),
        }
    }
}

/// One input column of the model.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FeatureDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FeatureKind,
    #[serde(default)]
    pub median: Option<f64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub values: Vec<String>,
}

fn null_as_empty<'de, D>(de: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<String>>::deserialize(de).map(Option::unwrap_or_default)
}

/// Target name plus the ordered feature list. Feature order is the column
/// order of every inference frame.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Schema {
    #[serde(default)]
    pub target: Option<String>,
    pub features: Vec<FeatureDescriptor>,
}

/// The whole `feature_schema.json` document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SchemaPayload {
    pub schema: Schema,
    /// Opaque, displayed verbatim.
    #[serde(default = "empty_metrics")]
    pub metrics: serde_json::Value,
}

fn empty_metrics() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

impl SchemaPayload {
    /// Parses the JSON document.
    ///
    /// # Errors
    /// Returns the `serde_json` error if the text is not valid JSON or does
    /// not have the `{schema: {target, features}, metrics?}` shape.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let mut payload: Self = serde_json::from_str(text)?;
        if payload.metrics.is_null() {
            payload.metrics = empty_metrics();
        }
        Ok(payload)
    }
}

/// What control a feature gets and what it starts at.
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    Numeric { default: f64 },
    Categorical { options: Vec<String>, default_index: usize },
}

/// A feature name paired with its resolved directive.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: String,
    pub directive: Directive,
}

impl FeatureDescriptor {
    /// Resolves the rendering directive for this feature.
    ///
    /// Numeric features default to their median, or `0.0` when the median is
    /// absent or not finite. Every other type becomes a single-select whose
    /// option list is never empty.
    pub fn directive(&self) -> Directive {
        match &self.kind {
            FeatureKind::Numeric => Directive::Numeric {
                default: self.median.filter(|m| m.is_finite()).unwrap_or(0.0),
            },
            FeatureKind::Categorical | FeatureKind::Other(_) => {
                let options = if self.values.is_empty() {
                    vec![String::new()]
                } else {
                    self.values.clone()
                };
                Directive::Categorical {
                    options,
                    default_index: 0,
                }
            }
        }
    }
}

impl Schema {
    /// Feature names in column order.
    pub fn feature_names(&self) -> Vec<&str> {
        self.features.iter().map(|f| f.name.as_str()).collect()
    }

    /// Interprets every descriptor, preserving schema order.
    pub fn interpret(&self) -> Vec<FieldSpec> {
        let mut seen = HashSet::new();

        self.features
            .iter()
            .map(|feat| {
                if !seen.insert(feat.name.as_str()) {
                    log::warn!("duplicate feature name '{}' in schema", feat.name);
                }
                if let FeatureKind::Other(kind) = &feat.kind {
                    log::warn!(
                        "feature '{}' has unrecognized type '{kind}', treating as categorical",
                        feat.name
                    );
                }

                FieldSpec {
                    name: feat.name.clone(),
                    directive: feat.directive(),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(json: &str) -> FeatureDescriptor {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn numeric_uses_median() {
        let d = descriptor(r#"{"name": "age", "type": "numeric", "median": 35.0}"#);
        assert_eq!(d.directive(), Directive::Numeric { default: 35.0 });
    }

    #[test]
    fn numeric_without_median_defaults_to_zero() {
        let d = descriptor(r#"{"name": "bmi", "type": "numeric"}"#);
        assert_eq!(d.directive(), Directive::Numeric { default: 0.0 });

        let d = descriptor(r#"{"name": "bmi", "type": "numeric", "median": null}"#);
        assert_eq!(d.directive(), Directive::Numeric { default: 0.0 });
    }

    #[test]
    fn numeric_with_non_finite_median_defaults_to_zero() {
        let d = FeatureDescriptor {
            name: "bmi".into(),
            kind: FeatureKind::Numeric,
            median: Some(f64::NAN),
            values: vec![],
        };
        assert_eq!(d.directive(), Directive::Numeric { default: 0.0 });
    }

    #[test]
    fn categorical_offers_values_in_order() {
        let d = descriptor(r#"{"name": "city", "type": "categorical", "values": ["Pune", "Mumbai"]}"#);
        assert_eq!(
            d.directive(),
            Directive::Categorical {
                options: vec!["Pune".into(), "Mumbai".into()],
                default_index: 0,
            }
        );
    }

    #[test]
    fn empty_categorical_gets_blank_option() {
        let d = descriptor(r#"{"name": "plan", "type": "categorical", "values": []}"#);
        assert_eq!(
            d.directive(),
            Directive::Categorical {
                options: vec![String::new()],
                default_index: 0,
            }
        );

        let d = descriptor(r#"{"name": "plan", "type": "categorical"}"#);
        assert!(matches!(d.directive(), Directive::Categorical { options, .. } if options == [""]));

        let d = descriptor(r#"{"name": "plan", "type": "categorical", "values": null}"#);
        assert!(d.values.is_empty());
        assert!(matches!(d.directive(), Directive::Categorical { options, .. } if options == [""]));
    }

    #[test]
    fn null_values_do_not_reject_the_document() {
        let payload = SchemaPayload::from_json(
            r#"{"schema": {"target": "premium", "features": [
                {"name": "plan", "type": "categorical", "values": null}
            ]}}"#,
        )
        .unwrap();
        assert_eq!(
            payload.schema.interpret()[0].directive,
            Directive::Categorical {
                options: vec![String::new()],
                default_index: 0,
            }
        );
    }

    #[test]
    fn unknown_type_is_categorical() {
        let d = descriptor(r#"{"name": "smoker", "type": "boolean", "values": ["yes", "no"]}"#);
        assert_eq!(d.kind, FeatureKind::Other("boolean".into()));
        assert!(matches!(d.directive(), Directive::Categorical { ref options, .. } if options.len() == 2));
    }

    #[test]
    fn payload_without_metrics_has_empty_object() {
        let payload = SchemaPayload::from_json(
            r#"{"schema": {"target": "premium", "features": []}}"#,
        )
        .unwrap();
        assert_eq!(payload.metrics, serde_json::json!({}));
        assert_eq!(payload.schema.target.as_deref(), Some("premium"));
    }

    #[test]
    fn interpret_preserves_order() {
        let payload = SchemaPayload::from_json(
            r#"{
                "schema": {
                    "target": "premium",
                    "features": [
                        {"name": "age", "type": "numeric", "median": 35.0},
                        {"name": "city", "type": "categorical", "values": ["Pune"]},
                        {"name": "bmi", "type": "numeric", "median": 27.5}
                    ]
                },
                "metrics": {"r2": 0.87}
            }"#,
        )
        .unwrap();

        let names: Vec<_> = payload
            .schema
            .interpret()
            .into_iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(names, ["age", "city", "bmi"]);
        assert_eq!(payload.schema.feature_names(), ["age", "city", "bmi"]);
    }

    #[test]
    fn missing_features_is_an_error() {
        assert!(SchemaPayload::from_json(r#"{"schema": {"target": "premium"}}"#).is_err());
        assert!(SchemaPayload::from_json(r#"{"metrics": {}}"#).is_err());
    }
}
