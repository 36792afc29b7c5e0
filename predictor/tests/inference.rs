use predictor::{
    Directive, Frame, PredictionError, Record, Regressor, SchemaPayload, Value, predict,
};

/// Returns the same value for any input.
struct Constant(f64);

impl Regressor for Constant {
    fn predict(&self, frame: &Frame) -> Result<Vec<f64>, PredictionError> {
        Ok(vec![self.0; frame.len()])
    }
}

/// Fails on every call.
struct Failing;

impl Regressor for Failing {
    fn predict(&self, _frame: &Frame) -> Result<Vec<f64>, PredictionError> {
        Err(PredictionError::Model(
            "X has 3 features, but model is expecting 4".into(),
        ))
    }
}

/// Sums numeric cells, echoing the frame shape back.
struct Sum;

impl Regressor for Sum {
    fn predict(&self, frame: &Frame) -> Result<Vec<f64>, PredictionError> {
        Ok(frame
            .rows()
            .iter()
            .map(|row| {
                row.iter()
                    .filter_map(|v| match v {
                        Value::Number(n) => Some(*n),
                        Value::Text(_) => None,
                    })
                    .sum()
            })
            .collect())
    }
}

struct Empty;

impl Regressor for Empty {
    fn predict(&self, _frame: &Frame) -> Result<Vec<f64>, PredictionError> {
        Ok(vec![])
    }
}

fn record_from_defaults(payload: &SchemaPayload) -> Record {
    payload
        .schema
        .interpret()
        .into_iter()
        .map(|field| {
            let value = match field.directive {
                Directive::Numeric { default } => Value::Number(default),
                Directive::Categorical {
                    options,
                    default_index,
                } => Value::Text(options[default_index].clone()),
            };
            (field.name, value)
        })
        .collect()
}

#[test]
fn constant_model_prediction_is_formatted() {
    let payload = SchemaPayload::from_json(
        r#"{"schema": {"target": "premium", "features": [
            {"name": "age", "type": "numeric", "median": 35.0}
        ]}}"#,
    )
    .unwrap();

    let mut record = record_from_defaults(&payload);
    assert_eq!(record.get("age"), Some(&Value::Number(35.0)));
    record.insert("age", 40.0);

    let prediction = predict(&record, &Constant(42_000.0)).unwrap();
    assert_eq!(prediction.premium, 42_000.0);
    assert_eq!(prediction.formatted(), "₹42,000.00");
    assert_eq!(prediction.record, record);
}

#[test]
fn model_failure_is_returned_not_raised() {
    let mut record = Record::new();
    record.insert("age", 40.0);

    let err = predict(&record, &Failing).unwrap_err();
    assert_eq!(err.to_string(), "X has 3 features, but model is expecting 4");
}

#[test]
fn record_order_reaches_the_model() {
    let mut record = Record::new();
    record.insert("bmi", 2.5);
    record.insert("region", "south");
    record.insert("age", 40.0);

    assert_eq!(predict(&record, &Sum).unwrap().premium, 42.5);
    assert_eq!(Frame::from_record(&record).columns(), ["bmi", "region", "age"]);
}

#[test]
fn empty_and_non_finite_outputs_are_failures() {
    let record = Record::new();
    assert_eq!(
        predict(&record, &Empty).unwrap_err(),
        PredictionError::EmptyOutput
    );
    assert!(matches!(
        predict(&record, &Constant(f64::INFINITY)),
        Err(PredictionError::NonFinite { .. })
    ));
}

#[test]
fn repeated_predictions_are_identical() {
    let mut record = Record::new();
    record.insert("age", 52.0);
    record.insert("children", 2.0);

    let first = predict(&record, &Sum).unwrap();
    let second = predict(&record, &Sum).unwrap();
    assert_eq!(first, second);
}
