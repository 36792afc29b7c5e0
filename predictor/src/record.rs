use std::fmt;

/// A single operator-supplied cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n:?}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

/// Feature name to value, in schema order.
///
/// Rebuilt from the form on every prediction request and never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    entries: Vec<(String, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name` to `value`. An existing entry keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

/// Row-major tabular input handed to a [`crate::Regressor`].
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Frame {
    /// A one-row frame whose columns follow the record's order.
    pub fn from_record(record: &Record) -> Self {
        let (columns, row) = record
            .iter()
            .map(|(n, v)| (n.to_string(), v.clone()))
            .unzip();
        Self {
            columns,
            rows: vec![row],
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_display_as_floats() {
        assert_eq!(Value::Number(40.0).to_string(), "40.0");
        assert_eq!(Value::Number(30.45).to_string(), "30.45");
        assert_eq!(Value::Text("Pune".into()).to_string(), "Pune");
    }

    #[test]
    fn insert_keeps_first_position() {
        let mut r = Record::new();
        r.insert("age", 35.0);
        r.insert("city", "Pune");
        r.insert("age", 40.0);

        let names: Vec<_> = r.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["age", "city"]);
        assert_eq!(r.get("age"), Some(&Value::Number(40.0)));
    }

    #[test]
    fn frame_is_single_row_in_record_order() {
        let record: Record = [("age", Value::from(40.0)), ("city", Value::from("Pune"))]
            .into_iter()
            .collect();
        let frame = Frame::from_record(&record);

        assert_eq!(frame.columns(), ["age", "city"]);
        assert_eq!(frame.len(), 1);
        assert_eq!(frame.rows()[0], [Value::Number(40.0), Value::Text("Pune".into())]);
        assert_eq!(frame.column_index("city"), Some(1));
        assert_eq!(frame.column_index("bmi"), None);
    }
}
