pub mod control;

use crossterm::event::KeyCode;
use predictor::{FieldSpec, Record};

pub use control::Control;

/// One labelled control.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub control: Control,
}

/// All controls in schema order plus the focus cursor.
///
/// Focus ranges over every field and one extra slot for the
/// "Predict premium" button.
#[derive(Debug, Clone)]
pub struct FormState {
    fields: Vec<Field>,
    focus: usize,
}

impl FormState {
    pub fn new(specs: &[FieldSpec]) -> Self {
        let fields = specs
            .iter()
            .map(|spec| Field {
                name: spec.name.clone(),
                control: Control::from_directive(&spec.directive),
            })
            .collect();

        Self { fields, focus: 0 }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn on_button(&self) -> bool {
        self.focus == self.fields.len()
    }

    pub fn focus_next(&mut self) {
        self.commit_focused();
        self.focus = (self.focus + 1) % (self.fields.len() + 1);
    }

    pub fn focus_prev(&mut self) {
        self.commit_focused();
        let slots = self.fields.len() + 1;
        self.focus = (self.focus + slots - 1) % slots;
    }

    /// Forwards a key to the focused control. Returns whether it was consumed.
    pub fn edit(&mut self, key: KeyCode) -> bool {
        match self.fields.get_mut(self.focus) {
            Some(field) => field.control.handle_key(key),
            None => false,
        }
    }

    /// Current values of every control, in schema order.
    pub fn record(&self) -> Record {
        self.fields
            .iter()
            .map(|f| (f.name.as_str(), f.control.value()))
            .collect()
    }

    fn commit_focused(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.control.commit();
        }
    }
}

#[cfg(test)]
mod tests {
    use predictor::{Directive, Value};

    use super::*;

    fn specs() -> Vec<FieldSpec> {
        vec![
            FieldSpec {
                name: "age".into(),
                directive: Directive::Numeric { default: 35.0 },
            },
            FieldSpec {
                name: "city".into(),
                directive: Directive::Categorical {
                    options: vec!["Pune".into(), "Mumbai".into()],
                    default_index: 0,
                },
            },
        ]
    }

    #[test]
    fn record_is_fully_populated_with_defaults() {
        let form = FormState::new(&specs());
        let record = form.record();

        let entries: Vec<_> = record.iter().map(|(n, v)| (n.to_string(), v.clone())).collect();
        assert_eq!(
            entries,
            [
                ("age".to_string(), Value::Number(35.0)),
                ("city".to_string(), Value::Text("Pune".into())),
            ]
        );
    }

    #[test]
    fn focus_wraps_through_button() {
        let mut form = FormState::new(&specs());
        form.focus_next();
        form.focus_next();
        assert!(form.on_button());
        form.focus_next();
        assert_eq!(form.focus(), 0);
        form.focus_prev();
        assert!(form.on_button());
    }

    #[test]
    fn edits_reach_only_the_focused_control() {
        let mut form = FormState::new(&specs());
        form.focus_next();
        assert!(form.edit(KeyCode::Right));
        assert_eq!(form.record().get("city"), Some(&Value::Text("Mumbai".into())));
        assert_eq!(form.record().get("age"), Some(&Value::Number(35.0)));
    }

    #[test]
    fn leaving_a_field_restores_invalid_text() {
        let mut form = FormState::new(&specs());
        form.edit(KeyCode::Char('.'));
        assert!(!form.fields()[0].control.is_valid());

        form.focus_next();
        assert!(form.fields()[0].control.is_valid());
        assert_eq!(form.record().get("age"), Some(&Value::Number(35.0)));
    }

    #[test]
    fn button_ignores_edits() {
        let mut form = FormState::new(&specs());
        form.focus_prev();
        assert!(form.on_button());
        assert!(!form.edit(KeyCode::Char('1')));
    }
}
