use std::sync::Arc;

use crossterm::event::KeyCode;
use predictor::{Artifacts, Prediction, SchemaPayload};

use crate::form::FormState;

pub enum Action {
    None,
    Quit,
}

/// What the result area shows after the last "Predict premium".
#[derive(Debug, Clone, PartialEq)]
pub enum ResultPanel {
    Idle,
    Success(Prediction),
    Failure(String),
}

/// Whole-application state: the loaded artifacts, the form and the result.
pub struct App {
    artifacts: Arc<Artifacts>,
    pub form: FormState,
    pub panel: ResultPanel,
    pub show_info: bool,
}

impl App {
    pub fn new(artifacts: Arc<Artifacts>) -> Self {
        let fields = artifacts.payload().schema.interpret();
        log::info!("rendering form with {} field(s)", fields.len());

        Self {
            form: FormState::new(&fields),
            artifacts,
            panel: ResultPanel::Idle,
            show_info: false,
        }
    }

    pub fn payload(&self) -> &SchemaPayload {
        self.artifacts.payload()
    }

    pub fn handle_key(&mut self, key: KeyCode) -> Action {
        match key {
            KeyCode::Esc => return Action::Quit,
            KeyCode::F(5) => self.predict(),
            KeyCode::Up | KeyCode::BackTab => self.form.focus_prev(),
            KeyCode::Down | KeyCode::Tab => self.form.focus_next(),
            KeyCode::Enter if self.form.on_button() => self.predict(),
            KeyCode::Enter => self.form.focus_next(),
            KeyCode::Char('?') => self.show_info = !self.show_info,
            _ => {
                self.form.edit(key);
            }
        }
        Action::None
    }

    /// Builds the input record from the current controls and runs the model
    /// once. A failure replaces the panel contents; nothing else is shown.
    pub fn predict(&mut self) {
        let record = self.form.record();

        self.panel = match predictor::predict(&record, self.artifacts.model()) {
            Ok(prediction) => ResultPanel::Success(prediction),
            Err(e) => {
                log::warn!("prediction failed: {e}");
                ResultPanel::Failure(e.to_string())
            }
        };
    }
}
