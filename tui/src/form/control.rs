use crossterm::event::KeyCode;
use predictor::{Directive, Value};

/// Live state of one input control.
#[derive(Debug, Clone, PartialEq)]
pub enum Control {
    /// Free-form numeric entry. `committed` is the value the field held when
    /// it last gained or lost focus; it stands in while `buffer` is empty or
    /// does not parse.
    Numeric { buffer: String, committed: f64 },
    /// Single-select over a non-empty option list.
    Select { options: Vec<String>, selected: usize },
}

impl Control {
    /// Seeds a control from its directive.
    pub fn from_directive(directive: &Directive) -> Self {
        match directive {
            Directive::Numeric { default } => Self::Numeric {
                buffer: format_number(*default),
                committed: *default,
            },
            Directive::Categorical {
                options,
                default_index,
            } => Self::Select {
                options: options.clone(),
                selected: *default_index,
            },
        }
    }

    /// The value this control contributes to the input record.
    pub fn value(&self) -> Value {
        match self {
            Self::Numeric { buffer, committed } => {
                Value::Number(parse_finite(buffer).unwrap_or(*committed))
            }
            Self::Select { options, selected } => {
                Value::Text(options.get(*selected).cloned().unwrap_or_default())
            }
        }
    }

    /// Whether the text being typed currently parses. Selects are always valid.
    pub fn is_valid(&self) -> bool {
        match self {
            Self::Numeric { buffer, .. } => parse_finite(buffer).is_some(),
            Self::Select { .. } => true,
        }
    }

    /// Applies a key while the control has focus. Returns whether the key was
    /// consumed.
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        match self {
            Self::Numeric { buffer, .. } => {
                match key {
                    KeyCode::Char(c) if is_number_char(c) => buffer.push(c),
                    KeyCode::Backspace => {
                        buffer.pop();
                    }
                    _ => return false,
                }
                true
            }
            Self::Select { options, selected } => {
                let n = options.len().max(1);
                match key {
                    KeyCode::Right | KeyCode::Char(' ') => *selected = (*selected + 1) % n,
                    KeyCode::Left => *selected = (*selected + n - 1) % n,
                    _ => return false,
                }
                true
            }
        }
    }

    /// Commits whatever the buffer parses to, or falls back to the previous
    /// committed value, and rewrites the buffer to match. Called when focus
    /// leaves the control.
    pub fn commit(&mut self) {
        if let Self::Numeric { buffer, committed } = self {
            if let Some(v) = parse_finite(buffer) {
                *committed = v;
            }
            *buffer = format_number(*committed);
        }
    }
}

fn is_number_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E')
}

fn parse_finite(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Shows integral values with a trailing `.0` so the field reads as a float.
pub fn format_number(v: f64) -> String {
    format!("{v:?}")
}
