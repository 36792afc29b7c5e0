use ratatui::{
    layout::{Alignment, Constraint},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
};

use predictor::{Record, SchemaPayload};

use crate::{
    app::ResultPanel,
    form::{Control, FormState},
};

use super::theme::Theme;

const BUTTON_LABEL: &str = "[ Predict premium ]";
const MAX_LABEL_WIDTH: u16 = 28;

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Theme::border())
        .title(format!(" {title} "))
        .title_style(Theme::title())
}

pub fn header<'a>() -> Paragraph<'a> {
    let lines = vec![
        Line::from(Span::styled("InsuraSense", Theme::title())),
        Line::from(vec![
            Span::styled("for ", Theme::muted()),
            Span::styled("Apex Insure", Theme::dim().add_modifier(Modifier::BOLD)),
            Span::styled(" · on-device health premium estimate", Theme::muted()),
        ]),
    ];

    Paragraph::new(lines).alignment(Alignment::Center)
}

/// One row per feature plus the predict button, with focus selected.
pub fn form(form: &FormState) -> (Table<'_>, TableState) {
    let label_width = form
        .fields()
        .iter()
        .map(|f| f.name.chars().count() as u16 + 2)
        .max()
        .unwrap_or(8)
        .min(MAX_LABEL_WIDTH);

    let focus = form.focus();
    let mut rows: Vec<Row> = form
        .fields()
        .iter()
        .enumerate()
        .map(|(i, field)| {
            Row::new(vec![
                Cell::from(Span::styled(field.name.as_str(), Theme::dim())),
                Cell::from(control_line(&field.control, i == focus)),
            ])
        })
        .collect();

    let button_style = if form.on_button() {
        Theme::accent()
    } else {
        Theme::dim()
    };
    rows.push(Row::new(vec![
        Cell::from(""),
        Cell::from(Span::styled(BUTTON_LABEL, button_style)),
    ]));

    let table = Table::new(
        rows,
        [Constraint::Length(label_width), Constraint::Min(12)],
    )
    .block(panel("Enter applicant details"))
    .highlight_style(Theme::focus())
    .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(focus));
    (table, state)
}

fn control_line(control: &Control, focused: bool) -> Line<'_> {
    match control {
        Control::Numeric { buffer, .. } => {
            let style = if control.is_valid() {
                Theme::text()
            } else {
                Theme::error()
            };
            let mut spans = vec![Span::styled(buffer.as_str(), style)];
            if focused {
                spans.push(Span::styled("█", Theme::accent()));
            }
            if !control.is_valid() {
                spans.push(Span::styled("  not a number", Theme::muted()));
            }
            Line::from(spans)
        }
        Control::Select { options, selected } => {
            let current = options.get(*selected).map(String::as_str).unwrap_or("");
            let label = if current.is_empty() {
                Span::styled("(blank)", Theme::muted())
            } else {
                Span::styled(current, Theme::text())
            };
            let arrows = if focused { Theme::accent() } else { Theme::muted() };

            Line::from(vec![
                Span::styled("◀ ", arrows),
                label,
                Span::styled(" ▶", arrows),
                Span::styled(
                    format!("  {}/{}", selected + 1, options.len()),
                    Theme::muted(),
                ),
            ])
        }
    }
}

/// Metrics verbatim, target and feature names.
pub fn info(payload: &SchemaPayload) -> Paragraph<'_> {
    let schema = &payload.schema;
    let metrics = serde_json::to_string_pretty(&payload.metrics)
        .unwrap_or_else(|_| payload.metrics.to_string());

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Target: ", Theme::dim()),
            Span::styled(schema.target.clone().unwrap_or_default(), Theme::text()),
        ]),
        Line::from(vec![
            Span::styled("Features: ", Theme::dim()),
            Span::styled(schema.feature_names().join(", "), Theme::text()),
        ]),
        Line::from(""),
        Line::from(Span::styled("Metrics:", Theme::dim())),
    ];
    lines.extend(
        metrics
            .lines()
            .map(|l| Line::from(Span::styled(l.to_string(), Theme::text()))),
    );

    Paragraph::new(lines)
        .block(panel("Model info"))
        .wrap(Wrap { trim: false })
}

/// The premium, the failure message, or a prompt.
pub fn result_summary(result: &ResultPanel) -> Paragraph<'_> {
    let line = match result {
        ResultPanel::Idle => Line::from(vec![
            Span::styled("Press ", Theme::muted()),
            Span::styled("enter", Theme::dim()),
            Span::styled(" on Predict premium or ", Theme::muted()),
            Span::styled("F5", Theme::dim()),
            Span::styled(" anywhere", Theme::muted()),
        ]),
        ResultPanel::Success(prediction) => Line::from(vec![
            Span::styled("Estimated premium: ", Theme::text()),
            Span::styled(prediction.formatted(), Theme::ok()),
        ]),
        ResultPanel::Failure(msg) => Line::from(vec![
            Span::styled("✖ Prediction failed: ", Theme::error()),
            Span::styled(msg.as_str(), Theme::text()),
        ]),
    };

    Paragraph::new(line)
        .block(panel("Result"))
        .wrap(Wrap { trim: true })
}

/// The exact record the model saw, one column per feature.
pub fn raw_inputs(record: &Record) -> Table<'_> {
    let n = record.len().max(1) as u32;
    let header = Row::new(record.iter().map(|(name, _)| Cell::from(name)))
        .style(Theme::dim().add_modifier(Modifier::BOLD));
    let values = Row::new(record.iter().map(|(_, v)| Cell::from(v.to_string())));

    Table::new(
        vec![values],
        (0..n).map(|_| Constraint::Ratio(1, n)).collect::<Vec<_>>(),
    )
    .header(header)
    .style(Theme::text())
    .block(panel("Raw inputs"))
}

pub fn hints<'a>() -> Paragraph<'a> {
    let pairs = [
        ("↑↓", "move"),
        ("←→", "choose"),
        ("enter/F5", "predict"),
        ("?", "model info"),
        ("esc", "quit"),
    ];

    let spans = pairs
        .iter()
        .flat_map(|(key, action)| {
            [
                Span::styled(format!("[{key}]"), Theme::accent()),
                Span::styled(format!(" {action}   "), Theme::muted()),
            ]
        })
        .collect::<Vec<_>>();

    Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
}
