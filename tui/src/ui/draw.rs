use ratatui::{widgets::Block, Frame};

use crate::app::{App, ResultPanel};

use super::{layout, theme::Theme, widgets};

/// Height of the result area for each panel state.
fn result_height(panel: &ResultPanel) -> u16 {
    match panel {
        ResultPanel::Idle => 3,
        ResultPanel::Failure(_) => 4,
        ResultPanel::Success(_) => 8,
    }
}

/// Draws the entire UI.
pub fn draw(f: &mut Frame, app: &App) {
    let area = f.size();
    f.render_widget(Block::default().style(Theme::base()), area);

    let (header_area, body_area, result_area, hints_area) =
        layout::vertical(area, result_height(&app.panel));
    let (form_area, info_area) = layout::body(body_area, app.show_info);

    f.render_widget(widgets::header(), header_area);

    let (form, mut form_state) = widgets::form(&app.form);
    f.render_stateful_widget(form, form_area, &mut form_state);

    if let Some(info) = info_area {
        f.render_widget(widgets::info(app.payload()), info);
    }

    match &app.panel {
        ResultPanel::Success(prediction) => {
            let (summary, raw) = layout::result(result_area);
            f.render_widget(widgets::result_summary(&app.panel), summary);
            f.render_widget(widgets::raw_inputs(&prediction.record), raw);
        }
        panel => f.render_widget(widgets::result_summary(panel), result_area),
    }

    f.render_widget(widgets::hints(), hints_area);
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyCode;
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::app::state::tests::{app_with, Constant, Failing, AGE_SCHEMA, MIXED_SCHEMA};

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 32)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();

        let buf = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf.get(x, y).symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn form_shows_one_row_per_feature_and_button() {
        let screen = render(&app_with(Constant(1.0), MIXED_SCHEMA));

        assert!(screen.contains("age"));
        assert!(screen.contains("35.0"));
        assert!(screen.contains("Pune"));
        assert!(screen.contains("(blank)"));
        assert!(screen.contains("Predict premium"));
        assert!(!screen.contains("Raw inputs"));
    }

    #[test]
    fn success_shows_premium_and_raw_inputs() {
        let mut app = app_with(Constant(42_000.0), AGE_SCHEMA);
        app.handle_key(KeyCode::F(5));
        let screen = render(&app);

        assert!(screen.contains("₹42,000.00"));
        assert!(screen.contains("Raw inputs"));
    }

    #[test]
    fn failure_hides_raw_inputs() {
        let mut app = app_with(Failing, MIXED_SCHEMA);
        app.handle_key(KeyCode::F(5));
        let screen = render(&app);

        assert!(screen.contains("Prediction failed"));
        assert!(screen.contains("Nagpur"));
        assert!(!screen.contains("Raw inputs"));
    }

    #[test]
    fn info_panel_shows_metrics_verbatim() {
        let mut app = app_with(Constant(1.0), AGE_SCHEMA);
        assert!(!render(&app).contains("Model info"));

        app.handle_key(KeyCode::Char('?'));
        let screen = render(&app);
        assert!(screen.contains("Model info"));
        assert!(screen.contains("Target: premium"));
        assert!(screen.contains("\"r2\": 0.91"));
    }
}
