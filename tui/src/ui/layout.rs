use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Computes the main layout regions.
///
/// # Returns
/// (header, body, result, hints)
pub fn vertical(area: Rect, result_height: u16) -> (Rect, Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(result_height),
            Constraint::Length(1),
        ])
        .split(area);

    (chunks[0], chunks[1], chunks[2], chunks[3])
}

/// Splits body into (form, info_opt).
pub fn body(area: Rect, show_info: bool) -> (Rect, Option<Rect>) {
    if !show_info {
        return (area, None);
    }

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(58), Constraint::Percentage(42)])
        .split(area);

    (cols[0], Some(cols[1]))
}

/// Splits a successful result into (summary, raw inputs).
pub fn result(area: Rect) -> (Rect, Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(4)])
        .split(area);

    (rows[0], rows[1])
}
