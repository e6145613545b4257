//! Screen layout and widget rendering.
//!
//! ```text
//! +------------------------------+---------+
//! | IN messages / IN plot        | Baud    |
//! |                              | Device  |
//! +------------------------------+ ...     |
//! | instructions / >> input      |         |
//! +------------------------------+---------+
//! ```
//!
//! Full screen drops the status column and gives the message area the
//! whole width.

use crate::model::DisplayMode;
use crate::state::{Session, ViewState};
use crate::view::constants::{
    INPUT_HEIGHT, LIST_VISIBLE_ROWS, MAIN_WIDTH_PERCENT, PARAGRAPH_HEIGHT, PLOT_TITLE,
};
use crate::view::status::{input_line, status_lines};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::Line,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, List, ListState, Paragraph, Wrap},
    Frame,
};

/// Rectangles of the three screen regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
    /// Text log or plot.
    pub main: Rect,
    /// Instructions or input prompt.
    pub input: Rect,
    /// Status column, absent in full screen.
    pub status: Option<Rect>,
}

impl ScreenAreas {
    /// Rows available inside the text log's border.
    pub fn list_rows(&self) -> usize {
        self.main.height.saturating_sub(2) as usize
    }
}

/// Split the terminal area for the current view flags.
pub fn compute_areas(area: Rect, view: &ViewState) -> ScreenAreas {
    let (left, status) = if view.full_screen {
        (area, None)
    } else {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(MAIN_WIDTH_PERCENT),
                Constraint::Percentage(100 - MAIN_WIDTH_PERCENT),
            ])
            .split(area);
        (columns[0], Some(columns[1]))
    };

    let available = left.height.saturating_sub(INPUT_HEIGHT);
    let main_height = match view.display_mode {
        DisplayMode::Text => (LIST_VISIBLE_ROWS + 2).min(available),
        DisplayMode::Plot => (left.height / 2).min(available),
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(main_height),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Min(0),
        ])
        .split(left);

    ScreenAreas {
        main: rows[0],
        input: rows[1],
        status,
    }
}

/// Draw the whole screen.
pub fn render(frame: &mut Frame, session: &Session) {
    let areas = compute_areas(frame.area(), session.view_state());

    match session.view_state().display_mode {
        DisplayMode::Text => render_inbox(frame, areas.main, session),
        DisplayMode::Plot => render_plot(frame, areas.main, session.series()),
    }

    let input = Paragraph::new(input_line(session))
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: false });
    frame.render_widget(input, areas.input);

    if let Some(status_area) = areas.status {
        render_status(frame, status_area, session);
    }
}

fn render_inbox(frame: &mut Frame, area: Rect, session: &Session) {
    let title = format!("IN messages({})", LIST_VISIBLE_ROWS);
    let list = List::new(session.rows().iter().map(String::as_str))
        .block(Block::default().borders(Borders::ALL).title(title))
        .style(Style::default().fg(Color::White))
        .highlight_style(Style::default().add_modifier(Modifier::BOLD));

    let mut state = ListState::default();
    if !session.rows().is_empty() {
        state.select(Some(session.selected_row()));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_plot(frame: &mut Frame, area: Rect, series: &[f64]) {
    let points: Vec<(f64, f64)> = series
        .iter()
        .enumerate()
        .map(|(i, &v)| (i as f64, v))
        .collect();

    let (y_min, y_max) = y_bounds(series);
    let x_max = (points.len().saturating_sub(1) as f64).max(1.0);

    let dataset = Dataset::default()
        .marker(symbols::Marker::Dot)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Yellow))
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(Block::default().borders(Borders::ALL).title(PLOT_TITLE))
        .x_axis(Axis::default().bounds([0.0, x_max]))
        .y_axis(
            Axis::default()
                .bounds([y_min, y_max])
                .labels(vec![
                    Line::from(format!("{:.2}", y_min)),
                    Line::from(format!("{:.2}", y_max)),
                ]),
        );

    frame.render_widget(chart, area);
}

/// Vertical plot range with a little headroom; flat series get a unit band.
fn y_bounds(series: &[f64]) -> (f64, f64) {
    let min = series.iter().copied().fold(f64::INFINITY, f64::min);
    let max = series.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    if (max - min).abs() < f64::EPSILON {
        return (min - 1.0, max + 1.0);
    }
    let pad = (max - min) * 0.05;
    (min - pad, max + pad)
}

fn render_status(frame: &mut Frame, area: Rect, session: &Session) {
    let lines = status_lines(session);
    let mut constraints: Vec<Constraint> = lines
        .iter()
        .map(|_| Constraint::Length(PARAGRAPH_HEIGHT))
        .collect();
    constraints.push(Constraint::Min(0));

    let slots = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (text, slot) in lines.into_iter().zip(slots.iter()) {
        let paragraph = Paragraph::new(text).block(Block::default().borders(Borders::ALL));
        frame.render_widget(paragraph, *slot);
    }
}

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
