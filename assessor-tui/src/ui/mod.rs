//! Top-level UI layout: the mounted screen plus a one-line status bar.
//!
//! Drawing also rebuilds the hit-area registry and records where each
//! dropdown ended up, so the next pointer press is resolved against exactly
//! what is on screen.

pub mod form;
pub mod help;
pub mod home;
pub mod results;
pub mod status_bar;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::Frame;

use crate::app::{AppState, Mounted, Overlay};

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &mut AppState) {
    // Split: main area + 1-line status bar.
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(f.area());

    let main_area = chunks[0];
    let status_area = chunks[1];

    let AppState { mounted, hits, .. } = app;
    hits.clear();
    match mounted {
        Mounted::Home(home) => home::render(f, main_area, home, hits),
        Mounted::Pd(screen) => {
            let rows = results::pd_rows(screen, results_width(main_area));
            let error = screen.assessment.error().map(|e| e.message().to_string());
            form::render(f, main_area, screen.as_mut(), rows, error, hits);
        }
        Mounted::Gis(screen) => {
            let rows = results::gis_rows(screen, results_width(main_area));
            let error = screen.assessment.error().map(|e| e.message().to_string());
            form::render(f, main_area, screen, rows, error, hits);
        }
    }

    status_bar::render(f, status_area, app);

    if app.overlay == Overlay::Help {
        help::render(f, main_area, app);
    }
}

/// Left column holds the form, right column the results.
pub fn split_columns(area: Rect) -> (Rect, Rect) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);
    (cols[0], cols[1])
}

/// Text width available inside the bordered results column.
fn results_width(area: Rect) -> u16 {
    split_columns(area).1.width.saturating_sub(2)
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
