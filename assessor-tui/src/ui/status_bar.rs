//! Bottom status bar: key hints for the current screen, then the last status message.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{AppState, Screen, StatusLevel};
use crate::theme;

fn hints(app: &AppState) -> &'static str {
    let dropdown_open = app
        .module_screen()
        .is_some_and(|s| s.open_dropdown().is_some());
    if dropdown_open {
        return " ↑↓:Выбор Enter:Подтвердить Esc:Закрыть";
    }
    match app.screen() {
        Screen::Home => " 1:ПДн 2:ГИС Enter:Открыть ?:Справка q:Выход",
        Screen::Pd => " Tab:Поле Space:Отметить r:Случайно s:Рассчитать Esc:Назад ?:Справка",
        Screen::Gis => " Tab:Поле Enter:Открыть s:Рассчитать Esc:Назад ?:Справка",
    }
}

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans: Vec<Span> = vec![Span::styled(hints(app), theme::muted())];

    if let Some((msg, level)) = &app.status_message {
        spans.push(Span::raw(" | "));
        let style = match level {
            StatusLevel::Info => theme::accent(),
            StatusLevel::Warning => theme::warning(),
            StatusLevel::Error => theme::negative(),
        };
        spans.push(Span::styled(msg.as_str(), style));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
