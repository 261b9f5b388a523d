//! Help overlay: key bindings.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;
use crate::ui::centered_rect;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(70, 80, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Справка ")
        .title_style(theme::accent_bold());

    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "Главный экран");
    key(&mut lines, "1 / 2", "Открыть оценку ПДн / ГИС");
    key(&mut lines, "j / k, Enter", "Выбрать пункт меню");
    lines.push(Line::from(""));

    section(&mut lines, "Форма");
    key(&mut lines, "Tab / Shift+Tab", "Следующее / предыдущее поле");
    key(&mut lines, "Space", "Отметить флажок, раскрыть раздел мер");
    key(&mut lines, "Enter", "Открыть список, нажать кнопку");
    key(&mut lines, "r", "Заполнить форму ПДн случайно");
    key(&mut lines, "s", "Рассчитать");
    key(&mut lines, "PgUp / PgDn", "Прокрутить результат");
    key(&mut lines, "Esc", "Закрыть список или вернуться на главный экран");
    lines.push(Line::from(""));

    section(&mut lines, "Открытый список");
    key(&mut lines, "↑ / ↓", "Переместить выделение");
    key(&mut lines, "Enter", "Выбрать значение");
    key(&mut lines, "Esc", "Закрыть без выбора");
    lines.push(Line::from(""));

    section(&mut lines, "Общие");
    key(&mut lines, "?", "Показать / скрыть справку");
    key(&mut lines, "q", "Выход");
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("Сервис: {}", app.service_url),
        theme::muted(),
    )));

    let para = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(para, popup);
}

fn section(lines: &mut Vec<Line<'static>>, title: &'static str) {
    lines.push(Line::from(Span::styled(title, theme::neutral())));
}

fn key(lines: &mut Vec<Line<'static>>, keys: &'static str, desc: &'static str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {keys:<18}"), theme::accent()),
        Span::styled(desc, theme::text()),
    ]));
}
