//! Home screen: pick one of the two assessments.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::Screen;
use crate::hit::HitAreaRegistry;
use crate::screens::{Action, HomeScreen};
use crate::theme;

const INTRO: &str = "Выберите тип оценки. Форма заполняется с клавиатуры или мышью, \
расчёт выполняет сервис классификации.";

fn entry_label(screen: Screen) -> &'static str {
    match screen {
        Screen::Pd => "Уровень защищённости ПДн",
        Screen::Gis => "Класс защищённости ГИС",
        Screen::Home => "",
    }
}

pub fn render(f: &mut Frame, area: Rect, home: &HomeScreen, hits: &mut HitAreaRegistry) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(" Оценка защищённости ")
        .title_style(theme::panel_title(true));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.height < 4 {
        return;
    }

    let intro = Paragraph::new(Line::from(Span::styled(INTRO, theme::muted()))).wrap(Wrap { trim: true });
    f.render_widget(intro, Rect::new(inner.x + 1, inner.y + 1, inner.width.saturating_sub(2), 2));

    let first_row = inner.y + 4;
    for (i, screen) in crate::screens::MENU.iter().enumerate() {
        let y = first_row + 2 * i as u16;
        if y >= inner.bottom() {
            break;
        }
        let text = format!("  {}. {}  ", i + 1, entry_label(*screen));
        let width = (text.chars().count() as u16).min(inner.width.saturating_sub(2));
        let rect = Rect::new(inner.x + 1, y, width, 1);
        let style = if i == home.cursor() {
            theme::focused()
        } else {
            theme::accent_bold()
        };
        f.render_widget(Paragraph::new(Span::styled(text, style)), rect);
        hits.register(rect, Action::OpenModule(*screen));
    }
}
