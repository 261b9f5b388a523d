//! Results column: level summary, explanation and the measure panels.
//!
//! Content is laid out as a flat list of one-line rows and then scrolled,
//! since the measure list can be much taller than the terminal.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use assessor_core::result::HasMeasures;
use assessor_core::{ResultArea, ResultView};

use crate::app::PENDING_TEXT;
use crate::hit::HitAreaRegistry;
use crate::screens::{Action, Focus, GisScreen, ModuleScreen, PdScreen};
use crate::theme;

pub const PLACEHOLDER_TEXT: &str = "Заполните форму и нажмите «Рассчитать»";
const EXPLANATION_TITLE: &str = "Пояснение";
const MEASURES_TITLE: &str = "Меры защиты";
const ITEM_INDENT: &str = "    ";

/// One rendered line, optionally clickable.
#[derive(Debug, Clone)]
pub struct ResultRow {
    pub line: Line<'static>,
    pub action: Option<Action>,
}

impl ResultRow {
    fn plain(line: impl Into<Line<'static>>) -> Self {
        Self {
            line: line.into(),
            action: None,
        }
    }

    fn blank() -> Self {
        Self::plain(Line::default())
    }
}

pub fn pd_rows(screen: &PdScreen, width: u16) -> Vec<ResultRow> {
    match screen.assessment.result_area() {
        ResultArea::Placeholder => placeholder(),
        ResultArea::Pending => pending(),
        ResultArea::Ready(view) => {
            let result = view.result();
            let mut rows = vec![summary("Уровень защищённости: ", &result.level)];
            if !result.reason.is_empty() {
                rows.push(ResultRow::blank());
                rows.push(ResultRow::plain(Span::styled(EXPLANATION_TITLE, theme::neutral().add_modifier(Modifier::BOLD))));
                let text = format!("{}: {}", result.level, result.reason);
                rows.extend(
                    wrap(&text, width as usize)
                        .into_iter()
                        .map(|l| ResultRow::plain(Span::styled(l, theme::text()))),
                );
            }
            rows.extend(measure_rows(view, focused_panel(screen), width));
            rows
        }
    }
}

pub fn gis_rows(screen: &GisScreen, width: u16) -> Vec<ResultRow> {
    match screen.assessment.result_area() {
        ResultArea::Placeholder => placeholder(),
        ResultArea::Pending => pending(),
        ResultArea::Ready(view) => {
            let mut rows = vec![summary("Класс защищённости: ", &view.result().protection_class)];
            rows.extend(measure_rows(view, focused_panel(screen), width));
            rows
        }
    }
}

fn focused_panel(screen: &dyn ModuleScreen) -> Option<usize> {
    match screen.focused() {
        Some(Focus::Panel(i)) => Some(i),
        _ => None,
    }
}

fn placeholder() -> Vec<ResultRow> {
    vec![ResultRow::plain(Span::styled(PLACEHOLDER_TEXT, theme::muted()))]
}

fn pending() -> Vec<ResultRow> {
    vec![ResultRow::plain(Span::styled(PENDING_TEXT, theme::warning()))]
}

fn summary(caption: &'static str, value: &str) -> ResultRow {
    ResultRow::plain(Line::from(vec![
        Span::styled(caption, theme::accent()),
        Span::styled(value.to_string(), theme::positive().add_modifier(Modifier::BOLD)),
    ]))
}

/// One header row per section; items only for expanded sections.
fn measure_rows<R: HasMeasures>(view: &ResultView<R>, focused: Option<usize>, width: u16) -> Vec<ResultRow> {
    let mut rows = Vec::new();
    if view.panels().is_empty() {
        return rows;
    }
    rows.push(ResultRow::blank());
    rows.push(ResultRow::plain(Span::styled(MEASURES_TITLE, theme::neutral().add_modifier(Modifier::BOLD))));

    let item_width = (width as usize).saturating_sub(ITEM_INDENT.len());
    for (i, (panel, section)) in view.sections().enumerate() {
        let marker = if panel.is_open() { "▾" } else { "▸" };
        let style = if focused == Some(i) {
            theme::focused()
        } else {
            theme::accent_bold()
        };
        rows.push(ResultRow {
            line: Line::from(Span::styled(
                format!("{marker} {} ({})", panel.title(), section.items.len()),
                style,
            )),
            action: Some(Action::TogglePanel(i)),
        });
        if !panel.is_open() {
            continue;
        }
        for item in &section.items {
            let text = if item.code.is_empty() {
                item.text.clone()
            } else {
                format!("{}  {}", item.code, item.text)
            };
            for l in wrap(&text, item_width) {
                rows.push(ResultRow::plain(Span::styled(format!("{ITEM_INDENT}{l}"), theme::text())));
            }
            if !item.applicable_levels.is_empty() {
                rows.push(ResultRow::plain(Span::styled(
                    format!("{ITEM_INDENT}Уровни: {}", item.levels_display()),
                    theme::muted(),
                )));
            }
        }
    }
    rows
}

pub fn render(
    f: &mut Frame,
    area: Rect,
    screen: &mut dyn ModuleScreen,
    rows: Vec<ResultRow>,
    hits: &mut HitAreaRegistry,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(false))
        .title(" Результат ")
        .title_style(theme::panel_title(false));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let max_scroll = rows.len().saturating_sub(1) as u16;
    if screen.results_scroll() > max_scroll {
        *screen.results_scroll_mut() = max_scroll;
    }
    let scroll = screen.results_scroll() as usize;

    for (y, row) in (inner.y..inner.bottom()).zip(rows.into_iter().skip(scroll)) {
        let rect = Rect::new(inner.x, y, inner.width, 1);
        if let Some(action) = row.action {
            hits.register(rect, action);
        }
        f.render_widget(Paragraph::new(row.line), rect);
    }
}

/// Greedy word wrap by character count. Words longer than `width` are split.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }
        let needed = if current_len == 0 { word.len() } else { current_len + 1 + word.len() };
        if needed > width {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current_len += word.len();
        current.extend(word);
    }
    if current_len > 0 || lines.is_empty() {
        lines.push(current);
    }
    lines
}
