//! Module screen: form controls on the left, results on the right.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::hit::{region, HitAreaRegistry};
use crate::screens::{Action, DropdownId, Focus, ModuleScreen};
use crate::theme;
use crate::ui::results::{self, ResultRow};
use crate::ui::split_columns;

const CATEGORIES_CAPTION: &str = "Тип персональных данных:";
const STAFF_LABEL: &str = "Субъекты ПДн являются сотрудниками оператора";
const RANDOMIZE_LABEL: &str = "[ Случайные данные ]";
const SUBMIT_LABEL: &str = "[ Рассчитать ]";
const CONTROL_WIDTH: u16 = 36;

/// Top-to-bottom row cursor inside the form column.
struct Rows {
    area: Rect,
    y: u16,
}

impl Rows {
    fn new(area: Rect) -> Self {
        Self { area, y: area.y }
    }

    fn skip(&mut self) {
        self.y = self.y.saturating_add(1);
    }

    /// Next full-width row, or None once the column is full.
    fn next(&mut self) -> Option<Rect> {
        let row = (self.y < self.area.bottom()).then(|| Rect::new(self.area.x, self.y, self.area.width, 1));
        self.skip();
        row
    }
}

pub fn render(
    f: &mut Frame,
    area: Rect,
    screen: &mut dyn ModuleScreen,
    result_rows: Vec<ResultRow>,
    error: Option<String>,
    hits: &mut HitAreaRegistry,
) {
    let (form_area, results_area) = split_columns(area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(format!(" {} ", screen.title()))
        .title_style(theme::panel_title(true));
    let inner = block.inner(form_area);
    f.render_widget(block, form_area);

    let focused = screen.focused();
    let mut rows = Rows::new(inner);
    let mut controls: Vec<(DropdownId, Rect)> = Vec::new();
    let mut prev: Option<Focus> = None;

    for target in screen.focus_targets() {
        let is_focused = focused == Some(target);
        match target {
            Focus::Category(category) => {
                if !matches!(prev, Some(Focus::Category(_))) {
                    caption(f, rows.next(), CATEGORIES_CAPTION);
                }
                if let Some(row) = rows.next() {
                    checkbox(f, row, category.label(), screen.is_checked(target), is_focused);
                    hits.register(row, Action::ToggleCategory(category));
                }
            }
            Focus::Dropdown(id) => {
                rows.skip();
                caption(f, rows.next(), id.caption());
                if let Some(row) = rows.next() {
                    let control = Rect {
                        width: row.width.min(CONTROL_WIDTH),
                        ..row
                    };
                    let is_open = screen.dropdown(id).is_some_and(|dd| dd.is_open());
                    dropdown_control(f, control, screen.current_label(id), is_open, is_focused);
                    hits.register(control, Action::ToggleDropdown(id));
                    controls.push((id, control));
                }
            }
            Focus::StaffMember => {
                rows.skip();
                if let Some(row) = rows.next() {
                    checkbox(f, row, STAFF_LABEL, screen.is_checked(target), is_focused);
                    hits.register(row, Action::ToggleStaff);
                }
            }
            Focus::Randomize => {
                rows.skip();
                if let Some(row) = rows.next() {
                    let rect = button(f, row, 0, RANDOMIZE_LABEL, is_focused);
                    hits.register(rect, Action::Randomize);
                }
            }
            Focus::Submit => {
                // Shares the row with the randomize button when there is one.
                let row = if prev == Some(Focus::Randomize) {
                    Some(Rect::new(inner.x, rows.y.saturating_sub(1), inner.width, 1))
                        .filter(|r| r.y < inner.bottom())
                } else {
                    rows.skip();
                    rows.next()
                };
                if let Some(row) = row {
                    let offset = if prev == Some(Focus::Randomize) {
                        text_width(RANDOMIZE_LABEL) + 2
                    } else {
                        0
                    };
                    let rect = button(f, row, offset, SUBMIT_LABEL, is_focused);
                    hits.register(rect, Action::Submit);
                }
            }
            Focus::Panel(_) => {}
        }
        prev = Some(target);
    }

    if let Some(message) = error {
        rows.skip();
        for line in results::wrap(&message, inner.width as usize) {
            if let Some(row) = rows.next() {
                f.render_widget(
                    Paragraph::new(Span::styled(line, theme::negative().add_modifier(Modifier::BOLD))),
                    row,
                );
            }
        }
    }

    results::render(f, results_area, screen, result_rows, hits);

    // Lists go last so they draw over everything and win the hit test.
    for (id, control) in controls {
        let current = screen.current_label(id);
        let Some(dd) = screen.dropdown_mut(id) else {
            continue;
        };
        if !dd.is_open() {
            dd.set_region(region(control));
            continue;
        }
        let labels = dd.option_labels();
        let list = list_rect(control, labels.len() as u16, f.area());
        f.render_widget(Clear, list);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme::accent());
        let list_inner = block.inner(list);
        f.render_widget(block, list);

        for (i, label) in labels.iter().enumerate() {
            let y = list_inner.y + i as u16;
            if y >= list_inner.bottom() {
                break;
            }
            let row = Rect::new(list_inner.x, y, list_inner.width, 1);
            let marker = if *label == current { "✓ " } else { "  " };
            let style = if i == dd.highlight() {
                theme::focused()
            } else {
                theme::text()
            };
            f.render_widget(Paragraph::new(Span::styled(format!("{marker}{label}"), style)), row);
            hits.register(row, Action::SelectOption(id, i));
        }
        dd.set_region(region(control).union(region(list)));
    }
}

fn caption(f: &mut Frame, row: Option<Rect>, text: &str) {
    if let Some(row) = row {
        f.render_widget(Paragraph::new(Span::styled(text.to_string(), theme::neutral())), row);
    }
}

fn checkbox(f: &mut Frame, row: Rect, label: &str, checked: bool, focused: bool) {
    let mark = if checked { "[x]" } else { "[ ]" };
    let mark_style = if checked { theme::positive() } else { theme::muted() };
    let label_style = if focused { theme::focused() } else { theme::text() };
    let line = Line::from(vec![
        Span::styled(format!(" {mark} "), mark_style),
        Span::styled(label.to_string(), label_style),
    ]);
    f.render_widget(Paragraph::new(line), row);
}

fn dropdown_control(f: &mut Frame, rect: Rect, label: &str, open: bool, focused: bool) {
    let arrow = if open { "▴" } else { "▾" };
    let inner_width = (rect.width as usize).saturating_sub(3);
    let text = format!(" {:<inner_width$}{arrow} ", truncate(label, inner_width));
    let style = if focused {
        theme::focused()
    } else {
        theme::text().add_modifier(Modifier::UNDERLINED)
    };
    f.render_widget(Paragraph::new(Span::styled(text, style)), rect);
}

/// Draw a button at `offset` columns into `row` and return its rect.
fn button(f: &mut Frame, row: Rect, offset: u16, label: &str, focused: bool) -> Rect {
    let x = row.x.saturating_add(offset).min(row.right());
    let width = text_width(label).min(row.right() - x);
    let rect = Rect::new(x, row.y, width, 1);
    let style = if focused {
        theme::focused()
    } else {
        theme::accent_bold()
    };
    f.render_widget(Paragraph::new(Span::styled(label.to_string(), style)), rect);
    rect
}

/// Option list under the control, or above it when there is no room below.
fn list_rect(control: Rect, options: u16, screen: Rect) -> Rect {
    let height = options + 2;
    let below = control.y + 1;
    let y = if below + height <= screen.bottom() {
        below
    } else {
        control.y.saturating_sub(height).max(screen.y)
    };
    Rect::new(control.x, y, control.width, height.min(screen.height))
}

fn text_width(text: &str) -> u16 {
    text.chars().count() as u16
}

fn truncate(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}
