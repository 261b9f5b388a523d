//! Input dispatch: overlays → open dropdown → global keys → focus navigation.
//!
//! Keys and clicks are both turned into [`Action`]s and applied through
//! [`AppState::dispatch`], so a click and its keyboard equivalent behave the same.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};

use assessor_core::controls::Point;

use crate::app::{AppState, Mounted, Overlay};
use crate::screens::{Action, HomeScreen, ModuleScreen, SCROLL_PAGE};

pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. The help overlay swallows everything.
    if app.overlay == Overlay::Help {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::Enter) {
            app.overlay = Overlay::None;
        }
        return;
    }

    let action = match &mut app.mounted {
        Mounted::Home(home) => home_key(home, key),
        Mounted::Pd(screen) => module_key(screen.as_mut(), key),
        Mounted::Gis(screen) => module_key(screen, key),
    };
    if let Some(action) = action {
        app.dispatch(action);
    }
}

fn home_key(home: &mut HomeScreen, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('?') => Some(Action::ToggleHelp),
        KeyCode::Char('1') => Some(Action::OpenModule(crate::app::Screen::Pd)),
        KeyCode::Char('2') => Some(Action::OpenModule(crate::app::Screen::Gis)),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => {
            home.move_cursor(1);
            None
        }
        KeyCode::Up | KeyCode::Char('k') | KeyCode::BackTab => {
            home.move_cursor(-1);
            None
        }
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::OpenModule(home.selected())),
        _ => None,
    }
}

fn module_key(screen: &mut dyn ModuleScreen, key: KeyEvent) -> Option<Action> {
    // 2. An open list owns the arrow keys, Enter and Esc.
    if let Some(id) = screen.open_dropdown() {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => screen.move_highlight(id, -1),
            KeyCode::Down | KeyCode::Char('j') => screen.move_highlight(id, 1),
            KeyCode::Enter | KeyCode::Char(' ') => screen.commit_dropdown(id),
            KeyCode::Esc | KeyCode::Backspace => screen.close_dropdown(id),
            KeyCode::Tab => screen.focus_next(),
            KeyCode::BackTab => screen.focus_prev(),
            _ => {}
        }
        return None;
    }

    // 3. Global keys.
    match key.code {
        KeyCode::Char('q') => return Some(Action::Quit),
        KeyCode::Char('?') => return Some(Action::ToggleHelp),
        KeyCode::Esc | KeyCode::Backspace => return Some(Action::Back),
        KeyCode::Char('s') => return Some(Action::Submit),
        KeyCode::Char('r') => return Some(Action::Randomize),
        KeyCode::PageDown => return Some(Action::Scroll(SCROLL_PAGE as i16)),
        KeyCode::PageUp => return Some(Action::Scroll(-(SCROLL_PAGE as i16))),
        _ => {}
    }

    // 4. Focus navigation and activation.
    match key.code {
        KeyCode::Tab | KeyCode::Down | KeyCode::Char('j') => {
            screen.focus_next();
            None
        }
        KeyCode::BackTab | KeyCode::Up | KeyCode::Char('k') => {
            screen.focus_prev();
            None
        }
        KeyCode::Enter | KeyCode::Char(' ') => screen.focused().map(|f| f.action()),
        _ => None,
    }
}

pub fn handle_mouse(app: &mut AppState, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if app.overlay == Overlay::Help {
                app.overlay = Overlay::None;
                return;
            }
            let at = Point::new(mouse.column, mouse.row);
            // Every mounted dropdown sees the press before the click lands.
            if let Some(screen) = app.module_screen_mut() {
                screen.pointer_down(at);
            }
            if let Some(action) = app.hits.hit_test(at) {
                app.dispatch(action);
            }
        }
        MouseEventKind::ScrollDown => app.dispatch(Action::Scroll(1)),
        MouseEventKind::ScrollUp => app.dispatch(Action::Scroll(-1)),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    use crossterm::event::{KeyEventState, KeyModifiers};
    use ratatui::layout::Rect;

    use assessor_core::catalog::AssessmentCategory;
    use assessor_core::controls::Region;

    use crate::app::Screen;
    use crate::screens::{DropdownId, Focus};

    fn app() -> AppState {
        let (cmd_tx, _cmd_rx) = mpsc::channel();
        let (_resp_tx, resp_rx) = mpsc::channel();
        AppState::new(cmd_tx, resp_rx, "http://localhost:8080")
    }

    fn press(app: &mut AppState, code: KeyCode) {
        handle_key(
            app,
            KeyEvent {
                code,
                modifiers: KeyModifiers::NONE,
                kind: KeyEventKind::Press,
                state: KeyEventState::NONE,
            },
        );
    }

    fn click(app: &mut AppState, column: u16, row: u16) {
        handle_mouse(
            app,
            MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                modifiers: KeyModifiers::NONE,
            },
        );
    }

    fn pd(app: &AppState) -> &crate::screens::PdScreen {
        match &app.mounted {
            Mounted::Pd(screen) => screen.as_ref(),
            other => panic!("expected PD, got {other:?}"),
        }
    }

    #[test]
    fn release_events_are_ignored() {
        let mut app = app();
        handle_key(
            &mut app,
            KeyEvent {
                code: KeyCode::Char('q'),
                modifiers: KeyModifiers::NONE,
                kind: KeyEventKind::Release,
                state: KeyEventState::NONE,
            },
        );
        assert!(app.running);
    }

    #[test]
    fn home_menu_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen(), Screen::Gis);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.screen(), Screen::Home);
        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.screen(), Screen::Pd);
    }

    #[test]
    fn space_toggles_focused_category() {
        let mut app = app();
        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Char(' '));
        assert!(pd(&app)
            .assessment
            .form()
            .selected_categories
            .contains(AssessmentCategory::Public));
        press(&mut app, KeyCode::Char(' '));
        assert!(pd(&app).assessment.form().selected_categories.is_empty());
    }

    #[test]
    fn dropdown_by_keyboard() {
        let mut app = app();
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        // `q` is ignored while the list is open.
        press(&mut app, KeyCode::Char('q'));
        assert!(app.running);
        press(&mut app, KeyCode::Enter);

        let Mounted::Gis(screen) = &app.mounted else {
            panic!("expected GIS");
        };
        assert_eq!(
            screen.assessment.form().security_level,
            Some(assessor_core::catalog::SecurityLevel::Three)
        );
        assert_eq!(screen.open_dropdown(), None);
    }

    #[test]
    fn esc_closes_list_before_leaving() {
        let mut app = app();
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.screen(), Screen::Gis);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.screen(), Screen::Home);
    }

    #[test]
    fn help_overlay_swallows_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.overlay, Overlay::Help);
        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.screen(), Screen::Home);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.overlay, Overlay::None);
    }

    #[test]
    fn click_resolves_through_hit_areas() {
        let mut app = app();
        app.hits.register(Rect::new(0, 0, 20, 1), Action::OpenModule(Screen::Pd));
        click(&mut app, 3, 0);
        assert_eq!(app.screen(), Screen::Pd);

        app.hits.clear();
        app.hits.register(
            Rect::new(0, 5, 20, 1),
            Action::ToggleCategory(AssessmentCategory::Other),
        );
        click(&mut app, 3, 5);
        assert_eq!(
            pd(&app).focused(),
            Some(Focus::Category(AssessmentCategory::Other))
        );
        assert!(pd(&app)
            .assessment
            .form()
            .selected_categories
            .contains(AssessmentCategory::Other));
    }

    #[test]
    fn outside_click_closes_open_list() {
        let mut app = app();
        press(&mut app, KeyCode::Char('1'));
        app.dispatch(Action::ToggleDropdown(DropdownId::Network));
        if let Some(screen) = app.module_screen_mut() {
            if let Some(dd) = screen.dropdown_mut(DropdownId::Network) {
                dd.set_region(Region::new(0, 10, 20, 4));
            }
        }
        click(&mut app, 40, 1);
        assert_eq!(pd(&app).open_dropdown(), None);
    }
}
