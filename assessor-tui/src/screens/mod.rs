//! Screen-level state: the home menu and the two assessment modules.
//!
//! A module screen owns its [`Assessment`](assessor_core::Assessment) plus the
//! interactive widgets that edit it (dropdowns, keyboard focus, results
//! scroll). Everything else in the TUI talks to a module screen through
//! [`ModuleScreen`] and [`Action`].

mod gis;
mod home;
mod pd;

pub use gis::GisScreen;
pub use home::{HomeScreen, MENU};
pub use pd::PdScreen;

use assessor_core::catalog::AssessmentCategory;
use assessor_core::controls::{DropdownControl, Point, PointerListener};

use crate::app::Screen;

/// Rows moved by one PageUp/PageDown in the results area.
pub const SCROLL_PAGE: u16 = 5;

/// Every user intent the TUI can act on, whether it came from a key or a click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    OpenModule(Screen),
    Back,
    Quit,
    ToggleHelp,
    ToggleCategory(AssessmentCategory),
    ToggleDropdown(DropdownId),
    SelectOption(DropdownId, usize),
    ToggleStaff,
    Randomize,
    Submit,
    TogglePanel(usize),
    Scroll(i16),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropdownId {
    SubjectCount,
    OsCertified,
    AppCertified,
    Network,
    SecurityLevel,
    Scale,
}

impl DropdownId {
    /// Caption shown above the control.
    pub fn caption(self) -> &'static str {
        match self {
            DropdownId::SubjectCount => "Количество субъектов:",
            DropdownId::OsCertified => "Сертификация ОС:",
            DropdownId::AppCertified => "Сертификация приложения:",
            DropdownId::Network => "Тип сети:",
            DropdownId::SecurityLevel => "Уровень значимости:",
            DropdownId::Scale => "Масштаб:",
        }
    }
}

/// One keyboard-focusable control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Category(AssessmentCategory),
    Dropdown(DropdownId),
    StaffMember,
    Randomize,
    Submit,
    Panel(usize),
}

impl Focus {
    /// What Enter or Space does on this control.
    pub fn action(self) -> Action {
        match self {
            Focus::Category(c) => Action::ToggleCategory(c),
            Focus::Dropdown(id) => Action::ToggleDropdown(id),
            Focus::StaffMember => Action::ToggleStaff,
            Focus::Randomize => Action::Randomize,
            Focus::Submit => Action::Submit,
            Focus::Panel(i) => Action::TogglePanel(i),
        }
    }
}

/// Shared behaviour of the PD and GIS screens.
pub trait ModuleScreen {
    /// Window title.
    fn title(&self) -> &'static str;

    /// Focusable controls in tab order, result panels included.
    fn focus_targets(&self) -> Vec<Focus>;

    fn focus_index(&self) -> usize;

    fn focus_slot(&mut self) -> &mut usize;

    /// Dropdowns mounted on this screen.
    fn dropdown_ids(&self) -> &'static [DropdownId];

    fn dropdown(&self, id: DropdownId) -> Option<&dyn DropdownControl>;

    fn dropdown_mut(&mut self, id: DropdownId) -> Option<&mut dyn DropdownControl>;

    /// Label of the value currently stored for `id`, or the placeholder.
    fn current_label(&self, id: DropdownId) -> &'static str;

    /// Open or close `id`, starting the highlight on the stored value.
    fn toggle_dropdown(&mut self, id: DropdownId);

    /// Store option `index` of `id` in the form and close the list.
    fn select_option(&mut self, id: DropdownId, index: usize);

    /// Checked state for checkbox-like controls.
    fn is_checked(&self, target: Focus) -> bool;

    fn toggle_panel(&mut self, index: usize) -> bool;

    fn results_scroll(&self) -> u16;

    fn results_scroll_mut(&mut self) -> &mut u16;

    fn focused(&self) -> Option<Focus> {
        self.focus_targets().get(self.focus_index()).copied()
    }

    /// Move keyboard focus. A dropdown that loses focus closes.
    fn set_focus(&mut self, index: usize) {
        let targets = self.focus_targets();
        if targets.is_empty() {
            return;
        }
        let index = index.min(targets.len() - 1);
        let old = targets.get(self.focus_index()).copied();
        if let Some(Focus::Dropdown(id)) = old {
            if old != Some(targets[index]) {
                if let Some(dd) = self.dropdown_mut(id) {
                    dd.focus_lost();
                }
            }
        }
        *self.focus_slot() = index;
    }

    fn focus_next(&mut self) {
        let len = self.focus_targets().len();
        if len > 0 {
            self.set_focus((self.focus_index() + 1) % len);
        }
    }

    fn focus_prev(&mut self) {
        let len = self.focus_targets().len();
        if len > 0 {
            self.set_focus((self.focus_index() + len - 1) % len);
        }
    }

    /// Focus `target` if it is on screen.
    fn focus_on(&mut self, target: Focus) {
        if let Some(i) = self.focus_targets().iter().position(|t| *t == target) {
            self.set_focus(i);
        }
    }

    /// The first dropdown whose list is showing.
    fn open_dropdown(&self) -> Option<DropdownId> {
        self.dropdown_ids()
            .iter()
            .copied()
            .find(|id| self.dropdown(*id).is_some_and(|dd| dd.is_open()))
    }

    fn move_highlight(&mut self, id: DropdownId, delta: isize) {
        if let Some(dd) = self.dropdown_mut(id) {
            dd.move_highlight(delta);
        }
    }

    /// Select the highlighted option of an open dropdown.
    fn commit_dropdown(&mut self, id: DropdownId) {
        let highlight = match self.dropdown(id) {
            Some(dd) if dd.is_open() => dd.highlight(),
            _ => return,
        };
        self.select_option(id, highlight);
    }

    fn close_dropdown(&mut self, id: DropdownId) {
        if let Some(dd) = self.dropdown_mut(id) {
            dd.close();
        }
    }

    /// Deliver a pointer press to every mounted dropdown.
    fn pointer_down(&mut self, at: Point) {
        for id in self.dropdown_ids() {
            if let Some(dd) = self.dropdown_mut(*id) {
                dd.on_pointer_down(at);
            }
        }
    }

    fn scroll_results(&mut self, delta: i16) {
        let slot = self.results_scroll_mut();
        *slot = slot.saturating_add_signed(delta);
    }
}
