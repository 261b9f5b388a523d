use assessor_core::catalog::{Scale, SecurityLevel};
use assessor_core::controls::{Dropdown, DropdownControl, PLACEHOLDER};
use assessor_core::GisAssessment;

use super::{DropdownId, Focus, ModuleScreen};

const DROPDOWNS: &[DropdownId] = &[DropdownId::SecurityLevel, DropdownId::Scale];

/// State information system protection class screen.
#[derive(Debug)]
pub struct GisScreen {
    pub assessment: GisAssessment,
    level: Dropdown<SecurityLevel>,
    scale: Dropdown<Scale>,
    focus: usize,
    scroll: u16,
}

impl Default for GisScreen {
    fn default() -> Self {
        Self {
            assessment: GisAssessment::new(),
            level: Dropdown::new(SecurityLevel::OPTIONS),
            scale: Dropdown::new(Scale::OPTIONS),
            focus: 0,
            scroll: 0,
        }
    }
}

impl GisScreen {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ModuleScreen for GisScreen {
    fn title(&self) -> &'static str {
        "Класс защищённости ГИС"
    }

    fn focus_targets(&self) -> Vec<Focus> {
        let mut targets: Vec<Focus> = DROPDOWNS.iter().map(|id| Focus::Dropdown(*id)).collect();
        targets.push(Focus::Submit);
        if let Some(view) = self.assessment.result() {
            targets.extend((0..view.panels().len()).map(Focus::Panel));
        }
        targets
    }

    fn focus_index(&self) -> usize {
        self.focus
    }

    fn focus_slot(&mut self) -> &mut usize {
        &mut self.focus
    }

    fn dropdown_ids(&self) -> &'static [DropdownId] {
        DROPDOWNS
    }

    fn dropdown(&self, id: DropdownId) -> Option<&dyn DropdownControl> {
        match id {
            DropdownId::SecurityLevel => Some(&self.level),
            DropdownId::Scale => Some(&self.scale),
            _ => None,
        }
    }

    fn dropdown_mut(&mut self, id: DropdownId) -> Option<&mut dyn DropdownControl> {
        match id {
            DropdownId::SecurityLevel => Some(&mut self.level),
            DropdownId::Scale => Some(&mut self.scale),
            _ => None,
        }
    }

    fn current_label(&self, id: DropdownId) -> &'static str {
        let form = self.assessment.form();
        match id {
            DropdownId::SecurityLevel => self.level.label_for(form.security_level),
            DropdownId::Scale => self.scale.label_for(form.scale),
            _ => PLACEHOLDER,
        }
    }

    fn toggle_dropdown(&mut self, id: DropdownId) {
        let form = self.assessment.form();
        match id {
            DropdownId::SecurityLevel => self.level.toggle(form.security_level),
            DropdownId::Scale => self.scale.toggle(form.scale),
            _ => {}
        }
    }

    fn select_option(&mut self, id: DropdownId, index: usize) {
        match id {
            DropdownId::SecurityLevel => {
                if let Some(opt) = self.level.options().get(index) {
                    let level = self.level.select(opt.value);
                    self.assessment.form_mut().set_security_level(Some(level));
                }
            }
            DropdownId::Scale => {
                if let Some(opt) = self.scale.options().get(index) {
                    let scale = self.scale.select(opt.value);
                    self.assessment.form_mut().set_scale(Some(scale));
                }
            }
            _ => {}
        }
    }

    fn is_checked(&self, _target: Focus) -> bool {
        false
    }

    fn toggle_panel(&mut self, index: usize) -> bool {
        self.assessment
            .result_mut()
            .is_some_and(|view| view.toggle_panel(index))
    }

    fn results_scroll(&self) -> u16 {
        self.scroll
    }

    fn results_scroll_mut(&mut self) -> &mut u16 {
        &mut self.scroll
    }
}
