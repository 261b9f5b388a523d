use assessor_core::catalog::{AssessmentCategory, Certification, NetworkType, SubjectCountBand};
use assessor_core::controls::{Dropdown, DropdownControl};
use assessor_core::{PdAssessment, PdField};

use super::{DropdownId, Focus, ModuleScreen};

const DROPDOWNS: &[DropdownId] = &[
    DropdownId::SubjectCount,
    DropdownId::OsCertified,
    DropdownId::AppCertified,
    DropdownId::Network,
];

/// Personal-data protection level screen.
#[derive(Debug)]
pub struct PdScreen {
    pub assessment: PdAssessment,
    subject_count: Dropdown<SubjectCountBand>,
    os_certified: Dropdown<Certification>,
    app_certified: Dropdown<Certification>,
    network: Dropdown<NetworkType>,
    focus: usize,
    scroll: u16,
}

impl Default for PdScreen {
    fn default() -> Self {
        Self {
            assessment: PdAssessment::new(),
            subject_count: Dropdown::new(SubjectCountBand::OPTIONS),
            os_certified: Dropdown::new(Certification::OS_OPTIONS),
            app_certified: Dropdown::new(Certification::APP_OPTIONS),
            network: Dropdown::new(NetworkType::OPTIONS),
            focus: 0,
            scroll: 0,
        }
    }
}

impl PdScreen {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Value of option `index`, marking it selected on the dropdown.
fn select_at<T: Copy + PartialEq>(dd: &mut Dropdown<T>, index: usize) -> Option<T> {
    let value = dd.options().get(index)?.value;
    Some(dd.select(value))
}

impl ModuleScreen for PdScreen {
    fn title(&self) -> &'static str {
        "Уровень защищённости ПДн"
    }

    fn focus_targets(&self) -> Vec<Focus> {
        let mut targets: Vec<Focus> = AssessmentCategory::ALL
            .iter()
            .map(|c| Focus::Category(*c))
            .collect();
        targets.extend(DROPDOWNS.iter().map(|id| Focus::Dropdown(*id)));
        targets.extend([Focus::StaffMember, Focus::Randomize, Focus::Submit]);
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
            DropdownId::SubjectCount => Some(&self.subject_count),
            DropdownId::OsCertified => Some(&self.os_certified),
            DropdownId::AppCertified => Some(&self.app_certified),
            DropdownId::Network => Some(&self.network),
            _ => None,
        }
    }

    fn dropdown_mut(&mut self, id: DropdownId) -> Option<&mut dyn DropdownControl> {
        match id {
            DropdownId::SubjectCount => Some(&mut self.subject_count),
            DropdownId::OsCertified => Some(&mut self.os_certified),
            DropdownId::AppCertified => Some(&mut self.app_certified),
            DropdownId::Network => Some(&mut self.network),
            _ => None,
        }
    }

    fn current_label(&self, id: DropdownId) -> &'static str {
        let form = self.assessment.form();
        match id {
            DropdownId::SubjectCount => self.subject_count.label_for(form.subject_count),
            DropdownId::OsCertified => self.os_certified.label_for(form.os_certified),
            DropdownId::AppCertified => self.app_certified.label_for(form.app_certified),
            DropdownId::Network => self.network.label_for(form.network),
            _ => assessor_core::controls::PLACEHOLDER,
        }
    }

    fn toggle_dropdown(&mut self, id: DropdownId) {
        let form = self.assessment.form();
        match id {
            DropdownId::SubjectCount => self.subject_count.toggle(form.subject_count),
            DropdownId::OsCertified => self.os_certified.toggle(form.os_certified),
            DropdownId::AppCertified => self.app_certified.toggle(form.app_certified),
            DropdownId::Network => self.network.toggle(form.network),
            _ => {}
        }
    }

    fn select_option(&mut self, id: DropdownId, index: usize) {
        let field = match id {
            DropdownId::SubjectCount => {
                select_at(&mut self.subject_count, index).map(|v| PdField::SubjectCount(Some(v)))
            }
            DropdownId::OsCertified => {
                select_at(&mut self.os_certified, index).map(|v| PdField::OsCertified(Some(v)))
            }
            DropdownId::AppCertified => {
                select_at(&mut self.app_certified, index).map(|v| PdField::AppCertified(Some(v)))
            }
            DropdownId::Network => {
                select_at(&mut self.network, index).map(|v| PdField::Network(Some(v)))
            }
            _ => None,
        };
        if let Some(field) = field {
            self.assessment.form_mut().set_field(field);
        }
    }

    fn is_checked(&self, target: Focus) -> bool {
        let form = self.assessment.form();
        match target {
            Focus::Category(c) => form.selected_categories.contains(c),
            Focus::StaffMember => form.is_staff_member,
            _ => false,
        }
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
