//! Personal-data threat level form.

use rand::Rng;

use super::ModuleForm;
use crate::catalog::{AssessmentCategory, Certification, NetworkType, SubjectCountBand};
use crate::client::ClassificationService;
use crate::controls::{DropdownOption, ToggleSet};
use crate::error::AssessError;
use crate::result::ClassificationResult;
use crate::wire::PdRequest;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PdFormState {
    pub selected_categories: ToggleSet<AssessmentCategory>,
    pub subject_count: Option<SubjectCountBand>,
    pub os_certified: Option<Certification>,
    pub app_certified: Option<Certification>,
    pub network: Option<NetworkType>,
    pub is_staff_member: bool,
}

/// One scalar field together with its new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PdField {
    SubjectCount(Option<SubjectCountBand>),
    OsCertified(Option<Certification>),
    AppCertified(Option<Certification>),
    Network(Option<NetworkType>),
    StaffMember(bool),
}

impl PdFormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_category(&mut self, category: AssessmentCategory) {
        self.selected_categories.toggle(category);
    }

    /// Update exactly one scalar field. Nothing else is recalculated.
    pub fn set_field(&mut self, field: PdField) {
        match field {
            PdField::SubjectCount(v) => self.subject_count = v,
            PdField::OsCertified(v) => self.os_certified = v,
            PdField::AppCertified(v) => self.app_certified = v,
            PdField::Network(v) => self.network = v,
            PdField::StaffMember(v) => self.is_staff_member = v,
        }
    }

    /// A uniformly random complete form.
    ///
    /// Each category is kept with probability one half; an empty draw falls
    /// back to a single uniformly chosen category.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let is_staff_member = rng.gen_bool(0.5);
        let subject_count = pick(rng, SubjectCountBand::OPTIONS);
        let os_certified = pick(rng, Certification::OS_OPTIONS);
        let app_certified = pick(rng, Certification::APP_OPTIONS);
        let network = pick(rng, NetworkType::OPTIONS);

        let mut selected_categories: ToggleSet<AssessmentCategory> = AssessmentCategory::ALL
            .iter()
            .copied()
            .filter(|_| rng.gen_bool(0.5))
            .collect();
        if selected_categories.is_empty() {
            let i = rng.gen_range(0..AssessmentCategory::ALL.len());
            selected_categories.toggle(AssessmentCategory::ALL[i]);
        }

        Self {
            selected_categories,
            subject_count: Some(subject_count),
            os_certified: Some(os_certified),
            app_certified: Some(app_certified),
            network: Some(network),
            is_staff_member,
        }
    }

    /// Replace every field with a random complete fixture.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        *self = Self::random(rng);
    }
}

fn pick<T: Copy, R: Rng + ?Sized>(rng: &mut R, options: &[DropdownOption<T>]) -> T {
    options[rng.gen_range(0..options.len())].value
}

impl ModuleForm for PdFormState {
    type Request = PdRequest;
    type Output = ClassificationResult;

    fn is_complete(&self) -> bool {
        !self.selected_categories.is_empty()
            && self.subject_count.is_some()
            && self.os_certified.is_some()
            && self.app_certified.is_some()
            && self.network.is_some()
    }

    fn to_request(&self) -> Result<PdRequest, AssessError> {
        if self.selected_categories.is_empty() {
            return Err(AssessError::incomplete());
        }
        match (
            self.os_certified,
            self.app_certified,
            self.network,
            self.subject_count,
        ) {
            (Some(cert_os), Some(cert_app), Some(network), Some(number)) => Ok(PdRequest {
                cert_os,
                cert_app,
                network,
                number,
                selected_options: self
                    .selected_categories
                    .iter()
                    .map(|c| c.label().to_string())
                    .collect(),
                is_employee: self.is_staff_member,
            }),
            _ => Err(AssessError::incomplete()),
        }
    }

    fn classify(
        service: &dyn ClassificationService,
        request: &PdRequest,
    ) -> Result<ClassificationResult, AssessError> {
        service.classify_pd(request)
    }
}
