//! GIS protection class form.

use super::ModuleForm;
use crate::catalog::{Scale, SecurityLevel};
use crate::client::ClassificationService;
use crate::error::AssessError;
use crate::result::ProtectionClassResult;
use crate::wire::GisRequest;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GisFormState {
    pub security_level: Option<SecurityLevel>,
    pub scale: Option<Scale>,
}

impl GisFormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_security_level(&mut self, level: Option<SecurityLevel>) {
        self.security_level = level;
    }

    pub fn set_scale(&mut self, scale: Option<Scale>) {
        self.scale = scale;
    }
}

impl ModuleForm for GisFormState {
    type Request = GisRequest;
    type Output = ProtectionClassResult;

    fn is_complete(&self) -> bool {
        self.security_level.is_some() && self.scale.is_some()
    }

    fn to_request(&self) -> Result<GisRequest, AssessError> {
        match (self.security_level, self.scale) {
            (Some(level), Some(scale)) => Ok(GisRequest { level, scale }),
            _ => Err(AssessError::incomplete()),
        }
    }

    fn classify(
        service: &dyn ClassificationService,
        request: &GisRequest,
    ) -> Result<ProtectionClassResult, AssessError> {
        service.classify_gis(request)
    }
}
