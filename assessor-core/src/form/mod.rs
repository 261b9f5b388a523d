//! Per-module form state and its submission contract.

mod gis;
mod pd;

pub use gis::GisFormState;
pub use pd::{PdField, PdFormState};

use std::fmt::Debug;

use crate::client::ClassificationService;
use crate::error::AssessError;
use crate::result::HasMeasures;

/// A module's input form: validity gate plus the call it submits to.
pub trait ModuleForm: Default + Debug {
    /// Snapshot of the field values sent to the service.
    type Request: Clone + Debug + Send + 'static;
    /// What the service answers with.
    type Output: HasMeasures + Debug + Send + 'static;

    /// True when every required field is set.
    fn is_complete(&self) -> bool;

    /// Snapshot the fields. Fails with a validation error when incomplete.
    fn to_request(&self) -> Result<Self::Request, AssessError>;

    /// Invoke the module's variant of the classification call.
    fn classify(
        service: &dyn ClassificationService,
        request: &Self::Request,
    ) -> Result<Self::Output, AssessError>;
}
