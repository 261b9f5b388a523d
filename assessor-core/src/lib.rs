//! Assessor Core: client-side orchestration for two compliance assessments.
//!
//! - PD: personal-data protection level (categories, subject count,
//!   certification, network exposure)
//! - GIS: state information system protection class (significance level, scale)
//!
//! Both follow the same flow: fill a form, validate it locally, submit it to
//! the remote classification service, show the returned level and measures.
//! This crate holds that flow and the form primitives it is built from; the
//! terminal front-end lives in `assessor-tui`.

pub mod catalog;
pub mod client;
pub mod config;
pub mod controls;
pub mod error;
pub mod form;
pub mod module;
pub mod result;
pub mod wire;

pub use client::{ClassificationService, HttpClassifier};
pub use config::ClientConfig;
pub use error::AssessError;
pub use form::{GisFormState, ModuleForm, PdField, PdFormState};
pub use module::{Assessment, GisAssessment, PdAssessment, RequestId, RequestSequence, ResultArea, Ticket};
pub use result::{ClassificationResult, MeasureGroup, MeasureItem, ProtectionClassResult, ResultView};
