//! JSON bodies exchanged with the classification service.
//!
//! `POST /api/level` carries a [`PdRequest`] and answers with a
//! [`PdResponse`]; `POST /api/gis` carries a [`GisRequest`] and answers with
//! a [`GisResponse`]. Non-success responses may carry an [`ErrorBody`].

use serde::{Deserialize, Serialize};

use crate::catalog::{Certification, NetworkType, Scale, SecurityLevel, SubjectCountBand};
use crate::result::{ClassificationResult, MeasureGroup, ProtectionClassResult};

pub const PD_ENDPOINT: &str = "/api/level";
pub const GIS_ENDPOINT: &str = "/api/gis";

/// Personal-data classification request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PdRequest {
    pub cert_os: Certification,
    pub cert_app: Certification,
    pub network: NetworkType,
    pub number: SubjectCountBand,
    /// Category labels in catalog order.
    pub selected_options: Vec<String>,
    pub is_employee: bool,
}

/// GIS protection class request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GisRequest {
    pub level: SecurityLevel,
    pub scale: Scale,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdResponse {
    pub max_level: String,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub measures: Option<MeasureGroup>,
}

impl From<PdResponse> for ClassificationResult {
    fn from(resp: PdResponse) -> Self {
        ClassificationResult {
            level: resp.max_level,
            reason: resp.reason.unwrap_or_default(),
            measures: resp.measures.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GisResponse {
    /// The service does not fix a type for this field.
    #[serde(default)]
    pub protect_class: serde_json::Value,
    #[serde(default)]
    pub measures: Option<MeasureGroup>,
}

impl From<GisResponse> for ProtectionClassResult {
    fn from(resp: GisResponse) -> Self {
        ProtectionClassResult {
            protection_class: value_text(&resp.protect_class),
            measures: resp.measures.unwrap_or_default(),
        }
    }
}

/// Optional body of a non-success response.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub reason: serde_json::Value,
}

impl ErrorBody {
    /// The reason as display text, or `None` when absent or blank.
    pub fn reason_text(&self) -> Option<String> {
        Some(value_text(&self.reason)).filter(|r| !r.trim().is_empty())
    }
}

/// Display text for an arbitrary JSON value. Strings lose their quotes,
/// `null` becomes empty, everything else uses its JSON form.
fn value_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
