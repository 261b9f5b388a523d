//! Classification service client.
//!
//! [`ClassificationService`] is the seam between module state and the remote
//! service, so tests and the terminal front-end can swap in their own
//! implementation. [`HttpClassifier`] is the real one: a single POST per
//! call, no retries, no caching.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::error::AssessError;
use crate::result::{ClassificationResult, ProtectionClassResult};
use crate::wire::{ErrorBody, GisRequest, GisResponse, PdRequest, PdResponse, GIS_ENDPOINT, PD_ENDPOINT};

/// Abstraction over the remote classification service.
pub trait ClassificationService: Send + Sync {
    /// Determine the personal-data protection level.
    fn classify_pd(&self, request: &PdRequest) -> Result<ClassificationResult, AssessError>;

    /// Determine the GIS protection class.
    fn classify_gis(&self, request: &GisRequest) -> Result<ProtectionClassResult, AssessError>;
}

/// HTTP/JSON implementation of [`ClassificationService`].
pub struct HttpClassifier {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpClassifier {
    pub fn new(config: &ClientConfig) -> Result<Self, AssessError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout_secs.map(Duration::from_secs))
            .build()
            .map_err(|e| AssessError::transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn post<Req, Resp>(&self, path: &str, body: &Req) -> Result<Resp, AssessError>
    where
        Req: Serialize,
        Resp: DeserializeOwned,
    {
        let url = self.endpoint(path);
        debug!(event = "core.client.request_sent", url = %url);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .map_err(|e| AssessError::transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(event = "core.client.request_rejected", url = %url, status = status.as_u16());
            // A truncated error body still yields the status message.
            let bytes = response.bytes().unwrap_or_default();
            return Err(error_from_body(status.as_u16(), &bytes));
        }

        let bytes = response
            .bytes()
            .map_err(|e| AssessError::transport(e.to_string()))?;
        serde_json::from_slice(&bytes)
            .map_err(|e| AssessError::transport(format!("некорректный ответ сервера: {e}")))
    }
}

/// Map a non-success response to a service error, preferring the reason the
/// service gave.
fn error_from_body(status: u16, body: &[u8]) -> AssessError {
    let reason = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.reason_text());

    match reason {
        Some(reason) => AssessError::service(reason),
        None => AssessError::server_status(status),
    }
}

impl ClassificationService for HttpClassifier {
    fn classify_pd(&self, request: &PdRequest) -> Result<ClassificationResult, AssessError> {
        info!(
            event = "core.classify.pd_started",
            categories = request.selected_options.len(),
        );
        let resp: PdResponse = self.post(PD_ENDPOINT, request)?;
        let result = ClassificationResult::from(resp);
        info!(
            event = "core.classify.pd_completed",
            level = %result.level,
            sections = result.measures.len(),
        );
        Ok(result)
    }

    fn classify_gis(&self, request: &GisRequest) -> Result<ProtectionClassResult, AssessError> {
        info!(event = "core.classify.gis_started", level = request.level.number());
        let resp: GisResponse = self.post(GIS_ENDPOINT, request)?;
        let result = ProtectionClassResult::from(resp);
        info!(
            event = "core.classify.gis_completed",
            protection_class = %result.protection_class,
            sections = result.measures.len(),
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reason_wins_over_status() {
        let err = error_from_body(400, br#"{"reason": "bad input"}"#);
        assert_eq!(err, AssessError::service("bad input"));
    }

    #[test]
    fn missing_body_embeds_status() {
        let err = error_from_body(500, b"");
        assert!(err.message().contains("500"));
        assert!(!err.is_validation());
    }

    #[test]
    fn blank_reason_embeds_status() {
        let err = error_from_body(502, br#"{"reason": ""}"#);
        assert!(err.message().contains("502"));
    }

    #[test]
    fn trailing_slash_trimmed() {
        let config = ClientConfig {
            base_url: "http://localhost:8080/".into(),
            ..ClientConfig::default()
        };
        let client = HttpClassifier::new(&config).unwrap();
        assert_eq!(client.endpoint(PD_ENDPOINT), "http://localhost:8080/api/level");
    }
}
