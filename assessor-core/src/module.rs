//! Module state: form, latest result, inline error and in-flight request.
//!
//! Submission is split in two so the network call can run elsewhere:
//! [`Assessment::submit`] validates and issues a [`Ticket`], and
//! [`Assessment::complete`] applies the answer for that ticket. Only the most
//! recently issued ticket is accepted; answers to older tickets are dropped,
//! so a slow first response can never overwrite a newer one.

use tracing::debug;

use crate::client::ClassificationService;
use crate::error::AssessError;
use crate::form::{GisFormState, ModuleForm, PdFormState};
use crate::result::ResultView;

/// Identifier of one issued classification request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl RequestId {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Monotonic source of request ids, shared by every module of a session.
#[derive(Debug, Default)]
pub struct RequestSequence {
    last: u64,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> RequestId {
        self.last += 1;
        RequestId(self.last)
    }
}

/// A validated request ready to be sent.
#[derive(Debug, Clone)]
pub struct Ticket<Req> {
    pub id: RequestId,
    pub request: Req,
}

/// What the results area should show.
#[derive(Debug)]
pub enum ResultArea<'a, R> {
    /// Never submitted, or the last submission failed.
    Placeholder,
    /// A submission is in flight.
    Pending,
    Ready(&'a ResultView<R>),
}

#[derive(Debug)]
pub struct Assessment<F: ModuleForm> {
    form: F,
    result: Option<ResultView<F::Output>>,
    error: Option<AssessError>,
    pending: Option<RequestId>,
}

pub type PdAssessment = Assessment<PdFormState>;
pub type GisAssessment = Assessment<GisFormState>;

impl<F: ModuleForm> Default for Assessment<F> {
    fn default() -> Self {
        Self {
            form: F::default(),
            result: None,
            error: None,
            pending: None,
        }
    }
}

impl<F: ModuleForm> Assessment<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut F {
        &mut self.form
    }

    pub fn result(&self) -> Option<&ResultView<F::Output>> {
        self.result.as_ref()
    }

    pub fn result_mut(&mut self) -> Option<&mut ResultView<F::Output>> {
        self.result.as_mut()
    }

    pub fn error(&self) -> Option<&AssessError> {
        self.error.as_ref()
    }

    pub fn pending(&self) -> Option<RequestId> {
        self.pending
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Validate and issue a ticket.
    ///
    /// An incomplete form records a validation error and leaves any shown
    /// result in place. A complete one clears result and error first.
    pub fn submit(&mut self, seq: &mut RequestSequence) -> Result<Ticket<F::Request>, AssessError> {
        match self.form.to_request() {
            Err(e) => {
                self.error = Some(e.clone());
                Err(e)
            }
            Ok(request) => {
                self.result = None;
                self.error = None;
                let id = seq.next_id();
                self.pending = Some(id);
                Ok(Ticket { id, request })
            }
        }
    }

    /// Apply the answer for ticket `id`. Returns false when the ticket is not
    /// the latest one issued by this module, in which case nothing changes.
    pub fn complete(&mut self, id: RequestId, outcome: Result<F::Output, AssessError>) -> bool {
        if self.pending != Some(id) {
            debug!(
                event = "core.module.stale_response_discarded",
                request_id = id.value(),
                latest = self.pending.map(RequestId::value),
            );
            return false;
        }
        self.pending = None;
        match outcome {
            Ok(result) => {
                self.result = Some(ResultView::new(result));
                self.error = None;
            }
            Err(e) => {
                self.result = None;
                self.error = Some(e);
            }
        }
        true
    }

    /// Submit and classify on the calling thread.
    pub fn submit_with(
        &mut self,
        seq: &mut RequestSequence,
        service: &dyn ClassificationService,
    ) -> Result<(), AssessError> {
        let ticket = self.submit(seq)?;
        let outcome = F::classify(service, &ticket.request);
        let failure = outcome.as_ref().err().cloned();
        self.complete(ticket.id, outcome);
        match failure {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    pub fn result_area(&self) -> ResultArea<'_, F::Output> {
        match (&self.result, self.pending) {
            (Some(view), _) => ResultArea::Ready(view),
            (None, Some(_)) => ResultArea::Pending,
            (None, None) => ResultArea::Placeholder,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::catalog::{AssessmentCategory, Certification, NetworkType, Scale, SecurityLevel, SubjectCountBand};
    use crate::form::PdField;
    use crate::result::{ClassificationResult, MeasureGroup, ProtectionClassResult};
    use crate::wire::{GisRequest, PdRequest};

    /// Counts calls and answers with a fixed outcome.
    struct StubService {
        calls: AtomicUsize,
        fail_with: Option<AssessError>,
    }

    impl StubService {
        fn ok() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_with: None,
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_with: Some(AssessError::service(message)),
            }
        }
    }

    impl ClassificationService for StubService {
        fn classify_pd(&self, _: &PdRequest) -> Result<ClassificationResult, AssessError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.fail_with {
                Some(e) => Err(e.clone()),
                None => Ok(pd_result("УЗ-4")),
            }
        }

        fn classify_gis(&self, _: &GisRequest) -> Result<ProtectionClassResult, AssessError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.fail_with {
                Some(e) => Err(e.clone()),
                None => Ok(ProtectionClassResult {
                    protection_class: "К2".into(),
                    measures: MeasureGroup::new(),
                }),
            }
        }
    }

    fn pd_result(level: &str) -> ClassificationResult {
        ClassificationResult {
            level: level.into(),
            reason: "ok".into(),
            measures: MeasureGroup::new(),
        }
    }

    fn complete_pd() -> PdAssessment {
        let mut m = PdAssessment::new();
        let form = m.form_mut();
        form.toggle_category(AssessmentCategory::Public);
        form.set_field(PdField::SubjectCount(Some(SubjectCountBand::Below100k)));
        form.set_field(PdField::OsCertified(Some(Certification::Certified)));
        form.set_field(PdField::AppCertified(Some(Certification::Certified)));
        form.set_field(PdField::Network(Some(NetworkType::Local)));
        m
    }

    #[test]
    fn sequence_is_monotonic() {
        let mut seq = RequestSequence::new();
        let a = seq.next_id();
        let b = seq.next_id();
        assert!(b > a);
    }

    #[test]
    fn incomplete_submit_never_calls_service() {
        let service = StubService::ok();
        let mut seq = RequestSequence::new();
        let mut m = PdAssessment::new();

        let err = m.submit_with(&mut seq, &service).unwrap_err();
        assert!(err.is_validation());
        assert!(!err.message().is_empty());
        assert_eq!(service.calls.load(Ordering::SeqCst), 0);
        assert!(!m.is_pending());
        assert_eq!(m.error(), Some(&err));
    }

    #[test]
    fn validation_error_keeps_previous_result() {
        let service = StubService::ok();
        let mut seq = RequestSequence::new();
        let mut m = complete_pd();
        m.submit_with(&mut seq, &service).unwrap();
        assert!(m.result().is_some());

        m.form_mut().set_field(PdField::Network(None));
        assert!(m.submit_with(&mut seq, &service).is_err());
        assert!(m.result().is_some());
        assert!(m.error().unwrap().is_validation());
    }

    #[test]
    fn successful_submit_shows_result() {
        let service = StubService::ok();
        let mut seq = RequestSequence::new();
        let mut m = complete_pd();
        m.submit_with(&mut seq, &service).unwrap();

        match m.result_area() {
            ResultArea::Ready(view) => {
                assert_eq!(view.result().level, "УЗ-4");
                assert!(view.panels().is_empty());
            }
            other => panic!("expected Ready, got {other:?}"),
        }
        assert!(m.error().is_none());
        assert_eq!(service.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn service_error_clears_previous_result() {
        let mut seq = RequestSequence::new();
        let mut m = complete_pd();
        m.submit_with(&mut seq, &StubService::ok()).unwrap();

        let err = m
            .submit_with(&mut seq, &StubService::failing("bad input"))
            .unwrap_err();
        assert_eq!(err.message(), "bad input");
        assert!(m.result().is_none());
        assert_eq!(m.error().map(AssessError::message), Some("bad input"));
        assert!(matches!(m.result_area(), ResultArea::Placeholder));
    }

    #[test]
    fn valid_submit_clears_before_the_call() {
        let mut seq = RequestSequence::new();
        let mut m = complete_pd();
        m.submit_with(&mut seq, &StubService::ok()).unwrap();

        let ticket = m.submit(&mut seq).unwrap();
        assert!(m.result().is_none());
        assert!(m.error().is_none());
        assert_eq!(m.pending(), Some(ticket.id));
        assert!(matches!(m.result_area(), ResultArea::Pending));
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut seq = RequestSequence::new();
        let mut m = complete_pd();

        let first = m.submit(&mut seq).unwrap();
        let second = m.submit(&mut seq).unwrap();

        assert!(m.complete(second.id, Ok(pd_result("УЗ-3"))));
        assert!(!m.complete(first.id, Ok(pd_result("УЗ-1"))));
        assert_eq!(m.result().unwrap().result().level, "УЗ-3");
    }

    #[test]
    fn out_of_order_older_answer_is_dropped_while_newer_pending() {
        let mut seq = RequestSequence::new();
        let mut m = complete_pd();

        let first = m.submit(&mut seq).unwrap();
        let _second = m.submit(&mut seq).unwrap();

        assert!(!m.complete(first.id, Err(AssessError::service("late"))));
        assert!(m.is_pending());
        assert!(m.error().is_none());
    }

    #[test]
    fn duplicate_completion_is_ignored() {
        let mut seq = RequestSequence::new();
        let mut m = complete_pd();
        let t = m.submit(&mut seq).unwrap();
        assert!(m.complete(t.id, Ok(pd_result("УЗ-2"))));
        assert!(!m.complete(t.id, Err(AssessError::service("again"))));
        assert_eq!(m.result().unwrap().result().level, "УЗ-2");
    }

    #[test]
    fn gis_submit_roundtrip() {
        let mut seq = RequestSequence::new();
        let mut m = GisAssessment::new();
        assert!(m.submit_with(&mut seq, &StubService::ok()).is_err());

        m.form_mut().set_security_level(Some(SecurityLevel::Two));
        m.form_mut().set_scale(Some(Scale::Federal));
        let ticket = m.submit(&mut seq).unwrap();
        assert_eq!(ticket.request.level, SecurityLevel::Two);
        assert!(m.complete(
            ticket.id,
            Ok(ProtectionClassResult {
                protection_class: "К1".into(),
                measures: MeasureGroup::new(),
            })
        ));
        assert_eq!(m.result().unwrap().result().protection_class, "К1");
    }
}
