//! Background worker: classification calls run off the UI thread.
//!
//! The main thread sends [`WorkerCommand`]s; answers come back as
//! [`WorkerResponse`]s tagged with the ticket id they belong to. Each call
//! runs on its own short-lived thread, so a slow request never holds up a
//! newer one and answers can arrive in any order.

use std::io;
use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::{debug, error};

use assessor_core::wire::{GisRequest, PdRequest};
use assessor_core::{
    AssessError, ClassificationResult, ClassificationService, ProtectionClassResult, RequestId,
    Ticket,
};

/// Commands sent from the TUI to the worker.
#[derive(Debug)]
pub enum WorkerCommand {
    ClassifyPd(Ticket<PdRequest>),
    ClassifyGis(Ticket<GisRequest>),
    Shutdown,
}

/// Responses sent from the worker back to the TUI.
#[derive(Debug)]
pub enum WorkerResponse {
    PdClassified {
        id: RequestId,
        outcome: Result<ClassificationResult, AssessError>,
    },
    GisClassified {
        id: RequestId,
        outcome: Result<ProtectionClassResult, AssessError>,
    },
}

/// Spawn the dispatcher thread.
pub fn spawn_worker(
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
    service: Arc<dyn ClassificationService>,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("assessor-worker".into())
        .spawn(move || worker_loop(rx, tx, service))
}

fn worker_loop(
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
    service: Arc<dyn ClassificationService>,
) {
    loop {
        match rx.recv() {
            Ok(WorkerCommand::Shutdown) | Err(_) => break,
            Ok(cmd) => handle_command(cmd, &tx, &service),
        }
    }
    debug!(event = "tui.worker.stopped");
}

fn handle_command(
    cmd: WorkerCommand,
    tx: &Sender<WorkerResponse>,
    service: &Arc<dyn ClassificationService>,
) {
    match cmd {
        WorkerCommand::ClassifyPd(Ticket { id, request }) => {
            let service = Arc::clone(service);
            let reply = tx.clone();
            let spawned = thread::Builder::new()
                .name(format!("assessor-pd-{}", id.value()))
                .spawn(move || {
                    let outcome = service.classify_pd(&request);
                    let _ = reply.send(WorkerResponse::PdClassified { id, outcome });
                });
            if let Err(e) = spawned {
                error!(event = "tui.worker.spawn_failed", request_id = id.value(), error = %e);
                let _ = tx.send(WorkerResponse::PdClassified {
                    id,
                    outcome: Err(AssessError::transport(e.to_string())),
                });
            }
        }
        WorkerCommand::ClassifyGis(Ticket { id, request }) => {
            let service = Arc::clone(service);
            let reply = tx.clone();
            let spawned = thread::Builder::new()
                .name(format!("assessor-gis-{}", id.value()))
                .spawn(move || {
                    let outcome = service.classify_gis(&request);
                    let _ = reply.send(WorkerResponse::GisClassified { id, outcome });
                });
            if let Err(e) = spawned {
                error!(event = "tui.worker.spawn_failed", request_id = id.value(), error = %e);
                let _ = tx.send(WorkerResponse::GisClassified {
                    id,
                    outcome: Err(AssessError::transport(e.to_string())),
                });
            }
        }
        WorkerCommand::Shutdown => {} // handled in loop
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::time::Duration;

    use assessor_core::catalog::{Scale, SecurityLevel};
    use assessor_core::{GisAssessment, MeasureGroup, RequestSequence};

    struct FixedService;

    impl ClassificationService for FixedService {
        fn classify_pd(&self, _: &PdRequest) -> Result<ClassificationResult, AssessError> {
            Err(AssessError::service("not used"))
        }

        fn classify_gis(&self, req: &GisRequest) -> Result<ProtectionClassResult, AssessError> {
            Ok(ProtectionClassResult {
                protection_class: format!("К{}", req.level.number()),
                measures: MeasureGroup::new(),
            })
        }
    }

    #[test]
    fn worker_answers_and_shuts_down() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();
        let handle = spawn_worker(cmd_rx, resp_tx, Arc::new(FixedService)).unwrap();

        let mut seq = RequestSequence::new();
        let mut module = GisAssessment::new();
        module.form_mut().set_security_level(Some(SecurityLevel::One));
        module.form_mut().set_scale(Some(Scale::Regional));
        let ticket = module.submit(&mut seq).unwrap();
        let sent = ticket.id;
        cmd_tx.send(WorkerCommand::ClassifyGis(ticket)).unwrap();

        match resp_rx.recv_timeout(Duration::from_secs(5)).unwrap() {
            WorkerResponse::GisClassified { id, outcome } => {
                assert_eq!(id, sent);
                assert_eq!(outcome.unwrap().protection_class, "К1");
            }
            other => panic!("unexpected response: {other:?}"),
        }

        cmd_tx.send(WorkerCommand::Shutdown).unwrap();
        handle.join().unwrap();
    }

    #[test]
    fn dropped_sender_stops_worker() {
        let (cmd_tx, cmd_rx) = mpsc::channel::<WorkerCommand>();
        let (resp_tx, _resp_rx) = mpsc::channel();
        let handle = spawn_worker(cmd_rx, resp_tx, Arc::new(FixedService)).unwrap();
        drop(cmd_tx);
        handle.join().unwrap();
    }
}
