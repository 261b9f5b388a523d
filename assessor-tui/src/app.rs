//! Application state: single-owner, main-thread only.
//!
//! Exactly one screen is mounted at a time. Leaving a module drops its state,
//! so re-entering starts from an empty form. The worker thread communicates
//! via channels; answers for a module that is no longer mounted, or for a
//! ticket that is no longer the latest, are dropped.

use std::sync::mpsc::{Receiver, Sender};

use tracing::{debug, error, info};

use assessor_core::{AssessError, Assessment, ModuleForm, RequestId, RequestSequence};

use crate::hit::HitAreaRegistry;
use crate::screens::{Action, Focus, GisScreen, HomeScreen, ModuleScreen, PdScreen};
use crate::worker::{WorkerCommand, WorkerResponse};

/// Shown while a classification call is in flight.
pub const PENDING_TEXT: &str = "Выполняется расчёт…";
const RESULT_READY: &str = "Расчёт завершён";
const RANDOMIZED: &str = "Форма заполнена случайными значениями";
const WORKER_GONE: &str = "Фоновый обработчик недоступен";

/// Which screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Home,
    Pd,
    Gis,
}

impl Screen {
    pub fn label(self) -> &'static str {
        match self {
            Screen::Home => "Главная",
            Screen::Pd => "Персональные данные",
            Screen::Gis => "ГИС",
        }
    }
}

/// The mounted screen and its state.
#[derive(Debug)]
pub enum Mounted {
    Home(HomeScreen),
    Pd(Box<PdScreen>),
    Gis(GisScreen),
}

impl Mounted {
    pub fn screen(&self) -> Screen {
        match self {
            Mounted::Home(_) => Screen::Home,
            Mounted::Pd(_) => Screen::Pd,
            Mounted::Gis(_) => Screen::Gis,
        }
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// Modal overlay on top of the current screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Help,
}

type Status = (String, StatusLevel);

pub struct AppState {
    pub running: bool,
    pub mounted: Mounted,
    pub overlay: Overlay,
    pub status_message: Option<Status>,
    /// Clickable areas of the last rendered frame.
    pub hits: HitAreaRegistry,
    /// Where classification requests go, for display.
    pub service_url: String,
    seq: RequestSequence,
    pub worker_tx: Sender<WorkerCommand>,
    pub worker_rx: Receiver<WorkerResponse>,
}

impl AppState {
    pub fn new(
        worker_tx: Sender<WorkerCommand>,
        worker_rx: Receiver<WorkerResponse>,
        service_url: impl Into<String>,
    ) -> Self {
        Self {
            running: true,
            mounted: Mounted::Home(HomeScreen::new()),
            overlay: Overlay::None,
            status_message: None,
            hits: HitAreaRegistry::new(),
            service_url: service_url.into(),
            seq: RequestSequence::new(),
            worker_tx,
            worker_rx,
        }
    }

    pub fn screen(&self) -> Screen {
        self.mounted.screen()
    }

    /// The mounted module, if a module is showing.
    pub fn module_screen_mut(&mut self) -> Option<&mut dyn ModuleScreen> {
        match &mut self.mounted {
            Mounted::Home(_) => None,
            Mounted::Pd(screen) => Some(screen.as_mut() as &mut dyn ModuleScreen),
            Mounted::Gis(screen) => Some(screen as &mut dyn ModuleScreen),
        }
    }

    pub fn module_screen(&self) -> Option<&dyn ModuleScreen> {
        match &self.mounted {
            Mounted::Home(_) => None,
            Mounted::Pd(screen) => Some(screen.as_ref() as &dyn ModuleScreen),
            Mounted::Gis(screen) => Some(screen as &dyn ModuleScreen),
        }
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    /// Enter a module. Only possible from the home screen.
    pub fn open_module(&mut self, screen: Screen) {
        if self.screen() != Screen::Home {
            return;
        }
        self.mounted = match screen {
            Screen::Home => return,
            Screen::Pd => Mounted::Pd(Box::default()),
            Screen::Gis => Mounted::Gis(GisScreen::new()),
        };
        self.status_message = None;
        info!(event = "tui.session.module_entered", module = screen.label());
    }

    /// Return to the home screen, dropping the module's state.
    pub fn back(&mut self) {
        let left = self.screen();
        if left == Screen::Home {
            return;
        }
        self.mounted = Mounted::Home(HomeScreen::pointing_at(left));
        self.status_message = None;
        info!(event = "tui.session.module_left", module = left.label());
    }

    pub fn toggle_help(&mut self) {
        self.overlay = match self.overlay {
            Overlay::Help => Overlay::None,
            Overlay::None => Overlay::Help,
        };
    }

    /// Apply a user intent.
    pub fn dispatch(&mut self, action: Action) {
        debug!(event = "tui.input.action", action = ?action);
        match action {
            Action::Quit => self.running = false,
            Action::ToggleHelp => self.toggle_help(),
            Action::OpenModule(screen) => self.open_module(screen),
            Action::Back => self.back(),
            action => {
                let status = match &mut self.mounted {
                    Mounted::Home(_) => None,
                    Mounted::Pd(screen) => apply_pd(screen, action, &mut self.seq, &self.worker_tx),
                    Mounted::Gis(screen) => apply_gis(screen, action, &mut self.seq, &self.worker_tx),
                };
                if status.is_some() {
                    self.status_message = status;
                }
            }
        }
    }

    /// Apply an answer from the worker to the module it belongs to.
    pub fn handle_worker_response(&mut self, resp: WorkerResponse) {
        let status = match (resp, &mut self.mounted) {
            (WorkerResponse::PdClassified { id, outcome }, Mounted::Pd(screen)) => {
                let status = finish(&mut screen.assessment, id, outcome);
                if status.is_some() {
                    after_result(screen.as_mut());
                }
                status
            }
            (WorkerResponse::GisClassified { id, outcome }, Mounted::Gis(screen)) => {
                let status = finish(&mut screen.assessment, id, outcome);
                if status.is_some() {
                    after_result(screen);
                }
                status
            }
            (resp, mounted) => {
                debug!(
                    event = "tui.worker.response_discarded",
                    screen = mounted.screen().label(),
                    response = ?resp,
                );
                None
            }
        };
        if status.is_some() {
            self.status_message = status;
        }
    }
}

/// Actions that behave the same on every module. Returns false when `action`
/// is module-specific.
fn apply_common(screen: &mut dyn ModuleScreen, action: &Action) -> bool {
    match *action {
        Action::ToggleDropdown(id) => {
            screen.focus_on(Focus::Dropdown(id));
            screen.toggle_dropdown(id);
        }
        Action::SelectOption(id, index) => screen.select_option(id, index),
        Action::TogglePanel(index) => {
            screen.focus_on(Focus::Panel(index));
            screen.toggle_panel(index);
        }
        Action::Scroll(delta) => screen.scroll_results(delta),
        _ => return false,
    }
    true
}

fn apply_pd(
    screen: &mut PdScreen,
    action: Action,
    seq: &mut RequestSequence,
    tx: &Sender<WorkerCommand>,
) -> Option<Status> {
    if apply_common(screen, &action) {
        return None;
    }
    match action {
        Action::ToggleCategory(category) => {
            screen.focus_on(Focus::Category(category));
            screen.assessment.form_mut().toggle_category(category);
            None
        }
        Action::ToggleStaff => {
            screen.focus_on(Focus::StaffMember);
            let form = screen.assessment.form_mut();
            form.is_staff_member = !form.is_staff_member;
            None
        }
        Action::Randomize => {
            screen.assessment.form_mut().randomize(&mut rand::thread_rng());
            info!(event = "tui.pd.randomized");
            Some((RANDOMIZED.to_string(), StatusLevel::Info))
        }
        Action::Submit => {
            let sent = submit(&mut screen.assessment, seq, tx, WorkerCommand::ClassifyPd);
            clamp_focus(screen);
            Some(sent)
        }
        _ => None,
    }
}

fn apply_gis(
    screen: &mut GisScreen,
    action: Action,
    seq: &mut RequestSequence,
    tx: &Sender<WorkerCommand>,
) -> Option<Status> {
    if apply_common(screen, &action) {
        return None;
    }
    match action {
        Action::Submit => {
            let sent = submit(&mut screen.assessment, seq, tx, WorkerCommand::ClassifyGis);
            clamp_focus(screen);
            Some(sent)
        }
        _ => None,
    }
}

/// Validate, issue a ticket and hand it to the worker.
fn submit<F: ModuleForm>(
    assessment: &mut Assessment<F>,
    seq: &mut RequestSequence,
    tx: &Sender<WorkerCommand>,
    command: fn(assessor_core::Ticket<F::Request>) -> WorkerCommand,
) -> Status {
    let ticket = match assessment.submit(seq) {
        Ok(ticket) => ticket,
        Err(e) => {
            debug!(event = "tui.module.validation_failed");
            return (e.message().to_string(), StatusLevel::Warning);
        }
    };
    let id = ticket.id;
    info!(event = "tui.module.submitted", request_id = id.value());
    if tx.send(command(ticket)).is_err() {
        error!(event = "tui.worker.send_failed", request_id = id.value());
        let e = AssessError::transport(WORKER_GONE);
        let msg = e.message().to_string();
        assessment.complete(id, Err(e));
        return (msg, StatusLevel::Error);
    }
    (PENDING_TEXT.to_string(), StatusLevel::Info)
}

/// Apply `outcome` if `id` is still the module's latest ticket.
fn finish<F: ModuleForm>(
    assessment: &mut Assessment<F>,
    id: RequestId,
    outcome: Result<F::Output, AssessError>,
) -> Option<Status> {
    let status = match &outcome {
        Ok(_) => (RESULT_READY.to_string(), StatusLevel::Info),
        Err(e) => (e.message().to_string(), StatusLevel::Error),
    };
    assessment.complete(id, outcome).then_some(status)
}

fn after_result(screen: &mut dyn ModuleScreen) {
    *screen.results_scroll_mut() = 0;
    clamp_focus(screen);
}

/// Keep focus in range after result panels appeared or vanished.
fn clamp_focus(screen: &mut dyn ModuleScreen) {
    let index = screen.focus_index();
    screen.set_focus(index);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    use assessor_core::catalog::{AssessmentCategory, Scale, SecurityLevel};
    use assessor_core::{MeasureGroup, MeasureItem, ProtectionClassResult, ResultArea};

    use crate::screens::DropdownId;

    fn app() -> (AppState, Receiver<WorkerCommand>, Sender<WorkerResponse>) {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();
        (AppState::new(cmd_tx, resp_rx, "http://localhost:8080"), cmd_rx, resp_tx)
    }

    fn fill_gis(app: &mut AppState) {
        app.dispatch(Action::ToggleDropdown(DropdownId::SecurityLevel));
        app.dispatch(Action::SelectOption(DropdownId::SecurityLevel, 0));
        app.dispatch(Action::ToggleDropdown(DropdownId::Scale));
        app.dispatch(Action::SelectOption(DropdownId::Scale, 2));
    }

    fn gis_answer(class: &str) -> ProtectionClassResult {
        let mut measures = MeasureGroup::new();
        measures.insert(
            "ИАФ",
            vec![MeasureItem {
                code: "ИАФ.1".into(),
                text: "Идентификация пользователей".into(),
                applicable_levels: vec!["К1".into()],
            }],
        );
        ProtectionClassResult {
            protection_class: class.into(),
            measures,
        }
    }

    fn take_gis_ticket(cmd_rx: &Receiver<WorkerCommand>) -> RequestId {
        match cmd_rx.try_recv() {
            Ok(WorkerCommand::ClassifyGis(ticket)) => ticket.id,
            other => panic!("expected a GIS command, got {other:?}"),
        }
    }

    #[test]
    fn starts_home() {
        let (app, _rx, _tx) = app();
        assert!(app.running);
        assert_eq!(app.screen(), Screen::Home);
    }

    #[test]
    fn module_switch_only_from_home() {
        let (mut app, _rx, _tx) = app();
        app.dispatch(Action::OpenModule(Screen::Pd));
        assert_eq!(app.screen(), Screen::Pd);

        app.dispatch(Action::OpenModule(Screen::Gis));
        assert_eq!(app.screen(), Screen::Pd);

        app.dispatch(Action::Back);
        assert_eq!(app.screen(), Screen::Home);
        app.dispatch(Action::Back);
        assert_eq!(app.screen(), Screen::Home);
    }

    #[test]
    fn reentry_starts_fresh() {
        let (mut app, _rx, _tx) = app();
        app.dispatch(Action::OpenModule(Screen::Pd));
        app.dispatch(Action::ToggleCategory(AssessmentCategory::Biometric));
        app.dispatch(Action::Back);
        app.dispatch(Action::OpenModule(Screen::Pd));

        match &app.mounted {
            Mounted::Pd(screen) => assert!(screen.assessment.form().selected_categories.is_empty()),
            other => panic!("expected PD, got {other:?}"),
        }
    }

    #[test]
    fn incomplete_submit_sends_nothing() {
        let (mut app, cmd_rx, _tx) = app();
        app.dispatch(Action::OpenModule(Screen::Pd));
        app.dispatch(Action::Submit);

        assert!(cmd_rx.try_recv().is_err());
        let (msg, level) = app.status_message.clone().unwrap();
        assert_eq!(msg, assessor_core::error::INCOMPLETE_FORM);
        assert_eq!(level, StatusLevel::Warning);
    }

    #[test]
    fn randomize_then_submit_sends_pd_request() {
        let (mut app, cmd_rx, _tx) = app();
        app.dispatch(Action::OpenModule(Screen::Pd));
        app.dispatch(Action::Randomize);
        app.dispatch(Action::Submit);

        match cmd_rx.try_recv() {
            Ok(WorkerCommand::ClassifyPd(ticket)) => {
                assert!(!ticket.request.selected_options.is_empty());
            }
            other => panic!("expected a PD command, got {other:?}"),
        }
        assert_eq!(app.status_message.as_ref().map(|s| s.0.as_str()), Some(PENDING_TEXT));
    }

    #[test]
    fn answer_is_applied_to_mounted_module() {
        let (mut app, cmd_rx, _tx) = app();
        app.dispatch(Action::OpenModule(Screen::Gis));
        fill_gis(&mut app);
        app.dispatch(Action::Submit);
        let id = take_gis_ticket(&cmd_rx);

        app.handle_worker_response(WorkerResponse::GisClassified {
            id,
            outcome: Ok(gis_answer("К1")),
        });

        let Mounted::Gis(screen) = &app.mounted else {
            panic!("expected GIS");
        };
        match screen.assessment.result_area() {
            ResultArea::Ready(view) => {
                assert_eq!(view.result().protection_class, "К1");
                assert_eq!(view.panels().len(), 1);
                assert!(!view.panels()[0].is_open());
            }
            other => panic!("expected Ready, got {other:?}"),
        }
    }

    #[test]
    fn stale_answer_is_discarded() {
        let (mut app, cmd_rx, _tx) = app();
        app.dispatch(Action::OpenModule(Screen::Gis));
        fill_gis(&mut app);
        app.dispatch(Action::Submit);
        let first = take_gis_ticket(&cmd_rx);
        app.dispatch(Action::Submit);
        let second = take_gis_ticket(&cmd_rx);

        app.handle_worker_response(WorkerResponse::GisClassified {
            id: second,
            outcome: Ok(gis_answer("К2")),
        });
        app.handle_worker_response(WorkerResponse::GisClassified {
            id: first,
            outcome: Ok(gis_answer("К3")),
        });

        let Mounted::Gis(screen) = &app.mounted else {
            panic!("expected GIS");
        };
        assert_eq!(screen.assessment.result().unwrap().result().protection_class, "К2");
    }

    #[test]
    fn answer_after_leaving_is_dropped() {
        let (mut app, cmd_rx, _tx) = app();
        app.dispatch(Action::OpenModule(Screen::Gis));
        fill_gis(&mut app);
        app.dispatch(Action::Submit);
        let id = take_gis_ticket(&cmd_rx);

        app.dispatch(Action::Back);
        app.dispatch(Action::OpenModule(Screen::Gis));
        app.handle_worker_response(WorkerResponse::GisClassified {
            id,
            outcome: Ok(gis_answer("К1")),
        });

        let Mounted::Gis(screen) = &app.mounted else {
            panic!("expected GIS");
        };
        assert!(matches!(screen.assessment.result_area(), ResultArea::Placeholder));
    }

    #[test]
    fn service_error_reaches_status_bar() {
        let (mut app, cmd_rx, _tx) = app();
        app.dispatch(Action::OpenModule(Screen::Gis));
        fill_gis(&mut app);
        app.dispatch(Action::Submit);
        let id = take_gis_ticket(&cmd_rx);

        app.handle_worker_response(WorkerResponse::GisClassified {
            id,
            outcome: Err(AssessError::service("bad input")),
        });
        assert_eq!(
            app.status_message,
            Some(("bad input".to_string(), StatusLevel::Error))
        );
    }

    #[test]
    fn dead_worker_fails_the_ticket() {
        let (mut app, cmd_rx, _tx) = app();
        drop(cmd_rx);
        app.dispatch(Action::OpenModule(Screen::Gis));
        fill_gis(&mut app);
        app.dispatch(Action::Submit);

        let Mounted::Gis(screen) = &app.mounted else {
            panic!("expected GIS");
        };
        assert!(!screen.assessment.is_pending());
        assert!(screen.assessment.error().is_some());
        assert_eq!(app.status_message.as_ref().map(|s| s.1), Some(StatusLevel::Error));
    }

    #[test]
    fn gis_form_selected_through_actions() {
        let (mut app, _rx, _tx) = app();
        app.dispatch(Action::OpenModule(Screen::Gis));
        fill_gis(&mut app);
        let Mounted::Gis(screen) = &app.mounted else {
            panic!("expected GIS");
        };
        assert_eq!(screen.assessment.form().security_level, Some(SecurityLevel::One));
        assert_eq!(screen.assessment.form().scale, Some(Scale::Federal));
    }

    #[test]
    fn help_and_quit() {
        let (mut app, _rx, _tx) = app();
        app.dispatch(Action::ToggleHelp);
        assert_eq!(app.overlay, Overlay::Help);
        app.dispatch(Action::ToggleHelp);
        assert_eq!(app.overlay, Overlay::None);
        app.dispatch(Action::Quit);
        assert!(!app.running);
    }
}
