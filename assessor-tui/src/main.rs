//! `assessor`: terminal front-end for the PD and GIS assessments.

use std::io::{self, stdout};
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;

use assessor_core::{ClassificationService, HttpClassifier};
use assessor_tui::app::AppState;
use assessor_tui::config::{Cli, Settings};
use assessor_tui::worker::{self, WorkerCommand};
use assessor_tui::{input, logging, ui};

fn main() -> Result<()> {
    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), DisableMouseCapture, LeaveAlternateScreen);
        default_hook(info);
    }));

    let cli = Cli::parse();
    let settings = Settings::load(&cli).context("loading configuration")?;
    let log_path = logging::init(&settings.log);
    info!(
        event = "tui.app.started",
        base_url = %settings.client.base_url,
        timeout_secs = ?settings.client.timeout_secs,
        log_file = ?log_path,
    );

    let classifier = HttpClassifier::new(&settings.client).context("building HTTP client")?;
    let service_url = classifier.base_url().to_string();
    let service: Arc<dyn ClassificationService> = Arc::new(classifier);

    // Worker channels
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    let worker_handle = worker::spawn_worker(cmd_rx, resp_tx, service).context("spawning worker thread")?;

    let mut app = AppState::new(cmd_tx.clone(), resp_rx, service_url.as_str());
    app.set_status(format!("Сервис: {service_url}"));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Shutdown worker
    let _ = cmd_tx.send(WorkerCommand::Shutdown);
    let _ = worker_handle.join();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!(event = "tui.app.stopped");
    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    loop {
        // 1. Render (also rebuilds the hit areas)
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Drain worker responses (non-blocking)
        while let Ok(resp) = app.worker_rx.try_recv() {
            app.handle_worker_response(resp);
        }

        // 3. Poll for input (50ms timeout for responsive UI)
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => input::handle_key(app, key),
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                _ => {}
            }
        }

        if !app.running {
            return Ok(());
        }
    }
}
