mod app;
mod backend;
mod config;
mod domain;
mod engine;
mod handlers;
mod scan;
mod ui;

use crate::app::App;
use crate::backend::{BackendEvent, BackendTask};
use crate::config::AppConfig;
use crate::scan::{DotfileSource, HomeDirSource};
use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<()> {
    let config = match AppConfig::load_or_default() {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("failed to load config, using defaults: {err:#}");
            AppConfig::default()
        }
    };

    let mut terminal = init_terminal()?;

    let run_result = run_app(&mut terminal, config).await;

    teardown_terminal(&mut terminal)?;
    if let Err(err) = run_result {
        eprintln!("{err:#}");
        std::process::exit(1);
    }

    Ok(())
}

fn init_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("could not enable raw mode")?;
    execute!(io::stdout(), EnterAlternateScreen)
        .context("could not enter the alternate screen")?;
    Terminal::new(CrosstermBackend::new(io::stdout())).context("could not create the terminal")
}

// Undoes init_terminal; runs before any error from run_app is printed.
fn teardown_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("could not disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("could not leave the alternate screen")?;
    terminal.show_cursor().context("could not restore the cursor")?;
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: AppConfig,
) -> Result<()> {
    let mut app = App::new(config);
    let source: Arc<dyn DotfileSource> = Arc::new(HomeDirSource::new(
        app.home_dir().to_path_buf(),
        app.config.target_dir.clone(),
        app.config.scan_exclude_names.clone(),
    ));

    let (task_tx, task_rx) = mpsc::unbounded_channel::<BackendTask>();
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<BackendEvent>();

    tokio::spawn(backend::worker_loop(source, task_rx, event_tx));

    handlers::send_task(&mut app, &task_tx, BackendTask::Rescan)?;

    while !app.should_quit {
        while let Ok(event) = event_rx.try_recv() {
            handlers::handle_backend_event(&mut app, event);
        }

        terminal.draw(|frame| ui::draw(frame, &mut app))?;

        if event::poll(Duration::from_millis(100)).context("event poll failed")?
            && let Event::Key(key) = event::read().context("event read failed")?
            && key.kind == KeyEventKind::Press
        {
            handlers::handle_key_event(&mut app, key, &task_tx)?;
        }
    }

    if let Err(err) = app.config.save() {
        eprintln!("failed to save config: {err:#}");
    }

    Ok(())
}
