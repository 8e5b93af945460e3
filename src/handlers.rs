use crate::app::App;
use crate::backend::{BackendEvent, BackendTask};
use crate::domain::Command;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc::UnboundedSender;

pub(crate) fn handle_backend_event(app: &mut App, event: BackendEvent) {
    match event {
        BackendEvent::Scanned { files } => {
            app.apply_scan(files);
            app.busy = false;
        }
        BackendEvent::Error { context, message } => {
            app.busy = false;
            app.log(format!("error[{context}]: {message}"));
        }
    }
}

pub(crate) fn handle_key_event(
    app: &mut App,
    key: KeyEvent,
    task_tx: &UnboundedSender<BackendTask>,
) -> Result<()> {
    let Some(command) = command_for_key(app, key) else {
        return Ok(());
    };

    match command {
        Command::Rescan => send_task(app, task_tx, BackendTask::Rescan)?,
        other => app.dispatch(other),
    }

    Ok(())
}

pub(crate) fn send_task(
    app: &mut App,
    task_tx: &UnboundedSender<BackendTask>,
    task: BackendTask,
) -> Result<()> {
    app.busy = true;
    task_tx
        .send(task)
        .map_err(|err| anyhow::anyhow!("failed to dispatch task: {err}"))
}

/// Key binding for the closed command set. Unknown keys map to nothing.
/// The `j`/`k` aliases are only live under the `vim` keymap; arrow keys
/// always work.
pub(crate) fn command_for_key(app: &App, key: KeyEvent) -> Option<Command> {
    if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
        return Some(Command::Quit);
    }

    // The help overlay swallows everything except the keys that close it.
    if app.show_help {
        return match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('?') | KeyCode::Char('q') => {
                Some(Command::ToggleHelp)
            }
            _ => None,
        };
    }

    let vim_keys = app.config.keymap == "vim";
    match key.code {
        KeyCode::Char('q') => Some(Command::Quit),
        KeyCode::Char('?') => Some(Command::ToggleHelp),
        KeyCode::Tab => Some(Command::SwitchColumn),
        KeyCode::Char('j') if vim_keys => Some(Command::MoveDown),
        KeyCode::Char('k') if vim_keys => Some(Command::MoveUp),
        KeyCode::Down => Some(Command::MoveDown),
        KeyCode::Up => Some(Command::MoveUp),
        KeyCode::Char(' ') | KeyCode::Enter => Some(Command::Toggle),
        KeyCode::Char('x') => Some(Command::EmitPlan),
        KeyCode::Char('r') => Some(Command::Rescan),
        _ => None,
    }
}
