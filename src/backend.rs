use crate::scan::{DotfileSource, ScannedFile};
use std::sync::Arc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

#[derive(Debug, Clone)]
pub enum BackendTask {
    Rescan,
}

#[derive(Debug, Clone)]
pub enum BackendEvent {
    Scanned { files: Vec<ScannedFile> },
    Error { context: String, message: String },
}

/// Runs directory scans off the UI thread. The engine itself never crosses
/// this channel; only ingestion does.
pub(crate) async fn worker_loop(
    source: Arc<dyn DotfileSource>,
    mut task_rx: UnboundedReceiver<BackendTask>,
    event_tx: UnboundedSender<BackendEvent>,
) {
    while let Some(task) = task_rx.recv().await {
        match task {
            BackendTask::Rescan => {
                let s = source.clone();
                let result = tokio::task::spawn_blocking(move || s.scan()).await;
                match result {
                    Ok(Ok(files)) => {
                        if event_tx.send(BackendEvent::Scanned { files }).is_err() {
                            break;
                        }
                    }
                    other => {
                        if event_tx
                            .send(BackendEvent::Error {
                                context: "scan".to_string(),
                                message: format!("scan failed: {}", flatten_error(other)),
                            })
                            .is_err()
                        {
                            break;
                        }
                    }
                }
            }
        }
    }
}

fn flatten_error<T>(res: std::result::Result<anyhow::Result<T>, tokio::task::JoinError>) -> String {
    match res {
        Ok(Ok(_)) => "ok".to_string(),
        Ok(Err(err)) => format!("{err:#}"),
        Err(err) => format!("join error: {err}"),
    }
}
