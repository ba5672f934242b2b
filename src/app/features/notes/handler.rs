use crate::app::{action::Action, command::Command, persistence};
use crate::domain::storage::NoteStore;
use anyhow::Result;
use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc;

pub fn handle_command(
    command: Command,
    store: Arc<dyn NoteStore>,
    tx: mpsc::Sender<Action>,
) -> Result<()> {
    match command {
        Command::LoadNote(path) => {
            tokio::spawn(async move {
                let name = display_name(&path);
                run_operation(
                    tx,
                    format!("Opening {name}"),
                    format!("Opened {name}"),
                    move || async move {
                        let text = store.read_note(&path).await?;
                        Ok::<_, anyhow::Error>(Action::NoteLoaded(path, text))
                    },
                )
                .await;
            });
        }
        Command::SaveNote(path, contents, generation) => {
            tokio::spawn(async move {
                let name = display_name(&path);
                run_operation(
                    tx,
                    format!("Saving {name}"),
                    format!("Saved {name}"),
                    move || async move {
                        store.write_note(&path, &contents).await?;
                        Ok::<_, anyhow::Error>(Action::NoteSaved(path, generation))
                    },
                )
                .await;
            });
        }
        Command::LoadImage(path) => {
            tokio::spawn(async move {
                let name = display_name(&path);
                run_operation(
                    tx,
                    format!("Reading {name}"),
                    format!("Inserted {name}"),
                    move || async move {
                        let image = store.read_image(&path).await?;
                        Ok::<_, anyhow::Error>(Action::ImageLoaded(image))
                    },
                )
                .await;
            });
        }
        Command::SaveRecentFiles(config, files) => {
            tokio::task::spawn_blocking(move || {
                persistence::save_recent_files_to(&config, &files);
            });
        }
    }
    Ok(())
}

fn display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |n| n.to_string_lossy().into_owned(),
    )
}

/// Reports the start, then either the operation's result action followed by
/// a success message, or the error. Both completions carry `start_msg` so the
/// reducer can retire the right task.
async fn run_operation<F, Fut>(
    tx: mpsc::Sender<Action>,
    start_msg: String,
    success_msg: String,
    operation: F,
) where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = Result<Action>> + Send,
{
    let _ = tx.send(Action::OperationStarted(start_msg.clone())).await;
    match operation().await {
        Ok(action) => {
            let _ = tx.send(action).await;
            let _ = tx
                .send(Action::OperationCompleted(start_msg, Ok(success_msg)))
                .await;
        }
        Err(e) => {
            tracing::warn!(error = %format!("{e:#}"), "note operation failed");
            let _ = tx
                .send(Action::OperationCompleted(
                    start_msg,
                    Err(format!("Error: {e:#}")),
                ))
                .await;
        }
    }
}
