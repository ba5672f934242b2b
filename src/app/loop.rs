use crate::app::{
    action::Action, command::Command, features, input::map_event_to_action, reducer,
    state::AppState, ui,
};
use crate::domain::storage::NoteStore;

use anyhow::Result;
use crossterm::event::{self, Event};
use ratatui::{backend::Backend, Terminal};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

const TICK_RATE: Duration = Duration::from_millis(250);

pub async fn run_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: AppState<'_>,
    store: Arc<dyn NoteStore>,
    initial: Option<Command>,
) -> Result<()> {
    // Terminal input is read on a blocking thread and forwarded.
    let (event_tx, event_rx) = mpsc::channel(100);
    tokio::task::spawn_blocking(move || loop {
        match event::read() {
            Ok(evt) => {
                if event_tx.blocking_send(Ok(evt)).is_err() {
                    break;
                }
            }
            Err(e) => {
                let _ = event_tx.blocking_send(Err(e));
                break;
            }
        }
    });

    run_loop_with_events(terminal, app_state, store, initial, event_rx).await
}

pub async fn run_loop_with_events<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app_state: AppState<'_>,
    store: Arc<dyn NoteStore>,
    initial: Option<Command>,
    mut event_rx: mpsc::Receiver<Result<Event, std::io::Error>>,
) -> Result<()> {
    let (action_tx, mut action_rx) = mpsc::channel(100);
    let mut interval = interval(TICK_RATE);

    if let Some(cmd) = initial {
        handle_command(cmd, store.clone(), action_tx.clone())?;
    }

    loop {
        // --- 1. Render ---
        terminal.draw(|f| {
            ui::draw(f, &mut app_state);
        })?;

        // --- 2. Event Handling ---
        let action = tokio::select! {
            _ = interval.tick() => Some(Action::Tick),

            Some(res) = event_rx.recv() => {
                let event = res?;
                map_event_to_action(event, &app_state)
            },

            Some(a) = action_rx.recv() => Some(a),
        };

        // --- 3. Update ---
        if let Some(action) = action {
            let command = reducer::update(&mut app_state, action);

            if app_state.should_quit {
                break;
            }

            if let Some(cmd) = command {
                handle_command(cmd, store.clone(), action_tx.clone())?;
            }
        }
    }

    tracing::info!(dirty = app_state.is_dirty, "editor closed");
    Ok(())
}

pub(crate) fn handle_command(
    command: Command,
    store: Arc<dyn NoteStore>,
    tx: mpsc::Sender<Action>,
) -> Result<()> {
    features::notes::handle_command(command, store, tx)
}

#[cfg(test)]
#[path = "loop_tests.rs"]
mod tests;
