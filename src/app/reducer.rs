use super::{
    action::{Action, UpdateResult},
    command::Command,
    features,
    state::AppState,
};

pub fn update(state: &mut AppState, action: Action) -> Option<Command> {
    let command = dispatch(state, &action);

    // Edits made by any feature reach the dirty flag and the palette here.
    state.sync_document();
    command
}

fn dispatch(state: &mut AppState, action: &Action) -> Option<Command> {
    if let UpdateResult::Handled(cmd) = features::editor::update(state, action) {
        return cmd;
    }
    if let UpdateResult::Handled(cmd) = features::notes::update(state, action) {
        return cmd;
    }
    if let UpdateResult::Handled(cmd) = features::ui::update(state, action) {
        return cmd;
    }
    tracing::trace!(?action, "unhandled action");
    None
}
