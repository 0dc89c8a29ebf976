use crate::{AppState, Effect, Msg, SessionState};

/// Pure update function: applies a message to state and returns any effects.
///
/// Rows are processed one at a time, in parts-list order; the page agent
/// works against one shared page session, so a row never starts before the
/// previous row is terminal.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::PartsLoaded(parts) => {
            if parts.is_empty() {
                return (state, Vec::new());
            }
            // One run per session: a list loaded mid-run is ignored rather
            // than merged into the shared cart.
            if state.session() != SessionState::Idle {
                return (state, Vec::new());
            }
            state.start_session(parts);
            state.open_next_row()
        }
        Msg::AlternativesFound { row_id, candidates } => {
            state.apply_alternatives(row_id, candidates)
        }
        Msg::AttemptCompleted { row_id, outcome } => state.apply_attempt(row_id, outcome),
        Msg::PageReloaded => {
            state.finish_session();
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
