//! Picker core: pure pick-orchestration state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{
    is_parts_picker_page, locale_from_page_url, AppState, AttemptOutcome, PickRow, PickStatus,
    RequestedPart, RowId, SessionState,
};
pub use update::update;
pub use view_model::{AppViewModel, AttemptView, PickRowView, StatusCounts};
