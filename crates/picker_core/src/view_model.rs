use crate::{PickStatus, RowId, SessionState};

/// Per-status row tallies for the progress summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusCounts {
    pub success: usize,
    pub failed: usize,
    pub skipped: usize,
    pub in_flight: usize,
}

/// Snapshot of the orchestrator state for presentation. The row list is
/// replaced wholesale on every update; presentation never observes a row
/// mid-mutation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub session: SessionState,
    pub total_parts: usize,
    pub counts: StatusCounts,
    pub rows: Vec<PickRowView>,
    pub done: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickRowView {
    pub row_id: RowId,
    pub part_number: String,
    pub name: Option<String>,
    pub color: Option<String>,
    pub quantity: u32,
    pub status: PickStatus,
    pub attempts: Vec<AttemptView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptView {
    pub element_id: Option<String>,
    pub success: bool,
    pub bricks_added: Option<u32>,
    pub brick_not_found: bool,
}
