#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Ingestion handed over the parsed parts list.
    PartsLoaded(Vec<crate::RequestedPart>),
    /// Alternative lookup finished for a row.
    AlternativesFound {
        row_id: crate::RowId,
        candidates: Vec<crate::RequestedPart>,
    },
    /// Page agent finished one attempt for a row.
    AttemptCompleted {
        row_id: crate::RowId,
        outcome: crate::AttemptOutcome,
    },
    /// The controlling tab finished reloading.
    PageReloaded,
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
