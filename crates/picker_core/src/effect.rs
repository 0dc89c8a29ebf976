#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Query the cross-reference service for substitute catalog ids.
    FindAlternatives {
        row_id: crate::RowId,
        part: crate::RequestedPart,
    },
    /// Run the two-step lookup/add-to-cart protocol for a resolved part.
    AttemptPick {
        row_id: crate::RowId,
        part: crate::RequestedPart,
    },
    /// Navigate the controlling tab to a fresh copy of the current page.
    ReloadPage,
}
