use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type RowId = u64;

/// Wire model of one part request crossing the orchestrator/page boundary.
/// Field names match the JSON the page protocol speaks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrickRequest {
    pub element_id: Option<String>,
    pub color_id: String,
    pub part_number: String,
    pub requested_quantity: u32,
    pub name: Option<String>,
    pub color: Option<String>,
    pub locale: String,
}

/// The single response produced per pick request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickOutcome {
    pub brick: BrickRequest,
    pub success: bool,
    pub bricks_added: Option<u32>,
    pub brick_not_found: bool,
}

impl PickOutcome {
    pub fn added(brick: BrickRequest) -> Self {
        let added = brick.requested_quantity;
        Self {
            brick,
            success: true,
            bricks_added: Some(added),
            brick_not_found: false,
        }
    }

    pub fn failed(brick: BrickRequest) -> Self {
        Self {
            brick,
            success: false,
            bricks_added: None,
            brick_not_found: false,
        }
    }

    /// The shop's catalog has no listing for the element id. This is the
    /// only failure the orchestrator distinguishes; it triggers the
    /// alternative-lookup fallback.
    pub fn not_found(brick: BrickRequest) -> Self {
        Self {
            brick,
            success: false,
            bricks_added: None,
            brick_not_found: true,
        }
    }
}

/// One event per command, in command order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentEvent {
    AttemptFinished { row_id: RowId, outcome: PickOutcome },
    AlternativesResolved {
        row_id: RowId,
        candidates: Vec<BrickRequest>,
    },
    PageReloaded,
}

/// Transport/decoding failures inside the agent. `PageAgent` and
/// `AlternativeFinder` fold these into outcome data before they reach the
/// orchestrator; only `Navigator` surfaces them, and the command loop logs
/// and swallows those too.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("http status {0}")]
    HttpStatus(u16),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("malformed response: {0}")]
    Malformed(String),
}
