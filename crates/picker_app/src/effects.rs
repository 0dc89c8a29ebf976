//! Bridges core effects to agent commands and agent events to core
//! messages. The core and agent crates do not know about each other; this
//! module owns the conversion between their part models.

use picker_agent::{
    AgentError, AgentEvent, AgentHandle, BrickRequest, PickOutcome, ShopSettings, XrefSettings,
};
use picker_core::{AttemptOutcome, Effect, Msg, RequestedPart};
use picker_logging::pick_info;

pub struct EffectRunner {
    agent: AgentHandle,
}

impl EffectRunner {
    pub fn new(
        shop: ShopSettings,
        xref: XrefSettings,
        page_url: impl Into<String>,
    ) -> Result<Self, AgentError> {
        Ok(Self {
            agent: AgentHandle::new(shop, xref, page_url)?,
        })
    }

    pub fn execute(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::AttemptPick { row_id, part } => {
                    pick_info!(
                        "AttemptPick row={} element={} qty={}",
                        row_id,
                        part.element_id.as_deref().unwrap_or("-"),
                        part.quantity
                    );
                    self.agent.attempt_pick(row_id, to_brick_request(&part));
                }
                Effect::FindAlternatives { row_id, part } => {
                    pick_info!(
                        "FindAlternatives row={} part={} color={}",
                        row_id,
                        part.part_number,
                        part.color_id
                    );
                    self.agent.find_alternatives(row_id, to_brick_request(&part));
                }
                Effect::ReloadPage => {
                    pick_info!("ReloadPage");
                    self.agent.reload_page();
                }
            }
        }
    }

    /// Blocks for the next agent event, converted to a core message.
    /// Returns `None` once the agent thread has exited.
    pub fn next_msg(&self) -> Option<Msg> {
        self.agent.recv().map(map_event)
    }
}

fn map_event(event: AgentEvent) -> Msg {
    match event {
        AgentEvent::AttemptFinished { row_id, outcome } => Msg::AttemptCompleted {
            row_id,
            outcome: map_outcome(outcome),
        },
        AgentEvent::AlternativesResolved { row_id, candidates } => Msg::AlternativesFound {
            row_id,
            candidates: candidates.into_iter().map(to_requested_part).collect(),
        },
        AgentEvent::PageReloaded => Msg::PageReloaded,
    }
}

fn map_outcome(outcome: PickOutcome) -> AttemptOutcome {
    AttemptOutcome {
        part: to_requested_part(outcome.brick),
        success: outcome.success,
        bricks_added: outcome.bricks_added,
        brick_not_found: outcome.brick_not_found,
    }
}

fn to_brick_request(part: &RequestedPart) -> BrickRequest {
    BrickRequest {
        element_id: part.element_id.clone(),
        color_id: part.color_id.clone(),
        part_number: part.part_number.clone(),
        requested_quantity: part.quantity,
        name: part.name.clone(),
        color: part.color.clone(),
        locale: part.locale.clone(),
    }
}

fn to_requested_part(brick: BrickRequest) -> RequestedPart {
    RequestedPart {
        element_id: brick.element_id,
        color_id: brick.color_id,
        part_number: brick.part_number,
        quantity: brick.requested_quantity,
        name: brick.name,
        color: brick.color,
        locale: brick.locale,
    }
}
