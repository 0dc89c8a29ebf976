use std::sync::{mpsc, Arc};
use std::thread;

use crate::alternatives::{AlternativeFinder, RebrickableFinder, XrefSettings};
use crate::navigate::{Navigator, ReqwestNavigator};
use crate::pick::{PageAgent, ReqwestPageAgent, ShopSettings};
use crate::{AgentError, AgentEvent, BrickRequest, RowId};

enum AgentCommand {
    AttemptPick { row_id: RowId, brick: BrickRequest },
    FindAlternatives { row_id: RowId, brick: BrickRequest },
    ReloadPage,
}

/// Command/event bridge between the synchronous orchestrator loop and the
/// async page IO. A dedicated thread owns the runtime and executes commands
/// strictly one at a time: the page session's cart is shared state, so
/// concurrent mutations would be a lost-update race.
pub struct AgentHandle {
    cmd_tx: mpsc::Sender<AgentCommand>,
    event_rx: mpsc::Receiver<AgentEvent>,
}

impl AgentHandle {
    pub fn new(
        shop: ShopSettings,
        xref: XrefSettings,
        page_url: impl Into<String>,
    ) -> Result<Self, AgentError> {
        let agent = Arc::new(ReqwestPageAgent::new(shop)?);
        let finder = Arc::new(RebrickableFinder::new(xref)?);
        let navigator = Arc::new(ReqwestNavigator::new(page_url)?);
        Ok(Self::with_services(agent, finder, navigator))
    }

    /// Wires the handle over caller-supplied service implementations.
    pub fn with_services(
        agent: Arc<dyn PageAgent>,
        finder: Arc<dyn AlternativeFinder>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let event = runtime.block_on(handle_command(
                    agent.as_ref(),
                    finder.as_ref(),
                    navigator.as_ref(),
                    command,
                ));
                if event_tx.send(event).is_err() {
                    break;
                }
            }
        });

        Self { cmd_tx, event_rx }
    }

    pub fn attempt_pick(&self, row_id: RowId, brick: BrickRequest) {
        let _ = self.cmd_tx.send(AgentCommand::AttemptPick { row_id, brick });
    }

    pub fn find_alternatives(&self, row_id: RowId, brick: BrickRequest) {
        let _ = self
            .cmd_tx
            .send(AgentCommand::FindAlternatives { row_id, brick });
    }

    pub fn reload_page(&self) {
        let _ = self.cmd_tx.send(AgentCommand::ReloadPage);
    }

    pub fn try_recv(&self) -> Option<AgentEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Blocks until the next event, or returns `None` once the agent
    /// thread has exited.
    pub fn recv(&self) -> Option<AgentEvent> {
        self.event_rx.recv().ok()
    }
}

async fn handle_command(
    agent: &dyn PageAgent,
    finder: &dyn AlternativeFinder,
    navigator: &dyn Navigator,
    command: AgentCommand,
) -> AgentEvent {
    match command {
        AgentCommand::AttemptPick { row_id, brick } => {
            let outcome = agent.pick(&brick).await;
            AgentEvent::AttemptFinished { row_id, outcome }
        }
        AgentCommand::FindAlternatives { row_id, brick } => {
            let candidates = finder.find_alternatives(&brick).await;
            AgentEvent::AlternativesResolved { row_id, candidates }
        }
        AgentCommand::ReloadPage => {
            if let Err(err) = navigator.reload().await {
                log::warn!("page reload failed: {err}");
            }
            AgentEvent::PageReloaded
        }
    }
}
