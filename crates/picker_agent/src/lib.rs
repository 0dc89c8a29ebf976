//! Picker agent: page-session IO for the pick protocol.
mod agent;
mod alternatives;
mod navigate;
mod pick;
mod types;

pub use agent::AgentHandle;
pub use alternatives::{AlternativeFinder, RebrickableFinder, XrefSettings};
pub use navigate::{Navigator, ReqwestNavigator};
pub use pick::{PageAgent, ReqwestPageAgent, ShopSettings};
pub use types::{AgentError, AgentEvent, BrickRequest, PickOutcome, RowId};
