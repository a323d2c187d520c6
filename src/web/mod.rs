pub mod handlers;
pub mod server;

pub use server::create_router;

use std::sync::Arc;

use crate::config::FunctionIdentity;
use crate::handler::HandlerSlot;

/// Application state shared across all routes.
#[derive(Debug, Clone)]
pub struct AppState {
    pub identity: Arc<FunctionIdentity>,
    pub handler: HandlerSlot,
}

impl AppState {
    pub fn new(identity: Arc<FunctionIdentity>, handler: HandlerSlot) -> Self {
        Self { identity, handler }
    }
}
