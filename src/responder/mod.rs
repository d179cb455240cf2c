// src/responder/mod.rs — Assistant response seam

pub mod simulated;

use async_trait::async_trait;

use crate::infra::errors::ChatError;

/// The narrow seam between the orchestrator and whatever produces assistant
/// replies. A real backend (inference API, local model, ...) implements this
/// without the orchestrator changing; the shipped implementation is
/// [`simulated::SimulatedResponder`].
///
/// The call suspends for however long the backend takes; no cancellation is
/// offered to the caller.
#[async_trait]
pub trait Responder: Send + Sync {
    async fn respond(&self, user_text: &str) -> Result<String, ChatError>;
}
