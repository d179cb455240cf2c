// src/core/orchestrator.rs — Send state machine and session operations
//
// Per send: Idle → Validating → AwaitingResponse → Committing → Idle, with
// Error reachable from the first three. All mutations go through the owned
// `ChatStore`; no failure propagates past this boundary — everything lands
// in the store's error slot.
//
// Concurrency: every operation takes `&mut self`, so the exclusive borrow
// held across the responder await is the per-session mutual exclusion — a
// second send, a session switch, or a deletion cannot interleave with the
// Validating→Committing sequence. The `is_loading` check below additionally
// rejects queued send intents in embeddings that serialize behind a mutex.

use std::sync::Arc;
use std::time::Duration;

use super::store::ChatStore;
use super::types::{Attachment, Message, MessageKind, Session};
use super::validate::{validate_file, validate_message};
use crate::infra::errors::ChatError;
use crate::responder::Responder;

pub struct ChatOrchestrator {
    store: ChatStore,
    responder: Arc<dyn Responder>,
    /// Simulated latency for session switches.
    load_delay: Duration,
    /// Most recently attempted user-authored text, for retry. Attachments
    /// are never retried.
    last_user_text: Option<String>,
}

impl ChatOrchestrator {
    pub fn new(responder: Arc<dyn Responder>) -> Self {
        Self {
            store: ChatStore::new(),
            responder,
            load_delay: Duration::from_millis(300),
            last_user_text: None,
        }
    }

    pub fn with_load_delay(mut self, delay: Duration) -> Self {
        self.load_delay = delay;
        self
    }

    /// Observable state for the presentation layer.
    pub fn store(&self) -> &ChatStore {
        &self.store
    }

    /// Run one send intent through the full state machine.
    ///
    /// The user message is applied optimistically: it stays in the thread
    /// even when the responder fails. Only a successful exchange commits a
    /// session summary update (count advances by exactly 2).
    pub async fn send_message(
        &mut self,
        content: &str,
        kind: MessageKind,
        attachment: Option<Attachment>,
    ) {
        self.store.clear_error();

        if self.store.is_loading() {
            self.store.set_error(ChatError::SendInFlight);
            return;
        }

        // Validating
        if let Err(e) = validate_message(content, kind) {
            self.store.set_error(e);
            return;
        }
        if kind != MessageKind::Text && attachment.is_none() {
            self.store.set_error(ChatError::AttachmentRequired);
            return;
        }
        if let Some(ref att) = attachment {
            if let Err(e) = validate_file(att) {
                self.store.set_error(e);
                return;
            }
        }

        self.last_user_text = Some(content.to_string());

        // AwaitingResponse: optimistic apply, indicators up
        self.store
            .push_message(Message::user(content, kind, attachment));
        self.store.set_indicators(true, true);

        match self.responder.respond(content).await {
            Ok(reply) => {
                // Committing
                self.store.push_message(Message::assistant(&reply));
                if let Some(session) = self.store.active_session_mut() {
                    session.commit_exchange(&reply);
                } else {
                    tracing::debug!("no active session, summary update skipped");
                }
                self.store.set_indicators(false, false);
            }
            Err(e) => {
                // The optimistic user message is deliberately not rolled back.
                self.store.set_error(e);
            }
        }
    }

    /// Resubmit the most recently attempted user text. No-op when none exists.
    pub async fn retry_last_message(&mut self) {
        if let Some(text) = self.last_user_text.clone() {
            self.send_message(&text, MessageKind::Text, None).await;
        }
    }

    /// Create a session, prepend it, make it active, and start from a clean
    /// thread.
    pub fn create_session(&mut self) {
        let title = format!("Chat Session {}", self.store.sessions().len() + 1);
        tracing::info!(%title, "creating session");
        self.store.insert_active_session(Session::new(title));
        self.store.clear_messages();
        self.store.clear_error();
    }

    /// Switch to another session after a short simulated load.
    ///
    /// There is no backing store, so the thread simply clears; history is
    /// not recoverable by design.
    pub async fn load_session(&mut self, id: &str) {
        if !self.store.sessions().iter().any(|s| s.id == id) {
            self.store
                .set_error(ChatError::SessionNotFound { id: id.to_string() });
            return;
        }

        self.store.set_indicators(false, true);
        self.store.clear_error();

        tokio::time::sleep(self.load_delay).await;

        self.store.activate_session(id);
        self.store.clear_messages();
        self.store.set_indicators(false, false);
    }

    /// Remove a session by id. Deleting the active session unsets the active
    /// id and clears the thread; unknown ids are a no-op.
    pub fn delete_session(&mut self, id: &str) {
        if self.store.remove_session(id) {
            tracing::info!(%id, "deleted session");
        }
    }

    pub fn clear_error(&mut self) {
        self.store.clear_error();
    }
}
