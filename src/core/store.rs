// src/core/store.rs — In-memory chat state
//
// The single shared mutable resource. Owned by the orchestrator and mutated
// only through it; the presentation layer gets read access and re-renders
// from whatever is here. Nothing persists — restart wipes everything.

use super::types::{Message, Session};
use crate::infra::errors::{ChatError, ErrorRecord};

#[derive(Default)]
pub struct ChatStore {
    /// Visible thread for the active session.
    messages: Vec<Message>,
    /// Session list, most recently created first.
    sessions: Vec<Session>,
    active_session_id: Option<String>,
    is_typing: bool,
    is_loading: bool,
    /// At most one error at a time; superseded by the next operation.
    error: Option<ErrorRecord>,
}

impl ChatStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ─── Read access (rendering) ────────────────────────────────

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn active_session_id(&self) -> Option<&str> {
        self.active_session_id.as_deref()
    }

    pub fn active_session(&self) -> Option<&Session> {
        let id = self.active_session_id.as_deref()?;
        self.sessions.iter().find(|s| s.id == id)
    }

    pub fn is_typing(&self) -> bool {
        self.is_typing
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&ErrorRecord> {
        self.error.as_ref()
    }

    // ─── Mutation (orchestrator only) ───────────────────────────

    pub(crate) fn push_message(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub(crate) fn clear_messages(&mut self) {
        self.messages.clear();
    }

    pub(crate) fn set_indicators(&mut self, typing: bool, loading: bool) {
        self.is_typing = typing;
        self.is_loading = loading;
    }

    /// Capture a failure into the error slot. Also lowers both indicators,
    /// since every error terminates whatever operation raised them.
    pub(crate) fn set_error(&mut self, err: ChatError) {
        tracing::debug!(code = %err.code(), "chat error: {err}");
        self.error = Some(ErrorRecord::from(err));
        self.is_typing = false;
        self.is_loading = false;
    }

    pub(crate) fn clear_error(&mut self) {
        self.error = None;
    }

    /// Prepend a session and make it the only active one.
    pub(crate) fn insert_active_session(&mut self, mut session: Session) {
        for s in &mut self.sessions {
            s.is_active = false;
        }
        session.is_active = true;
        self.active_session_id = Some(session.id.clone());
        self.sessions.insert(0, session);
    }

    /// Mark exactly `id` active. Returns false when the id is unknown.
    pub(crate) fn activate_session(&mut self, id: &str) -> bool {
        if !self.sessions.iter().any(|s| s.id == id) {
            return false;
        }
        for s in &mut self.sessions {
            s.is_active = s.id == id;
        }
        self.active_session_id = Some(id.to_string());
        true
    }

    /// Remove a session; clears the active id and thread when it was active.
    /// Returns false when the id is unknown.
    pub(crate) fn remove_session(&mut self, id: &str) -> bool {
        let before = self.sessions.len();
        self.sessions.retain(|s| s.id != id);
        if self.sessions.len() == before {
            return false;
        }
        if self.active_session_id.as_deref() == Some(id) {
            self.active_session_id = None;
            self.messages.clear();
        }
        true
    }

    pub(crate) fn active_session_mut(&mut self) -> Option<&mut Session> {
        let id = self.active_session_id.clone()?;
        self.sessions.iter_mut().find(|s| s.id == id)
    }
}
