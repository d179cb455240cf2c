// src/core/types.rs — Chat domain types

use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use super::upload::ObjectUrl;
use crate::util::preview;

/// Character budget for session previews.
pub const PREVIEW_CHARS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Assistant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Text,
    File,
    Image,
}

/// One bubble in the thread. Immutable once appended.
#[derive(Debug, Clone)]
pub struct Message {
    pub id: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub sender: Sender,
    pub kind: MessageKind,
    pub attachment: Option<Attachment>,
}

impl Message {
    pub fn user(content: impl Into<String>, kind: MessageKind, attachment: Option<Attachment>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content: content.into(),
            timestamp: Utc::now(),
            sender: Sender::User,
            kind,
            attachment,
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content: content.into(),
            timestamp: Utc::now(),
            sender: Sender::Assistant,
            kind: MessageKind::Text,
            attachment: None,
        }
    }
}

/// File metadata plus the live object URL, as produced by the composer.
///
/// The `ObjectUrl` is shared: the composer holds one reference while the
/// attachment is pending, the sent message holds another. The URL is revoked
/// when the last reference drops.
#[derive(Debug, Clone)]
pub struct Attachment {
    pub url: Arc<ObjectUrl>,
    pub name: String,
    pub size: u64,
    pub mime: String,
}

impl Attachment {
    pub fn new(url: ObjectUrl, name: impl Into<String>, size: u64, mime: impl Into<String>) -> Self {
        Self {
            url: Arc::new(url),
            name: name.into(),
            size,
            mime: mime.into(),
        }
    }
}

/// One named conversation thread's summary metadata.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    pub title: String,
    pub last_message: String,
    pub timestamp: DateTime<Utc>,
    pub message_count: u32,
    pub is_active: bool,
}

impl Session {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            last_message: "New conversation started".to_string(),
            timestamp: Utc::now(),
            message_count: 0,
            is_active: false,
        }
    }

    /// Commit one completed exchange: preview from the assistant text,
    /// fresh timestamp, count up by exactly 2 (user + assistant).
    pub fn commit_exchange(&mut self, assistant_text: &str) {
        self.last_message = preview(assistant_text, PREVIEW_CHARS);
        self.timestamp = Utc::now();
        self.message_count += 2;
    }
}
