// src/core/validate.rs — Outgoing message and file validation
//
// Pure checks; the orchestrator routes any failure into the store's error
// slot. Nothing here mutates state.

use super::types::{Attachment, MessageKind};
use crate::infra::errors::ChatError;

/// Maximum message length, in characters.
pub const MAX_MESSAGE_CHARS: usize = 10_000;

/// Maximum attachment size: 50 MiB.
pub const MAX_FILE_BYTES: u64 = 50 * 1024 * 1024;

/// Declared MIME types accepted for attachments.
pub const ALLOWED_MIME_TYPES: [&str; 9] = [
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "application/pdf",
    "text/plain",
    "text/csv",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
];

pub fn validate_message(content: &str, kind: MessageKind) -> Result<(), ChatError> {
    if kind == MessageKind::Text && content.trim().is_empty() {
        return Err(ChatError::EmptyMessage);
    }

    let len = content.chars().count();
    if len > MAX_MESSAGE_CHARS {
        return Err(ChatError::MessageTooLong {
            len,
            max: MAX_MESSAGE_CHARS,
        });
    }

    Ok(())
}

pub fn validate_file(attachment: &Attachment) -> Result<(), ChatError> {
    if attachment.size > MAX_FILE_BYTES {
        return Err(ChatError::FileTooLarge {
            size: attachment.size,
        });
    }

    if !ALLOWED_MIME_TYPES.contains(&attachment.mime.as_str()) {
        return Err(ChatError::UnsupportedFileType {
            mime: attachment.mime.clone(),
        });
    }

    Ok(())
}
