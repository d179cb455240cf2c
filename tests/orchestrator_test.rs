// tests/orchestrator_test.rs — Integration test: orchestrator with mock responder

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use parlor::core::orchestrator::ChatOrchestrator;
use parlor::core::types::{Attachment, MessageKind, Sender};
use parlor::core::upload::ObjectUrlRegistry;
use parlor::infra::errors::{ChatError, ErrorCode};
use parlor::responder::Responder;

/// A mock responder that records every call and replies with canned text.
struct MockResponder {
    reply: String,
    calls: Mutex<Vec<String>>,
}

impl MockResponder {
    fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Responder for MockResponder {
    async fn respond(&self, user_text: &str) -> Result<String, ChatError> {
        self.calls.lock().unwrap().push(user_text.to_string());
        Ok(self.reply.clone())
    }
}

/// Fails the first `failures` calls, then succeeds.
struct FlakyResponder {
    failures: u32,
    calls: AtomicU32,
}

impl FlakyResponder {
    fn new(failures: u32) -> Self {
        Self {
            failures,
            calls: AtomicU32::new(0),
        }
    }
}

#[async_trait]
impl Responder for FlakyResponder {
    async fn respond(&self, user_text: &str) -> Result<String, ChatError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if n < self.failures {
            Err(ChatError::ServiceUnavailable)
        } else {
            Ok(format!("recovered: {user_text}"))
        }
    }
}

fn attachment(registry: &ObjectUrlRegistry, size: u64, mime: &str) -> Attachment {
    Attachment::new(registry.create(), "upload.bin", size, mime)
}

#[tokio::test]
async fn test_successful_exchange() {
    let mock = Arc::new(MockResponder::new("Here's what I can help you with..."));
    let mut orchestrator = ChatOrchestrator::new(mock.clone());
    orchestrator.create_session();

    orchestrator
        .send_message("Hello", MessageKind::Text, None)
        .await;

    let store = orchestrator.store();
    assert!(store.error().is_none());
    assert_eq!(store.messages().len(), 2);
    assert_eq!(store.messages()[0].sender, Sender::User);
    assert_eq!(store.messages()[0].content, "Hello");
    assert_eq!(store.messages()[1].sender, Sender::Assistant);
    assert_eq!(store.messages()[1].content, "Here's what I can help you with...");

    let session = store.active_session().unwrap();
    assert_eq!(session.message_count, 2);
    assert_eq!(session.last_message, "Here's what I can help you with...");
    assert!(!store.is_typing());
    assert!(!store.is_loading());
    assert_eq!(mock.call_count(), 1);
}

#[tokio::test]
async fn test_preview_truncated_to_100_chars() {
    let long_reply = "y".repeat(250);
    let mock = Arc::new(MockResponder::new(&long_reply));
    let mut orchestrator = ChatOrchestrator::new(mock);
    orchestrator.create_session();

    orchestrator.send_message("q", MessageKind::Text, None).await;

    let session = orchestrator.store().active_session().unwrap();
    assert_eq!(session.last_message.chars().count(), 103);
    assert!(session.last_message.ends_with("..."));
    assert!(session.last_message.starts_with("yyy"));
}

#[tokio::test]
async fn test_empty_text_rejected_without_responder_call() {
    let mock = Arc::new(MockResponder::new("unused"));
    let mut orchestrator = ChatOrchestrator::new(mock.clone());
    orchestrator.create_session();

    orchestrator.send_message("", MessageKind::Text, None).await;

    let store = orchestrator.store();
    let err = store.error().expect("validation error expected");
    assert_eq!(err.code, ErrorCode::Validation);
    assert!(store.messages().is_empty());
    assert_eq!(store.active_session().unwrap().message_count, 0);
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_too_long_text_rejected() {
    let mock = Arc::new(MockResponder::new("unused"));
    let mut orchestrator = ChatOrchestrator::new(mock.clone());
    orchestrator.create_session();

    let content = "a".repeat(10_001);
    orchestrator
        .send_message(&content, MessageKind::Text, None)
        .await;

    assert_eq!(
        orchestrator.store().error().unwrap().code,
        ErrorCode::Validation
    );
    assert!(orchestrator.store().messages().is_empty());
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_oversized_file_rejected_without_responder_call() {
    let mock = Arc::new(MockResponder::new("unused"));
    let registry = ObjectUrlRegistry::new();
    let mut orchestrator = ChatOrchestrator::new(mock.clone());
    orchestrator.create_session();

    let att = attachment(&registry, 60 * 1024 * 1024, "application/pdf");
    orchestrator
        .send_message("see attached", MessageKind::File, Some(att))
        .await;

    let store = orchestrator.store();
    assert_eq!(store.error().unwrap().code, ErrorCode::Validation);
    assert!(store.messages().is_empty());
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_unsupported_mime_rejected() {
    let mock = Arc::new(MockResponder::new("unused"));
    let registry = ObjectUrlRegistry::new();
    let mut orchestrator = ChatOrchestrator::new(mock);
    orchestrator.create_session();

    let att = attachment(&registry, 1024, "application/x-msdownload");
    orchestrator
        .send_message("", MessageKind::File, Some(att))
        .await;

    assert_eq!(
        orchestrator.store().error().unwrap().code,
        ErrorCode::Validation
    );
}

#[tokio::test]
async fn test_file_kind_requires_attachment() {
    let mock = Arc::new(MockResponder::new("unused"));
    let mut orchestrator = ChatOrchestrator::new(mock.clone());
    orchestrator.create_session();

    orchestrator
        .send_message("where did it go", MessageKind::File, None)
        .await;

    assert_eq!(
        orchestrator.store().error().unwrap().code,
        ErrorCode::Validation
    );
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_file_message_with_empty_content_accepted() {
    let mock = Arc::new(MockResponder::new("Nice file!"));
    let registry = ObjectUrlRegistry::new();
    let mut orchestrator = ChatOrchestrator::new(mock);
    orchestrator.create_session();

    let att = attachment(&registry, 10 * 1024 * 1024, "application/pdf");
    orchestrator
        .send_message("", MessageKind::File, Some(att))
        .await;

    let store = orchestrator.store();
    assert!(store.error().is_none());
    assert_eq!(store.messages().len(), 2);
    assert_eq!(store.messages()[0].kind, MessageKind::File);
    assert!(store.messages()[0].attachment.is_some());
}

#[tokio::test]
async fn test_failed_exchange_keeps_user_message() {
    let mut orchestrator = ChatOrchestrator::new(Arc::new(FlakyResponder::new(u32::MAX)));
    orchestrator.create_session();

    orchestrator
        .send_message("Hello", MessageKind::Text, None)
        .await;

    let store = orchestrator.store();
    let err = store.error().expect("service error expected");
    assert_eq!(err.code, ErrorCode::AiError);
    assert_eq!(err.message, "AI service temporarily unavailable");

    // Optimistic apply: user message stays, no assistant message
    assert_eq!(store.messages().len(), 1);
    assert_eq!(store.messages()[0].sender, Sender::User);
    // Failed exchange commits nothing
    assert_eq!(store.active_session().unwrap().message_count, 0);
    assert!(!store.is_typing());
    assert!(!store.is_loading());
}

#[tokio::test]
async fn test_retry_resubmits_last_text() {
    // First call fails, retry succeeds
    let mut orchestrator = ChatOrchestrator::new(Arc::new(FlakyResponder::new(1)));
    orchestrator.create_session();

    orchestrator
        .send_message("Hello", MessageKind::Text, None)
        .await;
    assert!(orchestrator.store().error().is_some());

    orchestrator.retry_last_message().await;

    let store = orchestrator.store();
    assert!(store.error().is_none());
    // Original user message, retried user message, assistant reply
    assert_eq!(store.messages().len(), 3);
    assert_eq!(store.messages()[1].content, "Hello");
    assert_eq!(store.messages()[2].content, "recovered: Hello");
    assert_eq!(store.active_session().unwrap().message_count, 2);
}

#[tokio::test]
async fn test_retry_without_prior_text_is_noop() {
    let mock = Arc::new(MockResponder::new("unused"));
    let mut orchestrator = ChatOrchestrator::new(mock.clone());
    orchestrator.create_session();

    orchestrator.retry_last_message().await;

    assert!(orchestrator.store().messages().is_empty());
    assert!(orchestrator.store().error().is_none());
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_retry_ignores_attachment() {
    let mock = Arc::new(MockResponder::new("ok"));
    let registry = ObjectUrlRegistry::new();
    let mut orchestrator = ChatOrchestrator::new(mock);
    orchestrator.create_session();

    let att = attachment(&registry, 1024, "image/png");
    orchestrator
        .send_message("look", MessageKind::Image, Some(att))
        .await;

    orchestrator.retry_last_message().await;

    let store = orchestrator.store();
    let retried = &store.messages()[2];
    assert_eq!(retried.content, "look");
    assert_eq!(retried.kind, MessageKind::Text);
    assert!(retried.attachment.is_none());
}

#[tokio::test]
async fn test_send_without_active_session_skips_summary() {
    let mock = Arc::new(MockResponder::new("reply"));
    let mut orchestrator = ChatOrchestrator::new(mock);
    // No create_session: thread grows but there is nothing to summarize

    orchestrator.send_message("hi", MessageKind::Text, None).await;

    let store = orchestrator.store();
    assert!(store.error().is_none());
    assert_eq!(store.messages().len(), 2);
    assert!(store.sessions().is_empty());
}

#[tokio::test]
async fn test_next_send_supersedes_error() {
    let mut orchestrator = ChatOrchestrator::new(Arc::new(FlakyResponder::new(1)));
    orchestrator.create_session();

    orchestrator.send_message("a", MessageKind::Text, None).await;
    assert!(orchestrator.store().error().is_some());

    orchestrator.send_message("b", MessageKind::Text, None).await;
    assert!(orchestrator.store().error().is_none());
}
