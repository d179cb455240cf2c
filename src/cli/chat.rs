// src/cli/chat.rs — Interactive REPL
//
// Thin presentation glue over the orchestrator: reads intents, renders the
// store after each one. The composer owns at most one pending attachment;
// its object URL is shared into the sent message or released on /detach.

use std::path::Path;
use std::sync::Arc;

use crate::core::orchestrator::ChatOrchestrator;
use crate::core::types::{Attachment, MessageKind, Sender};
use crate::core::upload::ObjectUrlRegistry;
use crate::infra::config::Config;
use crate::responder::simulated::SimulatedResponder;

/// Composer-side state: the attachment picked but not yet sent.
struct Composer {
    pending: Option<Attachment>,
}

/// Run the interactive chat REPL.
pub async fn run_chat(config: &Config) -> anyhow::Result<()> {
    let responder = Arc::new(SimulatedResponder::new(config.responder.clone()));
    let mut orchestrator = ChatOrchestrator::new(responder).with_load_delay(
        std::time::Duration::from_millis(config.session.load_delay_ms),
    );
    let registry = ObjectUrlRegistry::new();
    let mut composer = Composer { pending: None };

    eprintln!(
        "parlor v{} | simulated assistant | failure rate {:.0}%\nType /help for commands.\n",
        env!("CARGO_PKG_VERSION"),
        config.responder.failure_rate * 100.0,
    );

    orchestrator.create_session();

    while let Some(input) = read_input() {
        let trimmed = input.trim();

        if trimmed == "quit" || trimmed == "exit" || trimmed == "/quit" {
            break;
        }

        if trimmed.starts_with('/') {
            handle_slash_command(trimmed, &mut orchestrator, &registry, &mut composer).await;
            continue;
        }

        if trimmed.is_empty() && composer.pending.is_none() {
            continue;
        }

        // A pending attachment turns this send into a file/image message.
        let (kind, attachment) = match composer.pending.take() {
            Some(att) => {
                let kind = if att.mime.starts_with("image/") {
                    MessageKind::Image
                } else {
                    MessageKind::File
                };
                (kind, Some(att))
            }
            None => (MessageKind::Text, None),
        };

        orchestrator.send_message(trimmed, kind, attachment).await;
        render_outcome(&orchestrator);
    }

    eprintln!("\nbye");
    Ok(())
}

/// Print the assistant reply or the error banner after a send.
fn render_outcome(orchestrator: &ChatOrchestrator) {
    let store = orchestrator.store();
    if let Some(err) = store.error() {
        eprintln!("[{}] {}  (/retry to resend, /dismiss to clear)", err.code, err.message);
        return;
    }
    if let Some(reply) = store
        .messages()
        .iter()
        .rev()
        .find(|m| m.sender == Sender::Assistant)
    {
        println!("{}", reply.content);
    }
}

fn read_input() -> Option<String> {
    use std::io::{self, BufRead, Write};

    print!("> ");
    io::stdout().flush().ok();

    let stdin = io::stdin();
    let mut line = String::new();
    match stdin.lock().read_line(&mut line) {
        Ok(0) => None, // EOF
        Ok(_) => Some(line),
        Err(_) => None,
    }
}

async fn handle_slash_command(
    input: &str,
    orchestrator: &mut ChatOrchestrator,
    registry: &ObjectUrlRegistry,
    composer: &mut Composer,
) {
    let parts: Vec<&str> = input.splitn(2, ' ').collect();
    let cmd = parts[0];
    let arg = parts.get(1).map(|s| s.trim()).unwrap_or("");

    match cmd {
        "/new" => {
            orchestrator.create_session();
            let store = orchestrator.store();
            if let Some(session) = store.active_session() {
                eprintln!("  Started {}", session.title);
            }
        }

        "/sessions" => {
            let store = orchestrator.store();
            if store.sessions().is_empty() {
                eprintln!("  No sessions yet. /new to start one.");
            } else {
                for (i, s) in store.sessions().iter().enumerate() {
                    let marker = if s.is_active { " *" } else { "" };
                    eprintln!(
                        "  {}. {}{} | {} message(s) | {}",
                        i + 1,
                        s.title,
                        marker,
                        s.message_count,
                        s.last_message,
                    );
                }
            }
        }

        "/load" => match session_id_for(orchestrator, arg) {
            Some(id) => {
                orchestrator.load_session(&id).await;
                match orchestrator.store().error() {
                    Some(err) => eprintln!("  [{}] {}", err.code, err.message),
                    None => eprintln!("  Switched session (history is not retained)."),
                }
            }
            None => eprintln!("  Usage: /load <number from /sessions>"),
        },

        "/delete" => match session_id_for(orchestrator, arg) {
            Some(id) => {
                orchestrator.delete_session(&id);
                eprintln!("  Deleted.");
            }
            None => eprintln!("  Usage: /delete <number from /sessions>"),
        },

        "/attach" => {
            if arg.is_empty() {
                eprintln!("  Usage: /attach <path>");
                return;
            }
            match stat_file(Path::new(arg)) {
                Ok((name, size)) => {
                    // Replacing a pending attachment drops (and revokes) the old one
                    let mime = mime_for_path(Path::new(arg));
                    let att = Attachment::new(registry.create(), name, size, mime);
                    eprintln!("  Attached {} ({} bytes, {})", att.name, att.size, att.mime);
                    composer.pending = Some(att);
                }
                Err(e) => eprintln!("  Cannot attach {arg}: {e}"),
            }
        }

        "/detach" => {
            // Dropping the guard releases the object URL
            if composer.pending.take().is_some() {
                eprintln!("  Attachment discarded.");
            } else {
                eprintln!("  Nothing attached.");
            }
        }

        "/retry" => {
            orchestrator.retry_last_message().await;
            render_outcome(orchestrator);
        }

        "/dismiss" => {
            orchestrator.clear_error();
        }

        "/help" => {
            eprintln!("Slash commands:");
            eprintln!("  /new               Start a new session");
            eprintln!("  /sessions          List sessions");
            eprintln!("  /load <n>          Switch to session n");
            eprintln!("  /delete <n>        Delete session n");
            eprintln!("  /attach <path>     Attach a file to the next message");
            eprintln!("  /detach            Discard the pending attachment");
            eprintln!("  /retry             Resend the last message text");
            eprintln!("  /dismiss           Clear the error banner");
            eprintln!("  /help              Show this help");
            eprintln!("  /quit, quit, exit  Leave");
        }

        _ => {
            eprintln!("Unknown command: {}. Type /help for commands.", cmd);
        }
    }
}

/// Resolve a 1-based index from `/sessions` into a session id.
fn session_id_for(orchestrator: &ChatOrchestrator, arg: &str) -> Option<String> {
    let idx: usize = arg.parse().ok()?;
    orchestrator
        .store()
        .sessions()
        .get(idx.checked_sub(1)?)
        .map(|s| s.id.clone())
}

/// File name and byte size from the filesystem — the stand-in for a real
/// file picker.
fn stat_file(path: &Path) -> std::io::Result<(String, u64)> {
    let meta = std::fs::metadata(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok((name, meta.len()))
}

/// Declared MIME type guessed from the extension.
fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("pdf") => "application/pdf",
        Some("txt") | Some("md") => "text/plain",
        Some("csv") => "text/csv",
        Some("docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        Some("xlsx") => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        _ => "application/octet-stream",
    }
}
