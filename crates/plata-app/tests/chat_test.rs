//! Chat thread tests
//!
//! Reply parsing into display text + quick replies, markup segments,
//! inline failure handling and thread lifecycle.

use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;

use plata_app::{AuditSite, ChatThread};
use plata_core::chat::{ChatRole, Segment};
use plata_core::ports::{AssistantError, AssistantPort};

/// Hand-rolled assistant fake: scripted replies, call log.
#[derive(Default)]
struct ScriptedAssistant {
    replies: Mutex<Vec<Result<String, AssistantError>>>,
    received: Mutex<Vec<String>>,
}

impl ScriptedAssistant {
    fn with_replies(replies: Vec<Result<String, AssistantError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies),
            received: Mutex::new(Vec::new()),
        })
    }

    fn received(&self) -> Vec<String> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl AssistantPort for ScriptedAssistant {
    async fn send_message(&self, text: &str) -> Result<String, AssistantError> {
        self.received.lock().unwrap().push(text.to_string());
        let mut replies = self.replies.lock().unwrap();
        if replies.is_empty() {
            Ok("sin guion".to_string())
        } else {
            replies.remove(0)
        }
    }

    async fn analyze_site(&self, name_or_url: &str) -> Result<String, AssistantError> {
        self.send_message(name_or_url).await
    }
}

#[tokio::test]
async fn test_thread_starts_with_greeting_and_quick_replies() {
    let assistant = ScriptedAssistant::with_replies(vec![]);
    let thread = ChatThread::new(assistant);

    let messages = thread.messages().await;
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].role, ChatRole::Model);
    assert_eq!(thread.quick_replies().await.len(), 3);
}

#[tokio::test]
async fn test_options_directive_becomes_quick_replies() {
    let assistant = ScriptedAssistant::with_replies(vec![Ok(
        "Texto antes||OPTIONS: [\"A\",\"B\"]||".to_string(),
    )]);
    let thread = ChatThread::new(assistant);

    thread.send("hola").await;

    let messages = thread.messages().await;
    let last = messages.last().unwrap();
    assert_eq!(last.text, "Texto antes");
    assert_eq!(thread.quick_replies().await, vec!["A", "B"]);
}

#[tokio::test]
async fn test_markup_is_parsed_into_segments() {
    let assistant = ScriptedAssistant::with_replies(vec![Ok(
        "Es una **estafa**. [Ver Reporte](#scam-s1)".to_string(),
    )]);
    let thread = ChatThread::new(assistant);

    thread.send("¿AlphaYield es real?").await;

    let messages = thread.messages().await;
    let last = messages.last().unwrap();
    assert!(last
        .segments
        .iter()
        .any(|s| matches!(s, Segment::Bold(b) if b == "estafa")));
    assert!(last.segments.iter().any(Segment::is_deep_link));
}

#[tokio::test]
async fn test_selecting_a_quick_reply_sends_its_phrase() {
    let assistant = ScriptedAssistant::with_replies(vec![
        Ok("¿Qué perfil?||OPTIONS: [\"Cripto\"]||".to_string()),
        Ok("Perfecto.".to_string()),
    ]);
    let thread = ChatThread::new(Arc::clone(&assistant) as Arc<dyn AssistantPort>);

    thread.send("quiero invertir").await;
    let option = thread.quick_replies().await.remove(0);
    thread.select_option(&option).await;

    assert_eq!(assistant.received(), vec!["quiero invertir", "Cripto"]);
    // Quick replies belong to the latest assistant message only.
    assert!(thread.quick_replies().await.is_empty());
}

#[tokio::test]
async fn test_failure_surfaces_as_inline_assistant_message() {
    let assistant = ScriptedAssistant::with_replies(vec![Err(AssistantError::Transport(
        "offline".to_string(),
    ))]);
    let thread = ChatThread::new(assistant);

    thread.send("hola").await;

    let messages = thread.messages().await;
    assert_eq!(messages.len(), 3); // greeting, user turn, inline error
    let last = messages.last().unwrap();
    assert_eq!(last.role, ChatRole::Model);
    assert!(last.text.contains("Intenta reformular"));
}

#[tokio::test]
async fn test_blank_input_is_ignored() {
    let assistant = ScriptedAssistant::with_replies(vec![]);
    let thread = ChatThread::new(Arc::clone(&assistant) as Arc<dyn AssistantPort>);

    thread.send("   ").await;

    assert_eq!(thread.messages().await.len(), 1);
    assert!(assistant.received().is_empty());
}

#[tokio::test]
async fn test_reset_restores_the_greeting() {
    let assistant = ScriptedAssistant::with_replies(vec![Ok("ok".to_string())]);
    let thread = ChatThread::new(assistant);

    thread.send("hola").await;
    assert!(thread.messages().await.len() > 1);

    thread.reset().await;
    let messages = thread.messages().await;
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].role, ChatRole::Model);
}

#[tokio::test]
async fn test_site_audit_is_one_shot_and_trims_input() {
    let assistant = ScriptedAssistant::with_replies(vec![Ok("**SCAM** confirmado.".to_string())]);
    let audit = AuditSite::new(Arc::clone(&assistant) as Arc<dyn AssistantPort>);

    let verdict = audit.execute("  alphayield.global  ").await.unwrap();

    assert!(verdict.contains("SCAM"));
    assert_eq!(assistant.received(), vec!["alphayield.global"]);
    assert!(audit.execute("   ").await.is_err());
}
