//! Assistant conversation thread.
//!
//! Owns the message history for one conversation with the assistant.
//! Replies are parsed into structured segments and quick replies;
//! failures surface as an inline assistant message and never touch the
//! auth or entitlement subsystems.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use plata_core::chat::{ChatReply, ChatRole, Segment};
use plata_core::ports::AssistantPort;

const GREETING: &str = "¡Hola! Soy Lía, la auditora del hub. ¿Qué buscas hoy?";
const GREETING_OPTIONS: [&str; 3] = [
    "Ganar dinero gratis",
    "Invertir capital",
    "Auditar una estafa",
];
const MSG_SEND_FAILED: &str = "Error de sistema. Intenta reformular tu pregunta.";

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: ChatRole,
    /// Directive-free display text.
    pub text: String,
    pub segments: Vec<Segment>,
    pub options: Option<Vec<String>>,
    pub sent_at: DateTime<Utc>,
}

impl ChatMessage {
    fn user(text: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: ChatRole::User,
            text: text.to_string(),
            segments: vec![Segment::Text(text.to_string())],
            options: None,
            sent_at: Utc::now(),
        }
    }

    fn model(reply: ChatReply) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: ChatRole::Model,
            text: reply.text,
            segments: reply.segments,
            options: reply.options,
            sent_at: Utc::now(),
        }
    }
}

#[derive(Default)]
struct ThreadState {
    messages: Vec<ChatMessage>,
    busy: bool,
}

pub struct ChatThread {
    assistant: Arc<dyn AssistantPort>,
    state: Mutex<ThreadState>,
}

impl ChatThread {
    /// A fresh thread, seeded with the assistant greeting and its
    /// quick replies.
    pub fn new(assistant: Arc<dyn AssistantPort>) -> Self {
        let mut state = ThreadState::default();
        state.messages.push(Self::greeting());
        Self {
            assistant,
            state: Mutex::new(state),
        }
    }

    fn greeting() -> ChatMessage {
        ChatMessage::model(ChatReply {
            text: GREETING.to_string(),
            segments: vec![Segment::Text(GREETING.to_string())],
            options: Some(GREETING_OPTIONS.iter().map(|s| s.to_string()).collect()),
        })
    }

    pub async fn messages(&self) -> Vec<ChatMessage> {
        self.state.lock().await.messages.clone()
    }

    /// Quick replies are offered for the latest assistant message only,
    /// and never while a turn is in flight.
    pub async fn quick_replies(&self) -> Vec<String> {
        let state = self.state.lock().await;
        if state.busy {
            return Vec::new();
        }
        match state.messages.last() {
            Some(last) if last.role == ChatRole::Model => {
                last.options.clone().unwrap_or_default()
            }
            _ => Vec::new(),
        }
    }

    /// One conversation turn. Empty input and concurrent sends are
    /// ignored.
    pub async fn send(&self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        {
            let mut state = self.state.lock().await;
            if state.busy {
                return;
            }
            state.busy = true;
            state.messages.push(ChatMessage::user(text));
        }

        let result = self.assistant.send_message(text).await;

        let mut state = self.state.lock().await;
        state.busy = false;
        match result {
            Ok(raw) => state.messages.push(ChatMessage::model(ChatReply::parse(&raw))),
            Err(err) => {
                tracing::warn!(error = %err, "assistant turn failed");
                state
                    .messages
                    .push(ChatMessage::model(ChatReply::parse(MSG_SEND_FAILED)));
            }
        }
    }

    /// Selecting a quick reply just sends its phrase.
    pub async fn select_option(&self, option: &str) {
        self.send(option).await;
    }

    /// Restart the conversation at the greeting.
    pub async fn reset(&self) {
        let mut state = self.state.lock().await;
        state.messages.clear();
        state.messages.push(Self::greeting());
        state.busy = false;
    }
}
