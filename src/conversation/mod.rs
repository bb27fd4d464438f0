//! Conversation controller: owns the transcript and the awaiting-response
//! flag, and mediates one answering call per accepted submission.
//!
//! # States
//!
//! ```text
//! Idle ──submit──▶ Awaiting ──answer | failure──▶ Idle
//! ```
//!
//! A new conversation starts Idle with one seeded greeting. Submissions that
//! arrive while Awaiting are refused with [`SubmitOutcome::Busy`]; they are
//! neither recorded nor queued. Failed calls are never returned to the
//! caller: they are logged and replaced by the configured fallback message.
//! A `submit` future dropped before its answer arrives settles the same way.
//!
//! # Observers
//!
//! Renderers call [`Conversation::subscribe`] and receive a
//! [`ConversationEvent`] for every transcript append and flag change.
//! Sending with no subscribers is fine; lagging subscribers lose the oldest
//! events and can resynchronise with [`Conversation::render`].

mod message;
mod view;

pub use message::{Message, Origin};
pub use view::{Entry, TranscriptView};

use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::answer::Answerer;
use crate::config::ChatConfig;

const EVENT_BUFFER: usize = 64;

// ── Events ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversationEvent {
    MessageAppended(Message),
    AwaitingChanged(bool),
}

/// Result of a [`Conversation::submit`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank input; nothing happened.
    Rejected,
    /// Another answer is still pending; nothing happened.
    Busy,
    /// The answer was appended.
    Answered,
    /// The call failed and the fallback message was appended.
    Failed,
}

// ── State ─────────────────────────────────────────────────────────────────────

struct ConversationState {
    transcript: Vec<Message>,
    awaiting: bool,
}

pub struct Conversation {
    state: Mutex<ConversationState>,
    answerer: Answerer,
    texts: ChatConfig,
    events: broadcast::Sender<ConversationEvent>,
}

impl Conversation {
    pub fn new(answerer: Answerer, texts: ChatConfig) -> Self {
        let (events, _) = broadcast::channel(EVENT_BUFFER);
        let state = ConversationState {
            transcript: vec![Message::system(texts.greeting.clone())],
            awaiting: false,
        };
        Self { state: Mutex::new(state), answerer, texts, events }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ConversationEvent> {
        self.events.subscribe()
    }

    /// Submit user text and wait for the exchange to settle.
    ///
    /// The user message is appended (and announced) before the outbound
    /// call starts. Exactly one call is made per accepted submission.
    pub async fn submit(&self, text: &str) -> SubmitOutcome {
        if text.trim().is_empty() {
            debug!("blank submission ignored");
            return SubmitOutcome::Rejected;
        }

        {
            let mut state = self.lock();
            if state.awaiting {
                debug!("submission refused: answer pending");
                return SubmitOutcome::Busy;
            }
            let message = Message::user(text);
            state.transcript.push(message.clone());
            state.awaiting = true;
            self.publish(ConversationEvent::MessageAppended(message));
            self.publish(ConversationEvent::AwaitingChanged(true));
        }

        // Settles the exchange even if this future is dropped mid-call.
        let pending = PendingExchange { conversation: Some(self) };

        let (reply, outcome) = match self.answerer.ask(text).await {
            Ok(answer) => {
                info!(provider = self.answerer.name(), answer_len = answer.len(), "answer received");
                (answer, SubmitOutcome::Answered)
            }
            Err(e) => {
                warn!(provider = self.answerer.name(), error = %e, "answering call failed");
                (self.texts.fallback_text.clone(), SubmitOutcome::Failed)
            }
        };

        pending.settle(reply);
        outcome
    }

    /// Append the system reply and return to Idle.
    fn finish(&self, reply: String) {
        let mut state = self.lock();
        let message = Message::system(reply);
        state.transcript.push(message.clone());
        state.awaiting = false;
        self.publish(ConversationEvent::MessageAppended(message));
        self.publish(ConversationEvent::AwaitingChanged(false));
    }

    /// Snapshot for display, including the processing indicator while
    /// awaiting.
    pub fn render(&self) -> TranscriptView {
        let state = self.lock();
        let pending = state.awaiting.then(|| self.texts.processing_text.clone());
        TranscriptView::new(state.transcript.clone(), pending)
    }

    pub fn transcript(&self) -> Vec<Message> {
        self.lock().transcript.clone()
    }

    pub fn is_awaiting(&self) -> bool {
        self.lock().awaiting
    }

    pub fn len(&self) -> usize {
        self.lock().transcript.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().transcript.is_empty()
    }

    pub fn texts(&self) -> &ChatConfig {
        &self.texts
    }

    fn lock(&self) -> MutexGuard<'_, ConversationState> {
        // State is plain data; a panic elsewhere cannot leave it half-written.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, event: ConversationEvent) {
        // Err only means nobody is subscribed.
        let _ = self.events.send(event);
    }
}

/// Awaiting-state guard for one accepted submission.
///
/// Dropping it unsettled (the caller abandoned `submit`) appends the fallback
/// message, so the flag never outlives the call it stands for.
struct PendingExchange<'a> {
    conversation: Option<&'a Conversation>,
}

impl PendingExchange<'_> {
    fn settle(mut self, reply: String) {
        if let Some(conversation) = self.conversation.take() {
            conversation.finish(reply);
        }
    }
}

impl Drop for PendingExchange<'_> {
    fn drop(&mut self) {
        if let Some(conversation) = self.conversation.take() {
            warn!("submission dropped before the answer arrived");
            conversation.finish(conversation.texts.fallback_text.clone());
        }
    }
}
