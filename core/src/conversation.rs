//! Conversation Controller
//!
//! One chat with one persona. The conversation is seeded with the persona's
//! greeting, accepts one user message at a time, and answers each one with
//! a canned reply after a delay:
//!
//! ```text
//! open ──▶ Active ──send──▶ AwaitingReply ──reply timer──▶ Active ──▶ ...
//! ```
//!
//! While a reply is pending the composer is disabled, so a second message
//! cannot be queued behind the first. Leaving the chat calls
//! [`Conversation::close`], which cancels the pending reply timer.

use std::sync::Arc;
use std::time::Duration;

use crate::composer::{Composer, ComposerKey, ComposerOutcome};
use crate::messages::{ChatState, MessageId, SessionId};
use crate::persona::Persona;
use crate::reply::ReplySelector;
use crate::scheduler::{Scheduler, TimerId};
use crate::session::{ChatMessage, Session};

/// The chat state machine for a single persona
#[derive(Debug)]
pub struct Conversation {
    /// Who we are talking to
    persona: Arc<Persona>,
    /// Replies to draw from (the persona's own, or the fallback's)
    pool: Vec<String>,
    /// Message history
    session: Session,
    /// Draft input
    composer: Composer,
    /// Reply timer, set while awaiting a reply
    pending_reply: Option<TimerId>,
    /// Bumped on every message-list mutation
    revision: u64,
}

impl Conversation {
    /// Open a session seeded with the persona's greeting.
    ///
    /// `pool` is the reply pool resolved by the registry and must not be
    /// empty.
    #[must_use]
    pub fn open(persona: Arc<Persona>, pool: Vec<String>) -> Self {
        debug_assert!(!pool.is_empty(), "reply pool must not be empty");

        let mut session = Session::new(persona.id.clone());
        session.add_persona_message(persona.greeting.clone());
        let composer = Composer::new().with_placeholder(persona.composer_placeholder());

        tracing::info!(persona = %persona.id, session = %session.id, "Conversation opened");

        Self {
            persona,
            pool,
            session,
            composer,
            pending_reply: None,
            revision: 1,
        }
    }

    /// Route a key press to the composer, sending the draft on submit.
    ///
    /// Returns the id of the user message if one was appended.
    pub fn handle_key(
        &mut self,
        key: ComposerKey,
        reply_delay: Duration,
        scheduler: &mut dyn Scheduler,
    ) -> Option<MessageId> {
        match self.composer.handle_key(key) {
            ComposerOutcome::Submitted(text) => self.send(&text, reply_delay, scheduler),
            ComposerOutcome::Edited | ComposerOutcome::Ignored => None,
        }
    }

    /// Append a user message and start the reply timer.
    ///
    /// The text is trimmed; empty text and sends while a reply is pending
    /// are ignored.
    pub fn send(
        &mut self,
        text: &str,
        reply_delay: Duration,
        scheduler: &mut dyn Scheduler,
    ) -> Option<MessageId> {
        let text = text.trim();
        if text.is_empty() {
            tracing::trace!("Ignoring empty submission");
            return None;
        }
        if self.pending_reply.is_some() {
            tracing::trace!("Ignoring submission while awaiting reply");
            return None;
        }

        let id = self.session.add_user_message(text);
        self.revision += 1;

        let timer = scheduler.after(reply_delay);
        self.pending_reply = Some(timer);
        self.composer.set_disabled(true);

        tracing::debug!(
            persona = %self.persona.id,
            message = %id,
            delay_ms = u64::try_from(reply_delay.as_millis()).unwrap_or(u64::MAX),
            "User message sent, reply scheduled"
        );
        Some(id)
    }

    /// Handle an elapsed timer.
    ///
    /// Only the pending reply timer does anything: it appends one reply from
    /// the pool and re-enables the composer. Returns the reply's id.
    pub fn on_timer(
        &mut self,
        timer: TimerId,
        selector: &mut dyn ReplySelector,
    ) -> Option<MessageId> {
        if self.pending_reply != Some(timer) {
            return None;
        }
        self.pending_reply = None;

        let index = selector.pick(self.pool.len());
        let reply = self.pool.get(index).or_else(|| self.pool.first()).cloned();

        let id = reply.map(|text| {
            tracing::debug!(persona = %self.persona.id, index, "Persona replied");
            let id = self.session.add_persona_message(text);
            self.revision += 1;
            id
        });

        self.composer.set_disabled(false);
        id
    }

    /// Leave the conversation, cancelling any pending reply
    pub fn close(self, scheduler: &mut dyn Scheduler) {
        if let Some(timer) = self.pending_reply {
            scheduler.cancel(timer);
            tracing::debug!(persona = %self.persona.id, "Cancelled pending reply");
        }
        tracing::info!(
            persona = %self.persona.id,
            session = %self.session.id,
            messages = self.session.len(),
            "Conversation closed"
        );
    }

    /// Current state
    #[must_use]
    pub fn state(&self) -> ChatState {
        if self.pending_reply.is_some() {
            ChatState::AwaitingReply
        } else {
            ChatState::Active
        }
    }

    /// Whether the typing indicator should show
    #[must_use]
    pub fn is_typing(&self) -> bool {
        self.pending_reply.is_some()
    }

    /// The persona on the other side
    #[must_use]
    pub fn persona(&self) -> &Arc<Persona> {
        &self.persona
    }

    /// Message history, oldest first
    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        self.session.messages()
    }

    /// Session identifier
    #[must_use]
    pub fn session_id(&self) -> &SessionId {
        &self.session.id
    }

    /// The draft input
    #[must_use]
    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    /// Changes every time a message is appended; views scroll to the newest
    /// entry when it moves.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }
}
