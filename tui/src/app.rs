//! Main Application
//!
//! The App is a thin display client around the headless Conductor:
//! 1. Converts terminal events into `SurfaceEvent`s (see [`crate::keys`])
//! 2. Polls the conductor's timers once per frame
//! 3. Renders whichever screen the conductor holds
//!
//! View-only state (chat scroll position, animation clock) lives here; all
//! chat state lives in the conductor.

use std::time::{Duration, Instant};

use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};
use futures::StreamExt;
use ratatui::backend::Backend;
use ratatui::{Frame, Terminal};
use tokio::time::MissedTickBehavior;

use parlor_core::{Conductor, ReplySelector, Scheduler, Screen, SessionId};

use crate::keys::{self, Action, KeyContext};
use crate::screens::{chat, picker};
use crate::widgets::typing;
use crate::widgets::ConversationState;

/// Frame interval (~30 FPS keeps the typing dots smooth)
const FRAME_DURATION: Duration = Duration::from_millis(33);

/// Lines per mouse wheel notch
const WHEEL_LINES: usize = 3;

/// Main application state
pub struct App<S: Scheduler, R: ReplySelector> {
    /// Headless orchestration core
    conductor: Conductor<S, R>,
    /// Scroll state of the chat history
    chat_view: ConversationState,
    /// Session the scroll state belongs to
    chat_session: Option<SessionId>,
    /// Animation clock
    started: Instant,
}

impl<S: Scheduler, R: ReplySelector> App<S, R> {
    /// Create a new App around a conductor
    pub fn new(conductor: Conductor<S, R>) -> Self {
        Self {
            conductor,
            chat_view: ConversationState::default(),
            chat_session: None,
            started: Instant::now(),
        }
    }

    /// Main event loop
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read or drawn.
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        // Create async event stream for non-blocking terminal events
        let mut event_stream = EventStream::new();
        let mut frame_tick = tokio::time::interval(FRAME_DURATION);
        frame_tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

        // Render initial frame immediately so user sees UI
        self.draw(terminal)?;

        while self.conductor.is_running() {
            tokio::select! {
                biased;

                // Terminal events - highest priority
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        // Only handle Press events (not Release or Repeat)
                        Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                            self.handle_key(key);
                        }
                        Some(Ok(Event::Mouse(mouse))) => self.handle_mouse(mouse),
                        Some(Ok(_)) => {}
                        Some(Err(e)) => return Err(e.into()),
                        None => {
                            tracing::info!("Terminal event stream closed");
                            break;
                        }
                    }
                }

                // Frame tick
                _ = frame_tick.tick() => {}
            }

            self.tick();
            self.draw(terminal)?;
        }

        Ok(())
    }

    /// Deliver elapsed timers to the conductor. Returns whether state changed.
    pub fn tick(&mut self) -> bool {
        self.conductor.poll_timers()
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyEvent) {
        let context = match self.conductor.screen() {
            Screen::Selection(_) => KeyContext::Selection,
            Screen::Chat(_) => KeyContext::Chat,
        };
        let page = (self.chat_view.viewport() / 2).max(1);

        match keys::map_key(context, key) {
            Action::Surface(event) => self.conductor.handle_event(event),
            Action::PageUp => self.chat_view.scroll_up(page),
            Action::PageDown => self.chat_view.scroll_down(page),
            Action::ScrollTop => self.chat_view.scroll_to_top(),
            Action::ScrollBottom => self.chat_view.scroll_to_bottom(),
            Action::None => tracing::trace!(?key, "Unbound key"),
        }
    }

    /// Handle mouse input
    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if !matches!(self.conductor.screen(), Screen::Chat(_)) {
            return;
        }
        match mouse.kind {
            MouseEventKind::ScrollUp => self.chat_view.scroll_up(WHEEL_LINES),
            MouseEventKind::ScrollDown => self.chat_view.scroll_down(WHEEL_LINES),
            _ => {}
        }
    }

    /// Draw one frame
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails to draw.
    pub fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        terminal.draw(|frame| self.render(frame))?;
        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        match self.conductor.screen() {
            Screen::Selection(selection) => {
                picker::render(frame, area, self.conductor.registry(), selection);
            }
            Screen::Chat(conversation) => {
                // A new session starts scrolled to the bottom
                if self.chat_session.as_ref() != Some(conversation.session_id()) {
                    self.chat_session = Some(conversation.session_id().clone());
                    self.chat_view = ConversationState::default();
                }
                let dot_frame = typing::frame_at(self.started.elapsed());
                chat::render(frame, area, conversation, &mut self.chat_view, dot_frame);
            }
        }
    }

    /// The conductor behind this app
    pub fn conductor(&self) -> &Conductor<S, R> {
        &self.conductor
    }

    /// Mutable access to the conductor
    pub fn conductor_mut(&mut self) -> &mut Conductor<S, R> {
        &mut self.conductor
    }

    /// Current chat scroll state
    pub fn chat_view(&self) -> &ConversationState {
        &self.chat_view
    }
}
