//! Conductor - The Orchestration Core
//!
//! The Conductor owns whichever screen is showing and routes surface events
//! to it:
//! - the persona picker at `/`
//! - a conversation at `/chat/{id}`
//!
//! # Design Philosophy
//!
//! The Conductor is UI-agnostic. Surfaces report what the user did through
//! [`SurfaceEvent`] and read the resulting state back through
//! [`Conductor::screen`]. Delays never block: the surface calls
//! [`Conductor::poll_timers`] once per frame, and elapsed timers are
//! delivered to the screen that scheduled them.
//!
//! Leaving a screen always closes it first, so a pending reply or a pending
//! selection can never land on a screen that is no longer showing.

use std::sync::Arc;
use std::time::Duration;

use crate::config::{ParlorConfig, DEFAULT_REPLY_DELAY, DEFAULT_SELECTION_DELAY};
use crate::conversation::Conversation;
use crate::events::SurfaceEvent;
use crate::persona::{PersonaId, PersonaRegistry};
use crate::picker::PersonaPicker;
use crate::reply::ReplySelector;
use crate::route::Route;
use crate::scheduler::Scheduler;

/// Conductor configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConductorConfig {
    /// Simulated typing delay before a persona replies
    pub reply_delay: Duration,
    /// How long a chosen card stays highlighted before the chat opens
    pub selection_delay: Duration,
}

impl Default for ConductorConfig {
    fn default() -> Self {
        Self {
            reply_delay: DEFAULT_REPLY_DELAY,
            selection_delay: DEFAULT_SELECTION_DELAY,
        }
    }
}

impl From<&ParlorConfig> for ConductorConfig {
    fn from(config: &ParlorConfig) -> Self {
        Self {
            reply_delay: config.reply_delay,
            selection_delay: config.selection_delay,
        }
    }
}

/// The screen currently showing
#[derive(Debug)]
pub enum Screen {
    /// Persona selection
    Selection(PersonaPicker),
    /// Chat with one persona
    Chat(Conversation),
}

/// The Conductor - headless orchestration core
pub struct Conductor<S: Scheduler, R: ReplySelector> {
    /// Configuration
    config: ConductorConfig,
    /// Persona lookup table
    registry: Arc<PersonaRegistry>,
    /// Timer source
    scheduler: S,
    /// Reply chooser
    selector: R,
    /// Active screen
    screen: Screen,
    /// Whether the application should keep running
    running: bool,
}

impl<S: Scheduler, R: ReplySelector> Conductor<S, R> {
    /// Create a conductor showing the persona picker
    pub fn new(
        registry: Arc<PersonaRegistry>,
        config: ConductorConfig,
        scheduler: S,
        selector: R,
    ) -> Self {
        let picker = PersonaPicker::new(registry.ids().to_vec());
        Self {
            config,
            registry,
            scheduler,
            selector,
            screen: Screen::Selection(picker),
            running: true,
        }
    }

    /// Show a view.
    ///
    /// The current screen is closed first. A chat address for an unknown
    /// persona redirects to the selection view.
    pub fn navigate(&mut self, route: Route) {
        let next = match route {
            Route::Selection => self.selection_screen(),
            Route::Chat(id) => match self.chat_screen(&id) {
                Some(conversation) => Screen::Chat(conversation),
                None => {
                    tracing::warn!(persona = %id, "Unknown persona, redirecting to selection");
                    self.selection_screen()
                }
            },
        };

        let previous = std::mem::replace(&mut self.screen, next);
        match previous {
            Screen::Selection(picker) => picker.close(&mut self.scheduler),
            Screen::Chat(conversation) => conversation.close(&mut self.scheduler),
        }

        tracing::info!(route = %self.route(), "Navigated");
    }

    /// Show the view at an address (`/` or `/chat/{id}`)
    pub fn navigate_to_path(&mut self, path: &str) {
        self.navigate(Route::parse(path));
    }

    fn selection_screen(&self) -> Screen {
        Screen::Selection(PersonaPicker::new(self.registry.ids().to_vec()))
    }

    fn chat_screen(&self, id: &PersonaId) -> Option<Conversation> {
        let persona = self.registry.lookup(id).ok()?;
        let pool = self.registry.reply_pool(&persona).to_vec();
        if pool.is_empty() {
            return None;
        }
        Some(Conversation::open(persona, pool))
    }

    /// Handle an event from the UI surface
    pub fn handle_event(&mut self, event: SurfaceEvent) {
        let delay = match self.screen {
            Screen::Selection(_) => self.config.selection_delay,
            Screen::Chat(_) => self.config.reply_delay,
        };

        let mut navigate_to = None;
        match (&mut self.screen, event) {
            (_, SurfaceEvent::QuitRequested) => {
                tracing::info!("Quit requested");
                self.running = false;
            }
            (_, SurfaceEvent::Navigate { path }) => navigate_to = Some(Route::parse(&path)),

            (Screen::Selection(picker), SurfaceEvent::HighlightNext) => picker.highlight_next(),
            (Screen::Selection(picker), SurfaceEvent::HighlightPrevious) => {
                picker.highlight_previous();
            }
            (Screen::Selection(picker), SurfaceEvent::SelectHighlighted) => {
                picker.select_highlighted(delay, &mut self.scheduler);
            }
            (Screen::Selection(picker), SurfaceEvent::SelectIndex { index }) => {
                picker.select_index(index, delay, &mut self.scheduler);
            }
            (Screen::Selection(picker), SurfaceEvent::SelectPersona { persona_id }) => {
                picker.select(&persona_id, delay, &mut self.scheduler);
            }

            (Screen::Chat(conversation), SurfaceEvent::Composer(key)) => {
                conversation.handle_key(key, delay, &mut self.scheduler);
            }
            (Screen::Chat(_), SurfaceEvent::Back) => navigate_to = Some(Route::Selection),

            (_, event) => tracing::trace!(?event, "Event ignored on this screen"),
        }

        if let Some(route) = navigate_to {
            self.navigate(route);
        }
    }

    /// Deliver elapsed timers to the active screen.
    ///
    /// Returns `true` if anything changed and the surface should redraw.
    pub fn poll_timers(&mut self) -> bool {
        let due = self.scheduler.due();
        if due.is_empty() {
            return false;
        }

        let mut changed = false;
        for timer in due {
            tracing::debug!(timer = timer.0, "Timer fired");
            match &mut self.screen {
                Screen::Selection(picker) => {
                    if let Some(persona) = picker.on_timer(timer) {
                        self.navigate(Route::Chat(persona));
                        changed = true;
                    }
                }
                Screen::Chat(conversation) => {
                    changed |= conversation.on_timer(timer, &mut self.selector).is_some();
                }
            }
        }
        changed
    }

    /// The view currently showing
    #[must_use]
    pub fn route(&self) -> Route {
        match &self.screen {
            Screen::Selection(_) => Route::Selection,
            Screen::Chat(conversation) => Route::Chat(conversation.persona().id.clone()),
        }
    }

    /// The active screen
    #[must_use]
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// The persona lookup table
    #[must_use]
    pub fn registry(&self) -> &PersonaRegistry {
        &self.registry
    }

    /// Configuration in effect
    #[must_use]
    pub fn config(&self) -> &ConductorConfig {
        &self.config
    }

    /// Whether the application should keep running
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Direct access to the timer source (tests advance virtual time here)
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}
