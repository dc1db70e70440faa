//! Parlor Core - Headless Persona Chat
//!
//! This crate holds every state machine behind Parlor's persona chat,
//! completely independent of any UI framework. A surface (the terminal UI,
//! a test harness) feeds it [`SurfaceEvent`]s, polls its timers once per
//! frame, and renders whatever [`Screen`] the [`Conductor`] currently holds.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         Surfaces                              │
//! │        ┌──────────────┐            ┌──────────────────┐       │
//! │        │  TUI         │            │  Test harness     │       │
//! │        │  (ratatui)   │            │  (VirtualScheduler)│      │
//! │        └──────┬───────┘            └─────────┬────────┘       │
//! │               └──────── SurfaceEvent ────────┘                │
//! └───────────────────────────────┬──────────────────────────────┘
//!                                 │
//! ┌───────────────────────────────┼──────────────────────────────┐
//! │                          Conductor                            │
//! │   ┌──────────────┐   ┌───────────────┐   ┌────────────────┐   │
//! │   │ PersonaPicker │   │ Conversation  │   │ PersonaRegistry│   │
//! │   │  (Selection)  │──▶│  (Chat)       │◀──│  (lookup)      │   │
//! │   └──────────────┘   └───────────────┘   └────────────────┘   │
//! │          Scheduler (reply / selection timers)                 │
//! │          ReplySelector (which canned reply)                   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Module Overview
//!
//! - [`persona`]: Persona definitions and the injectable registry
//! - [`messages`]: Identifiers, senders and chat states
//! - [`session`]: The append-only message list of one chat
//! - [`composer`]: Text input with trim/disable rules
//! - [`conversation`]: The chat state machine (greeting, send, reply)
//! - [`picker`]: The persona selection state machine
//! - [`route`]: Addressable views (`/`, `/chat/{id}`)
//! - [`events`]: Events from surfaces to the conductor
//! - [`conductor`]: Router that owns the active screen
//! - [`scheduler`]: Timer seam (real and virtual clocks)
//! - [`reply`]: Reply selection seam (random and fixed)
//! - [`config`]: TOML/env/CLI configuration
//!
//! # No TUI Dependencies
//!
//! This crate has **zero** dependencies on ratatui, crossterm, or any other
//! UI framework.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod composer;
pub mod conductor;
pub mod config;
pub mod conversation;
pub mod events;
pub mod messages;
pub mod persona;
pub mod picker;
pub mod reply;
pub mod route;
pub mod scheduler;
pub mod session;

// Re-exports for convenience
pub use composer::{Composer, ComposerKey, ComposerOutcome};
pub use conductor::{Conductor, ConductorConfig, Screen};
pub use config::{
    default_config_path, load_config_from_path, ConfigError, ConfigOverrides, ConfigSource,
    ParlorConfig, ParlorToml, PersonaToml,
};
pub use conversation::Conversation;
pub use events::SurfaceEvent;
pub use messages::{ChatState, MessageId, Sender, SessionId};
pub use persona::{Avatar, Persona, PersonaId, PersonaRegistry, RegistryError};
pub use picker::{PersonaPicker, PickerState};
pub use reply::{FixedSelector, RandomSelector, ReplySelector};
pub use route::Route;
pub use scheduler::{Scheduler, SystemScheduler, TimerId, VirtualScheduler};
pub use session::{ChatMessage, Session};
