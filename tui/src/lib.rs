//! Parlor TUI - Terminal interface for Parlor
//!
//! A full-screen persona chat: pick a companion, then talk to them in
//! message bubbles while they "type" their canned replies.
//!
//! # Architecture
//!
//! - **App**: event loop; forwards keys to the conductor and polls its timers
//! - **Keys**: per-screen key bindings
//! - **Screens**: the persona picker and the chat view
//! - **Widgets**: message bubbles, the scrolling conversation, typing dots

pub mod app;
pub mod keys;
pub mod screens;
pub mod theme;
pub mod widgets;

pub use app::App;
