//! Screens
//!
//! One render function per conductor screen. Screens only read core state;
//! all changes go through the conductor.

pub mod chat;
pub mod picker;
