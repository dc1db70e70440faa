//! Widgets
//!
//! - [`bubble`]: one message laid out as a left or right aligned bubble
//! - [`conversation`]: bottom-anchored scrolling view over message lines
//! - [`typing`]: the three-dot typing indicator

pub mod bubble;
pub mod conversation;
pub mod typing;

pub use bubble::Bubble;
pub use conversation::{ConversationState, ConversationView};
