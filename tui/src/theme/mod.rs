//! Theme and Colors
//!
//! Parlor's palette: a violet accent, two bubble tones (warm for the user,
//! cool for personas) and a handful of muted grays for chrome.

use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// Accent
// ============================================================================

/// Primary accent - soft violet (titles, highlighted cards)
pub const PARLOR_VIOLET: Color = Color::Rgb(167, 139, 250);

/// Accent for personality labels
pub const PERSONALITY: Color = Color::Rgb(196, 181, 253);

// ============================================================================
// Messages
// ============================================================================

/// User bubble background
pub const USER_BUBBLE: Color = Color::Rgb(91, 33, 182);

/// Persona bubble background
pub const PERSONA_BUBBLE: Color = Color::Rgb(39, 39, 54);

/// Text inside bubbles
pub const MESSAGE_TEXT: Color = Color::Rgb(237, 237, 245);

/// Avatar badge behind persona initials
pub const PERSONA_BADGE: Color = Color::Rgb(76, 29, 149);

/// Avatar badge behind the user's initial
pub const USER_BADGE: Color = Color::Rgb(55, 65, 81);

/// Typing dots
pub const TYPING_DOT: Color = Color::Rgb(148, 148, 170);

// ============================================================================
// Chrome
// ============================================================================

/// Borders and separators
pub const BORDER: Color = Color::Rgb(70, 70, 90);

/// Secondary text (timestamps, hints, placeholders)
pub const MUTED: Color = Color::Rgb(120, 120, 140);

/// Primary text
pub const FOREGROUND: Color = Color::Rgb(230, 230, 240);

/// Style for a user bubble
#[must_use]
pub fn user_bubble() -> Style {
    Style::default().fg(MESSAGE_TEXT).bg(USER_BUBBLE)
}

/// Style for a persona bubble
#[must_use]
pub fn persona_bubble() -> Style {
    Style::default().fg(MESSAGE_TEXT).bg(PERSONA_BUBBLE)
}

/// Style for secondary text
#[must_use]
pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

/// Style for titles
#[must_use]
pub fn title() -> Style {
    Style::default()
        .fg(PARLOR_VIOLET)
        .add_modifier(Modifier::BOLD)
}
