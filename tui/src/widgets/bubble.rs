//! Message Bubbles
//!
//! Lays out one chat message as styled lines for a row of a given width.
//! User bubbles hug the right edge with their badge to the right; persona
//! bubbles hug the left edge behind the persona's avatar badge. Each source
//! line wraps on its own, so newlines and leading indentation survive. The
//! timestamp sits under the bubble on the same side.
//!
//! ```text
//!  L   Hi there! I'm Luna, your creative
//!      companion.
//!     14:05
//!                               Hello    U
//!                               14:06
//! ```

use std::borrow::Cow;

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use parlor_core::{ChatMessage, Sender};

use crate::theme;

/// Columns taken by an avatar badge plus the gap beside it
pub const BADGE_WIDTH: usize = 4;

/// Badge drawn for the user
pub const USER_INITIALS: &str = "U";

/// Badge drawn for a persona without initials
pub const PERSONA_INITIALS: &str = "AI";

/// Share of the row a bubble may take, in percent
const MAX_BUBBLE_PERCENT: usize = 80;

/// Blank columns inside each side of a bubble
const PADDING: usize = 1;

/// A message laid out as a bubble
#[derive(Clone, Copy, Debug)]
pub struct Bubble<'a> {
    text: &'a str,
    sender: Sender,
    initials: Option<&'a str>,
    timestamp: Option<&'a str>,
}

impl<'a> Bubble<'a> {
    /// A bubble with the default badge and no timestamp
    #[must_use]
    pub fn new(text: &'a str, sender: Sender) -> Self {
        Self {
            text,
            sender,
            initials: None,
            timestamp: None,
        }
    }

    /// Bubble for a stored message. `initials` only apply to persona messages.
    #[must_use]
    pub fn from_message(message: &'a ChatMessage, initials: Option<&'a str>) -> Self {
        let bubble = Self::new(&message.text, message.sender).timestamp(&message.timestamp);
        match (message.sender, initials) {
            (Sender::Persona, Some(initials)) => bubble.initials(initials),
            _ => bubble,
        }
    }

    /// Draw these initials in the badge
    #[must_use]
    pub fn initials(mut self, initials: &'a str) -> Self {
        self.initials = Some(initials);
        self
    }

    /// Show a timestamp under the bubble
    #[must_use]
    pub fn timestamp(mut self, timestamp: &'a str) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Lay the bubble out for a row `width` columns wide
    #[must_use]
    pub fn lines(&self, width: u16) -> Vec<Line<'static>> {
        let width = usize::from(width);
        let wrapped = wrap_preserving_lines(self.text, text_width(width));
        let inner = wrapped.iter().map(|l| l.width()).max().unwrap_or(0);
        let bubble_width = inner + 2 * PADDING;
        let pad = " ".repeat(PADDING);

        let (body_style, badge_style) = match self.sender {
            Sender::User => (theme::user_bubble(), badge_style(theme::USER_BADGE)),
            Sender::Persona => (theme::persona_bubble(), badge_style(theme::PERSONA_BADGE)),
        };

        let mut lines = Vec::with_capacity(wrapped.len() + 1);
        for (i, text) in wrapped.iter().enumerate() {
            let fill = " ".repeat(inner - text.width());
            let body = Span::styled(format!("{pad}{text}{fill}{pad}"), body_style);
            let badge = if i == 0 {
                Span::styled(badge_label(self.initials, self.sender), badge_style)
            } else {
                Span::raw(" ".repeat(BADGE_WIDTH - 1))
            };

            let line = match self.sender {
                Sender::Persona => Line::from(vec![badge, Span::raw(" "), body]),
                Sender::User => {
                    let lead = width.saturating_sub(bubble_width + BADGE_WIDTH);
                    Line::from(vec![Span::raw(" ".repeat(lead)), body, Span::raw(" "), badge])
                }
            };
            lines.push(line);
        }

        if let Some(timestamp) = self.timestamp {
            let stamp = Span::styled(timestamp.to_string(), theme::muted());
            let lead = match self.sender {
                Sender::Persona => BADGE_WIDTH + PADDING,
                Sender::User => width.saturating_sub(timestamp.width() + PADDING + BADGE_WIDTH),
            };
            lines.push(Line::from(vec![Span::raw(" ".repeat(lead)), stamp]));
        }

        lines
    }
}

/// The three-column badge for a sender, falling back to `U` / `AI`
pub(crate) fn badge_label(initials: Option<&str>, sender: Sender) -> String {
    let initials = match initials.map(str::trim) {
        Some(initials) if !initials.is_empty() => initials,
        _ => match sender {
            Sender::User => USER_INITIALS,
            Sender::Persona => PERSONA_INITIALS,
        },
    };
    let clipped: String = initials.chars().take(2).collect();
    format!("{clipped:^3}")
}

pub(crate) fn badge_style(bg: ratatui::style::Color) -> Style {
    Style::default()
        .fg(theme::MESSAGE_TEXT)
        .bg(bg)
        .add_modifier(Modifier::BOLD)
}

/// Columns available for text inside a bubble on a row this wide
fn text_width(width: usize) -> usize {
    (width * MAX_BUBBLE_PERCENT / 100)
        .saturating_sub(BADGE_WIDTH + 2 * PADDING)
        .max(1)
}

/// Wrap each source line on its own; blank lines stay blank
fn wrap_preserving_lines(text: &str, width: usize) -> Vec<String> {
    text.split('\n')
        .flat_map(|line| {
            if line.trim().is_empty() {
                vec![String::new()]
            } else {
                textwrap::wrap(line, width)
                    .into_iter()
                    .map(Cow::into_owned)
                    .collect()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn plain(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_persona_bubble_is_left_aligned_with_badge() {
        let lines = Bubble::new("Hello there", Sender::Persona)
            .initials("L")
            .lines(60);
        assert_eq!(lines.len(), 1);
        assert_eq!(plain(&lines[0]), " L   Hello there ");
    }

    #[test]
    fn test_user_bubble_is_right_aligned() {
        let lines = Bubble::new("Hello", Sender::User).lines(40);
        let row = plain(&lines[0]);
        assert_eq!(row.width(), 40);
        assert!(row.ends_with(" Hello   U "), "{row:?}");
        assert!(row.starts_with("    "));
    }

    #[test]
    fn test_fallback_badges() {
        assert_eq!(badge_label(None, Sender::User), " U ");
        assert_eq!(badge_label(None, Sender::Persona), "AI ");
        assert_eq!(badge_label(Some("  "), Sender::Persona), "AI ");
        assert_eq!(badge_label(Some("Sg"), Sender::Persona), "Sg ");
        assert_eq!(badge_label(Some("Luna"), Sender::Persona), "Lu ");
    }

    #[test]
    fn test_newlines_and_indentation_preserved() {
        let lines = Bubble::new("first\n\n  indented", Sender::Persona).lines(60);
        let rows: Vec<String> = lines.iter().map(plain).collect();
        assert_eq!(rows.len(), 3);
        assert!(rows[0].contains(" first "));
        assert_eq!(rows[1].trim(), "");
        assert!(rows[2].contains("   indented"), "{:?}", rows[2]);
    }

    #[test]
    fn test_long_text_wraps_within_bubble() {
        let text = "word ".repeat(40);
        let lines = Bubble::new(text.trim(), Sender::Persona).lines(50);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(plain(line).width() <= 50 * MAX_BUBBLE_PERCENT / 100);
        }
    }

    #[test]
    fn test_timestamp_follows_the_bubble_side() {
        let persona = Bubble::new("hi", Sender::Persona).timestamp("09:30").lines(40);
        assert_eq!(plain(&persona[1]), "     09:30");

        let user = Bubble::new("hi", Sender::User).timestamp("09:31").lines(40);
        let stamp = plain(&user[1]);
        assert!(stamp.ends_with("09:31"));
        assert_eq!(stamp.width(), 40 - PADDING - BADGE_WIDTH);
    }

    #[test]
    fn test_from_message_uses_initials_for_personas_only() {
        let reply = ChatMessage::new(Sender::Persona, "hello");
        let lines = Bubble::from_message(&reply, Some("A")).lines(40);
        assert!(plain(&lines[0]).starts_with(" A "));
        assert_eq!(plain(&lines[1]).trim(), reply.timestamp);

        let mine = ChatMessage::new(Sender::User, "hey");
        let lines = Bubble::from_message(&mine, Some("A")).lines(40);
        assert!(plain(&lines[0]).ends_with(" U "));
    }
}
