//! Typing Indicator
//!
//! Three dots in a persona bubble, one lit at a time, shown while a reply
//! is pending.

use std::time::Duration;

use ratatui::style::Modifier;
use ratatui::text::{Line, Span};

use parlor_core::Sender;

use super::bubble::{badge_label, badge_style};
use crate::theme;

/// How long each dot stays lit
pub const DOT_INTERVAL: Duration = Duration::from_millis(300);

/// Which dot is lit after `elapsed`
#[must_use]
pub fn frame_at(elapsed: Duration) -> usize {
    let step = elapsed.as_millis() / DOT_INTERVAL.as_millis();
    usize::try_from(step % 3).unwrap_or(0)
}

/// The indicator row for a persona with these initials
#[must_use]
pub fn typing_line(initials: Option<&str>, frame: usize) -> Line<'static> {
    let bubble = theme::persona_bubble();
    let mut spans = vec![
        Span::styled(
            badge_label(initials, Sender::Persona),
            badge_style(theme::PERSONA_BADGE),
        ),
        Span::raw(" "),
        Span::styled(" ", bubble),
    ];

    for dot in 0..3 {
        let style = if dot == frame % 3 {
            bubble.fg(theme::FOREGROUND).add_modifier(Modifier::BOLD)
        } else {
            bubble.fg(theme::TYPING_DOT).add_modifier(Modifier::DIM)
        };
        spans.push(Span::styled("●", style));
        spans.push(Span::styled(" ", bubble));
    }

    Line::from(spans)
}
