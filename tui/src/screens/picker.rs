//! Persona Selection Screen
//!
//! Title, subtitle, one card per persona and a footer. The highlighted card
//! gets an accent border; a card whose selection is pending gets a double
//! border and a lit button until the chat opens.

use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};
use ratatui::Frame;

use parlor_core::{Persona, PersonaPicker, PersonaRegistry, Sender};

use crate::theme;
use crate::widgets::bubble::{badge_label, badge_style};

/// Screen title
pub const TITLE: &str = "Choose Your AI Companion";

/// Line under the title
pub const SUBTITLE: &str =
    "Select a persona that matches your needs. Each AI has unique strengths and conversational styles.";

/// Line under the cards
pub const FOOTER: &str = "You can switch between personas anytime during your conversation";

/// Key hints on the last row
const KEY_HINTS: &str = "↑/↓ choose · Enter select · 1-9 quick pick · q quit";

/// Widest the content column gets
const MAX_WIDTH: u16 = 84;

/// Description lines shown per card
const DESCRIPTION_LINES: usize = 3;

/// Render the selection screen
pub fn render(frame: &mut Frame, area: Rect, registry: &PersonaRegistry, picker: &PersonaPicker) {
    let width = area.width.min(MAX_WIDTH);
    let column = Rect::new(area.x + (area.width - width) / 2, area.y, width, area.height);

    let subtitle_height = wrapped_height(SUBTITLE, usize::from(width));
    let [title_area, subtitle_area, cards_area, footer_area, hints_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(subtitle_height + 1),
        Constraint::Min(0),
        Constraint::Length(2),
        Constraint::Length(1),
    ])
    .areas(column);

    frame.render_widget(
        Paragraph::new(TITLE)
            .style(theme::title())
            .alignment(Alignment::Center),
        title_area,
    );
    frame.render_widget(
        Paragraph::new(SUBTITLE)
            .style(theme::muted())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        subtitle_area,
    );

    render_cards(frame, cards_area, registry, picker);

    frame.render_widget(
        Paragraph::new(FOOTER)
            .style(theme::muted())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        footer_area,
    );
    frame.render_widget(
        Paragraph::new(KEY_HINTS)
            .style(theme::muted().add_modifier(Modifier::DIM))
            .alignment(Alignment::Center),
        hints_area,
    );
}

fn render_cards(frame: &mut Frame, area: Rect, registry: &PersonaRegistry, picker: &PersonaPicker) {
    let personas: Vec<_> = picker
        .personas()
        .iter()
        .filter_map(|id| registry.lookup(id).ok())
        .collect();
    if personas.is_empty() {
        return;
    }

    let inner_width = usize::from(area.width.saturating_sub(4));
    let heights: Vec<u16> = personas
        .iter()
        .map(|p| card_height(p, inner_width))
        .collect();

    let mut constraints: Vec<Constraint> = heights.iter().map(|h| Constraint::Length(*h)).collect();
    constraints.push(Constraint::Min(0));
    let slots = Layout::vertical(constraints).spacing(1).split(area);

    for (index, (persona, slot)) in personas.iter().zip(slots.iter()).enumerate() {
        let highlighted = picker.highlighted() == index;
        let pending = picker.pending_persona() == Some(&persona.id);
        render_card(frame, *slot, persona, index, highlighted, pending);
    }
}

fn render_card(
    frame: &mut Frame,
    area: Rect,
    persona: &Persona,
    index: usize,
    highlighted: bool,
    pending: bool,
) {
    if area.height < 3 {
        return;
    }

    let border_style = if highlighted || pending {
        Style::default().fg(theme::PARLOR_VIOLET)
    } else {
        Style::default().fg(theme::BORDER)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(if pending {
            BorderType::Double
        } else {
            BorderType::Rounded
        })
        .border_style(border_style)
        .title(Span::styled(format!(" {} ", index + 1), theme::muted()));

    let inner = block.inner(area).inner(ratatui::layout::Margin::new(1, 0));
    frame.render_widget(block, area);

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                badge_label(Some(&persona.avatar.initials), Sender::Persona),
                badge_style(theme::PERSONA_BADGE),
            ),
            Span::raw(" "),
            Span::styled(
                persona.name.clone(),
                Style::default()
                    .fg(theme::FOREGROUND)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                persona.personality.clone(),
                Style::default().fg(theme::PERSONALITY),
            ),
        ]),
        Line::default(),
    ];

    lines.extend(
        clamp_description(&persona.description, usize::from(inner.width))
            .into_iter()
            .map(|l| Line::styled(l, theme::muted())),
    );
    lines.push(Line::default());

    let button_style = if pending {
        Style::default()
            .fg(theme::MESSAGE_TEXT)
            .bg(theme::PARLOR_VIOLET)
            .add_modifier(Modifier::BOLD)
    } else if highlighted {
        Style::default()
            .fg(theme::PARLOR_VIOLET)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    } else {
        Style::default().fg(theme::PARLOR_VIOLET)
    };
    lines.push(
        Line::from(Span::styled(format!("  Chat with {}  ", persona.name), button_style))
            .alignment(Alignment::Center),
    );

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Rows a card needs: borders, header, blank, description, blank, button
fn card_height(persona: &Persona, inner_width: usize) -> u16 {
    let description = clamp_description(&persona.description, inner_width).len();
    u16::try_from(description + 6).unwrap_or(u16::MAX)
}

/// Wrap a description, cutting it to a few lines with an ellipsis
fn clamp_description(description: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines: Vec<String> = textwrap::wrap(description, width)
        .into_iter()
        .map(std::borrow::Cow::into_owned)
        .collect();

    if lines.len() > DESCRIPTION_LINES {
        lines.truncate(DESCRIPTION_LINES);
        if let Some(last) = lines.last_mut() {
            let keep = width.saturating_sub(3);
            let mut cut: String = last.chars().take(keep).collect();
            cut = cut.trim_end().to_string();
            cut.push_str("...");
            *last = cut;
        }
    }
    lines
}

fn wrapped_height(text: &str, width: usize) -> u16 {
    u16::try_from(textwrap::wrap(text, width.max(1)).len()).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_short_description_is_kept() {
        let lines = clamp_description("Short and sweet.", 40);
        assert_eq!(lines, vec!["Short and sweet.".to_string()]);
    }

    #[test]
    fn test_long_description_is_clamped() {
        let text = "lorem ipsum dolor sit amet ".repeat(10);
        let lines = clamp_description(&text, 20);
        assert_eq!(lines.len(), DESCRIPTION_LINES);
        assert!(lines[2].ends_with("..."));
        assert!(lines[2].chars().count() <= 20);
    }

    #[test]
    fn test_card_height_counts_description() {
        let persona = Persona::new("x", "X").with_description("one two three");
        assert_eq!(card_height(&persona, 40), 7);
    }
}
