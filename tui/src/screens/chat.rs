//! Chat Screen
//!
//! ```text
//! ┌ Esc Back ─────────── (L) Luna ───────────────────────┐
//! │                 Creative & Empathetic                 │
//! ├───────────────────────────────────────────────────────┤
//! │  messages (bubbles, typing indicator)                 │
//! ├ composer ─────────────────────────────────────────────┤
//! │ status bar                                            │
//! ```

use ratatui::layout::{Alignment, Constraint, Layout, Margin, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};
use ratatui::Frame;

use parlor_core::{ChatState, Conversation, Sender};

use crate::theme;
use crate::widgets::bubble::{badge_label, badge_style};
use crate::widgets::typing::typing_line;
use crate::widgets::{Bubble, ConversationState, ConversationView};

/// Most draft lines shown before the composer scrolls
const MAX_COMPOSER_LINES: u16 = 4;

/// Render the chat screen. `dot_frame` animates the typing indicator.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    conversation: &Conversation,
    view: &mut ConversationState,
    dot_frame: usize,
) {
    let draft_lines = conversation.composer().text().split('\n').count();
    let composer_height = u16::try_from(draft_lines)
        .unwrap_or(MAX_COMPOSER_LINES)
        .clamp(1, MAX_COMPOSER_LINES)
        + 2;

    let [header_area, messages_area, composer_area, status_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(1),
        Constraint::Length(composer_height),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(frame, header_area, conversation);
    render_messages(frame, messages_area, conversation, view, dot_frame);
    render_composer(frame, composer_area, conversation);
    render_status(frame, status_area, conversation, view);
}

fn render_header(frame: &mut Frame, area: Rect, conversation: &Conversation) {
    let persona = conversation.persona();
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(theme::BORDER));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [back_area, title_area, spacer_area] = Layout::horizontal([
        Constraint::Length(10),
        Constraint::Min(1),
        Constraint::Length(10),
    ])
    .areas(inner);

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("← ", theme::muted()),
            Span::styled("Back", Style::default().fg(theme::FOREGROUND)),
        ])),
        back_area,
    );
    frame.render_widget(Paragraph::new(Span::styled("Esc", theme::muted())), spacer_area);

    let title = vec![
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
        ]),
        Line::styled(
            persona.personality.clone(),
            Style::default().fg(theme::PERSONALITY),
        ),
    ];
    frame.render_widget(Paragraph::new(title).alignment(Alignment::Center), title_area);
}

fn render_messages(
    frame: &mut Frame,
    area: Rect,
    conversation: &Conversation,
    view: &mut ConversationState,
    dot_frame: usize,
) {
    let area = area.inner(Margin::new(1, 0));
    let initials = Some(conversation.persona().avatar.initials.as_str());

    let mut lines = vec![Line::default()];
    for message in conversation.messages() {
        lines.extend(Bubble::from_message(message, initials).lines(area.width));
        lines.push(Line::default());
    }
    if conversation.is_typing() {
        lines.push(typing_line(initials, dot_frame));
    }

    view.follow(conversation.revision());
    frame.render_stateful_widget(ConversationView::new(lines), area, view);
}

fn render_composer(frame: &mut Frame, area: Rect, conversation: &Conversation) {
    let composer = conversation.composer();
    let enabled = !composer.is_disabled();

    let border_style = if enabled {
        Style::default().fg(theme::PARLOR_VIOLET)
    } else {
        Style::default().fg(theme::BORDER)
    };
    let hint = if composer.can_submit() {
        " Enter ↵ send "
    } else {
        ""
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style)
        .title(Line::styled(hint, theme::muted()).right_aligned());

    let paragraph = if composer.text().is_empty() {
        Paragraph::new(Span::styled(
            composer.placeholder().to_string(),
            theme::muted().add_modifier(Modifier::ITALIC),
        ))
    } else {
        let mut text = composer.text().to_string();
        if enabled {
            text.push('_');
        }
        let visible = usize::from(MAX_COMPOSER_LINES);
        let rows: Vec<&str> = text.split('\n').collect();
        let tail = rows[rows.len().saturating_sub(visible)..].join("\n");
        Paragraph::new(tail)
            .style(Style::default().fg(theme::FOREGROUND))
            .wrap(Wrap { trim: false })
    };

    frame.render_widget(paragraph.block(block), area);
}

fn render_status(
    frame: &mut Frame,
    area: Rect,
    conversation: &Conversation,
    view: &ConversationState,
) {
    let state = conversation.state();
    let state_style = match state {
        ChatState::AwaitingReply => Style::default().fg(theme::PARLOR_VIOLET),
        ChatState::Active => theme::muted(),
    };

    let scroll_info = if view.offset() > 0 {
        format!(" [^{} lines - PgDn to scroll]", view.offset())
    } else {
        String::new()
    };

    let status = Line::from(vec![
        Span::styled(
            format!(" {}", state.description(&conversation.persona().name)),
            state_style,
        ),
        Span::styled(
            format!(" | Esc back | Alt+Enter newline | PgUp/PgDn scroll{scroll_info}"),
            theme::muted(),
        ),
    ]);
    frame.render_widget(Paragraph::new(status), area);
}
