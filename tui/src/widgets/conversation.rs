//! Conversation View
//!
//! A borderless, scrollable list of pre-laid-out lines. The scroll offset
//! counts lines up from the newest entry, so offset 0 keeps the view pinned
//! to the bottom as messages arrive.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::StatefulWidget;

/// Scroll state for a conversation view
#[derive(Clone, Debug, Default)]
pub struct ConversationState {
    /// Lines scrolled up from the bottom (0 = newest visible)
    scroll_offset: usize,
    /// Content lines at the last render
    total_lines: usize,
    /// Visible rows at the last render
    viewport: usize,
    /// Message-list revision the view last followed
    revision: u64,
}

impl ConversationState {
    /// Jump back to the newest entry whenever the message list changed
    pub fn follow(&mut self, revision: u64) {
        if revision != self.revision {
            self.revision = revision;
            self.scroll_offset = 0;
        }
    }

    /// Scroll towards older messages
    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll_offset = (self.scroll_offset + lines).min(self.max_scroll());
    }

    /// Scroll towards newer messages
    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    /// Show the oldest messages
    pub fn scroll_to_top(&mut self) {
        self.scroll_offset = self.max_scroll();
    }

    /// Show the newest messages
    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = 0;
    }

    /// Lines scrolled up from the bottom
    #[must_use]
    pub fn offset(&self) -> usize {
        self.scroll_offset
    }

    /// Visible rows at the last render
    #[must_use]
    pub fn viewport(&self) -> usize {
        self.viewport
    }

    fn max_scroll(&self) -> usize {
        self.total_lines.saturating_sub(self.viewport)
    }
}

/// Borderless, bottom-anchored scrolling view over lines
pub struct ConversationView<'a> {
    lines: Vec<Line<'a>>,
}

impl<'a> ConversationView<'a> {
    /// View over already wrapped lines
    #[must_use]
    pub fn new(lines: Vec<Line<'a>>) -> Self {
        Self { lines }
    }
}

impl StatefulWidget for ConversationView<'_> {
    type State = ConversationState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let height = usize::from(area.height);
        state.total_lines = self.lines.len();
        state.viewport = height;

        // Clamp scroll
        state.scroll_offset = state.scroll_offset.min(state.max_scroll());

        let visible_end = state.total_lines - state.scroll_offset;
        let visible_start = visible_end.saturating_sub(height);

        for (row, line) in (area.y..).zip(&self.lines[visible_start..visible_end]) {
            buf.set_line(area.x, row, line, area.width);
        }
    }
}
