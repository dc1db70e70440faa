//! Message Composer
//!
//! The text field at the bottom of the chat. It holds the draft, trims it
//! on submit, and refuses input while the conversation is waiting for a
//! reply. Empty drafts are dropped silently: there is no validation error,
//! the composer just keeps what it has.

use serde::{Deserialize, Serialize};

const DEFAULT_PLACEHOLDER: &str = "Type your message...";

/// Surface-agnostic key presses the composer understands
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComposerKey {
    /// A printable character
    Char(char),
    /// The confirmation key; `newline` is set when a modifier was held
    Enter {
        /// Insert a line break instead of submitting
        newline: bool,
    },
    /// Delete the last character
    Backspace,
}

/// What a key press did to the composer
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ComposerOutcome {
    /// The draft changed
    Edited,
    /// The trimmed draft was submitted and the field cleared
    Submitted(String),
    /// Nothing happened (disabled, or empty submit)
    Ignored,
}

/// Draft text plus the disabled flag
#[derive(Clone, Debug, Default)]
pub struct Composer {
    buffer: String,
    disabled: bool,
    placeholder: Option<String>,
}

impl Composer {
    /// Create an empty, enabled composer
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom placeholder
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: ComposerKey) -> ComposerOutcome {
        match key {
            ComposerKey::Enter { newline: false } => match self.submit() {
                Some(text) => ComposerOutcome::Submitted(text),
                None => ComposerOutcome::Ignored,
            },
            ComposerKey::Enter { newline: true } => self.insert_char('\n'),
            ComposerKey::Char(c) => self.insert_char(c),
            ComposerKey::Backspace => self.backspace(),
        }
    }

    /// Append a character to the draft
    pub fn insert_char(&mut self, c: char) -> ComposerOutcome {
        if self.disabled {
            return ComposerOutcome::Ignored;
        }
        self.buffer.push(c);
        ComposerOutcome::Edited
    }

    /// Remove the last character of the draft
    pub fn backspace(&mut self) -> ComposerOutcome {
        if self.disabled || self.buffer.pop().is_none() {
            return ComposerOutcome::Ignored;
        }
        ComposerOutcome::Edited
    }

    /// Drop the draft
    pub fn clear(&mut self) {
        if !self.disabled {
            self.buffer.clear();
        }
    }

    /// Submit the draft.
    ///
    /// Returns the trimmed text and clears the field, or `None` when the
    /// trimmed draft is empty or the composer is disabled.
    pub fn submit(&mut self) -> Option<String> {
        if self.disabled {
            return None;
        }
        let trimmed = self.buffer.trim();
        if trimmed.is_empty() {
            return None;
        }
        let text = trimmed.to_string();
        self.clear();
        Some(text)
    }

    /// Enable or disable input
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Whether input is refused
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Current draft
    #[must_use]
    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Whether submitting now would send something
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.disabled && !self.buffer.trim().is_empty()
    }

    /// Placeholder shown while the draft is empty
    #[must_use]
    pub fn placeholder(&self) -> &str {
        self.placeholder.as_deref().unwrap_or(DEFAULT_PLACEHOLDER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn type_text(composer: &mut Composer, text: &str) {
        for c in text.chars() {
            composer.handle_key(ComposerKey::Char(c));
        }
    }

    #[test]
    fn test_submit_trims_and_clears() {
        let mut composer = Composer::new();
        type_text(&mut composer, "  Hello  ");
        assert_eq!(
            composer.handle_key(ComposerKey::Enter { newline: false }),
            ComposerOutcome::Submitted("Hello".to_string())
        );
        assert_eq!(composer.text(), "");
    }

    #[test]
    fn test_whitespace_only_is_ignored() {
        let mut composer = Composer::new();
        type_text(&mut composer, "   ");
        assert_eq!(composer.submit(), None);
        // The draft is left alone
        assert_eq!(composer.text(), "   ");
        assert!(!composer.is_disabled());
    }

    #[test]
    fn test_empty_submit_is_ignored() {
        let mut composer = Composer::new();
        assert_eq!(
            composer.handle_key(ComposerKey::Enter { newline: false }),
            ComposerOutcome::Ignored
        );
    }

    #[test]
    fn test_disabled_refuses_everything() {
        let mut composer = Composer::new();
        type_text(&mut composer, "draft");
        composer.set_disabled(true);

        assert_eq!(composer.handle_key(ComposerKey::Char('x')), ComposerOutcome::Ignored);
        assert_eq!(composer.handle_key(ComposerKey::Backspace), ComposerOutcome::Ignored);
        assert_eq!(composer.submit(), None);
        assert_eq!(composer.text(), "draft");
        assert!(!composer.can_submit());

        composer.set_disabled(false);
        assert_eq!(composer.submit(), Some("draft".to_string()));
    }

    #[test]
    fn test_modifier_enter_inserts_newline() {
        let mut composer = Composer::new();
        type_text(&mut composer, "line one");
        composer.handle_key(ComposerKey::Enter { newline: true });
        type_text(&mut composer, "line two");
        assert_eq!(composer.text(), "line one\nline two");
        assert_eq!(composer.submit(), Some("line one\nline two".to_string()));
    }

    #[test]
    fn test_backspace() {
        let mut composer = Composer::new();
        type_text(&mut composer, "hey");
        assert_eq!(composer.backspace(), ComposerOutcome::Edited);
        assert_eq!(composer.text(), "he");
        composer.clear();
        assert_eq!(composer.handle_key(ComposerKey::Backspace), ComposerOutcome::Ignored);
    }

    #[test]
    fn test_clear_keeps_draft_while_disabled() {
        let mut composer = Composer::new();
        assert_eq!(composer.insert_char('a'), ComposerOutcome::Edited);
        composer.set_disabled(true);
        composer.clear();
        assert_eq!(composer.insert_char('b'), ComposerOutcome::Ignored);
        assert_eq!(composer.text(), "a");

        composer.set_disabled(false);
        composer.clear();
        assert_eq!(composer.text(), "");
    }

    #[test]
    fn test_placeholder() {
        assert_eq!(Composer::new().placeholder(), "Type your message...");
        let composer = Composer::new().with_placeholder("Message Luna...");
        assert_eq!(composer.placeholder(), "Message Luna...");
    }
}
