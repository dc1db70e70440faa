//! Key Bindings
//!
//! Translates terminal key presses into conductor events or local view
//! actions. The mapping depends only on which screen is showing.
//!
//! | Screen    | Keys                                | Action                  |
//! |-----------|-------------------------------------|-------------------------|
//! | Selection | Up / k / Shift+Tab                  | highlight previous      |
//! | Selection | Down / j / Tab                      | highlight next          |
//! | Selection | Enter / Space                       | select highlighted      |
//! | Selection | 1-9                                 | select card directly    |
//! | Selection | Esc / q / Ctrl+C                    | quit                    |
//! | Chat      | printable keys, Backspace           | edit the draft          |
//! | Chat      | Enter                               | send                    |
//! | Chat      | Alt+Enter / Shift+Enter             | newline in the draft    |
//! | Chat      | Esc                                 | back to selection       |
//! | Chat      | PgUp / PgDn, Ctrl+Home / Ctrl+End   | scroll history          |
//! | Chat      | Ctrl+C                              | quit                    |

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use parlor_core::{ComposerKey, SurfaceEvent};

/// Which screen keys are being read for
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyContext {
    /// Persona selection
    Selection,
    /// Chat with a persona
    Chat,
}

/// What a key press means
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Forward to the conductor
    Surface(SurfaceEvent),
    /// Scroll history up one page
    PageUp,
    /// Scroll history down one page
    PageDown,
    /// Scroll to the oldest message
    ScrollTop,
    /// Scroll to the newest message
    ScrollBottom,
    /// Nothing bound
    None,
}

impl From<SurfaceEvent> for Action {
    fn from(event: SurfaceEvent) -> Self {
        Action::Surface(event)
    }
}

/// Map a key press for the given screen
#[must_use]
pub fn map_key(context: KeyContext, key: KeyEvent) -> Action {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        return SurfaceEvent::QuitRequested.into();
    }

    match context {
        KeyContext::Selection => map_selection_key(key),
        KeyContext::Chat => map_chat_key(key, ctrl),
    }
}

fn map_selection_key(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Up | KeyCode::BackTab | KeyCode::Char('k') => {
            SurfaceEvent::HighlightPrevious.into()
        }
        KeyCode::Down | KeyCode::Tab | KeyCode::Char('j') => SurfaceEvent::HighlightNext.into(),
        KeyCode::Enter | KeyCode::Char(' ') => SurfaceEvent::SelectHighlighted.into(),
        KeyCode::Char(c @ '1'..='9') => {
            let index = (c as usize) - ('1' as usize);
            SurfaceEvent::SelectIndex { index }.into()
        }
        KeyCode::Esc | KeyCode::Char('q') => SurfaceEvent::QuitRequested.into(),
        _ => Action::None,
    }
}

fn map_chat_key(key: KeyEvent, ctrl: bool) -> Action {
    match key.code {
        KeyCode::Esc => SurfaceEvent::Back.into(),

        KeyCode::Enter => {
            let newline = key
                .modifiers
                .intersects(KeyModifiers::ALT | KeyModifiers::SHIFT);
            SurfaceEvent::Composer(ComposerKey::Enter { newline }).into()
        }
        KeyCode::Backspace => SurfaceEvent::Composer(ComposerKey::Backspace).into(),

        KeyCode::PageUp => Action::PageUp,
        KeyCode::PageDown => Action::PageDown,
        KeyCode::Home if ctrl => Action::ScrollTop,
        KeyCode::End if ctrl => Action::ScrollBottom,

        KeyCode::Char(c) if !ctrl => SurfaceEvent::Composer(ComposerKey::Char(c)).into(),
        _ => Action::None,
    }
}
