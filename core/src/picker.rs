//! Persona Picker
//!
//! The selection screen's state machine. Choosing a persona does not switch
//! views immediately: the chosen card stays highlighted for a short
//! feedback window, then navigation happens exactly once.
//!
//! ```text
//! Idle ──select(X)──▶ Pending { X } ──timer──▶ navigate to /chat/X
//! ```
//!
//! There is no way back out of `Pending`; further selections are ignored
//! until the navigation fires.

use std::time::Duration;

use crate::persona::PersonaId;
use crate::scheduler::{Scheduler, TimerId};

/// Picker states
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PickerState {
    /// Waiting for a choice
    Idle,
    /// A persona was chosen; navigation fires when the timer does
    Pending {
        /// The chosen persona
        persona: PersonaId,
        /// Feedback timer
        timer: TimerId,
    },
}

/// Selection screen state
#[derive(Clone, Debug)]
pub struct PersonaPicker {
    /// Selectable personas, in card order
    personas: Vec<PersonaId>,
    /// Keyboard cursor
    highlighted: usize,
    /// Selection state
    state: PickerState,
}

impl PersonaPicker {
    /// Create a picker over the given personas
    #[must_use]
    pub fn new(personas: Vec<PersonaId>) -> Self {
        Self {
            personas,
            highlighted: 0,
            state: PickerState::Idle,
        }
    }

    /// Move the cursor down, wrapping at the end
    pub fn highlight_next(&mut self) {
        if self.is_pending() || self.personas.is_empty() {
            return;
        }
        self.highlighted = (self.highlighted + 1) % self.personas.len();
    }

    /// Move the cursor up, wrapping at the start
    pub fn highlight_previous(&mut self) {
        if self.is_pending() || self.personas.is_empty() {
            return;
        }
        self.highlighted = self
            .highlighted
            .checked_sub(1)
            .unwrap_or(self.personas.len() - 1);
    }

    /// Select the persona under the cursor
    pub fn select_highlighted(&mut self, delay: Duration, scheduler: &mut dyn Scheduler) -> bool {
        match self.personas.get(self.highlighted).cloned() {
            Some(id) => self.select(&id, delay, scheduler),
            None => false,
        }
    }

    /// Select the persona on card `index` (zero-based)
    pub fn select_index(
        &mut self,
        index: usize,
        delay: Duration,
        scheduler: &mut dyn Scheduler,
    ) -> bool {
        match self.personas.get(index).cloned() {
            Some(id) => self.select(&id, delay, scheduler),
            None => false,
        }
    }

    /// Choose a persona and start the feedback timer.
    ///
    /// Returns `false` if a selection is already pending or the persona is
    /// not one of the cards.
    pub fn select(
        &mut self,
        persona: &PersonaId,
        delay: Duration,
        scheduler: &mut dyn Scheduler,
    ) -> bool {
        if self.is_pending() {
            tracing::trace!(persona = %persona, "Selection already pending");
            return false;
        }
        let Some(index) = self.personas.iter().position(|p| p == persona) else {
            tracing::trace!(persona = %persona, "Selected persona has no card");
            return false;
        };

        self.highlighted = index;
        let timer = scheduler.after(delay);
        self.state = PickerState::Pending {
            persona: persona.clone(),
            timer,
        };
        tracing::debug!(persona = %persona, "Persona selected");
        true
    }

    /// Handle an elapsed timer; returns where to navigate, at most once per
    /// selection.
    pub fn on_timer(&mut self, timer: TimerId) -> Option<PersonaId> {
        let fired = matches!(
            &self.state,
            PickerState::Pending { timer: pending, .. } if *pending == timer
        );
        if !fired {
            return None;
        }
        match std::mem::replace(&mut self.state, PickerState::Idle) {
            PickerState::Pending { persona, .. } => Some(persona),
            PickerState::Idle => None,
        }
    }

    /// Leave the screen, cancelling a pending navigation
    pub fn close(self, scheduler: &mut dyn Scheduler) {
        if let PickerState::Pending { timer, .. } = self.state {
            scheduler.cancel(timer);
        }
    }

    /// Current state
    #[must_use]
    pub fn state(&self) -> &PickerState {
        &self.state
    }

    /// Whether a selection is waiting to navigate
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self.state, PickerState::Pending { .. })
    }

    /// The persona being navigated to, if any
    #[must_use]
    pub fn pending_persona(&self) -> Option<&PersonaId> {
        match &self.state {
            PickerState::Pending { persona, .. } => Some(persona),
            PickerState::Idle => None,
        }
    }

    /// Index of the highlighted card
    #[must_use]
    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    /// Card order
    #[must_use]
    pub fn personas(&self) -> &[PersonaId] {
        &self.personas
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::VirtualScheduler;
    use pretty_assertions::assert_eq;

    const DELAY: Duration = Duration::from_millis(200);

    fn picker() -> PersonaPicker {
        PersonaPicker::new(vec!["luna".into(), "alex".into()])
    }

    #[test]
    fn test_highlight_wraps() {
        let mut picker = picker();
        assert_eq!(picker.highlighted(), 0);
        picker.highlight_next();
        assert_eq!(picker.highlighted(), 1);
        picker.highlight_next();
        assert_eq!(picker.highlighted(), 0);
        picker.highlight_previous();
        assert_eq!(picker.highlighted(), 1);
    }

    #[test]
    fn test_select_navigates_once_after_delay() {
        let mut scheduler = VirtualScheduler::new();
        let mut picker = picker();

        assert!(picker.select(&"alex".into(), DELAY, &mut scheduler));
        assert_eq!(picker.pending_persona(), Some(&PersonaId::from("alex")));
        assert_eq!(picker.highlighted(), 1);

        scheduler.advance(Duration::from_millis(199));
        assert!(scheduler.due().is_empty());

        scheduler.advance(Duration::from_millis(1));
        let due = scheduler.due();
        assert_eq!(due.len(), 1);
        assert_eq!(picker.on_timer(due[0]), Some(PersonaId::from("alex")));
        // Exactly once
        assert_eq!(picker.on_timer(due[0]), None);
        assert_eq!(picker.state(), &PickerState::Idle);
    }

    #[test]
    fn test_no_second_selection_while_pending() {
        let mut scheduler = VirtualScheduler::new();
        let mut picker = picker();

        assert!(picker.select_highlighted(DELAY, &mut scheduler));
        assert!(!picker.select(&"alex".into(), DELAY, &mut scheduler));
        picker.highlight_next();
        assert_eq!(picker.highlighted(), 0);
        assert_eq!(picker.pending_persona(), Some(&PersonaId::from("luna")));
        assert_eq!(scheduler.pending(), 1);
    }

    #[test]
    fn test_select_unknown_or_out_of_range() {
        let mut scheduler = VirtualScheduler::new();
        let mut picker = picker();
        assert!(!picker.select(&"ghost".into(), DELAY, &mut scheduler));
        assert!(!picker.select_index(5, DELAY, &mut scheduler));
        assert!(picker.select_index(1, DELAY, &mut scheduler));
    }

    #[test]
    fn test_close_cancels_timer() {
        let mut scheduler = VirtualScheduler::new();
        let mut picker = picker();
        picker.select_highlighted(DELAY, &mut scheduler);
        picker.close(&mut scheduler);
        assert_eq!(scheduler.pending(), 0);
    }
}
