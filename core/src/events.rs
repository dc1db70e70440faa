//! Surface Events
//!
//! Events sent from UI surfaces to the Conductor. Surfaces only report what
//! the user did; the Conductor decides what it means for the current
//! screen. Events that make no sense for the active screen are dropped.

use serde::{Deserialize, Serialize};

use crate::composer::ComposerKey;
use crate::persona::PersonaId;

/// Events from UI Surface to Conductor
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceEvent {
    // ============================================
    // Selection Screen
    // ============================================
    /// Move the picker cursor down
    HighlightNext,

    /// Move the picker cursor up
    HighlightPrevious,

    /// Choose the persona under the cursor
    SelectHighlighted,

    /// Choose the persona on card `index` (zero-based)
    SelectIndex {
        /// Card position
        index: usize,
    },

    /// Choose a persona by id
    SelectPersona {
        /// The persona to chat with
        persona_id: PersonaId,
    },

    // ============================================
    // Chat Screen
    // ============================================
    /// A key press for the message composer
    Composer(ComposerKey),

    /// Leave the chat and return to the selection screen
    Back,

    // ============================================
    // Application
    // ============================================
    /// Go to an address (`/` or `/chat/{id}`)
    Navigate {
        /// Target address
        path: String,
    },

    /// User wants to exit
    QuitRequested,
}
