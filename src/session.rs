//! # Editor Sessions
//!
//! One draft plus the editor's view state. Saving is split in two so the
//! caller can release its lock while the store call runs:
//!
//! ```
//! use cardsmith::draft::CardDraft;
//! use cardsmith::error::CardError;
//! use cardsmith::session::EditorSession;
//!
//! let mut session = EditorSession::new(CardDraft::default());
//! let snapshot = session.begin_save().unwrap();
//! assert!(matches!(session.begin_save(), Err(CardError::SaveInProgress)));
//! session.finish_save(Some("card-1"));
//! assert_eq!(session.draft.card_id.as_deref(), Some("card-1"));
//! # let _ = snapshot;
//! ```

use serde::Serialize;
use std::time::Instant;

use crate::draft::{CardDraft, EditMode, Side};
use crate::error::CardError;

/// Sessions idle longer than this are dropped.
pub const SESSION_EXPIRATION_SECS: u64 = 3600;

#[derive(Debug, Clone)]
pub struct EditorSession {
    pub draft: CardDraft,
    /// Face shown in the editor.
    pub side: Side,
    pub mode: EditMode,
    saving: bool,
    pub last_accessed: Instant,
}

/// Serializable view of a session's editor state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ViewState {
    pub side: Side,
    pub mode: EditMode,
    pub saving: bool,
}

impl EditorSession {
    pub fn new(draft: CardDraft) -> Self {
        Self {
            draft,
            side: Side::default(),
            mode: EditMode::default(),
            saving: false,
            last_accessed: Instant::now(),
        }
    }

    /// Mark the session as recently used.
    pub fn touch(&mut self) {
        self.last_accessed = Instant::now();
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn view(&self) -> ViewState {
        ViewState {
            side: self.side,
            mode: self.mode,
            saving: self.saving,
        }
    }

    /// Set the busy flag and return the draft to persist.
    pub fn begin_save(&mut self) -> Result<CardDraft, CardError> {
        if self.saving {
            return Err(CardError::SaveInProgress);
        }
        self.saving = true;
        Ok(self.draft.clone())
    }

    /// Clear the busy flag. `saved_id` is the stored card's id on success;
    /// a failed save passes `None` and leaves the draft as it was.
    pub fn finish_save(&mut self, saved_id: Option<&str>) {
        self.saving = false;
        if let Some(id) = saved_id {
            self.draft.card_id = Some(id.to_string());
        }
    }
}
