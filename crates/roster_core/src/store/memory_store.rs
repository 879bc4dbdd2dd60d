//! In-memory participant store.
//!
//! Holds the encoded text instead of decoded records, so tests run through
//! the same codec and malformed-line handling as the file store.

use crate::model::participant::Participant;
use crate::store::{codec, decode_lines, ParticipantStore, StoreResult};
use std::sync::{Mutex, MutexGuard};

/// Roster store kept in process memory.
#[derive(Debug, Default)]
pub struct InMemoryParticipantStore {
    content: Mutex<String>,
}

impl InMemoryParticipantStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with raw store text.
    pub fn from_content(content: impl Into<String>) -> Self {
        Self {
            content: Mutex::new(content.into()),
        }
    }

    /// Returns the raw store text, as the file store would hold it.
    pub fn content(&self) -> String {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, String> {
        // A poisoned lock still holds consistent text: writes replace or
        // extend the string in one step.
        self.content
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ParticipantStore for InMemoryParticipantStore {
    fn load_all(&self) -> StoreResult<Vec<Participant>> {
        decode_lines(&self.lock())
    }

    fn append_one(&self, participant: &Participant) -> StoreResult<()> {
        self.lock().push_str(&codec::encode(participant));
        Ok(())
    }

    fn rewrite_all(&self, participants: &[Participant]) -> StoreResult<()> {
        let encoded: String = participants.iter().map(codec::encode).collect();
        *self.lock() = encoded;
        Ok(())
    }
}
