//! Participant domain model.
//!
//! # Responsibility
//! - Define the record persisted one-per-line in the roster store.
//! - Generate fresh participant identifiers.
//!
//! # Invariants
//! - `id` is generated once at creation and never changes afterwards.
//! - Stored `name` and `team_name` are non-empty and contain no whitespace.
//!   The line format has no escaping and nothing enforces this: an inner
//!   space leaves an undecodable line, and an inner newline splits one value
//!   into extra records that can carry forged or duplicate ids
//!   (see `store::codec`).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque participant identifier.
///
/// Generated ids are 32 lowercase hex chars, but any whitespace-free token
/// read back from the store is accepted as-is.
pub type ParticipantId = String;

/// One roster entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    pub team_name: String,
}

impl Participant {
    /// Creates a participant with a freshly generated id.
    pub fn new(name: impl Into<String>, team_name: impl Into<String>) -> Self {
        Self::with_id(generate_participant_id(), name, team_name)
    }

    /// Creates a participant with a caller-provided id.
    ///
    /// Used when decoding stored lines and by tests that need fixed ids.
    pub fn with_id(
        id: impl Into<ParticipantId>,
        name: impl Into<String>,
        team_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            team_name: team_name.into(),
        }
    }
}

/// Optional mutable fields of a participant.
///
/// Used for structured payloads as well as discrete form/query fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantFields {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub team_name: Option<String>,
}

impl ParticipantFields {
    pub fn new(name: Option<&str>, team_name: Option<&str>) -> Self {
        Self {
            name: name.map(str::to_string),
            team_name: team_name.map(str::to_string),
        }
    }

    /// Returns whether no field carries a non-blank value.
    pub fn is_empty(&self) -> bool {
        non_blank(self.name.as_deref()).is_none() && non_blank(self.team_name.as_deref()).is_none()
    }
}

/// Returns a fresh, collision-improbable participant id.
pub fn generate_participant_id() -> ParticipantId {
    Uuid::new_v4().simple().to_string()
}

pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
