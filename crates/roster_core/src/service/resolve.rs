//! Candidate field resolution.
//!
//! A request can describe a participant through a structured payload,
//! through discrete fields, and through an alternate discrete source such as
//! a query string. Each field is resolved independently by taking the first
//! non-blank candidate in this order:
//!
//! 1. structured payload
//! 2. primary discrete value
//! 3. alternate discrete value
//! 4. existing stored value (partial updates only)

use crate::model::participant::{non_blank, Participant, ParticipantFields};

/// Everything a caller supplied for one participant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParticipantInput {
    pub payload: Option<ParticipantFields>,
    pub discrete: ParticipantFields,
    pub alternate: ParticipantFields,
}

impl ParticipantInput {
    /// Input carrying only a structured payload.
    pub fn from_payload(payload: ParticipantFields) -> Self {
        Self {
            payload: Some(payload),
            ..Self::default()
        }
    }

    /// Input carrying only primary discrete fields.
    pub fn from_discrete(name: Option<&str>, team_name: Option<&str>) -> Self {
        Self {
            discrete: ParticipantFields::new(name, team_name),
            ..Self::default()
        }
    }

    /// Resolves both fields without any stored fallback.
    ///
    /// Unresolved fields come back as `None`.
    pub fn resolve(&self) -> (Option<String>, Option<String>) {
        (
            resolve_field(
                self.payload.as_ref().and_then(|payload| payload.name.as_deref()),
                self.discrete.name.as_deref(),
                self.alternate.name.as_deref(),
                None,
            ),
            resolve_field(
                self.payload
                    .as_ref()
                    .and_then(|payload| payload.team_name.as_deref()),
                self.discrete.team_name.as_deref(),
                self.alternate.team_name.as_deref(),
                None,
            ),
        )
    }

    /// Resolves both fields, backfilling from `existing`.
    pub fn resolve_over(&self, existing: &Participant) -> (String, String) {
        let name = resolve_field(
            self.payload.as_ref().and_then(|payload| payload.name.as_deref()),
            self.discrete.name.as_deref(),
            self.alternate.name.as_deref(),
            Some(existing.name.as_str()),
        );
        let team_name = resolve_field(
            self.payload
                .as_ref()
                .and_then(|payload| payload.team_name.as_deref()),
            self.discrete.team_name.as_deref(),
            self.alternate.team_name.as_deref(),
            Some(existing.team_name.as_str()),
        );
        (
            name.unwrap_or_else(|| existing.name.clone()),
            team_name.unwrap_or_else(|| existing.team_name.clone()),
        )
    }
}

/// Returns the first non-blank candidate, trimmed.
pub fn resolve_field(
    payload: Option<&str>,
    primary: Option<&str>,
    alternate: Option<&str>,
    existing: Option<&str>,
) -> Option<String> {
    non_blank(payload)
        .or_else(|| non_blank(primary))
        .or_else(|| non_blank(alternate))
        .or_else(|| non_blank(existing))
        .map(str::to_string)
}
