//! Participant use-case service.
//!
//! # Responsibility
//! - Provide create/list/update/delete entry points over a `ParticipantStore`.
//! - Apply field-resolution precedence and existence checks.
//!
//! # Invariants
//! - Every call re-reads the full store; nothing is cached between calls.
//! - Create appends; update and delete rewrite the whole store.
//! - Full update never backfills from stored values; partial update does.
//! - Record order is preserved across update and delete.
//!
//! The service performs no locking. Callers sharing one service across
//! threads must serialize access (the HTTP transport holds it in a mutex).

use crate::model::participant::{Participant, ParticipantId};
use crate::service::resolve::ParticipantInput;
use crate::store::{ParticipantStore, StoreError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Field names reported by `ServiceError::MissingField`.
pub const FIELD_NAME: &str = "name";
pub const FIELD_TEAM_NAME: &str = "team_name";

/// Service error for participant use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Caller-supplied data did not resolve to the listed fields.
    MissingField(Vec<&'static str>),
    /// No participant has this id.
    NotFound(ParticipantId),
    /// Persistence-layer failure.
    Store(StoreError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(fields) => write!(f, "missing field(s): {}", fields.join(", ")),
            Self::NotFound(id) => write!(f, "participant not found: {id}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Result of a list/lookup call.
///
/// A lookup miss is a regular outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    All(Vec<Participant>),
    Found(Participant),
    NotFound(ParticipantId),
}

/// Participant service facade over store implementations.
pub struct ParticipantService<S: ParticipantStore> {
    store: S,
}

impl<S: ParticipantStore> ParticipantService<S> {
    /// Creates a service using the provided store implementation.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Creates one participant with a fresh id.
    ///
    /// Field values are stored verbatim apart from outer trimming; an inner
    /// newline splits the stored line (see `store::codec`), so the returned
    /// record can differ from what a later `list` reads back.
    ///
    /// # Errors
    /// - `MissingField` when `name` or `team_name` does not resolve.
    pub fn create(&self, input: &ParticipantInput) -> ServiceResult<Participant> {
        let (name, team_name) = input.resolve();
        let (name, team_name) = require_fields(name, team_name)?;

        let existing = self.store.load_all()?;
        let mut participant = Participant::new(name, team_name);
        while existing.iter().any(|item| item.id == participant.id) {
            warn!(
                "event=participant_create module=service status=id_collision id={}",
                participant.id
            );
            participant = Participant::new(participant.name, participant.team_name);
        }

        self.store.append_one(&participant)?;
        info!(
            "event=participant_create module=service status=ok id={}",
            participant.id
        );
        Ok(participant)
    }

    /// Lists every participant, or looks one up when `id` is given.
    pub fn list(&self, id: Option<&str>) -> ServiceResult<Listing> {
        let participants = self.store.load_all()?;
        let Some(id) = id else {
            return Ok(Listing::All(participants));
        };

        match participants.into_iter().find(|item| item.id == id) {
            Some(participant) => Ok(Listing::Found(participant)),
            None => {
                info!("event=participant_lookup module=service status=not_found id={id}");
                Ok(Listing::NotFound(id.to_string()))
            }
        }
    }

    /// Replaces both mutable fields of an existing participant.
    ///
    /// # Errors
    /// - `NotFound` when `id` is absent.
    /// - `MissingField` when either field does not resolve; stored values
    ///   are never used as fallback.
    pub fn full_update(&self, id: &str, input: &ParticipantInput) -> ServiceResult<Participant> {
        let mut participants = self.store.load_all()?;
        let index = locate(&participants, id)?;

        let (name, team_name) = input.resolve();
        let (name, team_name) = require_fields(name, team_name)?;

        let participant = &mut participants[index];
        participant.name = name;
        participant.team_name = team_name;
        let updated = participant.clone();

        self.store.rewrite_all(&participants)?;
        info!("event=participant_update module=service status=ok mode=full id={id}");
        Ok(updated)
    }

    /// Replaces only the supplied fields of an existing participant.
    ///
    /// # Errors
    /// - `NotFound` when `id` is absent.
    pub fn partial_update(
        &self,
        id: &str,
        input: &ParticipantInput,
    ) -> ServiceResult<Participant> {
        let mut participants = self.store.load_all()?;
        let index = locate(&participants, id)?;

        let (name, team_name) = input.resolve_over(&participants[index]);
        let participant = &mut participants[index];
        participant.name = name;
        participant.team_name = team_name;
        let updated = participant.clone();

        self.store.rewrite_all(&participants)?;
        info!("event=participant_update module=service status=ok mode=partial id={id}");
        Ok(updated)
    }

    /// Removes one participant and returns the removed record.
    ///
    /// # Errors
    /// - `NotFound` when `id` is absent.
    pub fn delete(&self, id: &str) -> ServiceResult<Participant> {
        let mut participants = self.store.load_all()?;
        let index = locate(&participants, id)?;

        let removed = participants.remove(index);
        self.store.rewrite_all(&participants)?;
        info!("event=participant_delete module=service status=ok id={id}");
        Ok(removed)
    }
}

fn locate(participants: &[Participant], id: &str) -> ServiceResult<usize> {
    participants
        .iter()
        .position(|item| item.id == id)
        .ok_or_else(|| {
            info!("event=participant_locate module=service status=not_found id={id}");
            ServiceError::NotFound(id.to_string())
        })
}

fn require_fields(
    name: Option<String>,
    team_name: Option<String>,
) -> ServiceResult<(String, String)> {
    match (name, team_name) {
        (Some(name), Some(team_name)) => Ok((name, team_name)),
        (name, team_name) => {
            let mut missing = Vec::new();
            if name.is_none() {
                missing.push(FIELD_NAME);
            }
            if team_name.is_none() {
                missing.push(FIELD_TEAM_NAME);
            }
            Err(ServiceError::MissingField(missing))
        }
    }
}
