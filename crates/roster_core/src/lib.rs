//! Core domain logic for the participant roster.
//! This crate is the single source of truth for roster invariants.

pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::participant::{
    generate_participant_id, Participant, ParticipantFields, ParticipantId,
};
pub use service::participant_service::{
    Listing, ParticipantService, ServiceError, ServiceResult, FIELD_NAME, FIELD_TEAM_NAME,
};
pub use service::resolve::{resolve_field, ParticipantInput};
pub use store::{
    codec, FileParticipantStore, InMemoryParticipantStore, MalformedRecord, ParticipantStore,
    StoreError, StoreResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
