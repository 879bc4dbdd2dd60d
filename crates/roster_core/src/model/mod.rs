//! Domain model for the participant roster.
//!
//! # Responsibility
//! - Define the canonical participant record shared by store and service.
//! - Define the optional-field shapes callers use to describe a candidate.
//!
//! # Invariants
//! - Every participant is identified by a system-generated `ParticipantId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod participant;
