//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store calls into roster use-cases.
//! - Keep transport layers decoupled from storage details.

pub mod participant_service;
pub mod resolve;
