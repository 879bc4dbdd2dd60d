//! Roster persistence: line codec and store implementations.
//!
//! # Responsibility
//! - Define the `ParticipantStore` contract used by the service layer.
//! - Keep the on-disk line format behind the codec boundary.
//!
//! # Invariants
//! - A missing backing store reads as empty; it is created on first write.
//! - Read paths reject malformed lines instead of skipping them; bytes that
//!   are not valid UTF-8 count as a malformed line.
//! - `rewrite_all` is not atomic: a crash mid-rewrite can leave a partially
//!   written store. Callers that need mutual exclusion must provide it.

use crate::model::participant::Participant;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod codec;
pub mod file_store;
pub mod memory_store;

pub use codec::MalformedRecord;
pub use file_store::FileParticipantStore;
pub use memory_store::InMemoryParticipantStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store access failure.
#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    MalformedRecord(MalformedRecord),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "store i/o failed: {err}"),
            Self::MalformedRecord(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::MalformedRecord(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<MalformedRecord> for StoreError {
    fn from(value: MalformedRecord) -> Self {
        Self::MalformedRecord(value)
    }
}

/// Persistence contract for the roster.
///
/// Every call observes the full persisted state; implementations keep no
/// cache between calls.
pub trait ParticipantStore {
    /// Loads every record in stored order.
    fn load_all(&self) -> StoreResult<Vec<Participant>>;
    /// Appends one record after the existing ones.
    fn append_one(&self, participant: &Participant) -> StoreResult<()>;
    /// Replaces the stored set with `participants`, in order.
    fn rewrite_all(&self, participants: &[Participant]) -> StoreResult<()>;
}

/// Decodes raw store bytes; invalid UTF-8 is a malformed record, reported
/// at the line holding the first bad byte.
pub(crate) fn decode_bytes(bytes: Vec<u8>) -> StoreResult<Vec<Participant>> {
    match String::from_utf8(bytes) {
        Ok(content) => decode_lines(&content),
        Err(err) => {
            let bytes = err.as_bytes();
            let valid_up_to = err.utf8_error().valid_up_to();
            let line_start = bytes[..valid_up_to]
                .iter()
                .rposition(|byte| *byte == b'\n')
                .map_or(0, |pos| pos + 1);
            let line_end = bytes[valid_up_to..]
                .iter()
                .position(|byte| *byte == b'\n')
                .map_or(bytes.len(), |pos| valid_up_to + pos);
            let line_number = bytes[..line_start]
                .iter()
                .filter(|byte| **byte == b'\n')
                .count()
                + 1;
            Err(StoreError::MalformedRecord(MalformedRecord {
                line_number: Some(line_number),
                line: String::from_utf8_lossy(&bytes[line_start..line_end]).into_owned(),
            }))
        }
    }
}

pub(crate) fn decode_lines(content: &str) -> StoreResult<Vec<Participant>> {
    let mut participants = Vec::new();
    for (index, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let participant = codec::decode(line).map_err(|err| err.at_line(index + 1))?;
        participants.push(participant);
    }
    Ok(participants)
}
