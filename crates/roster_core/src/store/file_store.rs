//! Flat-file participant store.
//!
//! # Responsibility
//! - Persist the roster as one encoded line per participant.
//! - Keep creation append-only and mutation a full rewrite.
//!
//! # Invariants
//! - A missing file reads as an empty roster.
//! - `rewrite_all` truncates before writing; it is not crash-atomic.
//! - No locking happens here; concurrent writers can interleave.

use crate::model::participant::Participant;
use crate::store::{codec, decode_bytes, ParticipantStore, StoreResult};
use log::debug;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Roster store backed by a text file at a fixed path.
#[derive(Debug, Clone)]
pub struct FileParticipantStore {
    path: PathBuf,
}

impl FileParticipantStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent_dir(&self) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}

impl ParticipantStore for FileParticipantStore {
    fn load_all(&self) -> StoreResult<Vec<Participant>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(
                    "event=store_load module=store status=missing path={}",
                    self.path.display()
                );
                return Ok(Vec::new());
            }
            Err(err) => return Err(err.into()),
        };

        let participants = decode_bytes(bytes)?;
        debug!(
            "event=store_load module=store status=ok records={}",
            participants.len()
        );
        Ok(participants)
    }

    fn append_one(&self, participant: &Participant) -> StoreResult<()> {
        self.ensure_parent_dir()?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(codec::encode(participant).as_bytes())?;
        file.flush()?;
        debug!(
            "event=store_append module=store status=ok id={}",
            participant.id
        );
        Ok(())
    }

    fn rewrite_all(&self, participants: &[Participant]) -> StoreResult<()> {
        self.ensure_parent_dir()?;
        let mut writer = BufWriter::new(File::create(&self.path)?);
        for participant in participants {
            writer.write_all(codec::encode(participant).as_bytes())?;
        }
        writer.flush()?;
        debug!(
            "event=store_rewrite module=store status=ok records={}",
            participants.len()
        );
        Ok(())
    }
}
