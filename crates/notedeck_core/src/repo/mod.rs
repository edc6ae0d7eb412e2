//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the load/save contract the note store persists through.
//! - Isolate file-format details from store orchestration.
//!
//! # Invariants
//! - Loaded note sets are validated: every note passes `Note::validate()`
//!   and ids are unique.
//! - A missing document is not an error; it loads as `None`.

pub mod json_repo;
pub mod memory_repo;

use crate::model::note::{Note, NoteId};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence error for note documents.
#[derive(Debug)]
pub enum RepoError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Json(serde_json::Error),
    DuplicateId(NoteId),
    /// Injected or backend-specific write refusal.
    Unavailable(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "I/O error on `{}`: {source}", path.display()),
            Self::Json(err) => write!(f, "invalid notes document: {err}"),
            Self::DuplicateId(id) => write!(f, "duplicate note id in document: {id}"),
            Self::Unavailable(message) => write!(f, "note storage unavailable: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json(err) => Some(err),
            Self::DuplicateId(_) => None,
            Self::Unavailable(_) => None,
        }
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Storage contract for the whole note set.
pub trait NoteRepository {
    /// Reads the persisted set. Returns `Ok(None)` when nothing was persisted yet.
    fn load_notes(&self) -> RepoResult<Option<Vec<Note>>>;
    /// Replaces the persisted set with `notes`.
    fn save_notes(&mut self, notes: &[Note]) -> RepoResult<()>;
}

impl<R: NoteRepository + ?Sized> NoteRepository for Box<R> {
    fn load_notes(&self) -> RepoResult<Option<Vec<Note>>> {
        (**self).load_notes()
    }

    fn save_notes(&mut self, notes: &[Note]) -> RepoResult<()> {
        (**self).save_notes(notes)
    }
}

/// Rejects note sets that reuse an id.
pub(crate) fn ensure_unique_ids(notes: &[Note]) -> RepoResult<()> {
    let mut seen = HashSet::with_capacity(notes.len());
    for note in notes {
        if !seen.insert(note.id) {
            return Err(RepoError::DuplicateId(note.id));
        }
    }
    Ok(())
}
