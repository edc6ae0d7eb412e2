//! In-memory note repository for ephemeral sessions and tests.

use super::{ensure_unique_ids, NoteRepository, RepoError, RepoResult};
use crate::model::note::Note;

/// Keeps the last saved note set in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNoteRepository {
    saved: Option<Vec<Note>>,
    save_count: usize,
    fail_saves: bool,
}

impl InMemoryNoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with an already persisted set.
    pub fn with_notes(notes: Vec<Note>) -> Self {
        Self {
            saved: Some(notes),
            ..Self::default()
        }
    }

    /// Makes every subsequent save fail with `RepoError::Unavailable`.
    pub fn set_fail_saves(&mut self, fail: bool) {
        self.fail_saves = fail;
    }

    /// Last successfully saved set, if any.
    pub fn saved(&self) -> Option<&[Note]> {
        self.saved.as_deref()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.save_count
    }
}

impl NoteRepository for InMemoryNoteRepository {
    fn load_notes(&self) -> RepoResult<Option<Vec<Note>>> {
        if let Some(notes) = self.saved.as_ref() {
            ensure_unique_ids(notes)?;
        }
        Ok(self.saved.clone())
    }

    fn save_notes(&mut self, notes: &[Note]) -> RepoResult<()> {
        if self.fail_saves {
            return Err(RepoError::Unavailable(
                "in-memory repository is configured to fail saves".to_string(),
            ));
        }
        self.saved = Some(notes.to_vec());
        self.save_count += 1;
        Ok(())
    }
}
