//! JSON file note repository.
//!
//! # Responsibility
//! - Persist the full note set as one pretty-printed JSON array.
//! - Read it back with invariant checks applied per note.
//!
//! # Invariants
//! - Writes go to a sibling temp file that is flushed to disk before being
//!   renamed over the target, so readers never observe a half-written
//!   document, even after a crash.
//! - Parent directories are created on first save.

use super::{ensure_unique_ids, NoteRepository, RepoError, RepoResult};
use crate::model::note::Note;
use log::{error, info};
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

const TEMP_SUFFIX: &str = "tmp";

/// Note repository backed by one JSON document on disk.
#[derive(Debug, Clone)]
pub struct JsonFileNoteRepository {
    path: PathBuf,
}

impl JsonFileNoteRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the document path.
    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|value| value.to_os_string())
            .unwrap_or_default();
        name.push(".");
        name.push(TEMP_SUFFIX);
        self.path.with_file_name(name)
    }
}

impl NoteRepository for JsonFileNoteRepository {
    fn load_notes(&self) -> RepoResult<Option<Vec<Note>>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(RepoError::Io {
                    path: self.path.clone(),
                    source: err,
                })
            }
        };

        let notes: Vec<Note> = serde_json::from_str(&raw)?;
        ensure_unique_ids(&notes)?;
        Ok(Some(notes))
    }

    fn save_notes(&mut self, notes: &[Note]) -> RepoResult<()> {
        let started_at = Instant::now();
        let result = write_document(&self.path, &self.temp_path(), notes);
        match &result {
            Ok(()) => info!(
                "event=notes_save module=repo status=ok count={} duration_ms={}",
                notes.len(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=notes_save module=repo status=error count={} duration_ms={} error={}",
                notes.len(),
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }
}

fn write_document(path: &Path, temp_path: &Path, notes: &[Note]) -> RepoResult<()> {
    let io_err = |source| RepoError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let mut body = serde_json::to_string_pretty(notes)?;
    body.push('\n');
    write_synced(temp_path, body.as_bytes()).map_err(io_err)?;
    fs::rename(temp_path, path).map_err(|err| {
        let _ = fs::remove_file(temp_path);
        io_err(err)
    })
}

// Why: without `sync_all` the rename may reach disk before the data, leaving
// an empty target after a power loss.
fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

#[cfg(test)]
mod tests {
    use super::write_synced;
    use std::fs;

    #[test]
    fn synced_write_replaces_previous_content() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("notes.json.tmp");
        fs::write(&path, "a much longer stale body").expect("seed file");

        write_synced(&path, b"[]\n").expect("synced write");
        assert_eq!(fs::read_to_string(&path).expect("read back"), "[]\n");
    }
}
