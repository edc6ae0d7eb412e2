//! Note store use-case service.
//!
//! # Responsibility
//! - Own the working set of notes, the filter text and the display mode.
//! - Apply create/update/delete/pin mutations and flush after each one.
//! - Derive the filtered and sorted projection rendered by views.
//!
//! # Invariants
//! - Ids are unique within the working set.
//! - `created_at` never changes after creation.
//! - Every mutation strictly advances the touched note's `last_modified_at`.
//! - A failed flush rolls the in-memory mutation back.
//! - Visible order: pinned first, then `last_modified_at DESC`, stable on ties.

use crate::clock::Clock;
use crate::model::note::{Note, NoteDraft, NoteId, NoteValidationError};
use crate::repo::{NoteRepository, RepoError};
use log::{info, warn};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store error for note use-cases.
#[derive(Debug)]
pub enum StoreError {
    /// Target note does not exist.
    NotFound(NoteId),
    /// Note violates a model invariant.
    Validation(NoteValidationError),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "note not found: {id}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<NoteValidationError> for StoreError {
    fn from(value: NoteValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Board layout preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    Grid,
    List,
}

impl DisplayMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Grid => Self::List,
            Self::List => Self::Grid,
        }
    }
}

/// Working set of notes plus view state, persisted through `R`.
pub struct NoteStore<R: NoteRepository, C: Clock> {
    repo: R,
    clock: C,
    notes: Vec<Note>,
    filter: String,
    display_mode: DisplayMode,
}

impl<R: NoteRepository, C: Clock> NoteStore<R, C> {
    /// Loads persisted notes, starting empty when the document is missing
    /// or cannot be read.
    pub fn load(repo: R, clock: C) -> Self {
        let notes = match repo.load_notes() {
            Ok(Some(notes)) => {
                info!(
                    "event=store_load module=store status=ok count={}",
                    notes.len()
                );
                notes
            }
            Ok(None) => {
                info!("event=store_load module=store status=ok count=0 source=absent");
                Vec::new()
            }
            Err(err) => {
                warn!(
                    "event=store_load module=store status=fallback_empty error={}",
                    err
                );
                Vec::new()
            }
        };

        Self {
            repo,
            clock,
            notes,
            filter: String::new(),
            display_mode: DisplayMode::default(),
        }
    }

    /// Persists the current working set.
    pub fn save(&mut self) -> StoreResult<()> {
        self.repo.save_notes(&self.notes)?;
        Ok(())
    }

    /// Inserts a new note built from `draft` with a fresh id.
    pub fn add(&mut self, draft: NoteDraft) -> StoreResult<Note> {
        let note = Note::from_draft(draft, self.clock.now_ms());
        note.validate()?;

        self.notes.push(note.clone());
        if let Err(err) = self.save() {
            self.notes.pop();
            return Err(err);
        }

        info!("event=note_add module=store status=ok id={}", note.id);
        Ok(note)
    }

    /// Replaces the stored note with the same id.
    ///
    /// `created_at` is kept from the stored note; `last_modified_at` is
    /// stamped with the current time.
    pub fn update(&mut self, note: Note) -> StoreResult<Note> {
        let index = self.index_of(note.id)?;
        let previous = self.notes[index].clone();

        let mut updated = note;
        updated.created_at = previous.created_at;
        updated.last_modified_at = self.next_timestamp(&previous);
        updated.validate()?;

        self.commit_replace(index, previous, updated, "note_update")
    }

    /// Removes a note by id and returns it.
    pub fn delete(&mut self, id: NoteId) -> StoreResult<Note> {
        let index = self.index_of(id)?;
        let removed = self.notes.remove(index);
        if let Err(err) = self.save() {
            self.notes.insert(index, removed);
            return Err(err);
        }

        info!("event=note_delete module=store status=ok id={}", id);
        Ok(removed)
    }

    /// Flips the pinned flag and stamps `last_modified_at`.
    pub fn toggle_pin(&mut self, id: NoteId) -> StoreResult<Note> {
        let index = self.index_of(id)?;
        let previous = self.notes[index].clone();

        let mut updated = previous.clone();
        updated.is_pinned = !previous.is_pinned;
        updated.last_modified_at = self.next_timestamp(&previous);

        self.commit_replace(index, previous, updated, "note_toggle_pin")
    }

    /// Returns notes matching `filter_text`, pinned first, newest first.
    ///
    /// An empty filter matches everything. Otherwise a note matches when the
    /// filter, exactly as given, is a case-insensitive substring of its
    /// title, content or category.
    pub fn filtered_and_sorted(&self, filter_text: &str) -> Vec<&Note> {
        filter_and_sort(&self.notes, filter_text)
    }

    /// `filtered_and_sorted` applied to the stored filter text.
    pub fn visible_notes(&self) -> Vec<&Note> {
        self.filtered_and_sorted(&self.filter)
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    /// Resolves a full id or unique id prefix (case-insensitive hex).
    pub fn find_by_prefix(&self, prefix: &str) -> Option<&Note> {
        let needle = prefix.trim().to_ascii_lowercase();
        if needle.is_empty() {
            return None;
        }
        let mut matches = self
            .notes
            .iter()
            .filter(|note| note.id.to_string().starts_with(&needle));
        let first = matches.next()?;
        match matches.next() {
            Some(_) => None,
            None => Some(first),
        }
    }

    /// Raw working set in storage order.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        self.display_mode = mode;
    }

    pub fn toggle_display_mode(&mut self) -> DisplayMode {
        self.display_mode = self.display_mode.toggled();
        self.display_mode
    }

    /// Distinct non-empty categories, deduplicated case-insensitively and
    /// sorted. The first spelling seen wins.
    pub fn categories(&self) -> Vec<String> {
        let mut unique: BTreeMap<String, String> = BTreeMap::new();
        for note in &self.notes {
            let trimmed = note.category.trim();
            if trimmed.is_empty() {
                continue;
            }
            unique
                .entry(trimmed.to_lowercase())
                .or_insert_with(|| trimmed.to_string());
        }
        unique.into_values().collect()
    }

    /// Borrows the underlying repository.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn repository_mut(&mut self) -> &mut R {
        &mut self.repo
    }

    fn index_of(&self, id: NoteId) -> StoreResult<usize> {
        self.notes
            .iter()
            .position(|note| note.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    // Why: two mutations inside one clock tick must still advance
    // `last_modified_at`, or recency order could not tell them apart.
    fn next_timestamp(&self, previous: &Note) -> i64 {
        self.clock
            .now_ms()
            .max(previous.last_modified_at.saturating_add(1))
    }

    fn commit_replace(
        &mut self,
        index: usize,
        previous: Note,
        updated: Note,
        event: &'static str,
    ) -> StoreResult<Note> {
        self.notes[index] = updated.clone();
        if let Err(err) = self.save() {
            // Why: memory must match what is on disk after a failed flush.
            self.notes[index] = previous;
            return Err(err);
        }

        info!("event={} module=store status=ok id={}", event, updated.id);
        Ok(updated)
    }
}

/// Filters `notes` by `filter_text` and orders them for display.
pub fn filter_and_sort<'a>(notes: &'a [Note], filter_text: &str) -> Vec<&'a Note> {
    let needle = filter_text.to_lowercase();
    let mut visible: Vec<&Note> = notes
        .iter()
        .filter(|note| filter_text.is_empty() || note.matches_lowercase(&needle))
        .collect();

    // `sort_by` is stable, so equal keys keep storage order.
    visible.sort_by(|left, right| {
        right
            .is_pinned
            .cmp(&left.is_pinned)
            .then_with(|| right.last_modified_at.cmp(&left.last_modified_at))
    });
    visible
}
