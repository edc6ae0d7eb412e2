//! Create/edit form state.
//!
//! # Responsibility
//! - Hold in-progress edits for a new or existing note.
//! - Gate submission on non-blank title and content.
//!
//! # Invariants
//! - Submission is impossible while `can_save()` is false; no runtime error
//!   is produced for blank input.
//! - Dropping a form discards its edits; nothing reaches the store until
//!   `submit()` output is applied.

use crate::model::color::{encode, ColorChannels, DisplayColor};
use crate::model::note::{Note, NoteDraft};

/// Result of a successful form submission.
#[derive(Debug, Clone, PartialEq)]
pub enum FormSubmission {
    /// Insert a new note.
    Create(NoteDraft),
    /// Replace an existing note (id and timestamps come from the original).
    Update(Note),
}

/// Editable form backing both "new note" and "edit note" screens.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteForm {
    original: Option<Note>,
    pub title: String,
    pub content: String,
    pub category: String,
    pub color: ColorChannels,
    pub is_pinned: bool,
}

impl NoteForm {
    /// Blank form for a new note with the default color.
    pub fn for_new() -> Self {
        Self::from_draft(None, NoteDraft::default())
    }

    /// Form prefilled from an existing note.
    pub fn for_note(note: &Note) -> Self {
        Self::from_draft(Some(note.clone()), note.to_draft())
    }

    fn from_draft(original: Option<Note>, draft: NoteDraft) -> Self {
        Self {
            original,
            title: draft.title,
            content: draft.content,
            category: draft.category,
            color: draft.color,
            is_pinned: draft.is_pinned,
        }
    }

    /// Whether this form edits an existing note.
    pub fn is_editing(&self) -> bool {
        self.original.is_some()
    }

    /// The note being edited, if any.
    pub fn original(&self) -> Option<&Note> {
        self.original.as_ref()
    }

    pub fn set_display_color(&mut self, color: DisplayColor) {
        self.color = encode(color);
    }

    /// Save is enabled only when trimmed title and trimmed content are
    /// both non-empty.
    pub fn can_save(&self) -> bool {
        !self.title.trim().is_empty() && !self.content.trim().is_empty()
    }

    /// Whether any field differs from the note being edited (or from a
    /// blank form for new notes).
    pub fn is_dirty(&self) -> bool {
        let baseline = self
            .original
            .as_ref()
            .map(Note::to_draft)
            .unwrap_or_default();
        self.to_draft() != baseline
    }

    /// Consumes the form into a store-ready submission.
    ///
    /// Returns `None` while `can_save()` is false.
    pub fn submit(self) -> Option<FormSubmission> {
        if !self.can_save() {
            return None;
        }

        let draft = NoteDraft {
            title: self.title.trim().to_string(),
            content: self.content,
            color: self.color,
            category: self.category.trim().to_string(),
            is_pinned: self.is_pinned,
        };

        Some(match self.original {
            Some(original) => FormSubmission::Update(Note {
                title: draft.title,
                content: draft.content,
                color: draft.color,
                category: draft.category,
                is_pinned: draft.is_pinned,
                ..original
            }),
            None => FormSubmission::Create(draft),
        })
    }

    fn to_draft(&self) -> NoteDraft {
        NoteDraft {
            title: self.title.clone(),
            content: self.content.clone(),
            color: self.color,
            category: self.category.clone(),
            is_pinned: self.is_pinned,
        }
    }
}
