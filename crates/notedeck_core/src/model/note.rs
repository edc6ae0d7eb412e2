//! Note domain model.
//!
//! # Responsibility
//! - Define the canonical note record persisted in the notes document.
//! - Define the editable draft shape produced by the edit form.
//!
//! # Invariants
//! - `id` is stable, non-nil and never reused for another note.
//! - `created_at <= last_modified_at`.
//! - Color channels stay within `[0, 1]`.
//! - Deserialization enforces the same invariants as `Note::validate()`,
//!   except that persisted color channels are clamped rather than rejected.

use crate::model::color::{decode, encode, ColorChannels};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for every note.
pub type NoteId = Uuid;

/// Canonical note record.
///
/// Timestamps are Unix epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "NoteWire", rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    pub color: ColorChannels,
    pub is_pinned: bool,
    /// Free-form label; empty means uncategorized.
    pub category: String,
    #[serde(rename = "createdDate")]
    pub created_at: i64,
    #[serde(rename = "lastModifiedDate")]
    pub last_modified_at: i64,
}

/// Editable note fields, without identity or timestamps.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub color: ColorChannels,
    pub category: String,
    pub is_pinned: bool,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_color(mut self, color: ColorChannels) -> Self {
        self.color = color;
        self
    }

    pub fn pinned(mut self, is_pinned: bool) -> Self {
        self.is_pinned = is_pinned;
        self
    }
}

/// Validation errors for note invariants.
#[derive(Debug, Clone, PartialEq)]
pub enum NoteValidationError {
    NilId,
    ModifiedBeforeCreated { created: i64, modified: i64 },
    ChannelOutOfRange { channel: &'static str, value: f64 },
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "note id must not be nil"),
            Self::ModifiedBeforeCreated { created, modified } => write!(
                f,
                "lastModifiedDate ({modified}) must be >= createdDate ({created})"
            ),
            Self::ChannelOutOfRange { channel, value } => {
                write!(f, "color channel `{channel}` out of range [0, 1]: {value}")
            }
        }
    }
}

impl Error for NoteValidationError {}

impl Note {
    /// Creates a note from a draft with a generated id and both timestamps
    /// set to `now_ms`.
    pub fn from_draft(draft: NoteDraft, now_ms: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: draft.title,
            content: draft.content,
            color: draft.color,
            is_pinned: draft.is_pinned,
            category: draft.category,
            created_at: now_ms,
            last_modified_at: now_ms,
        }
    }

    /// Returns the editable subset of this note.
    pub fn to_draft(&self) -> NoteDraft {
        NoteDraft {
            title: self.title.clone(),
            content: self.content.clone(),
            color: self.color,
            category: self.category.clone(),
            is_pinned: self.is_pinned,
        }
    }

    /// Validates identity, timestamp ordering and color range.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if self.id.is_nil() {
            return Err(NoteValidationError::NilId);
        }
        if self.last_modified_at < self.created_at {
            return Err(NoteValidationError::ModifiedBeforeCreated {
                created: self.created_at,
                modified: self.last_modified_at,
            });
        }
        if let Some((channel, value)) = self.color.out_of_range_channel() {
            return Err(NoteValidationError::ChannelOutOfRange { channel, value });
        }
        Ok(())
    }

    /// Case-insensitive substring match over title, content and category.
    ///
    /// `needle` must already be lowercased.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        [&self.title, &self.content, &self.category]
            .into_iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NoteWire {
    id: NoteId,
    title: String,
    content: String,
    color: ColorChannels,
    #[serde(default)]
    is_pinned: bool,
    #[serde(default)]
    category: String,
    created_date: i64,
    last_modified_date: i64,
}

impl TryFrom<NoteWire> for Note {
    type Error = NoteValidationError;

    fn try_from(wire: NoteWire) -> Result<Self, Self::Error> {
        let note = Note {
            id: wire.id,
            title: wire.title,
            content: wire.content,
            // Why: float drift on disk is a codec concern, not corruption; one
            // bad channel must not discard the whole document.
            color: encode(decode(wire.color)),
            is_pinned: wire.is_pinned,
            category: wire.category,
            created_at: wire.created_date,
            last_modified_at: wire.last_modified_date,
        };
        note.validate()?;
        Ok(note)
    }
}
