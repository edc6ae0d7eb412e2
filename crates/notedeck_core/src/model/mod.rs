//! Note domain model.
//!
//! # Responsibility
//! - Define the note record, its editable draft and its color encoding.
//!
//! # Invariants
//! - Every note is identified by a stable `NoteId`.
//! - Deletion is a hard delete; there is no tombstone state.

pub mod color;
pub mod note;
